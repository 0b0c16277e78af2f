use reqwest::StatusCode;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("invalid config value: {0}")]
    InvalidValue(String),
    #[error("missing config: {0}")]
    Missing(String),
}

/// Failure of a single metrics fetch. A fetch either yields every sample of
/// the response or one of these.
#[derive(Error, Debug)]
pub enum FetchError {
    #[error("invalid metrics URL: {0}")]
    InvalidUrl(String),

    #[error("metrics transport error: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("metrics API error ({status}): {message}")]
    Api { status: StatusCode, message: String },

    #[error("failed to decode metrics payload: {0}")]
    Decode(#[source] serde_json::Error),

    #[error("invalid sample at {timestamp}: {reason}")]
    Schema { timestamp: String, reason: String },
}

impl FetchError {
    pub fn status(&self) -> Option<StatusCode> {
        match self {
            FetchError::Api { status, .. } => Some(*status),
            FetchError::Transport(err) => err.status(),
            _ => None,
        }
    }
}
