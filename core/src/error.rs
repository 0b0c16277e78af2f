use thiserror::Error;

#[derive(Debug, Error)]
pub enum TimestampError {
    #[error("timestamp is empty")]
    Empty,

    #[error("invalid ISO-8601 timestamp {value:?}: {source}")]
    Invalid {
        value: String,
        #[source]
        source: chrono::ParseError,
    },
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ParseFilterError {
    #[error("unknown time range: {0}")]
    TimeRange(String),

    #[error("unknown metric: {0}")]
    Metric(String),

    #[error("unknown region: {0}")]
    Region(String),
}
