pub mod client;
pub mod config;
pub mod error;
pub mod poller;
pub mod retry;
mod validators;

pub use client::MetricsClient;
pub use config::{Config, ConfigBuilder};
pub use error::{ConfigError, FetchError};
pub use poller::{MetricsPoller, PollerHandle};
pub use retry::RetryPolicy;
