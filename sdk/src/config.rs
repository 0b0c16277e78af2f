use std::time::Duration;

use url::Url;

use crate::{
    error::ConfigError,
    retry::RetryPolicy,
    validators::{validate_non_negative, validate_positive, validate_url},
};

pub const DEFAULT_API_BASE_URL: &str = "http://localhost:4000/";
pub const DEFAULT_METRICS_COUNT: usize = 20;
pub const DEFAULT_POLLING_INTERVAL: Duration = Duration::from_millis(5_000);
pub const DEFAULT_REQUEST_TIMEOUT: Duration = Duration::from_secs(10);

#[derive(Debug, Clone)]
pub struct Config {
    pub api_base_url: Url,
    pub metrics_count: usize,
    pub polling_interval: Duration,
    pub retry: RetryPolicy,
    pub request_timeout: Duration,
}

pub struct ConfigBuilder {
    api_base_url: Option<String>,
    metrics_count: Option<String>,
    polling_interval_ms: Option<String>,
    retry_count: Option<String>,
    retry_base_delay_ms: Option<String>,
    retry_max_delay_ms: Option<String>,
    request_timeout_ms: Option<String>,
}

impl ConfigBuilder {
    fn empty() -> Self {
        Self {
            api_base_url: None,
            metrics_count: None,
            polling_interval_ms: None,
            retry_count: None,
            retry_base_delay_ms: None,
            retry_max_delay_ms: None,
            request_timeout_ms: None,
        }
    }

    pub fn api_base_url(mut self, api_base_url: String) -> Self {
        self.api_base_url = Some(api_base_url);
        self
    }

    /// Number of samples requested per poll.
    pub fn metrics_count(mut self, metrics_count: usize) -> Self {
        self.metrics_count = Some(metrics_count.to_string());
        self
    }

    pub fn polling_interval(mut self, polling_interval: Duration) -> Self {
        self.polling_interval_ms = Some(polling_interval.as_millis().to_string());
        self
    }

    pub fn retry(mut self, retry: RetryPolicy) -> Self {
        self.retry_count = Some(retry.max_retries.to_string());
        self.retry_base_delay_ms = Some(retry.base_delay.as_millis().to_string());
        self.retry_max_delay_ms = Some(retry.max_delay.as_millis().to_string());
        self
    }

    pub fn request_timeout(mut self, request_timeout: Duration) -> Self {
        self.request_timeout_ms = Some(request_timeout.as_millis().to_string());
        self
    }

    pub fn from_env(mut self) -> Self {
        if let Ok(v) = std::env::var("DASHBOARD_API_BASE_URL") {
            self.api_base_url = Some(v);
        }
        if let Ok(v) = std::env::var("DASHBOARD_METRICS_COUNT") {
            self.metrics_count = Some(v);
        }
        if let Ok(v) = std::env::var("DASHBOARD_POLLING_INTERVAL_MS") {
            self.polling_interval_ms = Some(v);
        }
        if let Ok(v) = std::env::var("DASHBOARD_RETRY_COUNT") {
            self.retry_count = Some(v);
        }
        if let Ok(v) = std::env::var("DASHBOARD_RETRY_BASE_DELAY_MS") {
            self.retry_base_delay_ms = Some(v);
        }
        if let Ok(v) = std::env::var("DASHBOARD_RETRY_MAX_DELAY_MS") {
            self.retry_max_delay_ms = Some(v);
        }
        if let Ok(v) = std::env::var("DASHBOARD_REQUEST_TIMEOUT_MS") {
            self.request_timeout_ms = Some(v);
        }
        self
    }

    pub fn build(self) -> Result<Config, ConfigError> {
        let api_base_url = Self::required(self.api_base_url, "api_base_url")?;
        let api_base_url = validate_url(&api_base_url)
            .map_err(|e| ConfigError::InvalidValue(format!("api_base_url: {e}")))?;

        let defaults = RetryPolicy::default();
        let metrics_count = Self::optional(self.metrics_count, validate_positive, "metrics_count")?
            .map_or(Ok(DEFAULT_METRICS_COUNT), |count| {
                usize::try_from(count).map_err(|e| {
                    ConfigError::InvalidValue(format!("metrics_count: {e}"))
                })
            })?;
        let polling_interval = Self::optional(
            self.polling_interval_ms,
            validate_positive,
            "polling_interval_ms",
        )?
        .map_or(DEFAULT_POLLING_INTERVAL, Duration::from_millis);
        let max_retries = Self::optional(self.retry_count, validate_non_negative, "retry_count")?
            .map_or(Ok(defaults.max_retries), |count| {
                u32::try_from(count)
                    .map_err(|e| ConfigError::InvalidValue(format!("retry_count: {e}")))
            })?;
        let base_delay = Self::optional(
            self.retry_base_delay_ms,
            validate_positive,
            "retry_base_delay_ms",
        )?
        .map_or(defaults.base_delay, Duration::from_millis);
        let max_delay = Self::optional(
            self.retry_max_delay_ms,
            validate_positive,
            "retry_max_delay_ms",
        )?
        .map_or(defaults.max_delay, Duration::from_millis);
        if max_delay < base_delay {
            return Err(ConfigError::InvalidValue(format!(
                "retry_max_delay_ms ({}) is below retry_base_delay_ms ({})",
                max_delay.as_millis(),
                base_delay.as_millis()
            )));
        }
        let request_timeout = Self::optional(
            self.request_timeout_ms,
            validate_positive,
            "request_timeout_ms",
        )?
        .map_or(DEFAULT_REQUEST_TIMEOUT, Duration::from_millis);

        Ok(Config {
            api_base_url,
            metrics_count,
            polling_interval,
            retry: RetryPolicy::new(max_retries, base_delay, max_delay),
            request_timeout,
        })
    }

    fn required(value: Option<String>, field: &str) -> Result<String, ConfigError> {
        value
            .filter(|v| !v.trim().is_empty())
            .ok_or_else(|| ConfigError::Missing(field.to_string()))
    }

    fn optional<T>(
        value: Option<String>,
        parser: impl FnOnce(&str) -> anyhow::Result<T>,
        field: &str,
    ) -> Result<Option<T>, ConfigError> {
        match value {
            Some(raw) => parser(&raw)
                .map(Some)
                .map_err(|e| ConfigError::InvalidValue(format!("{field}: {e}"))),
            None => Ok(None),
        }
    }
}

impl Default for ConfigBuilder {
    fn default() -> Self {
        Self::empty().api_base_url(DEFAULT_API_BASE_URL.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serial_test::serial;

    const ENV_VARS: [&str; 7] = [
        "DASHBOARD_API_BASE_URL",
        "DASHBOARD_METRICS_COUNT",
        "DASHBOARD_POLLING_INTERVAL_MS",
        "DASHBOARD_RETRY_COUNT",
        "DASHBOARD_RETRY_BASE_DELAY_MS",
        "DASHBOARD_RETRY_MAX_DELAY_MS",
        "DASHBOARD_REQUEST_TIMEOUT_MS",
    ];

    fn clear_env() {
        for var in ENV_VARS {
            unsafe {
                std::env::remove_var(var);
            }
        }
    }

    #[test]
    fn test_default_builder() {
        let builder = ConfigBuilder::default();
        assert_eq!(builder.api_base_url.as_deref(), Some(DEFAULT_API_BASE_URL));
        assert!(builder.metrics_count.is_none());
        assert!(builder.polling_interval_ms.is_none());
        assert!(builder.retry_count.is_none());
    }

    #[test]
    fn test_build_with_defaults() {
        let config = ConfigBuilder::default().build().unwrap();
        assert_eq!(config.api_base_url.as_str(), DEFAULT_API_BASE_URL);
        assert_eq!(config.metrics_count, 20);
        assert_eq!(config.polling_interval, Duration::from_millis(5_000));
        assert_eq!(config.retry, RetryPolicy::default());
        assert_eq!(config.request_timeout, DEFAULT_REQUEST_TIMEOUT);
    }

    #[test]
    fn test_build_with_all_fields() {
        let retry = RetryPolicy::new(5, Duration::from_millis(250), Duration::from_secs(4));
        let config = ConfigBuilder::default()
            .api_base_url("https://metrics.example.com/v1".to_string())
            .metrics_count(50)
            .polling_interval(Duration::from_secs(2))
            .retry(retry)
            .request_timeout(Duration::from_secs(3))
            .build()
            .unwrap();

        assert_eq!(config.api_base_url.as_str(), "https://metrics.example.com/v1/");
        assert_eq!(config.metrics_count, 50);
        assert_eq!(config.polling_interval, Duration::from_secs(2));
        assert_eq!(config.retry, retry);
        assert_eq!(config.request_timeout, Duration::from_secs(3));
    }

    #[test]
    fn test_build_missing_base_url() {
        match ConfigBuilder::empty().build().unwrap_err() {
            ConfigError::Missing(field) => assert_eq!(field, "api_base_url"),
            other => panic!("Expected Missing error, got {other:?}"),
        }
    }

    #[test]
    fn test_build_invalid_base_url() {
        let err = ConfigBuilder::default()
            .api_base_url("not-a-valid-url".to_string())
            .build()
            .unwrap_err();
        match err {
            ConfigError::InvalidValue(msg) => assert!(msg.contains("invalid URL")),
            other => panic!("Expected InvalidValue error, got {other:?}"),
        }
    }

    #[test]
    fn test_build_rejects_zero_count() {
        let err = ConfigBuilder::default().metrics_count(0).build().unwrap_err();
        match err {
            ConfigError::InvalidValue(msg) => assert!(msg.starts_with("metrics_count")),
            other => panic!("Expected InvalidValue error, got {other:?}"),
        }
    }

    #[test]
    fn test_build_rejects_inverted_delays() {
        let retry = RetryPolicy::new(3, Duration::from_secs(10), Duration::from_secs(1));
        let err = ConfigBuilder::default().retry(retry).build().unwrap_err();
        assert!(matches!(err, ConfigError::InvalidValue(_)));
    }

    #[test]
    #[serial]
    fn test_from_env_with_all_vars() {
        unsafe {
            std::env::set_var("DASHBOARD_API_BASE_URL", "http://metrics:4000/");
            std::env::set_var("DASHBOARD_METRICS_COUNT", "100");
            std::env::set_var("DASHBOARD_POLLING_INTERVAL_MS", "1500");
            std::env::set_var("DASHBOARD_RETRY_COUNT", "0");
            std::env::set_var("DASHBOARD_RETRY_BASE_DELAY_MS", "200");
            std::env::set_var("DASHBOARD_RETRY_MAX_DELAY_MS", "800");
            std::env::set_var("DASHBOARD_REQUEST_TIMEOUT_MS", "2500");
        }

        let config = ConfigBuilder::default().from_env().build();
        clear_env();

        let config = config.unwrap();
        assert_eq!(config.api_base_url.as_str(), "http://metrics:4000/");
        assert_eq!(config.metrics_count, 100);
        assert_eq!(config.polling_interval, Duration::from_millis(1_500));
        assert_eq!(
            config.retry,
            RetryPolicy::new(0, Duration::from_millis(200), Duration::from_millis(800))
        );
        assert_eq!(config.request_timeout, Duration::from_millis(2_500));
    }

    #[test]
    #[serial]
    fn test_from_env_invalid_number() {
        unsafe {
            std::env::set_var("DASHBOARD_POLLING_INTERVAL_MS", "soon");
        }

        let config = ConfigBuilder::default().from_env().build();
        clear_env();

        match config.unwrap_err() {
            ConfigError::InvalidValue(msg) => assert!(msg.starts_with("polling_interval_ms")),
            other => panic!("Expected InvalidValue error, got {other:?}"),
        }
    }

    #[test]
    #[serial]
    fn test_from_env_override() {
        unsafe {
            std::env::set_var("DASHBOARD_API_BASE_URL", "http://env-url:3000/");
        }

        let config = ConfigBuilder::default()
            .api_base_url("http://localhost:4000/".to_string())
            .from_env()
            .build();
        clear_env();

        // from_env should override the earlier value
        assert_eq!(config.unwrap().api_base_url.as_str(), "http://env-url:3000/");
    }
}
