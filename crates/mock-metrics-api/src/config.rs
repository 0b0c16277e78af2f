use anyhow::{Context, bail};
use envconfig::Envconfig;

#[derive(Debug, Clone, Envconfig)]
pub struct MockApiConfig {
    #[envconfig(from = "MOCK_API_HOST", default = "0.0.0.0")]
    pub host: String,
    #[envconfig(from = "MOCK_API_PORT", default = "4000")]
    pub port: u16,
    #[envconfig(from = "LOG_LEVEL", default = "info")]
    pub log_level: log::Level,
    #[envconfig(from = "MOCK_API_MEMORY_LIMIT", default = "1000")]
    pub memory_limit: usize,
    #[envconfig(from = "MOCK_API_SEED_DAYS", default = "30")]
    pub seed_days: u32,
    #[envconfig(from = "MOCK_API_APPEND_INTERVAL_MS", default = "5000")]
    pub append_interval_ms: u64,
    #[envconfig(from = "MOCK_API_DEFAULT_COUNT", default = "20")]
    pub default_count: usize,
    #[envconfig(from = "MOCK_API_STALE_AFTER_SEC", default = "60")]
    pub stale_after_sec: u64,
}

impl MockApiConfig {
    pub fn fetch() -> anyhow::Result<Self> {
        let cfg = Self::init_from_env().context("Failed to load mock API config")?;
        validate_positive("MOCK_API_MEMORY_LIMIT", cfg.memory_limit as u64)?;
        validate_positive("MOCK_API_APPEND_INTERVAL_MS", cfg.append_interval_ms)?;
        validate_positive("MOCK_API_DEFAULT_COUNT", cfg.default_count as u64)?;
        Ok(cfg)
    }

    pub fn bind_addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

fn validate_positive(name: &str, value: u64) -> anyhow::Result<()> {
    if value == 0 {
        bail!("{name} must be greater than 0");
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::{MockApiConfig, validate_positive};
    use serial_test::serial;

    #[test]
    fn rejects_zero() {
        let err = validate_positive("MOCK_API_MEMORY_LIMIT", 0).unwrap_err();
        assert!(err.to_string().contains("greater than 0"));
    }

    #[test]
    fn accepts_positive() {
        validate_positive("MOCK_API_MEMORY_LIMIT", 1).expect("positive value should pass");
    }

    #[test]
    #[serial]
    fn defaults_match_the_public_api() {
        let cfg = MockApiConfig::fetch().expect("defaults are valid");
        assert_eq!(cfg.port, 4000);
        assert_eq!(cfg.memory_limit, 1000);
        assert_eq!(cfg.seed_days, 30);
        assert_eq!(cfg.append_interval_ms, 5000);
        assert_eq!(cfg.default_count, 20);
        assert_eq!(cfg.bind_addr(), "0.0.0.0:4000");
    }

    #[test]
    #[serial]
    fn fetch_rejects_zero_memory_limit() {
        unsafe {
            std::env::set_var("MOCK_API_MEMORY_LIMIT", "0");
        }
        let result = MockApiConfig::fetch();
        unsafe {
            std::env::remove_var("MOCK_API_MEMORY_LIMIT");
        }

        let err = result.unwrap_err();
        assert!(err.to_string().contains("MOCK_API_MEMORY_LIMIT"));
    }
}
