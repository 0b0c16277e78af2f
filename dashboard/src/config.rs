use anyhow::{Context, bail};
use dashboard_core::{DashboardFilters, MetricKind, RegionFilter, TimeRange};
use dashboard_sdk::ConfigBuilder;
use envconfig::Envconfig;

#[derive(Debug, Clone, Envconfig)]
pub struct DashboardConfig {
    #[envconfig(from = "LOG_LEVEL", default = "info")]
    pub log_level: log::Level,

    #[envconfig(from = "DASHBOARD_TIME_RANGE", default = "historical")]
    pub time_range: TimeRange,

    #[envconfig(from = "DASHBOARD_METRIC", default = "activeUsers")]
    pub metric: MetricKind,

    #[envconfig(from = "DASHBOARD_REGION", default = "all")]
    pub region: RegionFilter,

    #[envconfig(from = "DASHBOARD_PAGE_SIZE", default = "200")]
    pub page_size: usize,

    #[envconfig(from = "DASHBOARD_REPORT_INTERVAL_MS", default = "5000")]
    pub report_interval_ms: u64,
}

impl DashboardConfig {
    pub fn filters(&self) -> DashboardFilters {
        DashboardFilters {
            time_range: self.time_range,
            metric: self.metric,
            region: self.region,
        }
    }
}

#[derive(Debug, Clone)]
pub struct AppConfig {
    pub dashboard: DashboardConfig,
    pub client: dashboard_sdk::Config,
}

impl AppConfig {
    pub fn fetch() -> anyhow::Result<Self> {
        let dashboard =
            DashboardConfig::init_from_env().context("Failed to load dashboard config")?;
        validate_positive("DASHBOARD_PAGE_SIZE", dashboard.page_size as u64)?;
        validate_positive("DASHBOARD_REPORT_INTERVAL_MS", dashboard.report_interval_ms)?;

        let client = ConfigBuilder::default()
            .from_env()
            .build()
            .context("Failed to load metrics client config")?;

        Ok(Self { dashboard, client })
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
    use super::{AppConfig, validate_positive};
    use dashboard_core::{MetricKind, Region, RegionFilter, TimeRange};
    use serial_test::serial;

    const VARS: [&str; 4] = [
        "DASHBOARD_TIME_RANGE",
        "DASHBOARD_METRIC",
        "DASHBOARD_REGION",
        "DASHBOARD_PAGE_SIZE",
    ];

    fn clear_env() {
        for var in VARS {
            unsafe {
                std::env::remove_var(var);
            }
        }
    }

    #[test]
    fn rejects_zero() {
        let err = validate_positive("DASHBOARD_PAGE_SIZE", 0).unwrap_err();
        assert!(err.to_string().contains("greater than 0"));
    }

    #[test]
    #[serial]
    fn defaults_show_everything() {
        clear_env();
        let cfg = AppConfig::fetch().expect("defaults are valid");
        let filters = cfg.dashboard.filters();
        assert_eq!(filters.time_range, TimeRange::Historical);
        assert_eq!(filters.metric, MetricKind::ActiveUsers);
        assert_eq!(filters.region, RegionFilter::All);
        assert_eq!(cfg.dashboard.page_size, 200);
        assert_eq!(cfg.client.metrics_count, 20);
    }

    #[test]
    #[serial]
    fn initial_filters_come_from_env() {
        unsafe {
            std::env::set_var("DASHBOARD_TIME_RANGE", "last-hour");
            std::env::set_var("DASHBOARD_METRIC", "churnRate");
            std::env::set_var("DASHBOARD_REGION", "latam");
        }
        let cfg = AppConfig::fetch();
        clear_env();

        let filters = cfg.expect("valid config").dashboard.filters();
        assert_eq!(filters.time_range, TimeRange::LastHour);
        assert_eq!(filters.metric, MetricKind::ChurnRate);
        assert_eq!(filters.region, RegionFilter::Only(Region::Latam));
    }

    #[test]
    #[serial]
    fn unknown_filter_values_fail_to_load() {
        unsafe {
            std::env::set_var("DASHBOARD_TIME_RANGE", "last-week");
        }
        let cfg = AppConfig::fetch();
        clear_env();

        assert!(cfg.is_err());
    }

    #[test]
    #[serial]
    fn zero_page_size_is_rejected() {
        unsafe {
            std::env::set_var("DASHBOARD_PAGE_SIZE", "0");
        }
        let cfg = AppConfig::fetch();
        clear_env();

        let err = cfg.unwrap_err();
        assert!(err.to_string().contains("DASHBOARD_PAGE_SIZE"));
    }
}
