use std::time::Duration;

use dashboard_core::SharedMetricsStore;
use dashboard_sdk::{MetricsClient, MetricsPoller};
use env_logger::Env;
use log::{info, warn};
use tokio::time::MissedTickBehavior;

use crate::config::AppConfig;
use crate::report::DashboardReport;

fn load_config() -> anyhow::Result<AppConfig> {
    dotenv::dotenv()
        .map_err(|err| {
            eprintln!(".env file error: {}", err);
            err
        })
        .ok();

    AppConfig::fetch()
}

pub async fn bootstrap() -> anyhow::Result<()> {
    let app_config = load_config()?;
    let AppConfig { dashboard, client } = &app_config;

    env_logger::Builder::from_env(Env::default().default_filter_or(dashboard.log_level.as_str()))
        .init();
    info!(
        "dashboard config: api_base_url={}, metrics_count={}, polling_interval_ms={}, filters={:?}, page_size={}",
        client.api_base_url,
        client.metrics_count,
        client.polling_interval.as_millis(),
        dashboard.filters(),
        dashboard.page_size
    );

    let store = SharedMetricsStore::with_filters(dashboard.filters());
    let metrics_client = MetricsClient::new(client)?;
    let poller = MetricsPoller::new(metrics_client, store.clone(), client).spawn();

    let mut ticker = tokio::time::interval(Duration::from_millis(dashboard.report_interval_ms));
    ticker.set_missed_tick_behavior(MissedTickBehavior::Skip);

    let shutdown = tokio::signal::ctrl_c();
    tokio::pin!(shutdown);

    loop {
        tokio::select! {
            result = &mut shutdown => {
                if let Err(err) = result {
                    warn!("failed waiting for Ctrl+C signal: {err}");
                }
                break;
            }
            _ = ticker.tick() => {
                store.refresh().await;
                let report = DashboardReport::from_store(&*store.read().await, dashboard.page_size);
                report.log();
            }
        }
    }

    info!("shutdown signal received");
    poller.stop();
    Ok(())
}
