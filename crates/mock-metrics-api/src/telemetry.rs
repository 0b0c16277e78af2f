use anyhow::Context;
use env_logger::Env;
use metrics_exporter_prometheus::{PrometheusBuilder, PrometheusHandle};

pub fn init_logger(level: log::Level) {
    env_logger::Builder::from_env(Env::default().default_filter_or(level.as_str())).init();
}

pub fn install_metrics_recorder() -> anyhow::Result<PrometheusHandle> {
    PrometheusBuilder::new()
        .add_global_label("app", "mock-metrics-api")
        .install_recorder()
        .context("Failed to install metrics recorder")
}

pub fn emit_startup_metrics() {
    metrics::gauge!("mock_metrics_api_up").set(1.0);
    metrics::counter!("mock_metrics_api_start_total").increment(1);
}

pub fn set_buffered_samples(count: usize) {
    metrics::gauge!("mock_metrics_api_buffered_samples").set(count as f64);
}

pub fn record_samples_served(count: usize) {
    metrics::counter!("mock_metrics_api_requests_total").increment(1);
    metrics::histogram!("mock_metrics_api_samples_served").record(count as f64);
}
