use chrono::Utc;
use log::info;

use crate::app;
use crate::buffer::SampleBuffer;
use crate::config::MockApiConfig;
use crate::generator::seed_history;
use crate::scheduler;
use crate::server;
use crate::state::AppState;
use crate::telemetry;

pub async fn run() -> anyhow::Result<()> {
    let cfg = load_config()?;
    telemetry::init_logger(cfg.log_level);
    info!(
        "mock metrics API config: bind_addr={}, memory_limit={}, seed_days={}, append_interval_ms={}, default_count={}, stale_after_sec={}",
        cfg.bind_addr(),
        cfg.memory_limit,
        cfg.seed_days,
        cfg.append_interval_ms,
        cfg.default_count,
        cfg.stale_after_sec
    );

    let metrics = telemetry::install_metrics_recorder()?;
    telemetry::emit_startup_metrics();

    let samples = SampleBuffer::new(cfg.memory_limit);
    samples.extend(seed_history(Utc::now(), cfg.seed_days)).await;
    let seeded = samples.len().await;
    telemetry::set_buffered_samples(seeded);
    info!("seeded {seeded} historical samples");

    let appender = scheduler::spawn_sample_appender(samples.clone(), cfg.append_interval_ms);

    let state = AppState::new(metrics, samples, cfg.default_count, cfg.stale_after_sec);
    let app = app::router(state);

    let listener = server::bind(&cfg.bind_addr()).await?;
    let result = server::serve(listener, app, server::shutdown_signal()).await;
    appender.abort();
    metrics::gauge!("mock_metrics_api_up").set(0.0);
    result
}

fn load_config() -> anyhow::Result<MockApiConfig> {
    dotenv::dotenv()
        .map_err(|err| {
            eprintln!(".env file error: {err}");
            err
        })
        .ok();

    MockApiConfig::fetch()
}
