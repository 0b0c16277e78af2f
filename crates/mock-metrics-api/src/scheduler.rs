use std::time::Duration;

use chrono::Utc;
use log::{debug, info};
use tokio::time::MissedTickBehavior;

use crate::buffer::SampleBuffer;
use crate::generator::random_snapshot;
use crate::telemetry;

pub fn spawn_sample_appender(
    samples: SampleBuffer,
    append_interval_ms: u64,
) -> tokio::task::JoinHandle<()> {
    tokio::spawn(async move {
        run_appender_loop(samples, append_interval_ms).await;
    })
}

async fn run_appender_loop(samples: SampleBuffer, append_interval_ms: u64) {
    let interval_duration = Duration::from_millis(append_interval_ms.max(1));
    info!(
        "starting sample appender with interval {}ms",
        interval_duration.as_millis()
    );

    let mut ticker = tokio::time::interval(interval_duration);
    ticker.set_missed_tick_behavior(MissedTickBehavior::Skip);
    // Seeding already covered "now"; the first append lands one interval later.
    ticker.tick().await;

    loop {
        ticker.tick().await;
        append_tick(&samples).await;
    }
}

pub async fn append_tick(samples: &SampleBuffer) {
    let sample = random_snapshot(Utc::now());
    debug!("appending sample {}", sample.timestamp);
    samples.push(sample).await;
    telemetry::set_buffered_samples(samples.len().await);
}
