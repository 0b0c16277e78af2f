use std::time::Instant;

use chrono::{DateTime, Utc};
use dashboard_core::Snapshot;
use metrics_exporter_prometheus::PrometheusHandle;

use crate::buffer::SampleBuffer;

#[derive(Debug, Clone, Copy)]
pub struct Readiness {
    pub is_ready: bool,
    pub newest_sample_age_seconds: Option<u64>,
    pub buffered_samples: usize,
}

#[derive(Clone)]
pub struct AppState {
    pub metrics: PrometheusHandle,
    pub started_at: Instant,
    pub samples: SampleBuffer,
    pub default_count: usize,
    pub stale_after_sec: u64,
}

impl AppState {
    pub fn new(
        metrics: PrometheusHandle,
        samples: SampleBuffer,
        default_count: usize,
        stale_after_sec: u64,
    ) -> Self {
        Self {
            metrics,
            started_at: Instant::now(),
            samples,
            default_count,
            stale_after_sec,
        }
    }

    pub fn uptime_seconds(&self) -> u64 {
        self.started_at.elapsed().as_secs()
    }

    pub async fn readiness(&self) -> Readiness {
        let newest = self.samples.newest().await;
        let newest_sample_age_seconds = sample_age_seconds(newest.as_ref(), Utc::now());
        Readiness {
            is_ready: is_sample_fresh(newest_sample_age_seconds, self.stale_after_sec),
            newest_sample_age_seconds,
            buffered_samples: self.samples.len().await,
        }
    }
}

fn sample_age_seconds(newest: Option<&Snapshot>, now: DateTime<Utc>) -> Option<u64> {
    newest.map(|sample| {
        let age = now - sample.timestamp.instant();
        u64::try_from(age.num_seconds()).unwrap_or(0)
    })
}

fn is_sample_fresh(sample_age_seconds: Option<u64>, stale_after_sec: u64) -> bool {
    sample_age_seconds
        .map(|age| age <= stale_after_sec)
        .unwrap_or(false)
}
