use std::time::{Duration, Instant};

use dashboard_core::SharedMetricsStore;
use log::{error, info};
use tokio::{task::JoinHandle, time::MissedTickBehavior};

use crate::{client::MetricsClient, config::Config, error::FetchError, retry::RetryPolicy};

const FETCH_TOTAL: &str = "dashboard_fetch_total";
const FETCH_DURATION: &str = "dashboard_fetch_duration_seconds";

/// Periodically pulls samples from the source into a shared store.
pub struct MetricsPoller {
    client: MetricsClient,
    store: SharedMetricsStore,
    metrics_count: usize,
    polling_interval: Duration,
    retry: RetryPolicy,
}

impl MetricsPoller {
    pub fn new(client: MetricsClient, store: SharedMetricsStore, config: &Config) -> Self {
        Self {
            client,
            store,
            metrics_count: config.metrics_count,
            polling_interval: config.polling_interval,
            retry: config.retry,
        }
    }

    /// One fetch-and-merge cycle. On failure the error is recorded on the
    /// store and the held samples are left untouched.
    pub async fn poll_once(&self) -> Result<usize, FetchError> {
        self.store.set_loading(true).await;
        let started = Instant::now();
        let result = self
            .client
            .fetch_with_retry(self.metrics_count, &self.retry)
            .await;
        metrics::histogram!(FETCH_DURATION).record(started.elapsed().as_secs_f64());

        match result {
            Ok(samples) => {
                metrics::counter!(FETCH_TOTAL, "outcome" => "success").increment(1);
                let added = self.store.merge_samples(samples).await;
                self.store.set_loading(false).await;
                Ok(added)
            }
            Err(err) => {
                metrics::counter!(FETCH_TOTAL, "outcome" => "failure").increment(1);
                self.store.set_error(Some(err.to_string())).await;
                Err(err)
            }
        }
    }

    pub fn spawn(self) -> PollerHandle {
        PollerHandle {
            task: tokio::spawn(self.run()),
        }
    }

    async fn run(self) {
        info!(
            "polling {} every {}ms (count={})",
            self.client.base_url(),
            self.polling_interval.as_millis(),
            self.metrics_count
        );

        // The first tick completes immediately.
        let mut ticker = tokio::time::interval(self.polling_interval);
        ticker.set_missed_tick_behavior(MissedTickBehavior::Skip);

        loop {
            ticker.tick().await;
            if let Err(err) = self.poll_once().await {
                error!("metrics poll failed after retries: {err}");
            }
        }
    }
}

/// Owner of a running poller task.
#[derive(Debug)]
pub struct PollerHandle {
    task: JoinHandle<()>,
}

impl PollerHandle {
    /// Cancels the poller. An in-flight fetch is dropped with the task.
    pub fn stop(self) {
        self.task.abort();
    }

    pub fn is_finished(&self) -> bool {
        self.task.is_finished()
    }
}
