use dashboard_core::Snapshot;
use log::{debug, warn};
use reqwest::{Client as HttpClient, Response, Url};
use serde::Deserialize;

use crate::{config::Config, error::FetchError, retry::RetryPolicy};

#[derive(Deserialize)]
struct ApiErrorBody {
    error: String,
}

/// HTTP client for the metric sample source.
#[derive(Debug, Clone)]
pub struct MetricsClient {
    http: HttpClient,
    base_url: Url,
}

impl MetricsClient {
    pub fn new(config: &Config) -> Result<Self, FetchError> {
        let http = HttpClient::builder()
            .timeout(config.request_timeout)
            .build()?;
        Ok(Self {
            http,
            base_url: config.api_base_url.clone(),
        })
    }

    /// Client with default transport settings, mostly useful in tests.
    pub fn with_base_url(base_url: impl AsRef<str>) -> Result<Self, FetchError> {
        let base_url = crate::validators::validate_url(base_url.as_ref())
            .map_err(|e| FetchError::InvalidUrl(e.to_string()))?;
        Ok(Self {
            http: HttpClient::new(),
            base_url,
        })
    }

    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    /// Fetches the `count` most recent samples, newest first.
    pub async fn get_metrics(&self, count: usize) -> Result<Vec<Snapshot>, FetchError> {
        let mut url = self
            .base_url
            .join("metrics")
            .map_err(|e| FetchError::InvalidUrl(e.to_string()))?;
        url.query_pairs_mut()
            .append_pair("count", &count.to_string());

        let response = self.http.get(url).send().await?;
        let samples = Self::decode(response).await?;
        debug!("fetched {} samples", samples.len());
        Ok(samples)
    }

    /// Retries every failure kind until the policy is exhausted, then
    /// returns the last error.
    pub async fn fetch_with_retry(
        &self,
        count: usize,
        policy: &RetryPolicy,
    ) -> Result<Vec<Snapshot>, FetchError> {
        let mut attempt = 0;
        loop {
            match self.get_metrics(count).await {
                Ok(samples) => return Ok(samples),
                Err(err) if attempt < policy.max_retries => {
                    let delay = policy.delay_for(attempt);
                    attempt += 1;
                    warn!(
                        "metrics fetch failed (retry {attempt}/{} in {}ms): {err}",
                        policy.max_retries,
                        delay.as_millis()
                    );
                    tokio::time::sleep(delay).await;
                }
                Err(err) => return Err(err),
            }
        }
    }

    async fn decode(response: Response) -> Result<Vec<Snapshot>, FetchError> {
        let status = response.status();
        let body = response.text().await?;

        if !status.is_success() {
            let message = serde_json::from_str::<ApiErrorBody>(&body)
                .map(|b| b.error)
                .unwrap_or(body);
            return Err(FetchError::Api { status, message });
        }

        let samples: Vec<Snapshot> = serde_json::from_str(&body).map_err(FetchError::Decode)?;
        for sample in &samples {
            sample.validate().map_err(|reason| FetchError::Schema {
                timestamp: sample.timestamp.to_string(),
                reason,
            })?;
        }
        Ok(samples)
    }
}
