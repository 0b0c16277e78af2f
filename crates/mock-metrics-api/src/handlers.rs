use axum::{
    Json,
    extract::{Query, State},
    http::StatusCode,
};
use dashboard_core::Snapshot;
use serde::{Deserialize, Serialize};

use crate::state::AppState;
use crate::telemetry;

#[derive(Debug, Default, Deserialize)]
pub struct SamplesQuery {
    pub count: Option<String>,
}

#[derive(Serialize)]
pub struct HealthResponse {
    pub status: &'static str,
}

#[derive(Serialize)]
pub struct ReadinessResponse {
    pub status: &'static str,
    pub uptime_seconds: u64,
    pub newest_sample_age_seconds: Option<u64>,
    pub buffered_samples: usize,
}

/// Missing, non-numeric and zero counts all fall back to the default.
fn resolve_count(raw: Option<&str>, default_count: usize) -> usize {
    raw.and_then(|v| v.trim().parse::<usize>().ok())
        .filter(|&n| n > 0)
        .unwrap_or(default_count)
}

pub async fn get_samples(
    State(state): State<AppState>,
    Query(query): Query<SamplesQuery>,
) -> Json<Vec<Snapshot>> {
    let count = resolve_count(query.count.as_deref(), state.default_count);
    let samples = state.samples.latest(count).await;
    telemetry::record_samples_served(samples.len());
    Json(samples)
}

pub async fn get_telemetry(State(state): State<AppState>) -> String {
    state.metrics.render()
}

pub async fn get_health() -> Json<HealthResponse> {
    Json(HealthResponse { status: "ok" })
}

pub async fn get_ready(State(state): State<AppState>) -> (StatusCode, Json<ReadinessResponse>) {
    let readiness = state.readiness().await;
    let status = if readiness.is_ready { "ready" } else { "stale" };
    let status_code = if readiness.is_ready {
        StatusCode::OK
    } else {
        StatusCode::SERVICE_UNAVAILABLE
    };

    (
        status_code,
        Json(ReadinessResponse {
            status,
            uptime_seconds: state.uptime_seconds(),
            newest_sample_age_seconds: readiness.newest_sample_age_seconds,
            buffered_samples: readiness.buffered_samples,
        }),
    )
}
