use axum::{Router, routing::get};
use tower::ServiceBuilder;
use tower_http::cors::{Any, CorsLayer};

use crate::handlers::{get_health, get_ready, get_samples, get_telemetry};
use crate::state::AppState;

pub fn router(state: AppState) -> Router {
    let cors = CorsLayer::new()
        .allow_methods(Any)
        .allow_origin(Any)
        .allow_headers(Any);

    Router::new()
        .route("/metrics", get(get_samples))
        .route("/telemetry", get(get_telemetry))
        .route("/healthz", get(get_health))
        .route("/readyz", get(get_ready))
        .layer(ServiceBuilder::new().layer(cors))
        .with_state(state)
}
