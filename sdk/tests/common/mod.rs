#![allow(dead_code)]

use std::time::Duration;

use axum::Router;
use chrono::{TimeDelta, Utc};
use dashboard_sdk::RetryPolicy;
use serde_json::{Value, json};
use tokio::net::TcpListener;

pub async fn spawn_router(
    router: Router,
) -> Result<(String, tokio::task::JoinHandle<()>), std::io::Error> {
    let listener = TcpListener::bind("127.0.0.1:0").await?;
    let addr = listener.local_addr()?;
    let handle = tokio::spawn(async move {
        if let Err(err) = axum::serve(listener, router.into_make_service()).await {
            eprintln!("test server stopped: {err}");
        }
    });
    Ok((format!("http://{}/", addr), handle))
}

/// Retries with millisecond delays so failure paths stay fast.
pub fn fast_retry(max_retries: u32) -> RetryPolicy {
    RetryPolicy::new(
        max_retries,
        Duration::from_millis(5),
        Duration::from_millis(20),
    )
}

pub fn sample_json(secs_ago: i64, active_users: u64) -> Value {
    let timestamp = (Utc::now() - TimeDelta::seconds(secs_ago))
        .to_rfc3339_opts(chrono::SecondsFormat::Millis, true);
    json!({
        "timestamp": timestamp,
        "activeUsers": active_users,
        "newUsers": 12,
        "revenue": 1234.56,
        "churnRate": 0.042,
        "byRegion": { "US": 10, "EU": 20, "LATAM": 30, "APAC": 40 }
    })
}
