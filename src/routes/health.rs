/**
 * Health Routes
 * Endpoints for checking backend health status
 */
use axum::{extract::State, http::StatusCode, response::IntoResponse, Json};
use chrono::{DateTime, Utc};
use serde::Serialize;
use std::collections::HashMap;
use std::time::Instant;

use crate::routes::ApiState;

// Track server start time for uptime calculation
lazy_static::lazy_static! {
    static ref SERVER_START: Instant = Instant::now();
}

/// Initialize the server start time
pub fn init_start_time() {
    lazy_static::initialize(&SERVER_START);
}

/// Basic health check response
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct HealthResponse {
    pub status: String,
    pub timestamp: DateTime<Utc>,
}

/// Detailed health check response
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DetailedHealthResponse {
    pub status: String,
    pub timestamp: DateTime<Utc>,
    pub uptime: u64,
    pub collections: HashMap<&'static str, usize>,
}

/// GET /health
/// Liveness ping; no store access, so it answers even while the store is
/// busy serializing.
pub async fn health_check() -> impl IntoResponse {
    (
        StatusCode::OK,
        Json(HealthResponse {
            status: "ok".to_string(),
            timestamp: Utc::now(),
        }),
    )
}

/// GET /health/detailed
/// Uptime plus the size of every store collection.
pub async fn detailed_health_check(State(store): State<ApiState>) -> impl IntoResponse {
    let collections = store.collection_counts().await;
    (
        StatusCode::OK,
        Json(DetailedHealthResponse {
            status: "ok".to_string(),
            timestamp: Utc::now(),
            uptime: SERVER_START.elapsed().as_secs(),
            collections,
        }),
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::routes::testing::{get, send, test_state};
    use axum::routing::get as get_route;
    use axum::Router;

    fn health_router(state: crate::routes::ApiState) -> Router {
        Router::new()
            .route("/health", get_route(health_check))
            .route("/health/detailed", get_route(detailed_health_check))
            .with_state(state)
    }

    #[tokio::test]
    async fn test_health_check_reports_ok() {
        let (status, bytes) = send(health_router(test_state()), get("/health")).await;
        assert_eq!(status, StatusCode::OK);
        let body: serde_json::Value = serde_json::from_slice(&bytes).unwrap();
        assert_eq!(body["status"], "ok");
    }

    #[tokio::test]
    async fn test_detailed_health_includes_collection_counts() {
        let (status, bytes) = send(health_router(test_state()), get("/health/detailed")).await;
        assert_eq!(status, StatusCode::OK);
        let body: serde_json::Value = serde_json::from_slice(&bytes).unwrap();
        assert_eq!(body["collections"]["categories"], 8);
        assert_eq!(body["collections"]["services"], 4);
        assert_eq!(body["collections"]["users"], 2);
    }
}
