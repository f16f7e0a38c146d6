//! Studio Backend - library for app logic and testing

pub mod logging;
pub mod routes;
pub mod store;

use axum::{
    http::{HeaderValue, Method},
    middleware,
    routing::{delete, get, patch, post, put},
    Router,
};
use std::net::SocketAddr;
use std::sync::Arc;
use tower_http::{
    compression::CompressionLayer, cors::CorsLayer, limit::RequestBodyLimitLayer, trace::TraceLayer,
};

use routes::ApiState;
use store::{storage::MemoryStorage, StoreConfig, StudioStore};

/// Configure CORS from environment variables.
/// Uses ALLOWED_ORIGINS (comma-separated) or FRONTEND_ORIGIN.
/// Falls back to localhost dev origins.
pub fn configure_cors() -> CorsLayer {
    let allowed_origins = std::env::var("ALLOWED_ORIGINS")
        .ok()
        .and_then(|s| {
            let origins: Vec<HeaderValue> = s
                .split(',')
                .filter_map(|origin| origin.trim().parse().ok())
                .collect();
            if origins.is_empty() {
                None
            } else {
                Some(origins)
            }
        })
        .or_else(|| {
            std::env::var("FRONTEND_ORIGIN")
                .ok()
                .and_then(|s| s.parse().ok())
                .map(|origin| vec![origin])
        })
        .unwrap_or_else(|| {
            vec![
                "http://localhost:3000".parse().unwrap(),
                "http://127.0.0.1:3000".parse().unwrap(),
            ]
        });

    CorsLayer::new()
        .allow_origin(allowed_origins)
        .allow_methods([
            Method::GET,
            Method::POST,
            Method::PUT,
            Method::PATCH,
            Method::DELETE,
        ])
        .allow_headers([
            axum::http::header::CONTENT_TYPE,
            axum::http::header::AUTHORIZATION,
        ])
        .allow_credentials(true)
}

/// Create and configure the application router.
pub fn create_app(store: ApiState) -> Router {
    let cors = configure_cors();
    tracing::info!("CORS configured");

    Router::new()
        .route("/api/auth/login", post(routes::auth::login))
        .route("/api/auth/register", post(routes::auth::register))
        .route(
            "/api/auth/register-admin",
            post(routes::auth::register_admin),
        )
        .route("/api/portfolio", get(routes::portfolio::list_categories))
        .route(
            "/api/portfolio/{category}/photos",
            get(routes::portfolio::photos_by_category).post(routes::portfolio::upload_photo),
        )
        .route(
            "/api/portfolio/photos/{id}",
            delete(routes::portfolio::delete_photo),
        )
        .route(
            "/api/services",
            get(routes::services::list_services).post(routes::services::create_service),
        )
        .route(
            "/api/services/{id}",
            put(routes::services::update_service).delete(routes::services::delete_service),
        )
        .route(
            "/api/content",
            get(routes::content::get_content).patch(routes::content::update_content),
        )
        .route(
            "/api/enquiries",
            get(routes::enquiries::list_enquiries).post(routes::enquiries::submit_enquiry),
        )
        .route(
            "/api/feedback",
            get(routes::feedback::list_feedback).post(routes::feedback::submit_feedback),
        )
        .route(
            "/api/feedback/{id}",
            delete(routes::feedback::delete_feedback),
        )
        .route("/api/users", get(routes::users::list_users))
        .route("/api/users/{id}", patch(routes::users::update_user))
        .route("/api/export/users", get(routes::export::export_users))
        .route(
            "/api/export/enquiries",
            get(routes::export::export_enquiries),
        )
        .route("/api/export/feedback", get(routes::export::export_feedback))
        .route("/health", get(routes::health::health_check))
        .route(
            "/health/detailed",
            get(routes::health::detailed_health_check),
        )
        .layer(logging::middleware::propagate_request_id_layer())
        .layer(middleware::from_fn(logging::middleware::log_request))
        .layer(logging::middleware::request_id_layer())
        .layer(TraceLayer::new_for_http())
        // Compress responses with gzip automatically
        .layer(CompressionLayer::new())
        // 8 MB request body cap; photo uploads are capped at 5 MB before
        // multipart framing overhead
        .layer(RequestBodyLimitLayer::new(8 * 1024 * 1024))
        .layer(cors)
        .with_state(store)
}

/// Run the server (used by main).
pub async fn run() {
    dotenvy::dotenv().ok();

    // Guards MUST be held for the programme's lifetime; dropping them early
    // shuts down background log-writer threads and loses buffered log lines.
    let _log_guards = logging::init();

    routes::health::init_start_time();

    let config = StoreConfig::from_env();

    // Warn (don't panic) about default admin credentials in production.
    let environment = std::env::var("ENVIRONMENT").unwrap_or_default();
    if environment == "production" {
        let defaults = StoreConfig::default();
        if config.admin_email == defaults.admin_email {
            tracing::warn!(
                "SECURITY: ADMIN_EMAIL is using an insecure default. \
                 Set ADMIN_EMAIL env var to a real address."
            );
        }
        if config.admin_password == defaults.admin_password {
            tracing::warn!(
                "SECURITY: ADMIN_PASSWORD is using the insecure default 'admin123'. \
                 Set ADMIN_PASSWORD to a strong value."
            );
        }
    }

    tracing::info!(
        "Store latency set to {}ms",
        config.latency.as_millis()
    );

    let store: ApiState = Arc::new(StudioStore::new(Arc::new(MemoryStorage::new()), &config));
    let app = create_app(store);

    // Bind address is configurable via HOST / PORT env vars, defaulting to
    // 127.0.0.1:8080 so existing dev setups keep working unchanged.
    let host = std::env::var("HOST").unwrap_or_else(|_| "127.0.0.1".to_string());
    let port: u16 = std::env::var("PORT")
        .ok()
        .and_then(|s| s.parse().ok())
        .unwrap_or(8080);
    let addr: SocketAddr = format!("{}:{}", host, port)
        .parse()
        .expect("Invalid HOST/PORT configuration");
    tracing::info!("Starting server on {}", addr);

    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .expect("Failed to bind to address");

    axum::serve(
        listener,
        app.into_make_service_with_connect_info::<SocketAddr>(),
    )
    .await
    .expect("Server error");
}

#[cfg(test)]
mod tests {
    use super::*;
    use routes::testing::{get, send, test_state};

    #[tokio::test]
    async fn test_full_app_serves_health() {
        let app = create_app(test_state());
        let (status, _) = send(app, get("/health")).await;
        assert_eq!(status, axum::http::StatusCode::OK);
    }

    #[tokio::test]
    async fn test_full_app_serves_portfolio() {
        let app = create_app(test_state());
        let (status, bytes) = send(app, get("/api/portfolio")).await;
        assert_eq!(status, axum::http::StatusCode::OK);
        let body: serde_json::Value = serde_json::from_slice(&bytes).unwrap();
        assert_eq!(body["categories"].as_array().unwrap().len(), 8);
    }
}
