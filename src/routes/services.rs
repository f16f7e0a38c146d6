/**
 * Service Routes
 * CRUD over the studio's service packages
 */
use axum::{
    extract::{Path, State},
    http::{HeaderMap, StatusCode},
    response::IntoResponse,
    Json,
};
use serde::{Deserialize, Serialize};

use crate::routes::{
    store_error_response, verify_admin, ApiState, ErrorResponse, SuccessResponse,
};
use crate::store::models::{NewService, Service};

// ============================================================================
// Request/Response Types
// ============================================================================

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ServicesResponse {
    pub services: Vec<Service>,
}

/// Body for create and update. `finalPrice` is never accepted from the
/// caller; the store derives it.
#[derive(Debug, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ServiceRequest {
    pub name: String,
    pub base_price: i64,
    pub discount: u32,
    #[serde(default)]
    pub description: String,
}

// ============================================================================
// Validation
// ============================================================================

fn validate_service(payload: &ServiceRequest) -> Result<(), &'static str> {
    if payload.name.trim().is_empty() {
        return Err("Service name is required");
    }
    if payload.base_price < 0 {
        return Err("Base price cannot be negative");
    }
    if payload.discount > 100 {
        return Err("Discount must be between 0 and 100");
    }
    Ok(())
}

fn bad_request(reason: &str) -> (StatusCode, Json<ErrorResponse>) {
    (
        StatusCode::BAD_REQUEST,
        Json(ErrorResponse {
            error: reason.to_string(),
            message: None,
        }),
    )
}

// ============================================================================
// Handlers
// ============================================================================

/// GET /api/services
pub async fn list_services(State(store): State<ApiState>) -> impl IntoResponse {
    let services = store.services().await;
    (StatusCode::OK, Json(ServicesResponse { services }))
}

/// POST /api/services (admin)
pub async fn create_service(
    State(store): State<ApiState>,
    headers: HeaderMap,
    Json(payload): Json<ServiceRequest>,
) -> impl IntoResponse {
    if let Err(err_response) = verify_admin(&headers, &store).await {
        return err_response.into_response();
    }
    if let Err(reason) = validate_service(&payload) {
        return bad_request(reason).into_response();
    }

    match store
        .add_service(NewService {
            name: payload.name,
            base_price: payload.base_price,
            discount: payload.discount,
            description: payload.description,
        })
        .await
    {
        Ok(service) => {
            tracing::info!("Service created: {} (id={})", service.name, service.id);
            (StatusCode::CREATED, Json(service)).into_response()
        }
        Err(err) => store_error_response(err).into_response(),
    }
}

/// PUT /api/services/{id} (admin)
/// Full-record replace matched by id; 404 when the id is unknown.
pub async fn update_service(
    State(store): State<ApiState>,
    headers: HeaderMap,
    Path(service_id): Path<u64>,
    Json(payload): Json<ServiceRequest>,
) -> impl IntoResponse {
    if let Err(err_response) = verify_admin(&headers, &store).await {
        return err_response.into_response();
    }
    if let Err(reason) = validate_service(&payload) {
        return bad_request(reason).into_response();
    }

    let replacement = Service {
        id: service_id,
        final_price: 0, // recomputed by the store
        name: payload.name,
        base_price: payload.base_price,
        discount: payload.discount,
        description: payload.description,
    };

    match store.update_service(replacement).await {
        Ok(service) => (StatusCode::OK, Json(service)).into_response(),
        Err(err) => store_error_response(err).into_response(),
    }
}

/// DELETE /api/services/{id} (admin)
/// Idempotent; an unknown id is a harmless no-op.
pub async fn delete_service(
    State(store): State<ApiState>,
    headers: HeaderMap,
    Path(service_id): Path<u64>,
) -> impl IntoResponse {
    if let Err(err_response) = verify_admin(&headers, &store).await {
        return err_response.into_response();
    }

    match store.delete_service(service_id).await {
        Ok(()) => {
            tracing::info!("Service deleted: {}", service_id);
            (StatusCode::OK, Json(SuccessResponse { success: true })).into_response()
        }
        Err(err) => store_error_response(err).into_response(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::routes::testing::{admin_token, delete_authed, get, json_request, send, test_state};
    use axum::routing::{get as get_route, put};
    use axum::Router;

    fn services_router(state: ApiState) -> Router {
        Router::new()
            .route(
                "/api/services",
                get_route(list_services).post(create_service),
            )
            .route(
                "/api/services/{id}",
                put(update_service).delete(delete_service),
            )
            .with_state(state)
    }

    fn sample_request() -> ServiceRequest {
        ServiceRequest {
            name: "X".to_string(),
            base_price: 1000,
            discount: 10,
            description: "test package".to_string(),
        }
    }

    #[tokio::test]
    async fn test_list_returns_seeded_services() {
        let (status, bytes) = send(services_router(test_state()), get("/api/services")).await;
        assert_eq!(status, StatusCode::OK);
        let body: serde_json::Value = serde_json::from_slice(&bytes).unwrap();
        assert_eq!(body["services"].as_array().unwrap().len(), 4);
    }

    #[tokio::test]
    async fn test_create_requires_admin_token() {
        let (status, _) = send(
            services_router(test_state()),
            json_request("POST", "/api/services", None, &sample_request()),
        )
        .await;
        assert_eq!(status, StatusCode::UNAUTHORIZED);
    }

    #[tokio::test]
    async fn test_create_computes_final_price() {
        let state = test_state();
        let token = admin_token(&state).await;
        let (status, bytes) = send(
            services_router(state),
            json_request("POST", "/api/services", Some(&token), &sample_request()),
        )
        .await;
        assert_eq!(status, StatusCode::CREATED);
        let service: Service = serde_json::from_slice(&bytes).unwrap();
        assert_eq!(service.final_price, 900);
    }

    #[tokio::test]
    async fn test_create_rejects_discount_over_100() {
        let state = test_state();
        let token = admin_token(&state).await;
        let mut payload = sample_request();
        payload.discount = 101;
        let (status, _) = send(
            services_router(state),
            json_request("POST", "/api/services", Some(&token), &payload),
        )
        .await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn test_update_recomputes_final_price() {
        let state = test_state();
        let token = admin_token(&state).await;
        let mut payload = sample_request();
        payload.base_price = 2000;
        payload.discount = 50;
        let (status, bytes) = send(
            services_router(state),
            json_request("PUT", "/api/services/1", Some(&token), &payload),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        let service: Service = serde_json::from_slice(&bytes).unwrap();
        assert_eq!(service.final_price, 1000);
    }

    #[tokio::test]
    async fn test_update_unknown_id_is_not_found() {
        let state = test_state();
        let token = admin_token(&state).await;
        let (status, _) = send(
            services_router(state),
            json_request("PUT", "/api/services/999999", Some(&token), &sample_request()),
        )
        .await;
        assert_eq!(status, StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn test_delete_removes_from_listing() {
        let state = test_state();
        let token = admin_token(&state).await;
        let (status, _) = send(
            services_router(state.clone()),
            delete_authed("/api/services/1", &token),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        assert!(!state.services().await.iter().any(|s| s.id == 1));
    }
}
