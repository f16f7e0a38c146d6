/**
 * Routes Module
 * API route handlers
 */
use axum::{http::HeaderMap, http::StatusCode, Json};
use serde::Serialize;
use std::sync::Arc;

use crate::store::{error::StoreError, models::Role, models::User, StudioStore};

pub mod auth;
pub mod content;
pub mod enquiries;
pub mod export;
pub mod feedback;
pub mod health;
pub mod portfolio;
pub mod services;
pub mod users;

/// Shared application state: the session store behind every handler.
pub type ApiState = Arc<StudioStore>;

/// Error response shared by every route module
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub error: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

/// Success response (for deletes)
#[derive(Debug, Serialize)]
pub struct SuccessResponse {
    pub success: bool,
}

/// Map a store failure onto its HTTP shape. Status codes follow the error
/// taxonomy: 401 credentials, 409 uniqueness, 403 closed registration,
/// 404 missing target, 500 storage.
pub fn store_error_response(err: StoreError) -> (StatusCode, Json<ErrorResponse>) {
    let status = match &err {
        StoreError::Unauthorized => StatusCode::UNAUTHORIZED,
        StoreError::Conflict(_) => StatusCode::CONFLICT,
        StoreError::Forbidden(_) => StatusCode::FORBIDDEN,
        StoreError::NotFound(_) => StatusCode::NOT_FOUND,
        StoreError::Failure(_) => StatusCode::INTERNAL_SERVER_ERROR,
    };
    if status == StatusCode::INTERNAL_SERVER_ERROR {
        tracing::error!("Store failure: {}", err);
    }
    (
        status,
        Json(ErrorResponse {
            error: err.to_string(),
            message: None,
        }),
    )
}

/// Extract and resolve the bearer token from the Authorization header.
pub async fn verify_auth(
    headers: &HeaderMap,
    store: &StudioStore,
) -> Result<User, (StatusCode, Json<ErrorResponse>)> {
    let token = headers
        .get("authorization")
        .and_then(|v| v.to_str().ok())
        .and_then(|v| v.strip_prefix("Bearer "));

    match token {
        Some(t) => match store.verify_token(t).await {
            Some(user) => Ok(user),
            None => Err((
                StatusCode::UNAUTHORIZED,
                Json(ErrorResponse {
                    error: "Invalid or expired token".to_string(),
                    message: None,
                }),
            )),
        },
        None => Err((
            StatusCode::UNAUTHORIZED,
            Json(ErrorResponse {
                error: "Authorization required".to_string(),
                message: None,
            }),
        )),
    }
}

/// Like `verify_auth`, but the resolved account must hold the admin role.
pub async fn verify_admin(
    headers: &HeaderMap,
    store: &StudioStore,
) -> Result<User, (StatusCode, Json<ErrorResponse>)> {
    let user = verify_auth(headers, store).await?;
    if user.role != Role::Admin {
        return Err((
            StatusCode::FORBIDDEN,
            Json(ErrorResponse {
                error: "Admin access required".to_string(),
                message: None,
            }),
        ));
    }
    Ok(user)
}

#[cfg(test)]
pub(crate) mod testing {
    //! Shared helpers for route tests: a zero-latency store and small
    //! request builders driven through `tower::ServiceExt::oneshot`.

    use super::ApiState;
    use crate::store::{storage::MemoryStorage, StoreConfig, StudioStore};
    use axum::body::{Body, Bytes};
    use axum::http::{Request, StatusCode};
    use axum::Router;
    use std::sync::Arc;
    use std::time::Duration;
    use tower::ServiceExt;

    pub const TEST_ADMIN_EMAIL: &str = "admin@studio.test";
    pub const TEST_ADMIN_PASSWORD: &str = "admin-secret";

    pub fn test_state() -> ApiState {
        let config = StoreConfig {
            latency: Duration::ZERO,
            admin_email: TEST_ADMIN_EMAIL.to_string(),
            admin_password: TEST_ADMIN_PASSWORD.to_string(),
        };
        Arc::new(StudioStore::new(Arc::new(MemoryStorage::new()), &config))
    }

    pub async fn admin_token(store: &StudioStore) -> String {
        store
            .login(TEST_ADMIN_EMAIL, TEST_ADMIN_PASSWORD)
            .await
            .expect("seeded admin login")
            .token
    }

    pub async fn send(app: Router, req: Request<Body>) -> (StatusCode, Bytes) {
        let res = app.oneshot(req).await.unwrap();
        let status = res.status();
        let bytes = axum::body::to_bytes(res.into_body(), usize::MAX)
            .await
            .unwrap();
        (status, bytes)
    }

    pub fn get(uri: &str) -> Request<Body> {
        Request::get(uri).body(Body::empty()).unwrap()
    }

    pub fn get_authed(uri: &str, token: &str) -> Request<Body> {
        Request::get(uri)
            .header("authorization", format!("Bearer {}", token))
            .body(Body::empty())
            .unwrap()
    }

    pub fn json_request(
        method: &str,
        uri: &str,
        token: Option<&str>,
        json: &impl serde::Serialize,
    ) -> Request<Body> {
        let mut builder = Request::builder()
            .method(method)
            .uri(uri)
            .header("content-type", "application/json");
        if let Some(token) = token {
            builder = builder.header("authorization", format!("Bearer {}", token));
        }
        builder
            .body(Body::from(serde_json::to_vec(json).unwrap()))
            .unwrap()
    }

    pub fn delete_authed(uri: &str, token: &str) -> Request<Body> {
        Request::delete(uri)
            .header("authorization", format!("Bearer {}", token))
            .body(Body::empty())
            .unwrap()
    }
}
