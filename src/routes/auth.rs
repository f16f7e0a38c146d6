/**
 * Authentication Routes
 * Login and registration against the session store
 */
use axum::{extract::State, http::StatusCode, response::IntoResponse, Json};
use serde::{Deserialize, Serialize};

use crate::routes::{store_error_response, ApiState};
use crate::store::models::User;

/// Minimum password length accepted at registration. Login has no such
/// check; seeded credentials predate the rule.
const MIN_PASSWORD_LEN: usize = 8;

// ============================================================================
// Request/Response Types
// ============================================================================

#[derive(Debug, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

#[derive(Debug, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RegisterRequest {
    pub name: String,
    pub email: String,
    pub password: String,
}

/// Response for all three auth endpoints
#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AuthResponse {
    pub success: bool,
    pub user: Option<User>,
    pub token: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl AuthResponse {
    fn failure(error: &str) -> Self {
        Self {
            success: false,
            user: None,
            token: None,
            error: Some(error.to_string()),
        }
    }
}

// ============================================================================
// Validation
// ============================================================================

fn validate_credentials(email: &str, password: &str) -> Result<(), &'static str> {
    if email.is_empty() || password.is_empty() {
        return Err("Email and password are required");
    }
    if !email.contains('@') {
        return Err("Invalid email format");
    }
    Ok(())
}

fn validate_registration(payload: &RegisterRequest) -> Result<(), &'static str> {
    if payload.name.trim().is_empty() {
        return Err("Name is required");
    }
    validate_credentials(&payload.email, &payload.password)?;
    if payload.password.len() < MIN_PASSWORD_LEN {
        return Err("Password must be at least 8 characters long");
    }
    Ok(())
}

// ============================================================================
// Handlers
// ============================================================================

/// POST /api/auth/login
/// Authenticate and return the user (password stripped) plus an opaque
/// session token. Unknown email and wrong password are indistinguishable.
pub async fn login(
    State(store): State<ApiState>,
    Json(payload): Json<LoginRequest>,
) -> impl IntoResponse {
    if let Err(reason) = validate_credentials(&payload.email, &payload.password) {
        return (StatusCode::BAD_REQUEST, Json(AuthResponse::failure(reason))).into_response();
    }

    match store.login(&payload.email, &payload.password).await {
        Ok(session) => {
            tracing::info!("Successful login for: {}", session.user.email);
            (
                StatusCode::OK,
                Json(AuthResponse {
                    success: true,
                    user: Some(session.user),
                    token: Some(session.token),
                    error: None,
                }),
            )
                .into_response()
        }
        Err(err) => {
            tracing::warn!("Failed login attempt for: {}", payload.email);
            store_error_response(err).into_response()
        }
    }
}

/// POST /api/auth/register
/// Create a regular account; fails with 409 when the email is taken.
pub async fn register(
    State(store): State<ApiState>,
    Json(payload): Json<RegisterRequest>,
) -> impl IntoResponse {
    if let Err(reason) = validate_registration(&payload) {
        return (StatusCode::BAD_REQUEST, Json(AuthResponse::failure(reason))).into_response();
    }

    match store
        .register(&payload.name, &payload.email, &payload.password)
        .await
    {
        Ok(session) => {
            tracing::info!("Account registered: {}", session.user.email);
            (
                StatusCode::CREATED,
                Json(AuthResponse {
                    success: true,
                    user: Some(session.user),
                    token: Some(session.token),
                    error: None,
                }),
            )
                .into_response()
        }
        Err(err) => store_error_response(err).into_response(),
    }
}

/// POST /api/auth/register-admin
/// Claim the single admin slot; 403 once an admin exists, regardless of
/// the email offered.
pub async fn register_admin(
    State(store): State<ApiState>,
    Json(payload): Json<RegisterRequest>,
) -> impl IntoResponse {
    if let Err(reason) = validate_registration(&payload) {
        return (StatusCode::BAD_REQUEST, Json(AuthResponse::failure(reason))).into_response();
    }

    match store
        .register_admin(&payload.name, &payload.email, &payload.password)
        .await
    {
        Ok(session) => {
            tracing::info!("Admin account registered: {}", session.user.email);
            (
                StatusCode::CREATED,
                Json(AuthResponse {
                    success: true,
                    user: Some(session.user),
                    token: Some(session.token),
                    error: None,
                }),
            )
                .into_response()
        }
        Err(err) => store_error_response(err).into_response(),
    }
}
