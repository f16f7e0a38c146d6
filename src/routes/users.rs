/**
 * User Routes
 * Admin account listing and profile edits
 */
use axum::{
    extract::{Path, State},
    http::{HeaderMap, StatusCode},
    response::IntoResponse,
    Json,
};
use serde::Serialize;

use crate::routes::{store_error_response, verify_admin, ApiState, ErrorResponse};
use crate::store::models::{ProfileUpdate, User};

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UsersResponse {
    pub users: Vec<User>,
}

/// GET /api/users (admin)
/// Every account with the password stripped.
pub async fn list_users(State(store): State<ApiState>, headers: HeaderMap) -> impl IntoResponse {
    if let Err(err_response) = verify_admin(&headers, &store).await {
        return err_response.into_response();
    }
    let users = store.all_users().await;
    (StatusCode::OK, Json(UsersResponse { users })).into_response()
}

/// PATCH /api/users/{id} (admin)
/// Merge semantics: only the provided fields change.
pub async fn update_user(
    State(store): State<ApiState>,
    headers: HeaderMap,
    Path(user_id): Path<u64>,
    Json(update): Json<ProfileUpdate>,
) -> impl IntoResponse {
    if let Err(err_response) = verify_admin(&headers, &store).await {
        return err_response.into_response();
    }

    if let Some(email) = &update.email {
        if !email.contains('@') {
            return (
                StatusCode::BAD_REQUEST,
                Json(ErrorResponse {
                    error: "Invalid email format".to_string(),
                    message: None,
                }),
            )
                .into_response();
        }
    }

    match store.update_profile(user_id, update).await {
        Ok(user) => {
            tracing::info!("Profile updated: user={}", user.id);
            (StatusCode::OK, Json(user)).into_response()
        }
        Err(err) => store_error_response(err).into_response(),
    }
}
