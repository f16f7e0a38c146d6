/**
 * Site Content Routes
 * The singleton editable copy shown on the public pages
 */
use axum::{
    extract::State,
    http::{HeaderMap, StatusCode},
    response::IntoResponse,
    Json,
};

use crate::routes::{store_error_response, verify_admin, ApiState};
use crate::store::models::SiteContentPatch;

/// GET /api/content
pub async fn get_content(State(store): State<ApiState>) -> impl IntoResponse {
    let content = store.site_content().await;
    (StatusCode::OK, Json(content))
}

/// PATCH /api/content (admin)
/// Merge semantics: provided fields overwrite, missing fields are retained.
pub async fn update_content(
    State(store): State<ApiState>,
    headers: HeaderMap,
    Json(patch): Json<SiteContentPatch>,
) -> impl IntoResponse {
    if let Err(err_response) = verify_admin(&headers, &store).await {
        return err_response.into_response();
    }

    match store.update_site_content(patch).await {
        Ok(content) => {
            tracing::info!("Site content updated");
            (StatusCode::OK, Json(content)).into_response()
        }
        Err(err) => store_error_response(err).into_response(),
    }
}
