/**
 * Portfolio Routes
 * Category listing, per-category photos, photo upload and deletion
 */
use axum::{
    extract::{Multipart, Path, State},
    http::{HeaderMap, StatusCode},
    response::IntoResponse,
    Json,
};
use serde::Serialize;

use crate::routes::{
    store_error_response, verify_admin, ApiState, ErrorResponse, SuccessResponse,
};
use crate::store::models::{Photo, PortfolioCategory};

/// Uploads above this size are rejected before reaching the store.
const MAX_PHOTO_SIZE: usize = 5 * 1024 * 1024; // 5MB
const ALLOWED_EXTENSIONS: &[&str] = &["jpg", "jpeg", "png", "webp", "gif"];

// ============================================================================
// Response Types
// ============================================================================

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CategoriesResponse {
    pub categories: Vec<PortfolioCategory>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PhotosResponse {
    pub photos: Vec<Photo>,
}

// ============================================================================
// Image validation
// ============================================================================

/// Sniff the real content type from the leading bytes; the client-supplied
/// extension alone is not trusted.
fn sniff_image_mime(bytes: &[u8]) -> Option<&'static str> {
    if bytes.len() < 4 {
        return None;
    }
    match bytes {
        // JPEG: FF D8 FF
        [0xFF, 0xD8, 0xFF, ..] => Some("image/jpeg"),
        // PNG: 89 50 4E 47
        [0x89, 0x50, 0x4E, 0x47, ..] => Some("image/png"),
        // GIF: 47 49 46 38
        [0x47, 0x49, 0x46, 0x38, ..] => Some("image/gif"),
        // WebP: 52 49 46 46 ... 57 45 42 50
        [0x52, 0x49, 0x46, 0x46, _, _, _, _, 0x57, 0x45, 0x42, 0x50, ..] => Some("image/webp"),
        _ => None,
    }
}

// ============================================================================
// Handlers
// ============================================================================

/// GET /api/portfolio
/// Category list with photos omitted; gallery pages fetch photos lazily.
pub async fn list_categories(State(store): State<ApiState>) -> impl IntoResponse {
    let categories = store.portfolio().await;
    (StatusCode::OK, Json(CategoriesResponse { categories }))
}

/// GET /api/portfolio/{category}/photos
/// Photos of one category; an unknown slug yields an empty list.
pub async fn photos_by_category(
    State(store): State<ApiState>,
    Path(category): Path<String>,
) -> impl IntoResponse {
    let photos = store.photos_by_category(&category).await;
    (StatusCode::OK, Json(PhotosResponse { photos }))
}

/// POST /api/portfolio/{category}/photos (admin)
/// Multipart image upload, stored inline in the category.
pub async fn upload_photo(
    State(store): State<ApiState>,
    headers: HeaderMap,
    Path(category): Path<String>,
    mut multipart: Multipart,
) -> impl IntoResponse {
    if let Err(err_response) = verify_admin(&headers, &store).await {
        return err_response.into_response();
    }

    let field = match multipart.next_field().await {
        Ok(Some(field)) => field,
        Ok(None) => {
            return (
                StatusCode::BAD_REQUEST,
                Json(ErrorResponse {
                    error: "No file provided".to_string(),
                    message: None,
                }),
            )
                .into_response();
        }
        Err(e) => {
            tracing::error!("Multipart error: {}", e);
            return (
                StatusCode::BAD_REQUEST,
                Json(ErrorResponse {
                    error: "Invalid multipart data".to_string(),
                    message: None,
                }),
            )
                .into_response();
        }
    };

    let original_name = field.file_name().unwrap_or("unknown").to_string();
    let extension = original_name
        .rsplit('.')
        .next()
        .unwrap_or("")
        .to_lowercase();
    if !ALLOWED_EXTENSIONS.contains(&extension.as_str()) {
        return (
            StatusCode::BAD_REQUEST,
            Json(ErrorResponse {
                error: "Unsupported file type. Allowed: JPEG, PNG, WebP, GIF.".to_string(),
                message: None,
            }),
        )
            .into_response();
    }

    let bytes = match field.bytes().await {
        Ok(b) => b,
        Err(e) => {
            tracing::error!("Failed to read upload bytes: {}", e);
            return (
                StatusCode::BAD_REQUEST,
                Json(ErrorResponse {
                    error: "Failed to read file data".to_string(),
                    message: None,
                }),
            )
                .into_response();
        }
    };

    if bytes.is_empty() {
        return (
            StatusCode::BAD_REQUEST,
            Json(ErrorResponse {
                error: "Empty file".to_string(),
                message: None,
            }),
        )
            .into_response();
    }

    if bytes.len() > MAX_PHOTO_SIZE {
        return (
            StatusCode::BAD_REQUEST,
            Json(ErrorResponse {
                error: "File too large. Maximum size is 5MB.".to_string(),
                message: None,
            }),
        )
            .into_response();
    }

    let mime_type = match sniff_image_mime(&bytes) {
        Some(mime) => mime,
        None => {
            return (
                StatusCode::BAD_REQUEST,
                Json(ErrorResponse {
                    error: "File content does not match an allowed image type.".to_string(),
                    message: None,
                }),
            )
                .into_response();
        }
    };

    match store.upload_photo(&bytes, mime_type, &category).await {
        Ok(photo) => {
            tracing::info!(
                "Photo uploaded to '{}': id={} ({} bytes)",
                category,
                photo.id,
                bytes.len()
            );
            (StatusCode::CREATED, Json(photo)).into_response()
        }
        Err(err) => store_error_response(err).into_response(),
    }
}

/// DELETE /api/portfolio/photos/{id} (admin)
/// Idempotent: deleting an unknown photo id still succeeds.
pub async fn delete_photo(
    State(store): State<ApiState>,
    headers: HeaderMap,
    Path(photo_id): Path<u64>,
) -> impl IntoResponse {
    if let Err(err_response) = verify_admin(&headers, &store).await {
        return err_response.into_response();
    }

    match store.delete_photo(photo_id).await {
        Ok(()) => {
            tracing::info!("Photo deleted: {}", photo_id);
            (StatusCode::OK, Json(SuccessResponse { success: true })).into_response()
        }
        Err(err) => store_error_response(err).into_response(),
    }
}
