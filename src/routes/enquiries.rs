/**
 * Enquiry Routes
 * Contact form submissions: public create, admin-only listing
 */
use axum::{
    extract::State,
    http::{HeaderMap, StatusCode},
    response::IntoResponse,
    Json,
};
use serde::Serialize;

use crate::routes::{store_error_response, verify_admin, ApiState, ErrorResponse};
use crate::store::models::{ContactSubmission, NewEnquiry};

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct EnquiriesResponse {
    pub enquiries: Vec<ContactSubmission>,
}

fn validate_enquiry(payload: &NewEnquiry) -> Result<(), &'static str> {
    if payload.name.trim().is_empty() || payload.message.trim().is_empty() {
        return Err("Name and message are required");
    }
    if !payload.email.contains('@') {
        return Err("Invalid email format");
    }
    Ok(())
}

/// POST /api/enquiries
/// Append-only: submissions are never updated, only created and read.
pub async fn submit_enquiry(
    State(store): State<ApiState>,
    Json(payload): Json<NewEnquiry>,
) -> impl IntoResponse {
    if let Err(reason) = validate_enquiry(&payload) {
        return (
            StatusCode::BAD_REQUEST,
            Json(ErrorResponse {
                error: reason.to_string(),
                message: None,
            }),
        )
            .into_response();
    }

    match store.submit_enquiry(payload).await {
        Ok(submission) => {
            tracing::info!("Enquiry received from: {}", submission.email);
            (StatusCode::CREATED, Json(submission)).into_response()
        }
        Err(err) => store_error_response(err).into_response(),
    }
}

/// GET /api/enquiries (admin)
pub async fn list_enquiries(
    State(store): State<ApiState>,
    headers: HeaderMap,
) -> impl IntoResponse {
    if let Err(err_response) = verify_admin(&headers, &store).await {
        return err_response.into_response();
    }
    let enquiries = store.contact_submissions().await;
    (StatusCode::OK, Json(EnquiriesResponse { enquiries })).into_response()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::routes::testing::{admin_token, get_authed, json_request, send, test_state};
    use axum::routing::get as get_route;
    use axum::Router;

    fn enquiries_router(state: ApiState) -> Router {
        Router::new()
            .route(
                "/api/enquiries",
                get_route(list_enquiries).post(submit_enquiry),
            )
            .with_state(state)
    }

    fn sample_enquiry() -> NewEnquiry {
        NewEnquiry {
            name: "Priya".to_string(),
            email: "priya@example.com".to_string(),
            phone: "9876501234".to_string(),
            message: "Do you cover destination weddings?".to_string(),
        }
    }

    #[tokio::test]
    async fn test_submit_enquiry_returns_created_record() {
        let (status, bytes) = send(
            enquiries_router(test_state()),
            json_request("POST", "/api/enquiries", None, &sample_enquiry()),
        )
        .await;
        assert_eq!(status, StatusCode::CREATED);
        let body: ContactSubmission = serde_json::from_slice(&bytes).unwrap();
        assert_eq!(body.name, "Priya");
        assert!(body.id > 0);
    }

    #[tokio::test]
    async fn test_submit_rejects_missing_message() {
        let mut payload = sample_enquiry();
        payload.message = "   ".to_string();
        let (status, _) = send(
            enquiries_router(test_state()),
            json_request("POST", "/api/enquiries", None, &payload),
        )
        .await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn test_listing_requires_admin() {
        let state = test_state();
        // regular account token is not enough
        let user = state.login("user@test.com", "password").await.unwrap();
        let (status, _) = send(
            enquiries_router(state),
            get_authed("/api/enquiries", &user.token),
        )
        .await;
        assert_eq!(status, StatusCode::FORBIDDEN);
    }

    #[tokio::test]
    async fn test_listing_shows_submitted_enquiries() {
        let state = test_state();
        let token = admin_token(&state).await;
        state.submit_enquiry(sample_enquiry()).await.unwrap();
        let (status, bytes) = send(
            enquiries_router(state),
            get_authed("/api/enquiries", &token),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        let body: serde_json::Value = serde_json::from_slice(&bytes).unwrap();
        assert_eq!(body["enquiries"].as_array().unwrap().len(), 1);
    }
}
