/**
 * Feedback Routes
 * Customer reviews: public create and list, admin delete
 */
use axum::{
    extract::{Path, State},
    http::{HeaderMap, StatusCode},
    response::IntoResponse,
    Json,
};
use serde::Serialize;

use crate::routes::{
    store_error_response, verify_admin, ApiState, ErrorResponse, SuccessResponse,
};
use crate::store::models::{Feedback, NewFeedback};

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FeedbackListResponse {
    pub feedback: Vec<Feedback>,
}

fn validate_feedback(payload: &NewFeedback) -> Result<(), &'static str> {
    if payload.name.trim().is_empty() {
        return Err("Name is required");
    }
    if !(1..=5).contains(&payload.rating) {
        return Err("Rating must be between 1 and 5");
    }
    Ok(())
}

/// POST /api/feedback
pub async fn submit_feedback(
    State(store): State<ApiState>,
    Json(payload): Json<NewFeedback>,
) -> impl IntoResponse {
    if let Err(reason) = validate_feedback(&payload) {
        return (
            StatusCode::BAD_REQUEST,
            Json(ErrorResponse {
                error: reason.to_string(),
                message: None,
            }),
        )
            .into_response();
    }

    match store.submit_feedback(payload).await {
        Ok(entry) => {
            tracing::info!("Feedback received: rating={}", entry.rating);
            (StatusCode::CREATED, Json(entry)).into_response()
        }
        Err(err) => store_error_response(err).into_response(),
    }
}

/// GET /api/feedback
pub async fn list_feedback(State(store): State<ApiState>) -> impl IntoResponse {
    let feedback = store.feedback().await;
    (StatusCode::OK, Json(FeedbackListResponse { feedback }))
}

/// DELETE /api/feedback/{id} (admin)
/// Idempotent: deleting an absent id leaves the collection unchanged and
/// still reports success.
pub async fn delete_feedback(
    State(store): State<ApiState>,
    headers: HeaderMap,
    Path(feedback_id): Path<u64>,
) -> impl IntoResponse {
    if let Err(err_response) = verify_admin(&headers, &store).await {
        return err_response.into_response();
    }

    match store.delete_feedback(feedback_id).await {
        Ok(()) => {
            tracing::info!("Feedback deleted: {}", feedback_id);
            (StatusCode::OK, Json(SuccessResponse { success: true })).into_response()
        }
        Err(err) => store_error_response(err).into_response(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::routes::testing::{admin_token, delete_authed, get, json_request, send, test_state};
    use axum::routing::get as get_route;
    use axum::Router;

    fn feedback_router(state: ApiState) -> Router {
        Router::new()
            .route(
                "/api/feedback",
                get_route(list_feedback).post(submit_feedback),
            )
            .route("/api/feedback/{id}", axum::routing::delete(delete_feedback))
            .with_state(state)
    }

    fn sample_feedback() -> NewFeedback {
        NewFeedback {
            name: "Ravi".to_string(),
            rating: 4,
            review: "Lovely candid shots.".to_string(),
        }
    }

    #[tokio::test]
    async fn test_list_returns_seeded_feedback() {
        let (status, bytes) = send(feedback_router(test_state()), get("/api/feedback")).await;
        assert_eq!(status, StatusCode::OK);
        let body: serde_json::Value = serde_json::from_slice(&bytes).unwrap();
        assert_eq!(body["feedback"].as_array().unwrap().len(), 1);
    }

    #[tokio::test]
    async fn test_submit_feedback_appends_entry() {
        let state = test_state();
        let (status, bytes) = send(
            feedback_router(state.clone()),
            json_request("POST", "/api/feedback", None, &sample_feedback()),
        )
        .await;
        assert_eq!(status, StatusCode::CREATED);
        let entry: Feedback = serde_json::from_slice(&bytes).unwrap();
        assert_eq!(entry.rating, 4);
        assert_eq!(state.feedback().await.len(), 2);
    }

    #[tokio::test]
    async fn test_submit_rejects_out_of_range_rating() {
        for rating in [0u8, 6] {
            let mut payload = sample_feedback();
            payload.rating = rating;
            let (status, _) = send(
                feedback_router(test_state()),
                json_request("POST", "/api/feedback", None, &payload),
            )
            .await;
            assert_eq!(status, StatusCode::BAD_REQUEST);
        }
    }

    #[tokio::test]
    async fn test_delete_requires_admin() {
        let (status, _) = send(
            feedback_router(test_state()),
            axum::http::Request::delete("/api/feedback/1")
                .body(axum::body::Body::empty())
                .unwrap(),
        )
        .await;
        assert_eq!(status, StatusCode::UNAUTHORIZED);
    }

    #[tokio::test]
    async fn test_delete_unknown_id_is_a_no_op() {
        let state = test_state();
        let token = admin_token(&state).await;
        let before = state.feedback().await.len();
        let (status, _) = send(
            feedback_router(state.clone()),
            delete_authed("/api/feedback/424242", &token),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(state.feedback().await.len(), before);
    }
}
