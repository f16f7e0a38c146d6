/**
 * Export Routes
 * Admin CSV downloads of users, enquiries and feedback
 */
use axum::{
    extract::State,
    http::{header, HeaderMap, StatusCode},
    response::IntoResponse,
};
use chrono::{DateTime, SecondsFormat, Utc};

use crate::routes::{verify_admin, ApiState};
use crate::store::models::{ContactSubmission, Feedback, User};

// ============================================================================
// CSV rendering
// ============================================================================

/// Quote a CSV field, doubling any embedded quotes.
fn csv_field(value: &str) -> String {
    format!("\"{}\"", value.replace('"', "\"\""))
}

fn csv_timestamp(ts: &DateTime<Utc>) -> String {
    ts.to_rfc3339_opts(SecondsFormat::Secs, true)
}

fn users_csv(users: &[User]) -> String {
    let mut out = String::from("ID,Name,Email,Phone,Role,Created Date\n");
    for user in users {
        let role = match user.role {
            crate::store::models::Role::Admin => "admin",
            crate::store::models::Role::User => "user",
        };
        out.push_str(&format!(
            "{},{},{},{},{},{}\n",
            user.id,
            csv_field(&user.name),
            csv_field(&user.email),
            csv_field(user.phone.as_deref().unwrap_or("")),
            role,
            user.created_at.as_ref().map(csv_timestamp).unwrap_or_default(),
        ));
    }
    out
}

fn enquiries_csv(enquiries: &[ContactSubmission]) -> String {
    let mut out = String::from("ID,Timestamp,Name,Email,Phone,Message\n");
    for enquiry in enquiries {
        out.push_str(&format!(
            "{},{},{},{},{},{}\n",
            enquiry.id,
            csv_timestamp(&enquiry.timestamp),
            csv_field(&enquiry.name),
            csv_field(&enquiry.email),
            csv_field(&enquiry.phone),
            csv_field(&enquiry.message),
        ));
    }
    out
}

fn feedback_csv(entries: &[Feedback]) -> String {
    let mut out = String::from("ID,Timestamp,Name,Rating,Review\n");
    for entry in entries {
        out.push_str(&format!(
            "{},{},{},{},{}\n",
            entry.id,
            csv_timestamp(&entry.timestamp),
            csv_field(&entry.name),
            entry.rating,
            csv_field(&entry.review),
        ));
    }
    out
}

fn csv_download(filename: &str, body: String) -> impl IntoResponse {
    (
        StatusCode::OK,
        [
            (header::CONTENT_TYPE, "text/csv; charset=utf-8".to_string()),
            (
                header::CONTENT_DISPOSITION,
                format!("attachment; filename=\"{}\"", filename),
            ),
        ],
        body,
    )
}

// ============================================================================
// Handlers
// ============================================================================

/// GET /api/export/users (admin)
pub async fn export_users(State(store): State<ApiState>, headers: HeaderMap) -> impl IntoResponse {
    if let Err(err_response) = verify_admin(&headers, &store).await {
        return err_response.into_response();
    }
    let users = store.all_users().await;
    tracing::info!("Exporting {} users to CSV", users.len());
    csv_download("users.csv", users_csv(&users)).into_response()
}

/// GET /api/export/enquiries (admin)
pub async fn export_enquiries(
    State(store): State<ApiState>,
    headers: HeaderMap,
) -> impl IntoResponse {
    if let Err(err_response) = verify_admin(&headers, &store).await {
        return err_response.into_response();
    }
    let enquiries = store.contact_submissions().await;
    tracing::info!("Exporting {} enquiries to CSV", enquiries.len());
    csv_download("enquiries.csv", enquiries_csv(&enquiries)).into_response()
}

/// GET /api/export/feedback (admin)
pub async fn export_feedback(
    State(store): State<ApiState>,
    headers: HeaderMap,
) -> impl IntoResponse {
    if let Err(err_response) = verify_admin(&headers, &store).await {
        return err_response.into_response();
    }
    let entries = store.feedback().await;
    tracing::info!("Exporting {} feedback entries to CSV", entries.len());
    csv_download("feedback.csv", feedback_csv(&entries)).into_response()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::routes::testing::{admin_token, get, get_authed, send, test_state};
    use crate::store::models::NewEnquiry;
    use axum::routing::get as get_route;
    use axum::Router;

    fn export_router(state: ApiState) -> Router {
        Router::new()
            .route("/api/export/users", get_route(export_users))
            .route("/api/export/enquiries", get_route(export_enquiries))
            .route("/api/export/feedback", get_route(export_feedback))
            .with_state(state)
    }

    #[test]
    fn test_csv_field_doubles_embedded_quotes() {
        assert_eq!(csv_field(r#"say "cheese""#), r#""say ""cheese""""#);
        assert_eq!(csv_field("plain"), "\"plain\"");
    }

    #[tokio::test]
    async fn test_export_requires_admin() {
        let (status, _) = send(export_router(test_state()), get("/api/export/users")).await;
        assert_eq!(status, StatusCode::UNAUTHORIZED);
    }

    #[tokio::test]
    async fn test_users_export_has_expected_header() {
        let state = test_state();
        let token = admin_token(&state).await;
        let (status, bytes) = send(
            export_router(state),
            get_authed("/api/export/users", &token),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        let body = String::from_utf8(bytes.to_vec()).unwrap();
        assert!(body.starts_with("ID,Name,Email,Phone,Role,Created Date\n"));
        // seed accounts: one admin, one regular user
        assert_eq!(body.lines().count(), 3);
    }

    #[tokio::test]
    async fn test_enquiries_export_escapes_quoted_message() {
        let state = test_state();
        let token = admin_token(&state).await;
        state
            .submit_enquiry(NewEnquiry {
                name: "Priya".to_string(),
                email: "priya@example.com".to_string(),
                phone: "9876501234".to_string(),
                message: r#"She said "hello" twice"#.to_string(),
            })
            .await
            .unwrap();
        let (status, bytes) = send(
            export_router(state),
            get_authed("/api/export/enquiries", &token),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        let body = String::from_utf8(bytes.to_vec()).unwrap();
        assert!(body.starts_with("ID,Timestamp,Name,Email,Phone,Message\n"));
        assert!(body.contains(r#""She said ""hello"" twice""#));
    }

    #[tokio::test]
    async fn test_feedback_export_sets_download_headers() {
        let state = test_state();
        let token = admin_token(&state).await;
        let app = export_router(state);
        let res = tower::ServiceExt::oneshot(app, get_authed("/api/export/feedback", &token))
            .await
            .unwrap();
        assert_eq!(res.status(), StatusCode::OK);
        assert_eq!(
            res.headers().get("content-type").unwrap(),
            "text/csv; charset=utf-8"
        );
        assert_eq!(
            res.headers().get("content-disposition").unwrap(),
            "attachment; filename=\"feedback.csv\""
        );
    }
}
