use std::sync::Arc;

use axum::{
    extract::{rejection::JsonRejection, State},
    http::{header, HeaderMap, StatusCode},
    response::{IntoResponse, Response},
    routing, Json, Router,
};
use folio_core_contact_contracts::{ContactSendMessageError, ContactService};
use folio_models::contact::{ContactSubmission, ContactSubmissionDraft, ContactValidationError};
use folio_shared_contracts::time::{format_timestamp, TimeService};
use tracing::{debug, error, info};

use super::error;
use crate::models::{
    contact::{ApiContactSubmission, ApiSendEmailResponse},
    ApiError,
};

pub fn router(service: Arc<impl ContactService>, time: Arc<impl TimeService>) -> Router<()> {
    Router::new()
        .route("/api/send-email", routing::post(send_email))
        .with_state((service, time))
}

async fn send_email(
    State((service, time)): State<(Arc<impl ContactService>, Arc<impl TimeService>)>,
    headers: HeaderMap,
    body: Result<Json<ApiContactSubmission>, JsonRejection>,
) -> Response {
    let origin = headers
        .get(header::ORIGIN)
        .and_then(|origin| origin.to_str().ok());
    info!(origin, "email request received");

    if !service.is_available() {
        return not_configured();
    }

    let draft = match body {
        Ok(Json(body)) => body.into(),
        Err(rejection) => {
            debug!("treating unreadable request body as empty: {rejection}");
            ContactSubmissionDraft::default()
        }
    };

    let submission = match ContactSubmission::try_from(draft) {
        Ok(submission) => submission,
        Err(err) => {
            debug!("rejecting submission: {err}");
            return match err {
                ContactValidationError::MissingFields => {
                    error(StatusCode::BAD_REQUEST, "All fields are required")
                }
                ContactValidationError::InvalidEmail => {
                    error(StatusCode::BAD_REQUEST, "Invalid email format")
                }
            };
        }
    };

    match service.send_message(submission).await {
        Ok(()) => {
            info!("email sent");
            Json(ApiSendEmailResponse {
                message: "Email sent successfully",
                timestamp: format_timestamp(time.now()),
            })
            .into_response()
        }
        Err(ContactSendMessageError::NotConfigured) => not_configured(),
        Err(ContactSendMessageError::Send(err)) => {
            error!("failed to send email: {err:#}");
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(ApiError {
                    error: "Failed to send email",
                    details: Some(err.to_string()),
                    timestamp: Some(format_timestamp(time.now())),
                }),
            )
                .into_response()
        }
    }
}

fn not_configured() -> Response {
    error!("email transport not configured");
    (
        StatusCode::INTERNAL_SERVER_ERROR,
        Json(ApiError {
            error: "Email service not configured properly",
            details: Some("SMTP settings missing".into()),
            timestamp: None,
        }),
    )
        .into_response()
}
