use std::sync::Arc;

use axum::{
    extract::{rejection::JsonRejection, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{get, post},
    Json, Router,
};
use chrono::{SecondsFormat, Utc};
use serde_json::json;
use tracing::warn;

use super::domain::AppointmentSubmission;
use super::mailer::Mailer;
use super::service::{AppointmentIntake, IntakeError};
use super::store::RowStore;

/// Router exposing the booking endpoint and the collaborator health probe.
pub fn appointment_router<S, M>(intake: Arc<AppointmentIntake<S, M>>) -> Router
where
    S: RowStore + 'static,
    M: Mailer + 'static,
{
    Router::new()
        .route("/api/appointments", post(submit_handler::<S, M>))
        .route("/api/health", get(health_handler::<S, M>))
        .with_state(intake)
}

pub(crate) async fn submit_handler<S, M>(
    State(intake): State<Arc<AppointmentIntake<S, M>>>,
    payload: Result<Json<AppointmentSubmission>, JsonRejection>,
) -> Response
where
    S: RowStore + 'static,
    M: Mailer + 'static,
{
    let Json(submission) = match payload {
        Ok(payload) => payload,
        Err(rejection) => {
            warn!(error = %rejection.body_text(), "unreadable appointment payload");
            let payload = json!({
                "status": "error",
                "message": rejection.body_text(),
            });
            return (StatusCode::BAD_REQUEST, Json(payload)).into_response();
        }
    };

    match intake.submit(submission).await {
        Ok(receipt) => {
            let payload = json!({
                "status": "success",
                "message": "Appointment booked successfully",
                "appointment": receipt.appointment,
            });
            (StatusCode::OK, Json(payload)).into_response()
        }
        Err(IntakeError::Validation(missing)) => {
            let payload = json!({
                "status": "error",
                "message": "Missing required fields",
                "received": missing.received,
                "missing": missing.missing,
            });
            (StatusCode::BAD_REQUEST, Json(payload)).into_response()
        }
        Err(IntakeError::Persistence(error)) => {
            let payload = json!({
                "status": "error",
                "message": "Failed to process appointment",
                "error": error.to_string(),
            });
            (StatusCode::INTERNAL_SERVER_ERROR, Json(payload)).into_response()
        }
    }
}

pub(crate) async fn health_handler<S, M>(
    State(intake): State<Arc<AppointmentIntake<S, M>>>,
) -> Json<serde_json::Value>
where
    S: RowStore + 'static,
    M: Mailer + 'static,
{
    Json(json!({
        "status": "healthy",
        "timestamp": Utc::now().to_rfc3339_opts(SecondsFormat::Millis, true),
        "email_configured": intake.mail_configured(),
        "sheets_configured": intake.store_configured(),
    }))
}
