use crate::infra::AppState;
use axum::http::{header, StatusCode, Uri};
use axum::response::IntoResponse;
use axum::routing::get;
use axum::{Extension, Json, Router};
use salon_booking::appointments::{appointment_router, AppointmentIntake, Mailer, RowStore};
use serde_json::json;
use std::sync::Arc;

pub(crate) fn with_service_routes<S, M>(intake: Arc<AppointmentIntake<S, M>>) -> Router
where
    S: RowStore + 'static,
    M: Mailer + 'static,
{
    appointment_router(intake)
        .route("/", get(root))
        .route("/api/test", get(test_endpoint))
        .route("/favicon.ico", get(favicon))
        .route("/ready", get(readiness_endpoint))
        .route("/metrics", get(metrics_endpoint))
        .fallback(not_found)
}

pub(crate) async fn root() -> Json<serde_json::Value> {
    Json(json!({ "message": "Hello from Nikhaar Beauty Salon API" }))
}

pub(crate) async fn test_endpoint(Extension(state): Extension<AppState>) -> Json<serde_json::Value> {
    Json(json!({
        "message": "Test endpoint",
        "env": state.environment.label(),
    }))
}

pub(crate) async fn favicon() -> StatusCode {
    StatusCode::NO_CONTENT
}

pub(crate) async fn readiness_endpoint(Extension(state): Extension<AppState>) -> impl IntoResponse {
    let ready = state.readiness.load(std::sync::atomic::Ordering::Relaxed);
    let status = if ready {
        StatusCode::OK
    } else {
        StatusCode::SERVICE_UNAVAILABLE
    };

    let payload = if ready {
        json!({ "status": "ready" })
    } else {
        json!({ "status": "initializing" })
    };

    (status, Json(payload))
}

pub(crate) async fn metrics_endpoint(Extension(state): Extension<AppState>) -> impl IntoResponse {
    (
        StatusCode::OK,
        [(header::CONTENT_TYPE, "text/plain; version=0.0.4")],
        state.metrics.render(),
    )
}

pub(crate) async fn not_found(uri: Uri) -> impl IntoResponse {
    (
        StatusCode::NOT_FOUND,
        Json(json!({
            "error": "Not Found",
            "path": uri.path(),
        })),
    )
}
