use crate::cli::ServeArgs;
use crate::infra::{build_intake, cors_layer, AppState};
use crate::routes::with_service_routes;
use axum::Extension;
use axum_prometheus::PrometheusMetricLayer;
use salon_booking::config::AppConfig;
use salon_booking::error::AppError;
use salon_booking::telemetry;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use tower_http::trace::TraceLayer;
use tracing::info;

pub(crate) async fn run(mut args: ServeArgs) -> Result<(), AppError> {
    let mut config = AppConfig::load()?;

    if let Some(host) = args.host.take() {
        config.server.host = host;
    }
    if let Some(port) = args.port.take() {
        config.server.port = port;
    }

    telemetry::init(&config.telemetry)?;

    let (prometheus_layer, prometheus_handle) = PrometheusMetricLayer::pair();
    let readiness_flag = Arc::new(AtomicBool::new(false));
    let app_state = AppState {
        environment: config.environment,
        readiness: readiness_flag.clone(),
        metrics: Arc::new(prometheus_handle),
    };

    let intake = Arc::new(build_intake().await);
    info!(
        sheets_configured = intake.store_configured(),
        email_configured = intake.mail_configured(),
        "appointment intake assembled"
    );

    let app = with_service_routes(intake)
        .layer(Extension(app_state))
        .layer(prometheus_layer)
        .layer(cors_layer(&config.cors))
        .layer(TraceLayer::new_for_http());

    let addr = config.server.socket_addr()?;
    let listener = tokio::net::TcpListener::bind(addr).await?;
    readiness_flag.store(true, Ordering::Release);

    info!(environment = config.environment.label(), %addr, "salon booking service ready");

    axum::serve(listener, app).await?;
    Ok(())
}
