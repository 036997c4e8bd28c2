use axum::http::{header, Method};
use metrics_exporter_prometheus::PrometheusHandle;
use salon_booking::appointments::{AppointmentIntake, GoogleSheetsStore, HttpsConnector, SmtpMailer};
use salon_booking::config::{AppEnvironment, CorsConfig, MailConfig, SheetsConfig};
use std::sync::atomic::AtomicBool;
use std::sync::Arc;
use tower_http::cors::{AllowOrigin, CorsLayer};
use tracing::{error, info, warn};

pub(crate) type SheetsStore = GoogleSheetsStore<HttpsConnector>;
pub(crate) type BookingIntake = AppointmentIntake<SheetsStore, SmtpMailer>;

#[derive(Clone)]
pub(crate) struct AppState {
    pub(crate) environment: AppEnvironment,
    pub(crate) readiness: Arc<AtomicBool>,
    pub(crate) metrics: Arc<PrometheusHandle>,
}

/// Build the intake from whatever collaborators could be initialized.
/// Missing pieces are logged here and reported by `/api/health`.
pub(crate) async fn build_intake() -> BookingIntake {
    let store = connect_row_store().await;
    let (mailer, operator_address) = match connect_mailer() {
        Some((mailer, operator_address)) => (Some(mailer), operator_address),
        None => (None, String::new()),
    };
    AppointmentIntake::new(store, mailer, operator_address)
}

async fn connect_row_store() -> Option<Arc<SheetsStore>> {
    let config = match SheetsConfig::from_env() {
        Ok(config) => config,
        Err(err) => {
            error!(error = %err, "google sheets is not configured; bookings will be rejected");
            return None;
        }
    };

    match GoogleSheetsStore::connect(&config).await {
        Ok(store) => {
            info!(
                spreadsheet_id = %store.spreadsheet_id(),
                range = %store.range(),
                "google sheets initialized"
            );
            Some(Arc::new(store))
        }
        Err(err) => {
            error!(error = %err, "google sheets initialization failed");
            None
        }
    }
}

fn connect_mailer() -> Option<(Arc<SmtpMailer>, String)> {
    let config = match MailConfig::from_env() {
        Ok(config) => config,
        Err(err) => {
            warn!(error = %err, "e-mail is not configured; confirmations will not be sent");
            return None;
        }
    };

    let mailer = match SmtpMailer::from_config(&config) {
        Ok(mailer) => Arc::new(mailer),
        Err(err) => {
            error!(error = %err, "e-mail transport initialization failed");
            return None;
        }
    };

    let probe = mailer.clone();
    tokio::spawn(async move {
        match probe.verify().await {
            Ok(()) => info!("e-mail server is ready to send messages"),
            Err(err) => error!(error = %err, "e-mail configuration error"),
        }
    });

    Some((mailer, config.operator_address))
}

/// Credentialed CORS restricted to the configured origins; other origins get no grant.
pub(crate) fn cors_layer(config: &CorsConfig) -> CorsLayer {
    CorsLayer::new()
        .allow_origin(AllowOrigin::list(config.allowed_origins.clone()))
        .allow_methods([Method::GET, Method::POST, Method::OPTIONS])
        .allow_headers([header::CONTENT_TYPE, header::AUTHORIZATION])
        .allow_credentials(true)
}
