use std::sync::Arc;

use chrono::Local;
use tracing::{error, info, warn};

use super::domain::{Appointment, AppointmentSubmission, MissingFields};
use super::mailer::{MailError, Mailer, OutboundEmail};
use super::store::{RowStore, StoreError};
use super::templates;

/// Matches the browser-style local timestamp (`5/1/2024, 3:04:05 PM`) the
/// spreadsheet's first column has always held.
const RECORDED_AT_FORMAT: &str = "%-m/%-d/%Y, %-I:%M:%S %p";

/// Booking intake: validate, record, then notify.
///
/// Recording is mandatory and ends the request on failure. Notification is
/// best-effort: both e-mails are attempted concurrently, both are awaited,
/// and their failures are only logged.
pub struct AppointmentIntake<S, M> {
    store: Option<Arc<S>>,
    mailer: Option<Arc<M>>,
    operator_address: String,
}

impl<S, M> AppointmentIntake<S, M>
where
    S: RowStore + 'static,
    M: Mailer + 'static,
{
    /// `None` collaborators model a failed startup initialization; the intake
    /// still serves and reports the gap per request.
    pub fn new(
        store: Option<Arc<S>>,
        mailer: Option<Arc<M>>,
        operator_address: impl Into<String>,
    ) -> Self {
        Self {
            store,
            mailer,
            operator_address: operator_address.into(),
        }
    }

    pub fn store_configured(&self) -> bool {
        self.store.is_some()
    }

    pub fn mail_configured(&self) -> bool {
        self.mailer.is_some()
    }

    pub async fn submit(
        &self,
        submission: AppointmentSubmission,
    ) -> Result<IntakeReceipt, IntakeError> {
        let appointment = submission.validate().inspect_err(|missing| {
            warn!(%missing, "appointment rejected");
        })?;
        info!(
            name = %appointment.name,
            service = %appointment.service,
            date = %appointment.date,
            time = %appointment.time,
            "appointment received"
        );

        let Some(store) = self.store.as_ref() else {
            error!("row store is not initialized; appointment not recorded");
            return Err(StoreError::NotInitialized.into());
        };
        let recorded_at = Local::now().format(RECORDED_AT_FORMAT).to_string();
        if let Err(err) = store.append_row(appointment.row(&recorded_at)).await {
            error!(error = %err, "appointment could not be recorded");
            return Err(err.into());
        }
        info!(%recorded_at, "appointment recorded");

        let notifications = self.notify(&appointment).await;
        Ok(IntakeReceipt {
            appointment,
            notifications,
        })
    }

    async fn notify(&self, appointment: &Appointment) -> NotificationReport {
        let customer = templates::customer_confirmation(appointment);
        let operator = templates::operator_alert(
            appointment,
            &self.operator_address,
            &templates::booking_reference(),
        );

        let (customer_result, operator_result) =
            tokio::join!(self.dispatch(customer), self.dispatch(operator));

        let mut report = NotificationReport::default();
        for (recipient, result) in [
            (Recipient::Customer, customer_result),
            (Recipient::Operator, operator_result),
        ] {
            match result {
                Ok(()) => report.delivered.push(recipient),
                Err(error) => report.failures.push(NotificationFailure { recipient, error }),
            }
        }

        if !report.failures.is_empty() {
            let summary = report
                .failures
                .iter()
                .map(ToString::to_string)
                .collect::<Vec<_>>()
                .join("; ");
            error!(failed = report.failures.len(), %summary, "some booking e-mails failed to send");
        }
        report
    }

    async fn dispatch(&self, email: OutboundEmail) -> Result<(), MailError> {
        let to = email.to.clone();
        let result = match &self.mailer {
            Some(mailer) => mailer.send(email).await,
            None => Err(MailError::NotConfigured),
        };
        match &result {
            Ok(()) => info!(recipient = %to, "booking e-mail sent"),
            Err(err) => warn!(recipient = %to, error = %err, "booking e-mail failed"),
        }
        result
    }
}

impl<S, M> std::fmt::Debug for AppointmentIntake<S, M> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AppointmentIntake")
            .field("store_configured", &self.store.is_some())
            .field("mail_configured", &self.mailer.is_some())
            .field("operator_address", &self.operator_address)
            .finish()
    }
}

/// Result of a recorded booking. Notification outcomes are informational.
#[derive(Debug)]
pub struct IntakeReceipt {
    pub appointment: Appointment,
    pub notifications: NotificationReport,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Recipient {
    Customer,
    Operator,
}

impl std::fmt::Display for Recipient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Recipient::Customer => f.write_str("customer"),
            Recipient::Operator => f.write_str("operator"),
        }
    }
}

#[derive(Debug, thiserror::Error)]
#[error("{recipient} e-mail failed: {error}")]
pub struct NotificationFailure {
    pub recipient: Recipient,
    pub error: MailError,
}

#[derive(Debug, Default)]
pub struct NotificationReport {
    pub delivered: Vec<Recipient>,
    pub failures: Vec<NotificationFailure>,
}

/// Errors that end a submission. Notification problems never appear here.
#[derive(Debug, thiserror::Error)]
pub enum IntakeError {
    #[error(transparent)]
    Validation(#[from] MissingFields),
    #[error(transparent)]
    Persistence(#[from] StoreError),
}
