//! Appointment intake for the booking form.
//!
//! A submission is validated for presence, appended as one spreadsheet row,
//! and then announced by two concurrent e-mails (customer confirmation and
//! operator alert). Only the first two steps can fail a request.

pub mod domain;
pub mod mailer;
pub mod router;
pub mod service;
pub mod sheets;
pub mod smtp;
pub mod store;
pub mod templates;

#[cfg(test)]
mod tests;

pub use domain::{
    to_twelve_hour, Appointment, AppointmentSubmission, MissingFields, RequiredField,
};
pub use mailer::{MailError, Mailer, OutboundEmail};
pub use router::appointment_router;
pub use service::{
    AppointmentIntake, IntakeError, IntakeReceipt, NotificationFailure, NotificationReport,
    Recipient,
};
pub use sheets::{GoogleSheetsStore, HttpsConnector};
pub use smtp::SmtpMailer;
pub use store::{RowStore, StoreError};
