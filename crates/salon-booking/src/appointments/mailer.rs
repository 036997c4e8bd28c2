use std::future::Future;

/// Fully rendered message handed to a [`Mailer`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OutboundEmail {
    pub sender_name: String,
    pub to: String,
    pub subject: String,
    pub html_body: String,
}

/// Outbound e-mail transport. Success means the transport accepted the
/// message; delivery is not tracked further.
pub trait Mailer: Send + Sync {
    fn send(&self, email: OutboundEmail) -> impl Future<Output = Result<(), MailError>> + Send;
}

#[derive(Debug, thiserror::Error)]
pub enum MailError {
    #[error("mail transport is not configured")]
    NotConfigured,
    #[error("invalid mail address '{address}': {reason}")]
    InvalidAddress { address: String, reason: String },
    #[error("unable to build message: {0}")]
    Build(String),
    #[error("mail transport rejected message: {0}")]
    Transport(String),
}
