use lettre::message::header::ContentType;
use lettre::message::Mailbox;
use lettre::transport::smtp::authentication::Credentials;
use lettre::{Address, AsyncSmtpTransport, AsyncTransport, Message, Tokio1Executor};
use tracing::debug;

use super::mailer::{MailError, Mailer, OutboundEmail};
use crate::config::MailConfig;

/// Authenticated SMTP relay sending as the configured account.
pub struct SmtpMailer {
    transport: AsyncSmtpTransport<Tokio1Executor>,
    sender: Address,
}

impl SmtpMailer {
    pub fn from_config(config: &MailConfig) -> Result<Self, MailError> {
        let sender = parse_address(&config.user)?;
        let transport = AsyncSmtpTransport::<Tokio1Executor>::relay(&config.smtp_host)
            .map_err(|err| MailError::Transport(err.to_string()))?
            .credentials(Credentials::new(
                config.user.clone(),
                config.app_password.clone(),
            ))
            .build();

        Ok(Self { transport, sender })
    }

    /// Open a connection and authenticate without sending anything.
    pub async fn verify(&self) -> Result<(), MailError> {
        match self.transport.test_connection().await {
            Ok(true) => Ok(()),
            Ok(false) => Err(MailError::Transport(
                "smtp server did not accept the connection".to_string(),
            )),
            Err(err) => Err(MailError::Transport(err.to_string())),
        }
    }
}

fn parse_address(raw: &str) -> Result<Address, MailError> {
    raw.trim()
        .parse::<Address>()
        .map_err(|err| MailError::InvalidAddress {
            address: raw.to_string(),
            reason: err.to_string(),
        })
}

impl std::fmt::Debug for SmtpMailer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SmtpMailer")
            .field("sender", &self.sender)
            .finish_non_exhaustive()
    }
}

impl Mailer for SmtpMailer {
    async fn send(&self, email: OutboundEmail) -> Result<(), MailError> {
        let OutboundEmail {
            sender_name,
            to,
            subject,
            html_body,
        } = email;

        let recipient = Mailbox::new(None, parse_address(&to)?);
        let from = Mailbox::new(Some(sender_name), self.sender.clone());

        let message = Message::builder()
            .from(from)
            .to(recipient)
            .subject(subject)
            .header(ContentType::TEXT_HTML)
            .body(html_body)
            .map_err(|err| MailError::Build(err.to_string()))?;

        let response = self
            .transport
            .send(message)
            .await
            .map_err(|err| MailError::Transport(err.to_string()))?;
        debug!(recipient = %to, code = %response.code(), "smtp accepted message");
        Ok(())
    }
}
