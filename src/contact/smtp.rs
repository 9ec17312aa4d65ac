//! SMTP mail sender.
//!
//! Uses the `lettre` async transport. The transport is built once at startup
//! and pools its connections, so one instance serves every request.

use std::time::Duration;

use async_trait::async_trait;
use lettre::{
    message::{header::ContentType, Mailbox, MultiPart, SinglePart},
    transport::smtp::authentication::Credentials,
    AsyncSmtpTransport, AsyncTransport, Message, Tokio1Executor,
};

use crate::config::SmtpConfig;
use crate::{ContactRelayError, Result};

use super::sender::{DeliveryError, MailSender};
use super::types::OutgoingMail;

/// Mail sender backed by an authenticated SMTP relay.
pub struct SmtpMailSender {
    transport: AsyncSmtpTransport<Tokio1Executor>,
}

impl SmtpMailSender {
    /// Build the relay transport from configuration.
    ///
    /// Uses STARTTLS unless `implicit_tls` is set. No connection is opened
    /// here.
    pub fn new(config: &SmtpConfig) -> Result<Self> {
        let builder = if config.implicit_tls {
            AsyncSmtpTransport::<Tokio1Executor>::relay(&config.host)
        } else {
            AsyncSmtpTransport::<Tokio1Executor>::starttls_relay(&config.host)
        }
        .map_err(|e| {
            ContactRelayError::Mail(format!("failed to configure relay {}: {e}", config.host))
        })?;

        let transport = builder
            .port(config.port)
            .credentials(Credentials::new(
                config.username.clone(),
                config.password.clone(),
            ))
            .timeout(Some(Duration::from_secs(config.timeout_secs)))
            .build();

        Ok(Self { transport })
    }

    /// Check that the relay accepts a connection.
    pub async fn verify(&self) -> Result<bool> {
        self.transport
            .test_connection()
            .await
            .map_err(|e| ContactRelayError::Mail(e.to_string()))
    }

    fn build_message(mail: &OutgoingMail) -> std::result::Result<Message, DeliveryError> {
        let from: Mailbox = mail
            .from
            .parse()
            .map_err(|_| DeliveryError::InvalidAddress(mail.from.clone()))?;
        let to: Mailbox = mail
            .to
            .parse()
            .map_err(|_| DeliveryError::InvalidAddress(mail.to.clone()))?;

        let builder = Message::builder()
            .from(from)
            .to(to)
            .subject(mail.subject.clone());

        // Send both renderings when an HTML alternative exists
        let message = match &mail.html {
            Some(html) => builder.multipart(
                MultiPart::alternative()
                    .singlepart(
                        SinglePart::builder()
                            .header(ContentType::TEXT_PLAIN)
                            .body(mail.body.clone()),
                    )
                    .singlepart(
                        SinglePart::builder()
                            .header(ContentType::TEXT_HTML)
                            .body(html.clone()),
                    ),
            ),
            None => builder
                .header(ContentType::TEXT_PLAIN)
                .body(mail.body.clone()),
        };

        message.map_err(|e| DeliveryError::Build(e.to_string()))
    }
}

#[async_trait]
impl MailSender for SmtpMailSender {
    async fn send(&self, mail: &OutgoingMail) -> std::result::Result<(), DeliveryError> {
        let message = Self::build_message(mail)?;

        self.transport
            .send(message)
            .await
            .map(|_| ())
            .map_err(|e| DeliveryError::Transport(e.to_string()))
    }
}
