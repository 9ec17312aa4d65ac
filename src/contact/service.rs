//! Contact submission handling.
//!
//! Validates a raw submission, renders it and hands it to the mail sender
//! exactly once. Delivery failures are logged and collapsed into a generic
//! outcome so SMTP details never reach the client.

use std::sync::Arc;

use serde_json::Value;
use validator::ValidationErrors;

use crate::datetime::{Clock, SystemClock};

use super::formatter::{format_email, FormatSettings};
use super::sender::MailSender;
use super::types::{Outcome, OutgoingMail, SENDER_IDENTITY};
use super::validation::validate_submission;

/// Service that relays contact submissions to the admin mailbox.
#[derive(Clone)]
pub struct ContactService {
    sender: Arc<dyn MailSender>,
    admin_email: String,
    settings: FormatSettings,
    clock: Arc<dyn Clock>,
}

impl ContactService {
    /// Create a new ContactService using the wall clock.
    pub fn new(
        sender: Arc<dyn MailSender>,
        admin_email: impl Into<String>,
        settings: FormatSettings,
    ) -> Self {
        Self {
            sender,
            admin_email: admin_email.into(),
            settings,
            clock: Arc::new(SystemClock),
        }
    }

    /// Replace the clock used to timestamp messages.
    pub fn with_clock(mut self, clock: Arc<dyn Clock>) -> Self {
        self.clock = clock;
        self
    }

    /// Handle a raw submission.
    ///
    /// # Errors
    ///
    /// Returns `ValidationErrors` if the submission is invalid. Nothing is
    /// sent in that case. Delivery failures are not errors; they produce
    /// [`Outcome::Failure`].
    pub async fn handle(&self, raw: &Value) -> Result<Outcome, ValidationErrors> {
        let submission = validate_submission(raw)?;

        let rendered = format_email(&submission, &self.settings, self.clock.now());
        let mail = OutgoingMail {
            to: self.admin_email.clone(),
            from: SENDER_IDENTITY.to_string(),
            subject: rendered.subject,
            body: rendered.body,
            html: rendered.html,
        };

        match self.sender.send(&mail).await {
            Ok(()) => {
                tracing::info!(
                    name = %submission.name,
                    services = submission.selected_services.len(),
                    "Contact application relayed"
                );
                Ok(Outcome::success())
            }
            Err(e) => {
                tracing::error!(error = %e, "Failed to relay contact application");
                Ok(Outcome::failure())
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::contact::sender::{DeliveryError, MockMailSender};
    use crate::datetime::FixedClock;
    use chrono::{TimeZone, Utc};
    use serde_json::json;

    fn service(sender: MockMailSender) -> ContactService {
        let clock = FixedClock(Utc.with_ymd_and_hms(2024, 3, 8, 9, 5, 7).unwrap());
        ContactService::new(
            Arc::new(sender),
            "admin@example.com",
            FormatSettings::default(),
        )
        .with_clock(Arc::new(clock))
    }

    #[tokio::test]
    async fn test_successful_delivery() {
        let mut sender = MockMailSender::new();
        sender
            .expect_send()
            .withf(|mail| {
                mail.to == "admin@example.com"
                    && mail.from == SENDER_IDENTITY
                    && mail.subject == "New application from Ann"
                    && mail.body.contains("Phone: +1234567890")
                    && mail.body.contains("Date: 08.03.2024, 12:05:07")
                    && mail.html.as_deref().is_some_and(|html| html.contains("+1234567890"))
            })
            .times(1)
            .returning(|_| Ok(()));

        let outcome = service(sender)
            .handle(&json!({"name": "Ann", "phone": "+1234567890"}))
            .await
            .unwrap();

        assert_eq!(
            outcome,
            Outcome::Success {
                message: "Your application has been successfully sent!".to_string()
            }
        );
    }

    #[tokio::test]
    async fn test_validation_failure_skips_sender() {
        let mut sender = MockMailSender::new();
        sender.expect_send().times(0);

        let errors = service(sender)
            .handle(&json!({"name": "", "phone": "+1234567890"}))
            .await
            .unwrap_err();

        assert!(errors.field_errors().contains_key("name"));
        assert!(!errors.field_errors().contains_key("phone"));
    }

    #[tokio::test]
    async fn test_missing_phone_skips_sender() {
        let mut sender = MockMailSender::new();
        sender.expect_send().times(0);

        let result = service(sender).handle(&json!({"name": "Ann"})).await;
        assert!(result.is_err());
    }

    #[tokio::test]
    async fn test_delivery_failure_is_generic() {
        let mut sender = MockMailSender::new();
        sender.expect_send().times(1).returning(|_| {
            Err(DeliveryError::Transport(
                "535 5.7.8 Username and Password not accepted".to_string(),
            ))
        });

        let outcome = service(sender)
            .handle(&json!({"name": "Ann", "phone": "+1234567890"}))
            .await
            .unwrap();

        assert_eq!(
            outcome,
            Outcome::Failure {
                reason: "Error sending request".to_string()
            }
        );
    }

    #[tokio::test]
    async fn test_services_forwarded_in_order() {
        let mut sender = MockMailSender::new();
        sender
            .expect_send()
            .withf(|mail| mail.body.contains("Additional services: SEO, Design"))
            .times(1)
            .returning(|_| Ok(()));

        let outcome = service(sender)
            .handle(&json!({
                "name": "Ann",
                "phone": "+1234567890",
                "selectedServices": ["SEO", "Design"]
            }))
            .await
            .unwrap();

        assert!(outcome.is_success());
    }
}
