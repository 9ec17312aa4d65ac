//! Contact form types.

/// Message returned to the client after a successful delivery.
pub const SUCCESS_MESSAGE: &str = "Your application has been successfully sent!";

/// Reason returned to the client for any delivery failure.
pub const FAILURE_REASON: &str = "Error sending request";

/// Sender identity of every relayed application.
pub const SENDER_IDENTITY: &str = "\"MOUN Digital Agency\" <noreply@moun.agency>";

/// A validated contact-form submission.
///
/// `name` and `phone` are never empty; only the validator constructs this.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Submission {
    /// Client name.
    pub name: String,
    /// Client phone number.
    pub phone: String,
    /// Free-form comment, `None` when absent or empty.
    pub comment: Option<String>,
    /// Selected services in the order the client picked them.
    pub selected_services: Vec<String>,
}

/// Subject and bodies of a rendered application message.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenderedEmail {
    /// Message subject.
    pub subject: String,
    /// Plain-text message body.
    pub body: String,
    /// HTML alternative with submitter text escaped, if it rendered.
    pub html: Option<String>,
}

/// A message ready to hand to a [`MailSender`](super::MailSender).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OutgoingMail {
    /// Recipient address.
    pub to: String,
    /// Sender identity (`"Display" <address>` or bare address).
    pub from: String,
    /// Message subject.
    pub subject: String,
    /// Plain-text message body.
    pub body: String,
    /// Optional HTML alternative of `body`.
    pub html: Option<String>,
}

/// Result of handling a submission that passed validation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome {
    /// The message was handed to the relay.
    Success {
        /// Client-facing confirmation.
        message: String,
    },
    /// Delivery failed; the cause is never included.
    Failure {
        /// Generic client-facing reason.
        reason: String,
    },
}

impl Outcome {
    /// Successful delivery outcome.
    pub fn success() -> Self {
        Outcome::Success {
            message: SUCCESS_MESSAGE.to_string(),
        }
    }

    /// Generic delivery failure outcome.
    pub fn failure() -> Self {
        Outcome::Failure {
            reason: FAILURE_REASON.to_string(),
        }
    }

    /// Check if the submission was delivered.
    pub fn is_success(&self) -> bool {
        matches!(self, Outcome::Success { .. })
    }
}
