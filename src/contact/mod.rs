//! Contact form module.
//!
//! This module provides the contact application flow:
//! - Validation of the raw JSON submission
//! - Rendering the application message
//! - Delivery through a pluggable mail sender (SMTP in production)

mod formatter;
mod sender;
mod service;
mod smtp;
mod types;
mod validation;

pub use formatter::{format_email, FormatSettings, NO_COMMENT_PLACEHOLDER, NO_SERVICES_PLACEHOLDER};
pub use sender::{DeliveryError, MailSender};
pub use service::ContactService;
pub use smtp::SmtpMailSender;
pub use types::{
    Outcome, OutgoingMail, RenderedEmail, Submission, FAILURE_REASON, SENDER_IDENTITY,
    SUCCESS_MESSAGE,
};
pub use validation::{no_control_chars, not_empty_trimmed, validate_submission};
