//! Contact relay
//!
//! Accepts contact-form applications over HTTP, validates them and forwards
//! them to an administrative mailbox through an SMTP relay.

pub mod config;
pub mod contact;
pub mod datetime;
pub mod error;
pub mod logging;
pub mod web;

pub use config::Config;
pub use contact::{
    format_email, validate_submission, ContactService, DeliveryError, FormatSettings, MailSender,
    Outcome, OutgoingMail, SmtpMailSender, Submission,
};
pub use error::{ContactRelayError, Result};
pub use web::WebServer;
