//! Mail sender abstraction.

use async_trait::async_trait;
use thiserror::Error;

use super::types::OutgoingMail;

/// Why a message could not be delivered.
///
/// Logged by the contact service and never shown to clients.
#[derive(Error, Debug)]
pub enum DeliveryError {
    /// A sender or recipient address could not be parsed.
    #[error("invalid address: {0}")]
    InvalidAddress(String),

    /// The message could not be assembled.
    #[error("message build error: {0}")]
    Build(String),

    /// The relay rejected the message or could not be reached.
    #[error("transport error: {0}")]
    Transport(String),
}

/// Delivers a single message.
///
/// One call is one attempt; callers do not retry. Implementations are shared
/// across requests and must tolerate concurrent calls.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait MailSender: Send + Sync {
    /// Send a message.
    ///
    /// # Errors
    ///
    /// Returns `DeliveryError` if the message is invalid or the relay fails.
    async fn send(&self, mail: &OutgoingMail) -> Result<(), DeliveryError>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_delivery_error_display() {
        let err = DeliveryError::Transport("connection refused".to_string());
        assert_eq!(err.to_string(), "transport error: connection refused");

        let err = DeliveryError::InvalidAddress("not-an-address".to_string());
        assert_eq!(err.to_string(), "invalid address: not-an-address");
    }
}
