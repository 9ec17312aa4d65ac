//! Error types for the contact relay.

use thiserror::Error;

/// Process-level error type.
///
/// Request handling never surfaces these to clients; they cover startup,
/// configuration and transport setup.
#[derive(Error, Debug)]
pub enum ContactRelayError {
    /// I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Configuration error.
    #[error("configuration error: {0}")]
    Config(String),

    /// Mail transport could not be set up.
    #[error("mail setup error: {0}")]
    Mail(String),
}

/// Result type alias for contact relay operations.
pub type Result<T> = std::result::Result<T, ContactRelayError>;
