//! Response DTOs for Web API.

use serde::Serialize;
use utoipa::ToSchema;

/// Result of a contact form submission.
#[derive(Debug, Serialize, ToSchema)]
pub struct SubmitResponse {
    /// Whether the application was relayed.
    pub success: bool,
    /// Client-facing message.
    pub message: String,
}

impl SubmitResponse {
    /// Successful submission.
    pub fn sent(message: impl Into<String>) -> Self {
        Self {
            success: true,
            message: message.into(),
        }
    }

    /// Failed submission.
    pub fn failed(message: impl Into<String>) -> Self {
        Self {
            success: false,
            message: message.into(),
        }
    }
}
