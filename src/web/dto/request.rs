//! Request DTOs for Web API.

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// Contact form submission.
///
/// Documents the expected body shape. Handlers receive the body as raw JSON
/// and run it through the contact validator so that every failing field is
/// reported.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ContactRequest {
    /// Client name.
    #[schema(example = "Ann")]
    pub name: String,
    /// Client phone number.
    #[schema(example = "+1234567890")]
    pub phone: String,
    /// Optional comment.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub comment: Option<String>,
    /// Selected services, in order.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub selected_services: Option<Vec<String>>,
}
