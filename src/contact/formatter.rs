//! Application message rendering.

use askama::Template;
use chrono::{DateTime, Utc};

use crate::config::ContactConfig;
use crate::datetime::format_utc_datetime;

use super::types::{RenderedEmail, Submission};

/// Shown when the client left no comment.
pub const NO_COMMENT_PLACEHOLDER: &str = "Not provided";

/// Shown when the client selected no services.
pub const NO_SERVICES_PLACEHOLDER: &str = "None selected";

/// Settings that shape the rendered message.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FormatSettings {
    /// Site name used in the message title.
    pub site_name: String,
    /// Timezone for the timestamp.
    pub timezone: String,
    /// chrono format string for the timestamp.
    pub timestamp_format: String,
}

impl From<&ContactConfig> for FormatSettings {
    fn from(config: &ContactConfig) -> Self {
        Self {
            site_name: config.site_name.clone(),
            timezone: config.timezone.clone(),
            timestamp_format: config.timestamp_format.clone(),
        }
    }
}

impl Default for FormatSettings {
    fn default() -> Self {
        Self::from(&ContactConfig::default())
    }
}

/// HTML alternative of the application message.
///
/// Every field is escaped by the template.
#[derive(Template)]
#[template(
    ext = "html",
    source = "<h2>New application from the {{ site }} website</h2>
<p><strong>Name:</strong> {{ name }}</p>
<p><strong>Phone:</strong> {{ phone }}</p>
<p><strong>Comment:</strong> {{ comment }}</p>
<p><strong>Additional services:</strong> {{ services }}</p>
<p><strong>Date:</strong> {{ timestamp }}</p>
"
)]
struct ApplicationHtml<'a> {
    site: &'a str,
    name: &'a str,
    phone: &'a str,
    comment: &'a str,
    services: &'a str,
    timestamp: &'a str,
}

/// Render a submission into a subject, a plain-text body and an HTML
/// alternative.
///
/// Output depends only on the arguments, so a fixed `now` gives identical
/// messages. Blank service labels are skipped.
pub fn format_email(
    submission: &Submission,
    settings: &FormatSettings,
    now: DateTime<Utc>,
) -> RenderedEmail {
    let comment = submission
        .comment
        .as_deref()
        .unwrap_or(NO_COMMENT_PLACEHOLDER);

    let labels: Vec<&str> = submission
        .selected_services
        .iter()
        .map(String::as_str)
        .filter(|label| !label.trim().is_empty())
        .collect();
    let services = if labels.is_empty() {
        NO_SERVICES_PLACEHOLDER.to_string()
    } else {
        labels.join(", ")
    };

    let timestamp = format_utc_datetime(&now, &settings.timezone, &settings.timestamp_format);

    let body = format!(
        "New application from the {site} website\n\
         \n\
         Name: {name}\n\
         Phone: {phone}\n\
         Comment: {comment}\n\
         Additional services: {services}\n\
         Date: {timestamp}\n",
        site = settings.site_name,
        name = submission.name,
        phone = submission.phone,
    );

    let html = ApplicationHtml {
        site: &settings.site_name,
        name: &submission.name,
        phone: &submission.phone,
        comment,
        services: &services,
        timestamp: &timestamp,
    }
    .render()
    .map_err(|e| tracing::warn!(error = %e, "Failed to render HTML application"))
    .ok();

    RenderedEmail {
        subject: format!("New application from {}", submission.name),
        body,
        html,
    }
}
