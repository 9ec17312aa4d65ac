//! Submission validation.
//!
//! Turns an untyped JSON body into a [`Submission`], reporting every failing
//! field at once rather than stopping at the first.

use serde_json::{Map, Value};
use validator::{ValidationError, ValidationErrors};

use super::types::Submission;

/// Field names as they appear on the wire.
pub const FIELD_NAME: &str = "name";
pub const FIELD_PHONE: &str = "phone";
pub const FIELD_COMMENT: &str = "comment";
pub const FIELD_SELECTED_SERVICES: &str = "selectedServices";
/// Key used when the body itself is malformed.
pub const FIELD_BODY: &str = "body";

/// Validate a raw submission.
///
/// # Errors
///
/// Returns `ValidationErrors` keyed by field name if:
/// - The body is not a JSON object
/// - `name` or `phone` is missing, not a string, blank, or contains control characters
/// - `comment` is present but not a string
/// - `selectedServices` is present but not an array of strings
pub fn validate_submission(raw: &Value) -> Result<Submission, ValidationErrors> {
    let mut errors = ValidationErrors::new();

    let Some(fields) = raw.as_object() else {
        errors.add(
            FIELD_BODY,
            ValidationError::new("type").with_message("Request body must be a JSON object".into()),
        );
        return Err(errors);
    };

    let name = required_text(fields, FIELD_NAME, &mut errors);
    let phone = required_text(fields, FIELD_PHONE, &mut errors);
    let comment = optional_text(fields, FIELD_COMMENT, &mut errors);
    let selected_services = text_list(fields, FIELD_SELECTED_SERVICES, &mut errors);

    match (name, phone) {
        (Some(name), Some(phone)) if errors.is_empty() => Ok(Submission {
            name,
            phone,
            comment,
            selected_services,
        }),
        _ => Err(errors),
    }
}

fn required_text(
    fields: &Map<String, Value>,
    field: &'static str,
    errors: &mut ValidationErrors,
) -> Option<String> {
    match fields.get(field) {
        None | Some(Value::Null) => {
            errors.add(
                field,
                ValidationError::new("required").with_message("This field is required".into()),
            );
            None
        }
        Some(Value::String(value)) => {
            let mut ok = true;
            for check in [not_empty_trimmed, no_control_chars] {
                if let Err(e) = check(value) {
                    errors.add(field, e);
                    ok = false;
                }
            }
            ok.then(|| value.clone())
        }
        Some(_) => {
            errors.add(field, type_error("Must be a string"));
            None
        }
    }
}

fn optional_text(
    fields: &Map<String, Value>,
    field: &'static str,
    errors: &mut ValidationErrors,
) -> Option<String> {
    match fields.get(field) {
        None | Some(Value::Null) => None,
        Some(Value::String(value)) => {
            if let Err(e) = no_control_chars(value) {
                errors.add(field, e);
                return None;
            }
            (!value.trim().is_empty()).then(|| value.clone())
        }
        Some(_) => {
            errors.add(field, type_error("Must be a string"));
            None
        }
    }
}

fn text_list(
    fields: &Map<String, Value>,
    field: &'static str,
    errors: &mut ValidationErrors,
) -> Vec<String> {
    match fields.get(field) {
        None | Some(Value::Null) => Vec::new(),
        Some(Value::Array(items)) => {
            let mut labels = Vec::with_capacity(items.len());
            for (index, item) in items.iter().enumerate() {
                match item {
                    Value::String(label) => labels.push(label.clone()),
                    _ => errors.add(
                        field,
                        type_error(format!("Entry {index} must be a string")),
                    ),
                }
            }
            labels
        }
        Some(_) => {
            errors.add(field, type_error("Must be an array of strings"));
            Vec::new()
        }
    }
}

fn type_error(message: impl Into<String>) -> ValidationError {
    let message: String = message.into();
    ValidationError::new("type").with_message(message.into())
}

/// Validate that a string does not contain control characters or NULL bytes.
pub fn no_control_chars(value: &str) -> Result<(), ValidationError> {
    if value
        .chars()
        .any(|c| c.is_control() && c != '\n' && c != '\r' && c != '\t')
    {
        return Err(ValidationError::new("no_control_chars")
            .with_message("Must not contain control characters".into()));
    }
    Ok(())
}

/// Validate that a string is not empty after trimming whitespace.
pub fn not_empty_trimmed(value: &str) -> Result<(), ValidationError> {
    if value.trim().is_empty() {
        return Err(ValidationError::new("not_empty_trimmed").with_message("Must not be empty".into()));
    }
    Ok(())
}
