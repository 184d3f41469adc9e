//! Field-level validation helpers.
//!
//! The `validator` derive handles length bounds; the helpers here cover the
//! rules it cannot express and turn collected failures into [`CoreError`].

use validator::{Validate, ValidationError, ValidationErrors};

use crate::error::CoreError;

/// Maximum length for free-text vehicle fields (`name`, `make`).
pub const MAX_FIELD_LENGTH: u64 = 100;

/// Reject strings that are empty once surrounding whitespace is removed.
pub fn not_blank(value: &str) -> Result<(), ValidationError> {
    if value.trim().is_empty() {
        let mut err = ValidationError::new("blank");
        err.message = Some("must not be blank".into());
        return Err(err);
    }
    Ok(())
}

/// Run the derived validation rules on `input`, mapping failures to
/// [`CoreError::Validation`].
pub fn validate_input<T: Validate>(input: &T) -> Result<(), CoreError> {
    input
        .validate()
        .map_err(|errors| CoreError::Validation(describe(&errors)))
}

/// Flatten `errors` into a stable, human-readable `field: message` list.
fn describe(errors: &ValidationErrors) -> String {
    let mut parts: Vec<String> = errors
        .field_errors()
        .iter()
        .flat_map(|(field, errs)| {
            errs.iter().map(move |e| {
                let message = e
                    .message
                    .as_ref()
                    .map(|m| m.to_string())
                    .unwrap_or_else(|| e.code.to_string());
                format!("{field}: {message}")
            })
        })
        .collect();
    parts.sort();
    parts.join("; ")
}
