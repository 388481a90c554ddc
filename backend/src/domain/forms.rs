//! Field-level validation shared by every form the site accepts.
//!
//! Inputs are trimmed before validation. Failures name the offending field so
//! clients can highlight it; they surface as `invalid_request` errors with
//! `details { field, code }`.

use serde_json::json;

use super::Error;

/// A single field validation failure.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum FieldError {
    /// A required field was missing or blank.
    #[error("{field} is required")]
    Missing {
        /// Field name as sent by clients.
        field: &'static str,
    },
    /// The value is shorter than allowed.
    #[error("{field} must be at least {min} characters")]
    TooShort {
        /// Field name as sent by clients.
        field: &'static str,
        /// Minimum length in characters.
        min: usize,
    },
    /// The value is longer than allowed.
    #[error("{field} must be at most {max} characters")]
    TooLong {
        /// Field name as sent by clients.
        field: &'static str,
        /// Maximum length in characters.
        max: usize,
    },
    /// The value has the wrong shape.
    #[error("{field} is not valid")]
    Invalid {
        /// Field name as sent by clients.
        field: &'static str,
    },
    /// The password confirmation differs from the password.
    #[error("passwords do not match")]
    PasswordMismatch,
}

impl FieldError {
    /// Name of the offending field.
    #[must_use]
    pub const fn field(&self) -> &'static str {
        match self {
            Self::Missing { field }
            | Self::TooShort { field, .. }
            | Self::TooLong { field, .. }
            | Self::Invalid { field } => field,
            Self::PasswordMismatch => "confirmPassword",
        }
    }

    /// Machine-readable failure code.
    #[must_use]
    pub const fn code(&self) -> &'static str {
        match self {
            Self::Missing { .. } => "missing_field",
            Self::TooShort { .. } => "too_short",
            Self::TooLong { .. } => "too_long",
            Self::Invalid { .. } => "invalid_value",
            Self::PasswordMismatch => "password_mismatch",
        }
    }
}

impl From<FieldError> for Error {
    fn from(value: FieldError) -> Self {
        Self::invalid_request(value.to_string()).with_details(json!({
            "field": value.field(),
            "code": value.code(),
        }))
    }
}

/// Trim a required value, rejecting blanks.
///
/// # Examples
/// ```
/// use eduwarn::domain::forms::{required, FieldError};
///
/// assert_eq!(required("name", "  Sita ").as_deref(), Ok("Sita"));
/// assert_eq!(required("name", " "), Err(FieldError::Missing { field: "name" }));
/// ```
pub fn required(field: &'static str, value: &str) -> Result<String, FieldError> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Err(FieldError::Missing { field });
    }
    Ok(trimmed.to_owned())
}

/// Trim an optional value; blanks become `None`.
#[must_use]
pub fn optional(value: Option<&str>) -> Option<String> {
    value
        .map(str::trim)
        .filter(|trimmed| !trimmed.is_empty())
        .map(str::to_owned)
}

/// Required value whose length in characters lies within `min..=max`.
pub fn bounded(
    field: &'static str,
    value: &str,
    min: usize,
    max: usize,
) -> Result<String, FieldError> {
    let trimmed = required(field, value)?;
    let length = trimmed.chars().count();
    if length < min {
        return Err(FieldError::TooShort { field, min });
    }
    if length > max {
        return Err(FieldError::TooLong { field, max });
    }
    Ok(trimmed)
}
