//! Validation errors for record drafts.

use super::EmailError;

/// Errors raised when a product or order draft is rejected before it is sent
/// to the record store.
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    /// A required text field is empty.
    #[error("missing required field: {0}")]
    MissingField(&'static str),

    /// A numeric field is outside its allowed range.
    #[error("{field} must be {requirement}")]
    OutOfRange {
        /// Field name on the wire.
        field: &'static str,
        /// Human readable constraint, e.g. `at least 1`.
        requirement: &'static str,
    },

    /// The customer email address is malformed.
    #[error("invalid customer email: {0}")]
    Email(#[from] EmailError),
}

/// Returns `MissingField` when `value` is empty after trimming.
pub(crate) fn require_text(value: &str, field: &'static str) -> Result<(), ValidationError> {
    if value.trim().is_empty() {
        Err(ValidationError::MissingField(field))
    } else {
        Ok(())
    }
}
