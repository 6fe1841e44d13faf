//! Field checks shared by aggregate validation functions.
//!
//! Lengths are counted in `char`s, not bytes.

use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FieldError {
    #[error("{field} is required")]
    Blank { field: &'static str },

    #[error("{field} must be at most {max} characters (got {actual})")]
    TooLong {
        field: &'static str,
        max: usize,
        actual: usize,
    },
}

/// Reject empty and whitespace-only values
pub fn require_text(field: &'static str, value: &str) -> Result<(), FieldError> {
    if value.trim().is_empty() {
        return Err(FieldError::Blank { field });
    }
    Ok(())
}

pub fn require_max_len(field: &'static str, value: &str, max: usize) -> Result<(), FieldError> {
    let actual = value.chars().count();
    if actual > max {
        return Err(FieldError::TooLong { field, max, actual });
    }
    Ok(())
}

/// Every mutating operation is attributed to a non-blank actor
pub fn require_actor(actor: &str) -> Result<(), FieldError> {
    require_text("actor", actor)
}
