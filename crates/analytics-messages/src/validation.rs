//! Shared field checks.

use analytics_core::{AppError, AppResult};

/// Whether a string is absent for validation purposes.
pub(crate) fn is_blank(value: &str) -> bool {
    value.trim().is_empty()
}

/// Reject an empty or whitespace-only mandatory argument.
///
/// `label` is the human name used in the error, e.g. `"screen name"`.
pub(crate) fn require_non_empty(value: String, label: &str) -> AppResult<String> {
    if is_blank(&value) {
        return Err(AppError::invalid_argument(format!(
            "{label} cannot be null or empty."
        )));
    }
    Ok(value)
}
