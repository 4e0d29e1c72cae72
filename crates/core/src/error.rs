use crate::validation::FieldErrors;

/// Errors raised by domain-level checks.
#[derive(Debug, thiserror::Error)]
pub enum CoreError {
    #[error("Validation failed: {0}")]
    Validation(FieldErrors),

    #[error("Unknown status: {0}")]
    UnknownStatus(String),
}
