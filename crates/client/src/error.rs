use museum_core::error::CoreError;
use museum_core::validation::FieldErrors;

/// Errors from the REST API layer.
///
/// Every variant can be flattened into the `{message, statusCode, errors?}`
/// shape the portals display via [`message`](Self::message),
/// [`status_code`](Self::status_code) and [`field_errors`](Self::field_errors).
#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    /// The HTTP request itself failed (network, DNS, TLS, timeout).
    #[error("HTTP request failed: {0}")]
    Transport(#[from] reqwest::Error),

    /// The API answered with a non-2xx status or an explicit `success: false`.
    #[error("API error ({status}): {message}")]
    Status {
        status: u16,
        message: String,
        errors: Option<FieldErrors>,
    },

    /// A 2xx body did not have the expected shape.
    #[error("Unexpected response body: {0}")]
    Decode(String),

    /// A request DTO failed client-side validation; nothing was sent.
    #[error("Validation failed: {0}")]
    Validation(FieldErrors),

    /// The request could not be built.
    #[error("Invalid request: {0}")]
    InvalidRequest(String),
}

/// Convenience alias for API call results.
pub type ApiResult<T> = Result<T, ApiError>;

impl ApiError {
    /// HTTP status of the failure; `0` for transport and decode failures.
    /// Client-side validation reports `400` so forms treat it like a
    /// server-side rejection.
    pub fn status_code(&self) -> u16 {
        match self {
            ApiError::Transport(_) | ApiError::Decode(_) => 0,
            ApiError::Status { status, .. } => *status,
            ApiError::Validation(_) | ApiError::InvalidRequest(_) => 400,
        }
    }

    /// Display message for an error panel or toast.
    pub fn message(&self) -> String {
        match self {
            ApiError::Status { message, .. } => message.clone(),
            ApiError::Validation(_) => "Validation failed".to_string(),
            other => other.to_string(),
        }
    }

    /// Field-level messages, when the failure carried any.
    pub fn field_errors(&self) -> Option<&FieldErrors> {
        match self {
            ApiError::Status { errors, .. } => errors.as_ref(),
            ApiError::Validation(errors) => Some(errors),
            _ => None,
        }
    }

    /// `true` for 401/403, which list views treat as "no data".
    pub fn is_auth_failure(&self) -> bool {
        matches!(self.status_code(), 401 | 403)
    }
}

impl From<CoreError> for ApiError {
    fn from(err: CoreError) -> Self {
        match err {
            CoreError::Validation(errors) => ApiError::Validation(errors),
            other => ApiError::InvalidRequest(other.to_string()),
        }
    }
}
