//! Error types for the service and form layers.

use thiserror::Error;

/// Failure of a remote call.
///
/// Pages never inspect the variants beyond success/failure; they turn the
/// `Display` text into a toast.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ApiError {
    #[error("network error: {0}")]
    Network(String),

    #[error("request failed with status {status}: {message}")]
    Status { status: u16, message: String },

    #[error("rejected by server ({code}): {message}")]
    Rejected { code: i64, message: String },

    #[error("failed to decode response: {0}")]
    Decode(String),

    #[error("failed to encode request: {0}")]
    Encode(String),
}

impl From<serde_json::Error> for ApiError {
    fn from(err: serde_json::Error) -> Self {
        ApiError::Decode(err.to_string())
    }
}

impl From<gloo_net::Error> for ApiError {
    fn from(err: gloo_net::Error) -> Self {
        match err {
            gloo_net::Error::SerdeError(e) => ApiError::Decode(e.to_string()),
            other => ApiError::Network(other.to_string()),
        }
    }
}

pub type ApiResult<T> = Result<T, ApiError>;

/// Form field rule violations.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("{0} is required")]
    Required(&'static str),

    #[error("please enter a valid email address")]
    InvalidEmail,

    #[error("please enter a valid mobile number")]
    InvalidMobile,

    #[error("verification code must be 6 digits")]
    InvalidCode,

    #[error("the two passwords do not match")]
    PasswordMismatch,

    #[error("password must be at least {0} characters")]
    PasswordTooShort(usize),
}
