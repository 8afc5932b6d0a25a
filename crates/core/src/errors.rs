//! Core error types for the Wealthtrack client.
//!
//! Transport-specific failures (reqwest, file I/O) are converted into these
//! variants by the crate that performs the I/O, so callers only ever match on
//! one enum.

use thiserror::Error;

/// Type alias for Result using our Error type.
pub type Result<T> = std::result::Result<T, Error>;

/// Root error type for the client.
#[derive(Error, Debug)]
pub enum Error {
    /// The backend rejected the bearer token, or no session is stored.
    #[error("Not authenticated. Please log in again.")]
    Unauthorized,

    #[error("Not found: {0}")]
    NotFound(String),

    /// Non-success response from the backend that is not an auth or lookup failure.
    #[error("API error {status}: {message}")]
    Api { status: u16, message: String },

    #[error("Network request failed: {0}")]
    Network(String),

    #[error("Input validation failed: {0}")]
    Validation(#[from] ValidationError),

    #[error("Session storage failed: {0}")]
    Session(String),

    #[error("Invalid configuration: {0}")]
    Config(String),

    #[error("Unexpected error: {0}")]
    Unexpected(String),
}

impl Error {
    /// True when the error means the stored credentials are no longer usable.
    pub fn is_unauthorized(&self) -> bool {
        matches!(self, Error::Unauthorized)
    }
}

/// Validation errors for user input.
#[derive(Error, Debug)]
pub enum ValidationError {
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("Required field '{0}' is missing")]
    MissingField(String),
}

impl From<serde_json::Error> for Error {
    fn from(err: serde_json::Error) -> Self {
        Error::Unexpected(format!("JSON error: {}", err))
    }
}

impl From<Error> for String {
    fn from(err: Error) -> Self {
        err.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validation_error_wraps_into_error() {
        let err: Error = ValidationError::MissingField("symbol".to_string()).into();
        assert!(matches!(err, Error::Validation(ValidationError::MissingField(_))));
        assert_eq!(
            String::from(err),
            "Input validation failed: Required field 'symbol' is missing"
        );
    }

    #[test]
    fn test_only_unauthorized_is_unauthorized() {
        assert!(Error::Unauthorized.is_unauthorized());
        assert!(!Error::NotFound("asset".to_string()).is_unauthorized());
    }
}
