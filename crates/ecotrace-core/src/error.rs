//! Error types for the EcoTrace core library.

/// Errors that can occur in EcoTrace core operations.
///
/// Malformed persisted sessions and non-numeric calculator input are not
/// represented here: both are recovered where they happen (absent session,
/// zero contribution) and never reach the caller.
#[derive(Debug, thiserror::Error)]
#[non_exhaustive]
pub enum Error {
    /// A required identity, form or report field was empty.
    #[error("Validation error: {message}")]
    Validation {
        /// Field that failed validation
        field: Option<String>,
        /// What went wrong
        message: String,
    },

    /// The action needs an active session and there is none.
    #[error("No active session")]
    NoActiveSession,

    /// Durable storage could not be written or removed.
    #[error("Storage error: {0}")]
    Storage(#[from] std::io::Error),

    /// Session snapshot could not be encoded.
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// Configuration error
    #[error("Configuration error: {message}")]
    Config {
        /// What configuration is problematic
        message: String,
    },
}

/// Convenience `Result` type alias for EcoTrace operations.
pub type Result<T> = std::result::Result<T, Error>;

impl Error {
    /// Returns whether presentation should show this error to the user as
    /// an error-severity notice.
    ///
    /// Missing sessions are routed to login or registration instead, and
    /// storage/config failures are operator problems rather than user input
    /// problems.
    pub fn is_user_facing(&self) -> bool {
        match self {
            Error::Validation { .. } => true,
            Error::NoActiveSession => false,
            Error::Storage(_) => false,
            Error::Serialization(_) => false,
            Error::Config { .. } => false,
        }
    }

    /// Creates a new validation error.
    pub fn validation<S: Into<String>>(message: S) -> Self {
        Error::Validation {
            field: None,
            message: message.into(),
        }
    }

    /// Creates a new validation error with a field name.
    pub fn validation_field<F, M>(field: F, message: M) -> Self
    where
        F: Into<String>,
        M: Into<String>,
    {
        Error::Validation {
            field: Some(field.into()),
            message: message.into(),
        }
    }

    /// Creates a new configuration error.
    pub fn config<S: Into<String>>(message: S) -> Self {
        Error::Config {
            message: message.into(),
        }
    }
}

/// Returns a validation error naming `field` when `value` is blank.
pub(crate) fn require_non_empty(field: &str, value: &str) -> Result<()> {
    if value.trim().is_empty() {
        return Err(Error::validation_field(field, "must not be empty"));
    }
    Ok(())
}
