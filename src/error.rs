//! Error types for the progression engine

use thiserror::Error;

/// Errors raised by progression calculations and input validation
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ProgressionError {
    /// Caller supplied a value outside the accepted domain
    #[error("invalid argument: {0}")]
    InvalidArgument(String),

    /// Static tables or loaded settings are inconsistent
    #[error("configuration error: {0}")]
    Configuration(String),
}

impl ProgressionError {
    pub fn invalid(message: impl Into<String>) -> Self {
        ProgressionError::InvalidArgument(message.into())
    }

    pub fn configuration(message: impl Into<String>) -> Self {
        ProgressionError::Configuration(message.into())
    }

    pub fn is_invalid_argument(&self) -> bool {
        matches!(self, ProgressionError::InvalidArgument(_))
    }
}

pub type Result<T> = std::result::Result<T, ProgressionError>;
