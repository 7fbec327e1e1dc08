//! Common error types for Mathcards components.

use thiserror::Error;

/// Common errors across Mathcards components
#[derive(Debug, Error)]
pub enum MathcardsError {
    /// Unknown session id
    #[error("Session not found: {0}")]
    NotFound(String),

    /// Malformed request payload
    #[error("Invalid input: {0}")]
    InvalidInput(String),
}

impl MathcardsError {
    /// Returns the HTTP status code for this error
    pub fn status_code(&self) -> u16 {
        match self {
            Self::NotFound(_) => 404,
            Self::InvalidInput(_) => 400,
        }
    }

    /// Short machine-readable error kind
    pub fn kind(&self) -> &'static str {
        match self {
            Self::NotFound(_) => "not_found",
            Self::InvalidInput(_) => "invalid_input",
        }
    }
}
