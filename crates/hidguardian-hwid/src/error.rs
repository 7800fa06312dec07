//! Error types for hardware ID parsing

use thiserror::Error;

/// Errors produced while validating or extracting hardware IDs
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum HwidError {
    /// The string does not contain a recognisable HID hardware ID
    #[error("Invalid hardware ID: {0:?}")]
    Invalid(String),

    /// A built-in pattern failed to compile
    #[error("Failed to compile {name} pattern: {message}")]
    Pattern {
        /// Pattern name
        name: &'static str,
        /// Compiler message
        message: String,
    },
}

impl HwidError {
    /// Create an invalid hardware ID error.
    pub fn invalid(candidate: impl Into<String>) -> Self {
        HwidError::Invalid(candidate.into())
    }

    /// Check if the error was caused by caller input rather than the crate itself.
    pub fn is_invalid_input(&self) -> bool {
        matches!(self, HwidError::Invalid(_))
    }
}
