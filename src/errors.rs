//! Shared error types used across submodules.

use thiserror::Error;

/// Top-level error type for the crate.
#[derive(Debug, Error)]
pub enum LoadingError {
    /// A circuit or sweep value is non-numeric or outside its physical domain.
    #[error("invalid {name}: {reason}")]
    InvalidParameter {
        /// Which quantity was rejected.
        name: &'static str,
        /// What was wrong with it.
        reason: String,
    },
    /// Creating the output directory or writing an artifact failed.
    #[error("I/O failure: {0}")]
    Io(#[from] std::io::Error),
    /// The chart backend could not draw or encode the figure.
    #[error("chart rendering failed: {0}")]
    Render(String),
    /// Interactive input was aborted before all values were entered.
    #[error("cancelled by user")]
    Cancelled,
}

impl LoadingError {
    /// Shorthand for [`LoadingError::InvalidParameter`].
    pub fn invalid(name: &'static str, reason: impl Into<String>) -> Self {
        Self::InvalidParameter {
            name,
            reason: reason.into(),
        }
    }
}

/// Crate-wide result alias.
pub type Result<T> = std::result::Result<T, LoadingError>;
