//! Error types for emission calculations

use thiserror::Error;

/// Result type alias for emission operations
pub type Result<T> = std::result::Result<T, EmissionError>;

/// Errors that can occur building or querying an emission schedule
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum EmissionError {
    /// Parameters that cannot describe a terminating, decaying curve
    #[error("Invalid emission configuration: {0}")]
    InvalidConfiguration(String),

    /// Caller-supplied query argument out of range
    #[error("Invalid argument: {0}")]
    InvalidArgument(String),
}

impl EmissionError {
    /// Get the error code for API responses
    pub fn code(&self) -> u32 {
        match self {
            Self::InvalidConfiguration(_) => 2001,
            Self::InvalidArgument(_) => 2002,
        }
    }
}
