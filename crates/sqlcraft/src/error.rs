//! Error types for sqlcraft

use thiserror::Error;

/// Result type alias for builder operations
pub type BuildResult<T> = Result<T, BuildError>;

/// Error types for SQL construction
#[derive(Debug, Error)]
pub enum BuildError {
    /// A builder method was called with an unusable argument
    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    /// Value serialization error
    #[error("Serialization error: {0}")]
    Serialization(String),
}

impl BuildError {
    /// Create an invalid-argument error
    pub fn invalid_argument(message: impl Into<String>) -> Self {
        Self::InvalidArgument(message.into())
    }

    /// Check if this is an invalid-argument error
    pub fn is_invalid_argument(&self) -> bool {
        matches!(self, Self::InvalidArgument(_))
    }
}

impl From<serde_json::Error> for BuildError {
    fn from(err: serde_json::Error) -> Self {
        Self::Serialization(err.to_string())
    }
}
