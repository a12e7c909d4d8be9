//! Error types for the dashboard crates.

use thiserror::Error;

/// Result type alias using EpdError.
pub type EpdResult<T> = Result<T, EpdError>;

/// Primary error type for rendering and display operations.
#[derive(Debug, Error)]
pub enum EpdError {
    // === Argument Errors ===
    #[error("Invalid argument '{param}': {message}")]
    InvalidArgument { param: String, message: String },

    // === Asset Errors ===
    #[error("Failed to load font: {0}")]
    FontError(String),

    #[error("Icon not found: {0}")]
    IconNotFound(String),

    #[error("Image error: {0}")]
    ImageError(String),

    // === Output Errors ===
    #[error("Encoding failed: {0}")]
    EncodeError(String),

    #[error("Frame is {actual_width}x{actual_height}, panel expects {expected_width}x{expected_height}")]
    FrameSizeMismatch {
        expected_width: u32,
        expected_height: u32,
        actual_width: u32,
        actual_height: u32,
    },

    #[error("Display error: {0}")]
    DisplayError(String),

    // === Infrastructure Errors ===
    #[error("I/O error: {0}")]
    IoError(String),

    #[error("Configuration error: {0}")]
    ConfigError(String),
}

impl EpdError {
    /// Shorthand for an `InvalidArgument` error.
    pub fn invalid_argument(param: impl Into<String>, message: impl Into<String>) -> Self {
        EpdError::InvalidArgument {
            param: param.into(),
            message: message.into(),
        }
    }

    /// Whether the error was caused by caller input rather than the environment.
    pub fn is_caller_error(&self) -> bool {
        matches!(
            self,
            EpdError::InvalidArgument { .. } | EpdError::FrameSizeMismatch { .. }
        )
    }
}

impl From<std::io::Error> for EpdError {
    fn from(err: std::io::Error) -> Self {
        EpdError::IoError(err.to_string())
    }
}
