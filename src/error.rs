//! Error types for stack-maint.
//!
//! Uses thiserror for derive macros and provides user-actionable error messages.

use crate::exit_codes;
use thiserror::Error;

/// Main error type for stack-maint operations.
///
/// Each variant maps to an exit code via [`MaintError::exit_code`].
#[derive(Error, Debug)]
pub enum MaintError {
    /// The module to patch could not be resolved to a file on disk.
    #[error("module '{module}' not found: {reason}")]
    ModuleNotFound { module: String, reason: String },

    /// An expected literal block or constant is missing from the input text.
    #[error("{0}")]
    PatternNotFound(String),

    /// The upstream document is missing a named template constant.
    #[error("{0} not found")]
    TemplateNotFound(String),

    /// The local configuration does not have the expected shape.
    #[error("{0}")]
    ConfigError(String),

    /// Network request failed or returned a non-success status.
    #[error("HTTP request failed: {0}")]
    HttpError(String),

    /// Local prompts differ from upstream. The command prints the diff
    /// itself, so this only carries the exit code.
    #[error("{0}")]
    Drift(String),

    /// Filesystem read or write failed.
    #[error("{0}")]
    IoError(String),
}

impl MaintError {
    /// Returns the appropriate exit code for this error type.
    pub fn exit_code(&self) -> i32 {
        match self {
            MaintError::Drift(_) => exit_codes::OUT_OF_SYNC,
            MaintError::ModuleNotFound { .. }
            | MaintError::PatternNotFound(_)
            | MaintError::TemplateNotFound(_)
            | MaintError::ConfigError(_)
            | MaintError::HttpError(_)
            | MaintError::IoError(_) => exit_codes::FAILURE,
        }
    }

    /// Whether the command already told the user about this failure.
    pub fn already_reported(&self) -> bool {
        matches!(self, MaintError::Drift(_))
    }
}

impl From<reqwest::Error> for MaintError {
    fn from(err: reqwest::Error) -> Self {
        MaintError::HttpError(err.to_string())
    }
}

/// Result type alias for stack-maint operations.
pub type Result<T> = std::result::Result<T, MaintError>;
