//! Error types and handling for API compatibility runs

use std::path::PathBuf;
use thiserror::Error;

/// Main error type for API compatibility operations
///
/// Missing API is never an error: it is reported as a
/// [`CompatDifference`](crate::CompatDifference). Only configuration problems
/// and broken engine invariants interrupt a run.
#[derive(Debug, Error)]
pub enum ApiCompatError {
    /// Configuration loading or validation errors
    #[error("Configuration error: {message}")]
    ConfigError { message: String },

    /// File system I/O errors
    #[error("IO error for path '{path}': {source}")]
    IoError {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// An API surface file could not be decoded
    #[error("Invalid API surface '{path}': {message}")]
    SurfaceError { path: PathBuf, message: String },

    /// A programming error inside the comparison engine
    #[error("Invariant violation: {message}")]
    InvariantViolation { message: String },
}

/// Error kind enumeration for categorizing errors
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    Config,
    Io,
    Surface,
    Invariant,
}

impl ApiCompatError {
    /// Get the error kind for this error
    pub fn kind(&self) -> ErrorKind {
        match self {
            ApiCompatError::ConfigError { .. } => ErrorKind::Config,
            ApiCompatError::IoError { .. } => ErrorKind::Io,
            ApiCompatError::SurfaceError { .. } => ErrorKind::Surface,
            ApiCompatError::InvariantViolation { .. } => ErrorKind::Invariant,
        }
    }

    /// Check if this error is recoverable (a loader can skip the offending input)
    pub fn is_recoverable(&self) -> bool {
        matches!(self.kind(), ErrorKind::Io | ErrorKind::Surface)
    }

    /// Create a configuration error
    pub fn config_error(message: impl Into<String>) -> Self {
        Self::ConfigError {
            message: message.into(),
        }
    }

    /// Create an IO error with path context
    pub fn io_error(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::IoError {
            path: path.into(),
            source,
        }
    }

    /// Create a surface decoding error
    pub fn surface_error(path: impl Into<PathBuf>, message: impl Into<String>) -> Self {
        Self::SurfaceError {
            path: path.into(),
            message: message.into(),
        }
    }

    /// Create an invariant violation
    pub fn invariant(message: impl Into<String>) -> Self {
        Self::InvariantViolation {
            message: message.into(),
        }
    }
}

impl From<std::io::Error> for ApiCompatError {
    fn from(err: std::io::Error) -> Self {
        Self::IoError {
            path: PathBuf::new(),
            source: err,
        }
    }
}
