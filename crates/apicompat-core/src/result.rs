//! Result type alias for API compatibility operations

use crate::error::ApiCompatError;

/// Standard Result type for API compatibility operations
pub type Result<T> = std::result::Result<T, ApiCompatError>;

/// Extension trait for Result to provide additional convenience methods
pub trait ResultExt<T> {
    /// Log the error and continue with None if recoverable
    fn log_and_continue(self) -> Option<T>;
}

impl<T> ResultExt<T> for Result<T> {
    fn log_and_continue(self) -> Option<T> {
        match self {
            Ok(value) => Some(value),
            Err(err) => {
                if err.is_recoverable() {
                    tracing::warn!("Continuing after error: {}", err);
                } else {
                    tracing::error!("Fatal error: {}", err);
                }
                None
            }
        }
    }
}
