//! Application error types with rich context

use std::path::PathBuf;
use thiserror::Error;

/// Result type alias using our Error type
pub type Result<T> = std::result::Result<T, Error>;

/// Application error types organized by layer/domain
#[derive(Debug, Error)]
pub enum Error {
    // ─────────────────────────────────────────────────────────────
    // Common/Infrastructure Errors
    // ─────────────────────────────────────────────────────────────
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    // ─────────────────────────────────────────────────────────────
    // Terminal/TUI Errors
    // ─────────────────────────────────────────────────────────────
    #[error("Terminal error: {message}")]
    Terminal { message: String },

    // ─────────────────────────────────────────────────────────────
    // Parameter Store Errors
    // ─────────────────────────────────────────────────────────────
    #[error("Parameter store unavailable at: {path}")]
    ParamsUnavailable { path: PathBuf },

    #[error("Failed to write parameter {key}: {reason}")]
    ParamWrite { key: String, reason: String },

    // ─────────────────────────────────────────────────────────────
    // Calibration Errors
    // ─────────────────────────────────────────────────────────────
    #[error("Invalid calibration payload: {message}")]
    Calibration { message: String },
}

// ─────────────────────────────────────────────────────────────────
// Convenience Constructors
// ─────────────────────────────────────────────────────────────────

impl Error {
    pub fn terminal(message: impl Into<String>) -> Self {
        Self::Terminal {
            message: message.into(),
        }
    }

    pub fn param_write(key: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::ParamWrite {
            key: key.into(),
            reason: reason.into(),
        }
    }

    pub fn calibration(message: impl Into<String>) -> Self {
        Self::Calibration {
            message: message.into(),
        }
    }

    /// Check if this is a recoverable error
    pub fn is_recoverable(&self) -> bool {
        matches!(self, Error::Calibration { .. } | Error::ParamWrite { .. })
    }

    /// Check if this error should trigger application exit
    pub fn is_fatal(&self) -> bool {
        matches!(self, Error::ParamsUnavailable { .. })
    }
}

/// Extension trait for adding context to Results
pub trait ResultExt<T> {
    /// Add context to an error
    fn context(self, context: impl Into<String>) -> Result<T>;

    /// Add context with a closure (lazy evaluation)
    fn with_context<F>(self, f: F) -> Result<T>
    where
        F: FnOnce() -> String;
}

impl<T, E: Into<Error>> ResultExt<T> for std::result::Result<T, E> {
    fn context(self, context: impl Into<String>) -> Result<T> {
        self.map_err(|e| {
            let err = e.into();
            tracing::error!("{}: {:?}", context.into(), err);
            err
        })
    }

    fn with_context<F>(self, f: F) -> Result<T>
    where
        F: FnOnce() -> String,
    {
        self.map_err(|e| {
            let err = e.into();
            tracing::error!("{}: {:?}", f(), err);
            err
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display_messages() {
        let err = Error::calibration("truncated payload");
        assert_eq!(
            err.to_string(),
            "Invalid calibration payload: truncated payload"
        );

        let err = Error::param_write("DongleId", "read-only filesystem");
        assert!(err.to_string().contains("DongleId"));
    }

    #[test]
    fn test_error_from_io() {
        let io_err = std::io::Error::new(std::io::ErrorKind::NotFound, "file not found");
        let err: Error = io_err.into();
        assert!(matches!(err, Error::Io(_)));
    }

    #[test]
    fn test_error_is_fatal() {
        assert!(Error::ParamsUnavailable {
            path: PathBuf::from("/data/params/d")
        }
        .is_fatal());
        assert!(!Error::calibration("bad").is_fatal());
        assert!(!Error::terminal("draw failed").is_fatal());
    }

    #[test]
    fn test_error_is_recoverable() {
        assert!(Error::calibration("bad").is_recoverable());
        assert!(Error::param_write("X", "denied").is_recoverable());
        assert!(!Error::terminal("draw failed").is_recoverable());
    }
}
