//! Error types for the streaming cursor

use std::error::Error as StdError;
use thiserror::Error;

pub type Result<T> = std::result::Result<T, CursorError>;

/// Boxed cause carried by a [`SourceError`]
pub type BoxedCause = Box<dyn StdError + Send + Sync + 'static>;

#[derive(Error, Debug)]
pub enum CursorError {
    /// `iterator()` was called a second time on the same cursor
    #[error("Cannot open more than one iterator on a cursor")]
    IllegalReuse,

    /// The row producer or the underlying source failed during a fetch
    #[error("Source error: {0}")]
    Source(#[from] SourceError),

    /// `next()` was called with no row available
    #[error("Cursor exhausted: no row available")]
    Exhausted,

    #[error("Unsupported operation: {0}")]
    Unsupported(&'static str),

    #[error("Config error: {0}")]
    Config(String),
}

/// Failure reported by a row producer or a source handle
#[derive(Error, Debug)]
#[error("{message}")]
pub struct SourceError {
    message: String,
    #[source]
    cause: Option<BoxedCause>,
}

impl SourceError {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            cause: None,
        }
    }

    /// Wrap a lower-level error, keeping it as the `source()` of this one
    pub fn with_cause(message: impl Into<String>, cause: impl Into<BoxedCause>) -> Self {
        Self {
            message: message.into(),
            cause: Some(cause.into()),
        }
    }

    pub fn message(&self) -> &str {
        &self.message
    }
}

impl From<std::io::Error> for CursorError {
    fn from(err: std::io::Error) -> Self {
        CursorError::Config(err.to_string())
    }
}

impl From<serde_json::Error> for CursorError {
    fn from(err: serde_json::Error) -> Self {
        CursorError::Config(err.to_string())
    }
}

impl CursorError {
    /// True for errors that end iteration because the source failed
    pub fn is_source(&self) -> bool {
        matches!(self, CursorError::Source(_))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_source_error_keeps_cause() {
        let io = std::io::Error::new(std::io::ErrorKind::BrokenPipe, "socket closed");
        let err = SourceError::with_cause("read row 7", io);
        assert_eq!(err.message(), "read row 7");
        assert_eq!(err.source().unwrap().to_string(), "socket closed");

        let wrapped: CursorError = err.into();
        assert!(wrapped.is_source());
        assert_eq!(wrapped.to_string(), "Source error: read row 7");
    }

    #[test]
    fn test_error_messages() {
        assert_eq!(
            CursorError::IllegalReuse.to_string(),
            "Cannot open more than one iterator on a cursor"
        );
        assert!(!CursorError::Exhausted.is_source());
        assert_eq!(
            CursorError::Unsupported("remove").to_string(),
            "Unsupported operation: remove"
        );
    }
}
