//! Error types for hostprobe-core.
//!
//! All errors are explicit values; nothing in the collection path panics.

/// Result type alias for core operations.
pub type Result<T> = std::result::Result<T, CoreError>;

/// Error type shared by sources, readers and configuration loading.
#[derive(Debug, thiserror::Error)]
pub enum CoreError {
    /// Configuration error.
    #[error("configuration error: {0}")]
    Config(String),

    /// Operation called in the wrong lifecycle state.
    #[error("invalid state: {0}")]
    State(String),

    /// The caller cancelled the operation or its deadline passed.
    #[error("operation cancelled")]
    Cancelled,

    /// The OS facility does not exist on this platform.
    #[error("not supported: {0}")]
    NotSupported(String),

    /// Raw OS data could not be parsed.
    #[error("parse error: {0}")]
    Parse(String),

    /// A data source reported a failure.
    #[error("{0}")]
    Source(String),

    /// I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl CoreError {
    /// Creates a configuration error.
    #[must_use]
    pub fn config(msg: impl Into<String>) -> Self {
        Self::Config(msg.into())
    }

    /// Creates an invalid state error.
    #[must_use]
    pub fn state(msg: impl Into<String>) -> Self {
        Self::State(msg.into())
    }

    /// Creates a not supported error.
    #[must_use]
    pub fn not_supported(msg: impl Into<String>) -> Self {
        Self::NotSupported(msg.into())
    }

    /// Creates a parse error.
    #[must_use]
    pub fn parse(msg: impl Into<String>) -> Self {
        Self::Parse(msg.into())
    }

    /// Creates a source error.
    #[must_use]
    pub fn source(msg: impl Into<String>) -> Self {
        Self::Source(msg.into())
    }

    /// Returns true if the facility is missing on this platform.
    #[must_use]
    pub const fn is_not_supported(&self) -> bool {
        matches!(self, Self::NotSupported(_))
    }

    /// Returns true if the operation was cancelled.
    #[must_use]
    pub const fn is_cancelled(&self) -> bool {
        matches!(self, Self::Cancelled)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = CoreError::config("collection_interval must be positive");
        assert_eq!(
            err.to_string(),
            "configuration error: collection_interval must be positive"
        );
    }

    #[test]
    fn test_source_error_is_verbatim() {
        let err = CoreError::source("err1");
        assert_eq!(err.to_string(), "err1");
    }

    #[test]
    fn test_not_supported() {
        let err = CoreError::not_supported("FQDN lookup on windows");
        assert!(err.is_not_supported());
        assert!(!err.is_cancelled());
        assert!(err.to_string().contains("not supported"));
    }

    #[test]
    fn test_cancelled() {
        assert!(CoreError::Cancelled.is_cancelled());
        assert_eq!(CoreError::Cancelled.to_string(), "operation cancelled");
    }

    #[test]
    fn test_io_error_conversion() {
        let io_err = std::io::Error::new(std::io::ErrorKind::NotFound, "no such file");
        let err: CoreError = io_err.into();
        assert!(err.to_string().contains("I/O error"));
    }
}
