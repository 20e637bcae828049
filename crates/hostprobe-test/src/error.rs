//! Test error types.

/// Result type alias for test operations.
pub type Result<T> = std::result::Result<T, TestError>;

/// Testing errors.
#[derive(Debug, thiserror::Error)]
pub enum TestError {
    /// Core error (configuration, lifecycle, readers).
    #[error("core error: {0}")]
    Core(#[from] hostprobe_core::CoreError),

    /// Detection error.
    #[error("detect error: {0}")]
    Detect(#[from] hostprobe_detect::DetectError),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_core_error_conversion() {
        let err: TestError = hostprobe_core::CoreError::state("not running").into();
        assert!(err.to_string().contains("not running"));
    }

    #[test]
    fn test_detect_error_conversion() {
        let err: TestError = hostprobe_detect::DetectError::AllSourcesFailed.into();
        assert!(err.to_string().contains("all hostname sources failed"));
    }
}
