//! Detection error types.

use hostprobe_core::{CoreError, HostnameSource};

/// Result type alias for detection operations.
pub type Result<T> = std::result::Result<T, DetectError>;

/// Resource detection errors.
#[derive(Debug, thiserror::Error)]
pub enum DetectError {
    /// The OS type could not be determined. Terminal: there is no fallback.
    #[error("failed getting OS type: {0}")]
    OsType(#[source] CoreError),

    /// A single hostname source failed.
    #[error("failed getting {what}: {error}")]
    Source {
        /// The source that failed.
        hostname_source: HostnameSource,
        /// What the source was trying to read.
        what: &'static str,
        /// The underlying failure.
        #[source]
        error: CoreError,
    },

    /// Every configured hostname source failed.
    #[error("all hostname sources failed to get hostname")]
    AllSourcesFailed,

    /// Invalid detector configuration.
    #[error(transparent)]
    Config(#[from] CoreError),
}

impl DetectError {
    /// Creates a hostname source error.
    #[must_use]
    pub const fn source_failed(
        hostname_source: HostnameSource,
        what: &'static str,
        error: CoreError,
    ) -> Self {
        Self::Source {
            hostname_source,
            what,
            error,
        }
    }
}
