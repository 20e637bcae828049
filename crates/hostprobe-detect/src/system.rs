//! System resource detector.
//!
//! Produces `host.name` and `os.type`. The OS type is mandatory: if it cannot
//! be read, detection fails without trying any hostname source. The hostname
//! comes from the first source in the chain that succeeds.

use std::sync::Arc;

use async_trait::async_trait;

use hostprobe_core::{Context, Resource, SystemDetectorConfig, resource};

use crate::detect::{DetectedResource, Detector};
use crate::error::{DetectError, Result};
use crate::provider::{OsSystemMetadata, SystemMetadata};
use crate::source::SourceChain;

/// Detects host name and OS type.
#[derive(Clone)]
pub struct SystemDetector {
    provider: Arc<dyn SystemMetadata>,
    chain: SourceChain,
}

impl SystemDetector {
    /// Detector type name.
    pub const TYPE: &'static str = "system";

    /// Creates a detector backed by the running operating system.
    ///
    /// # Errors
    /// Returns an error if the configuration is invalid.
    pub fn new(config: &SystemDetectorConfig) -> Result<Self> {
        Self::with_provider(config, Arc::new(OsSystemMetadata::new()))
    }

    /// Creates a detector backed by a custom metadata provider.
    ///
    /// # Errors
    /// Returns an error if the configuration is invalid.
    pub fn with_provider(
        config: &SystemDetectorConfig,
        provider: Arc<dyn SystemMetadata>,
    ) -> Result<Self> {
        config.validate()?;
        Ok(Self {
            provider,
            chain: SourceChain::new(&config.hostname_sources),
        })
    }

    /// The hostname source chain, in the order sources are tried.
    #[must_use]
    pub const fn chain(&self) -> &SourceChain {
        &self.chain
    }

    /// Runs detection synchronously.
    ///
    /// # Errors
    /// Returns [`DetectError::OsType`] if the OS type cannot be read, or
    /// [`DetectError::AllSourcesFailed`] if no hostname source succeeds.
    pub fn detect_now(&self, ctx: &Context) -> Result<DetectedResource> {
        let os_type = self.provider.os_type(ctx).map_err(DetectError::OsType)?;

        let (source, hostname) = self.chain.resolve(self.provider.as_ref(), ctx)?;
        tracing::debug!(
            source = %source,
            hostname = %hostname,
            os_type = %os_type,
            "detected host"
        );

        let mut res = Resource::new();
        res.insert(resource::HOST_NAME, hostname);
        res.insert(resource::OS_TYPE, os_type);

        Ok(DetectedResource {
            resource: res,
            schema_url: resource::SCHEMA_URL.to_string(),
        })
    }
}

impl std::fmt::Debug for SystemDetector {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SystemDetector")
            .field("chain", &self.chain)
            .finish_non_exhaustive()
    }
}

#[async_trait]
impl Detector for SystemDetector {
    fn name(&self) -> &'static str {
        Self::TYPE
    }

    async fn detect(&self, ctx: &Context) -> Result<DetectedResource> {
        self.detect_now(ctx)
    }
}
