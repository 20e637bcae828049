//! Resource detector contract.
//!
//! A [`Detector`] produces a [`Resource`] describing the host together with
//! the schema URL its attribute names follow. [`detect_resource`] runs a set
//! of detectors and merges their output, first detector wins on conflicts.

use async_trait::async_trait;

use hostprobe_core::{Context, Resource};

use crate::error::Result;

/// Output of a successful detection.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct DetectedResource {
    /// Detected attributes.
    pub resource: Resource,
    /// Schema URL of the attribute names; empty when nothing was detected.
    pub schema_url: String,
}

impl DetectedResource {
    /// An empty resource with no schema URL.
    #[must_use]
    pub fn empty() -> Self {
        Self::default()
    }

    /// Returns true if no attributes were detected.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.resource.is_empty()
    }
}

/// A source of resource attributes.
#[async_trait]
pub trait Detector: Send + Sync {
    /// Detector type name, as used in configuration.
    fn name(&self) -> &'static str;

    /// Detects the resource.
    ///
    /// # Errors
    /// Returns an error if detection fails. A failed detection contributes
    /// no attributes.
    async fn detect(&self, ctx: &Context) -> Result<DetectedResource>;
}

/// Runs every detector in order and merges the results.
///
/// Attributes from earlier detectors take precedence. The schema URL is the
/// first non-empty one seen. Failing detectors are logged and skipped.
pub async fn detect_resource(detectors: &[Box<dyn Detector>], ctx: &Context) -> DetectedResource {
    let mut merged = DetectedResource::empty();

    for detector in detectors {
        match detector.detect(ctx).await {
            Ok(detected) => {
                tracing::debug!(
                    detector = detector.name(),
                    attributes = detected.resource.len(),
                    "detected resource"
                );
                merged.resource.merge(&detected.resource);
                if merged.schema_url.is_empty() {
                    merged.schema_url = detected.schema_url;
                }
            }
            Err(e) => {
                tracing::warn!(detector = detector.name(), error = %e, "failed to detect resource");
            }
        }
    }

    merged
}
