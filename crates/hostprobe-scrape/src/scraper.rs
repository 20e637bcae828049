//! Scraper lifecycle contract.

use async_trait::async_trait;

use hostprobe_core::{Context, Metric, PartialScrapeError, Result};

/// Metrics produced by one tick, plus whatever could not be produced.
#[derive(Debug, Default)]
pub struct ScrapeOutput {
    /// Collected metrics.
    pub metrics: Vec<Metric>,
    /// Failures of this tick, if any.
    pub error: Option<PartialScrapeError>,
}

impl ScrapeOutput {
    /// Returns true if nothing failed.
    #[must_use]
    pub fn is_complete(&self) -> bool {
        self.error.is_none()
    }

    /// Number of metrics that could not be produced.
    #[must_use]
    pub fn failed(&self) -> usize {
        self.error.as_ref().map_or(0, PartialScrapeError::failed)
    }

    /// Looks up a collected metric by name.
    #[must_use]
    pub fn metric(&self, name: &str) -> Option<&Metric> {
        self.metrics.iter().find(|m| m.name == name)
    }
}

/// A periodic metric producer.
///
/// The host calls [`start`](Self::start) once, then
/// [`scrape`](Self::scrape) on every tick, then
/// [`shutdown`](Self::shutdown).
#[async_trait]
pub trait Scraper: Send + Sync {
    /// Scraper name.
    fn name(&self) -> &'static str;

    /// Prepares the scraper.
    ///
    /// # Errors
    /// Returns an error if the scraper was already started.
    async fn start(&mut self, ctx: &Context) -> Result<()>;

    /// Collects one tick.
    ///
    /// Partial failures are reported in [`ScrapeOutput::error`]; the call
    /// itself only fails when the scraper is not running.
    ///
    /// # Errors
    /// Returns an error if the scraper has not been started.
    async fn scrape(&self, ctx: &Context) -> Result<ScrapeOutput>;

    /// Stops the scraper.
    ///
    /// # Errors
    /// Returns an error if shutdown fails.
    async fn shutdown(&mut self, ctx: &Context) -> Result<()>;
}
