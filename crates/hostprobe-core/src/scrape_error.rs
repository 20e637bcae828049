//! Aggregated, non-fatal scrape failures.
//!
//! A scrape that loses some metrics still returns the ones it collected.
//! [`PartialScrapeError`] travels alongside them and records each independent
//! failure together with how many metrics it cost.

use std::fmt;

use crate::error::CoreError;

/// One failed sub-collection within a tick.
#[derive(Debug)]
pub struct ScrapeFailure {
    /// Name of the metric the failing reader feeds.
    pub metric: &'static str,
    /// What went wrong.
    pub source: CoreError,
    /// Number of metrics skipped because of this failure.
    pub failed_metrics: usize,
}

impl ScrapeFailure {
    /// Creates a failure record.
    #[must_use]
    pub fn new(metric: &'static str, source: CoreError, failed_metrics: usize) -> Self {
        Self {
            metric,
            source,
            failed_metrics,
        }
    }
}

/// Every failure of one scrape tick.
///
/// Only built when at least one sub-collection failed; a clean tick carries
/// no error value at all.
#[derive(Debug)]
pub struct PartialScrapeError {
    failures: Vec<ScrapeFailure>,
}

impl PartialScrapeError {
    /// Builds the error from collected failures.
    ///
    /// Returns `None` when `failures` is empty.
    #[must_use]
    pub fn from_failures(failures: Vec<ScrapeFailure>) -> Option<Self> {
        if failures.is_empty() {
            None
        } else {
            Some(Self { failures })
        }
    }

    /// Total number of metrics that could not be produced.
    #[must_use]
    pub fn failed(&self) -> usize {
        self.failures.iter().map(|f| f.failed_metrics).sum()
    }

    /// Individual failures, in the order they occurred.
    #[must_use]
    pub fn failures(&self) -> &[ScrapeFailure] {
        &self.failures
    }

    /// Returns true if the named metric was skipped.
    #[must_use]
    pub fn skipped(&self, metric: &str) -> bool {
        self.failures.iter().any(|f| f.metric == metric)
    }
}

impl fmt::Display for PartialScrapeError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, failure) in self.failures.iter().enumerate() {
            if i > 0 {
                f.write_str("; ")?;
            }
            write!(f, "{}", failure.source)?;
        }
        Ok(())
    }
}

impl std::error::Error for PartialScrapeError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        self.failures
            .first()
            .map(|f| &f.source as &(dyn std::error::Error + 'static))
    }
}
