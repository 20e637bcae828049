//! Processes scraper.
//!
//! Emits `system.processes.count` (one point per non-empty status bucket) and
//! `system.processes.created` (one unlabelled point). Each metric is fed by
//! its own reader; a failing reader costs only its own metric.

use async_trait::async_trait;

use hostprobe_core::metadata::{self, STATUS_LABEL};
use hostprobe_core::{
    Context, CoreError, Metric, NumberDataPoint, PartialScrapeError, ProcessesScraperConfig,
    Result, ScrapeFailure, Timestamp,
};

use crate::capabilities::Capabilities;
use crate::reader::{MiscStat, ProcessReaders};
use crate::scraper::{ScrapeOutput, Scraper};
use crate::status::{Status, StatusCounts, StatusTable};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Lifecycle {
    Created,
    Running { start_time: Timestamp },
    Stopped,
}

/// Scraper for process counts by status and processes created.
#[derive(Debug)]
pub struct ProcessesScraper {
    config: ProcessesScraperConfig,
    capabilities: Capabilities,
    readers: ProcessReaders,
    lifecycle: Lifecycle,
}

impl ProcessesScraper {
    /// Scraper name.
    pub const TYPE: &'static str = "processes";

    /// Creates a scraper reading the running operating system.
    #[must_use]
    pub fn new(config: ProcessesScraperConfig) -> Self {
        Self {
            config,
            capabilities: Capabilities::current(),
            readers: ProcessReaders::live(),
            lifecycle: Lifecycle::Created,
        }
    }

    /// Replaces the OS readers.
    #[must_use]
    pub fn with_readers(mut self, readers: ProcessReaders) -> Self {
        self.readers = readers;
        self
    }

    /// Replaces the platform capabilities.
    #[must_use]
    pub fn with_capabilities(mut self, capabilities: Capabilities) -> Self {
        self.capabilities = capabilities;
        self
    }

    /// Replaces the status classification table.
    #[must_use]
    pub fn with_status_table(mut self, table: StatusTable) -> Self {
        self.capabilities.status_table = table;
        self
    }

    /// Start time shared by every data point, once started.
    #[must_use]
    pub const fn start_time(&self) -> Option<Timestamp> {
        match self.lifecycle {
            Lifecycle::Running { start_time } => Some(start_time),
            Lifecycle::Created | Lifecycle::Stopped => None,
        }
    }

    /// Whether `system.processes.count` is collected on each tick.
    #[must_use]
    pub fn count_attempted(&self) -> bool {
        self.capabilities.processes_count
            && self.config.metrics.is_enabled(metadata::SYSTEM_PROCESSES_COUNT.name)
    }

    /// Whether `system.processes.created` is collected on each tick.
    #[must_use]
    pub fn created_attempted(&self) -> bool {
        self.capabilities.processes_created
            && self.config.metrics.is_enabled(metadata::SYSTEM_PROCESSES_CREATED.name)
    }

    fn collect(&self, ctx: &Context, start_time: Timestamp) -> ScrapeOutput {
        let now = (self.readers.clock)();
        let count_attempted = self.count_attempted();
        let created_attempted = self.created_attempted();
        let reconcile = count_attempted && self.config.reconcile_with_counters;
        let mut failures = Vec::new();

        let misc = if created_attempted || reconcile {
            match (self.readers.misc_stat)(ctx) {
                Ok(misc) => Some(misc),
                Err(e) => {
                    tracing::debug!(
                        metric = metadata::SYSTEM_PROCESSES_CREATED.name,
                        error = %e,
                        "failed to read process counters"
                    );
                    if created_attempted {
                        failures.push(ScrapeFailure::new(
                            metadata::SYSTEM_PROCESSES_CREATED.name,
                            e,
                            1,
                        ));
                    }
                    None
                }
            }
        } else {
            None
        };

        let counts = if count_attempted {
            match self.count_by_status(ctx) {
                Ok(mut counts) => {
                    if let (true, Some(misc)) = (reconcile, misc.as_ref()) {
                        reconcile_with_counters(&mut counts, misc);
                    }
                    Some(counts)
                }
                Err(e) => {
                    tracing::debug!(
                        metric = metadata::SYSTEM_PROCESSES_COUNT.name,
                        error = %e,
                        "failed to enumerate processes"
                    );
                    failures.push(ScrapeFailure::new(metadata::SYSTEM_PROCESSES_COUNT.name, e, 1));
                    None
                }
            }
        } else {
            None
        };

        let mut metrics = Vec::with_capacity(2);
        if let Some(counts) = counts {
            metrics.push(count_metric(&counts, start_time, now));
        }
        if let (true, Some(misc)) = (created_attempted, misc) {
            metrics.push(created_metric(&misc, start_time, now));
        }

        ScrapeOutput {
            metrics,
            error: PartialScrapeError::from_failures(failures),
        }
    }

    fn count_by_status(&self, ctx: &Context) -> Result<StatusCounts> {
        let handles = (self.readers.processes)(ctx)?;
        let table = self.capabilities.status_table;
        let mut counts = StatusCounts::new();
        for handle in &handles {
            match handle.status() {
                Ok(raw) => counts.increment(table.classify(&raw)),
                Err(e) => tracing::trace!(error = %e, "skipping process with unreadable status"),
            }
        }
        Ok(counts)
    }
}

/// Replaces the enumerated `running` and `blocked` buckets with the kernel
/// counters, and attributes any remaining shortfall against the kernel total
/// to `unknown`.
pub fn reconcile_with_counters(counts: &mut StatusCounts, misc: &MiscStat) {
    counts.set(Status::Blocked, misc.procs_blocked as i64);
    counts.set(Status::Running, misc.procs_running as i64);
    let gap = misc.procs_total as i64 - counts.total();
    if gap > 0 {
        counts.add(Status::Unknown, gap);
    }
}

fn count_metric(counts: &StatusCounts, start_time: Timestamp, now: Timestamp) -> Metric {
    let mut metric = metadata::SYSTEM_PROCESSES_COUNT.new_metric();
    for (status, value) in counts.iter_non_zero() {
        let point = NumberDataPoint::new(value, start_time, now);
        metric.push(point.with_attribute(STATUS_LABEL, status.as_str()));
    }
    metric
}

fn created_metric(misc: &MiscStat, start_time: Timestamp, now: Timestamp) -> Metric {
    let mut metric = metadata::SYSTEM_PROCESSES_CREATED.new_metric();
    metric.push(NumberDataPoint::new(misc.procs_created as i64, start_time, now));
    metric
}

#[async_trait]
impl Scraper for ProcessesScraper {
    fn name(&self) -> &'static str {
        Self::TYPE
    }

    async fn start(&mut self, ctx: &Context) -> Result<()> {
        ctx.check()?;
        match self.lifecycle {
            Lifecycle::Created => {}
            Lifecycle::Running { .. } => {
                return Err(CoreError::state("processes scraper already started"));
            }
            Lifecycle::Stopped => {
                return Err(CoreError::state("processes scraper was shut down"));
            }
        }
        let start_time = (self.readers.clock)();
        self.lifecycle = Lifecycle::Running { start_time };
        tracing::info!(
            start_time = %start_time,
            count = self.count_attempted(),
            created = self.created_attempted(),
            "processes scraper started"
        );
        Ok(())
    }

    async fn scrape(&self, ctx: &Context) -> Result<ScrapeOutput> {
        let Lifecycle::Running { start_time } = self.lifecycle else {
            return Err(CoreError::state("processes scraper is not running"));
        };
        Ok(self.collect(ctx, start_time))
    }

    async fn shutdown(&mut self, _ctx: &Context) -> Result<()> {
        if self.lifecycle != Lifecycle::Stopped {
            tracing::debug!("processes scraper stopped");
        }
        self.lifecycle = Lifecycle::Stopped;
        Ok(())
    }
}
