//! Raw OS readers used by the processes scraper.
//!
//! The scraper never touches the OS directly. It calls the three functions
//! held by [`ProcessReaders`], which makes every OS interaction replaceable
//! in tests.

use std::fmt;
use std::sync::Arc;

use hostprobe_core::{Context, CoreError, Result, Timestamp};

/// Kernel-wide process counters.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct MiscStat {
    /// Processes created since boot.
    pub procs_created: u64,
    /// Processes currently runnable.
    pub procs_running: u64,
    /// Processes blocked on I/O.
    pub procs_blocked: u64,
    /// Total processes (or kernel scheduling entities) in the system.
    pub procs_total: u64,
}

/// A process whose raw status can be read.
pub trait ProcessHandle: Send + Sync {
    /// Reads the raw status code.
    ///
    /// # Errors
    /// Returns an error if the process vanished or its status is unreadable.
    fn status(&self) -> Result<String>;
}

/// Handle with a fixed status, or a fixed failure.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StaticProcess {
    status: std::result::Result<String, String>,
}

impl StaticProcess {
    /// Handle reporting `code`.
    #[must_use]
    pub fn new(code: impl Into<String>) -> Self {
        Self {
            status: Ok(code.into()),
        }
    }

    /// Handle whose status read fails with `msg`.
    #[must_use]
    pub fn failing(msg: impl Into<String>) -> Self {
        Self {
            status: Err(msg.into()),
        }
    }
}

impl ProcessHandle for StaticProcess {
    fn status(&self) -> Result<String> {
        self.status.clone().map_err(CoreError::source)
    }
}

/// Clock used for data point timestamps.
pub type ClockFn = Arc<dyn Fn() -> Timestamp + Send + Sync>;
/// Reader for the kernel counters.
pub type MiscStatFn = Arc<dyn Fn(&Context) -> Result<MiscStat> + Send + Sync>;
/// Reader enumerating the current processes.
pub type ProcessesFn = Arc<dyn Fn(&Context) -> Result<Vec<Box<dyn ProcessHandle>>> + Send + Sync>;

/// The scraper's view of the OS.
#[derive(Clone)]
pub struct ProcessReaders {
    /// Current time.
    pub clock: ClockFn,
    /// Kernel counters.
    pub misc_stat: MiscStatFn,
    /// Process enumeration.
    pub processes: ProcessesFn,
}

impl ProcessReaders {
    /// Readers backed by the running operating system.
    #[must_use]
    pub fn live() -> Self {
        Self {
            clock: Arc::new(Timestamp::now),
            misc_stat: Arc::new(live_misc_stat),
            processes: Arc::new(live_processes),
        }
    }

    /// Readers serving fixed values.
    ///
    /// Each call to `processes` returns fresh handles with the given codes.
    #[must_use]
    pub fn fixed(now: Timestamp, misc: MiscStat, codes: &[&str]) -> Self {
        let codes: Vec<String> = codes.iter().map(|c| (*c).to_string()).collect();
        Self {
            clock: Arc::new(move || now),
            misc_stat: Arc::new(move |ctx: &Context| -> Result<MiscStat> {
                ctx.check()?;
                Ok(misc)
            }),
            processes: Arc::new(move |ctx: &Context| -> Result<Vec<Box<dyn ProcessHandle>>> {
                ctx.check()?;
                Ok(codes
                    .iter()
                    .map(|c| Box::new(StaticProcess::new(c.clone())) as Box<dyn ProcessHandle>)
                    .collect())
            }),
        }
    }

    /// Replaces the clock.
    #[must_use]
    pub fn with_clock(mut self, clock: impl Fn() -> Timestamp + Send + Sync + 'static) -> Self {
        self.clock = Arc::new(clock);
        self
    }

    /// Replaces the kernel counter reader.
    #[must_use]
    pub fn with_misc_stat(
        mut self,
        reader: impl Fn(&Context) -> Result<MiscStat> + Send + Sync + 'static,
    ) -> Self {
        self.misc_stat = Arc::new(reader);
        self
    }

    /// Replaces the process enumeration reader.
    #[must_use]
    pub fn with_processes(
        mut self,
        reader: impl Fn(&Context) -> Result<Vec<Box<dyn ProcessHandle>>> + Send + Sync + 'static,
    ) -> Self {
        self.processes = Arc::new(reader);
        self
    }
}

impl Default for ProcessReaders {
    fn default() -> Self {
        Self::live()
    }
}

impl fmt::Debug for ProcessReaders {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ProcessReaders").finish_non_exhaustive()
    }
}

#[cfg(target_os = "linux")]
fn live_misc_stat(ctx: &Context) -> Result<MiscStat> {
    crate::procfs::misc_stat(ctx)
}

#[cfg(target_os = "linux")]
fn live_processes(ctx: &Context) -> Result<Vec<Box<dyn ProcessHandle>>> {
    crate::procfs::processes(ctx)
}

#[cfg(all(unix, not(target_os = "linux")))]
fn live_misc_stat(_ctx: &Context) -> Result<MiscStat> {
    Err(CoreError::not_supported("kernel process counters"))
}

#[cfg(all(unix, not(target_os = "linux")))]
fn live_processes(ctx: &Context) -> Result<Vec<Box<dyn ProcessHandle>>> {
    crate::ps::processes(ctx)
}

#[cfg(not(unix))]
fn live_misc_stat(_ctx: &Context) -> Result<MiscStat> {
    Err(CoreError::not_supported("kernel process counters"))
}

#[cfg(not(unix))]
fn live_processes(_ctx: &Context) -> Result<Vec<Box<dyn ProcessHandle>>> {
    Err(CoreError::not_supported("process enumeration"))
}
