//! Fault injection for scraper resilience testing.
//!
//! Wraps a set of [`ProcessReaders`] so that chosen calls fail. Faults are
//! deterministic: "every Nth call" rather than a probability, so a failing
//! run reproduces exactly.

use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};

use hostprobe_core::{Context, CoreError, Result};
use hostprobe_scrape::{MiscStat, ProcessHandle, ProcessReaders};

/// Which reader calls fail.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ChaosConfig {
    /// Fail every Nth kernel counter read.
    pub misc_failure_every: Option<u64>,
    /// Fail every Nth process enumeration.
    pub processes_failure_every: Option<u64>,
    /// Fail the status read of every Nth handle.
    pub handle_failure_every: Option<u64>,
}

impl ChaosConfig {
    /// Fails every Nth kernel counter read.
    #[must_use]
    pub fn misc_failures(every: u64) -> Self {
        Self {
            misc_failure_every: Some(every),
            ..Self::default()
        }
    }

    /// Fails every Nth process enumeration.
    #[must_use]
    pub fn processes_failures(every: u64) -> Self {
        Self {
            processes_failure_every: Some(every),
            ..Self::default()
        }
    }

    /// Fails the status read of every Nth handle.
    #[must_use]
    pub fn handle_failures(every: u64) -> Self {
        Self {
            handle_failure_every: Some(every),
            ..Self::default()
        }
    }
}

#[derive(Debug, Default)]
struct Counters {
    misc: AtomicU64,
    processes: AtomicU64,
    handles: AtomicU64,
}

/// Applies a [`ChaosConfig`] to readers.
#[derive(Debug, Clone)]
pub struct ChaosInjector {
    config: ChaosConfig,
    counters: Arc<Counters>,
}

impl ChaosInjector {
    /// Creates an injector.
    #[must_use]
    pub fn new(config: ChaosConfig) -> Self {
        Self {
            config,
            counters: Arc::new(Counters::default()),
        }
    }

    /// Returns the chaos config.
    #[must_use]
    pub const fn config(&self) -> &ChaosConfig {
        &self.config
    }

    /// Wraps `readers` so that configured calls fail.
    #[must_use]
    pub fn wrap(&self, readers: ProcessReaders) -> ProcessReaders {
        let ProcessReaders {
            clock,
            misc_stat,
            processes,
        } = readers;

        let misc_counters = Arc::clone(&self.counters);
        let misc_every = self.config.misc_failure_every;
        let proc_counters = Arc::clone(&self.counters);
        let proc_every = self.config.processes_failure_every;
        let handle_every = self.config.handle_failure_every;

        ProcessReaders {
            clock,
            misc_stat: Arc::new(move |ctx: &Context| -> Result<MiscStat> {
                if hit(&misc_counters.misc, misc_every) {
                    tracing::debug!("injecting kernel counter failure");
                    return Err(CoreError::source("injected kernel counter failure"));
                }
                misc_stat(ctx)
            }),
            processes: Arc::new(move |ctx: &Context| -> Result<Vec<Box<dyn ProcessHandle>>> {
                if hit(&proc_counters.processes, proc_every) {
                    tracing::debug!("injecting enumeration failure");
                    return Err(CoreError::source("injected enumeration failure"));
                }
                let handles = processes(ctx)?;
                Ok(handles
                    .into_iter()
                    .map(|inner| {
                        let fail = hit(&proc_counters.handles, handle_every);
                        Box::new(FaultyHandle { inner, fail }) as Box<dyn ProcessHandle>
                    })
                    .collect())
            }),
        }
    }
}

fn hit(counter: &AtomicU64, every: Option<u64>) -> bool {
    let Some(every) = every.filter(|n| *n > 0) else {
        return false;
    };
    let n = counter.fetch_add(1, Ordering::SeqCst) + 1;
    n % every == 0
}

struct FaultyHandle {
    inner: Box<dyn ProcessHandle>,
    fail: bool,
}

impl ProcessHandle for FaultyHandle {
    fn status(&self) -> Result<String> {
        if self.fail {
            return Err(CoreError::source("injected status failure"));
        }
        self.inner.status()
    }
}
