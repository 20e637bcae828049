//! Linux readers over `/proc`.
//!
//! - `/proc/stat`: `processes`, `procs_running`, `procs_blocked`
//! - `/proc/loadavg`: total scheduling entities (4th field, after the `/`)
//! - `/proc/<pid>/stat`: single-letter state after the command name

use std::ffi::OsString;
use std::path::Path;

use hostprobe_core::{Context, CoreError, Result};

use crate::reader::{MiscStat, ProcessHandle};

const PROC_ROOT: &str = "/proc";

/// Reads the kernel process counters.
///
/// # Errors
/// Returns an error if either file cannot be read or parsed.
pub fn misc_stat(ctx: &Context) -> Result<MiscStat> {
    ctx.check()?;
    let stat = std::fs::read_to_string(Path::new(PROC_ROOT).join("stat"))?;
    let mut misc = parse_proc_stat(&stat)?;

    ctx.check()?;
    let loadavg = std::fs::read_to_string(Path::new(PROC_ROOT).join("loadavg"))?;
    misc.procs_total = parse_loadavg(&loadavg)?;
    Ok(misc)
}

/// Lists the processes currently present under `/proc`.
///
/// # Errors
/// Returns an error if `/proc` cannot be listed.
pub fn processes(ctx: &Context) -> Result<Vec<Box<dyn ProcessHandle>>> {
    ctx.check()?;
    let names = std::fs::read_dir(PROC_ROOT)?.map(|entry| entry.map(|e| e.file_name()));
    Ok(pids(names)
        .into_iter()
        .map(|pid| Box::new(ProcfsProcess::new(pid)) as Box<dyn ProcessHandle>)
        .collect())
}

/// PIDs among `/proc` entry names. Unreadable entries are skipped.
fn pids(names: impl IntoIterator<Item = std::io::Result<OsString>>) -> Vec<u32> {
    names
        .into_iter()
        .filter_map(|name| match name {
            Ok(name) => name.to_str().and_then(|n| n.parse().ok()),
            Err(e) => {
                tracing::trace!(error = %e, "skipping unreadable /proc entry");
                None
            }
        })
        .collect()
}

/// A process read through `/proc/<pid>/stat`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ProcfsProcess {
    pid: u32,
}

impl ProcfsProcess {
    /// Handle for `pid`.
    #[must_use]
    pub const fn new(pid: u32) -> Self {
        Self { pid }
    }

    /// Process ID.
    #[must_use]
    pub const fn pid(&self) -> u32 {
        self.pid
    }
}

impl ProcessHandle for ProcfsProcess {
    fn status(&self) -> Result<String> {
        let path = Path::new(PROC_ROOT).join(self.pid.to_string()).join("stat");
        let content = std::fs::read_to_string(&path).map_err(|e| {
            if e.kind() == std::io::ErrorKind::NotFound {
                CoreError::source(format!("process {} not found", self.pid))
            } else {
                CoreError::Io(e)
            }
        })?;
        parse_stat_state(&content).map(str::to_string)
    }
}

/// Extracts `processes`, `procs_running` and `procs_blocked` from `/proc/stat`.
///
/// `procs_total` is left at zero.
///
/// # Errors
/// Returns an error if a counter is missing or not a number.
pub fn parse_proc_stat(content: &str) -> Result<MiscStat> {
    let mut created = None;
    let mut running = None;
    let mut blocked = None;

    for line in content.lines() {
        let mut fields = line.split_whitespace();
        let slot = match fields.next() {
            Some("processes") => &mut created,
            Some("procs_running") => &mut running,
            Some("procs_blocked") => &mut blocked,
            _ => continue,
        };
        let value = fields
            .next()
            .ok_or_else(|| CoreError::parse(format!("malformed /proc/stat line: {line:?}")))?;
        *slot = Some(value.parse::<u64>().map_err(|e| {
            CoreError::parse(format!("malformed /proc/stat line {line:?}: {e}"))
        })?);
    }

    let missing = |name: &str| CoreError::parse(format!("/proc/stat has no {name} line"));
    Ok(MiscStat {
        procs_created: created.ok_or_else(|| missing("processes"))?,
        procs_running: running.ok_or_else(|| missing("procs_running"))?,
        procs_blocked: blocked.ok_or_else(|| missing("procs_blocked"))?,
        procs_total: 0,
    })
}

/// Extracts the total number of scheduling entities from `/proc/loadavg`.
///
/// Format: `0.20 0.18 0.12 1/80 11206`
///
/// # Errors
/// Returns an error if the runnable/total field is missing or malformed.
pub fn parse_loadavg(content: &str) -> Result<u64> {
    let field = content
        .split_whitespace()
        .nth(3)
        .ok_or_else(|| CoreError::parse("malformed /proc/loadavg: expected 5 fields"))?;
    let (_, total) = field
        .split_once('/')
        .ok_or_else(|| CoreError::parse(format!("malformed /proc/loadavg field {field:?}")))?;
    total
        .parse()
        .map_err(|e| CoreError::parse(format!("malformed /proc/loadavg total {total:?}: {e}")))
}

/// Extracts the state code from `/proc/<pid>/stat`.
///
/// Format: `pid (comm) state ppid ...`. The command name may itself contain
/// spaces and parentheses, so the state follows the last `)`.
///
/// # Errors
/// Returns an error if the content has no command name or no state.
pub fn parse_stat_state(content: &str) -> Result<&str> {
    let comm_end = content
        .rfind(')')
        .ok_or_else(|| CoreError::parse("malformed /proc/<pid>/stat: no closing paren"))?;

    content[comm_end + 1..]
        .split_whitespace()
        .next()
        .ok_or_else(|| CoreError::parse("malformed /proc/<pid>/stat: no state field"))
}
