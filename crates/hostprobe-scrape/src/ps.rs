//! Process enumeration through `ps(1)`, for unix systems without procfs.

use std::process::Command;

use hostprobe_core::{Context, CoreError, Result};

use crate::reader::{ProcessHandle, StaticProcess};

/// Arguments printing one bare status code per process.
#[must_use]
pub const fn ps_args() -> &'static [&'static str] {
    if cfg!(any(target_os = "solaris", target_os = "illumos")) {
        &["-eo", "s="]
    } else {
        &["-axo", "stat="]
    }
}

/// Runs `ps` and returns one handle per listed process.
///
/// # Errors
/// Returns an error if `ps` cannot be run or exits unsuccessfully.
pub fn processes(ctx: &Context) -> Result<Vec<Box<dyn ProcessHandle>>> {
    ctx.check()?;
    let output = Command::new("ps").args(ps_args()).output()?;
    if !output.status.success() {
        return Err(CoreError::source(format!(
            "ps exited with {}: {}",
            output.status,
            String::from_utf8_lossy(&output.stderr).trim()
        )));
    }

    let stdout = String::from_utf8_lossy(&output.stdout);
    Ok(parse_ps_output(&stdout)
        .into_iter()
        .map(|code| Box::new(StaticProcess::new(code)) as Box<dyn ProcessHandle>)
        .collect())
}

/// Splits `ps` output into status codes, skipping blank lines.
#[must_use]
pub fn parse_ps_output(output: &str) -> Vec<&str> {
    output
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .collect()
}
