//! Per-platform availability of the processes metrics.

use crate::status::StatusTable;

/// Which processes metrics a platform can produce, and how it names states.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Capabilities {
    /// `system.processes.count` is available.
    pub processes_count: bool,
    /// `system.processes.created` is available.
    pub processes_created: bool,
    /// Table used to classify raw status codes.
    pub status_table: StatusTable,
}

impl Capabilities {
    /// Capabilities of the platform this crate was built for.
    #[must_use]
    pub const fn current() -> Self {
        if cfg!(target_os = "linux") {
            Self::all(StatusTable::Linux)
        } else if cfg!(target_os = "macos") {
            Self::count_only(StatusTable::Darwin)
        } else if cfg!(target_os = "freebsd") {
            Self::count_only(StatusTable::FreeBsd)
        } else if cfg!(target_os = "openbsd") {
            Self::count_only(StatusTable::OpenBsd)
        } else if cfg!(any(target_os = "solaris", target_os = "illumos")) {
            Self::count_only(StatusTable::Solaris)
        } else {
            Self::none()
        }
    }

    /// Both metrics available.
    #[must_use]
    pub const fn all(status_table: StatusTable) -> Self {
        Self {
            processes_count: true,
            processes_created: true,
            status_table,
        }
    }

    /// Only the per-status count is available.
    #[must_use]
    pub const fn count_only(status_table: StatusTable) -> Self {
        Self {
            processes_count: true,
            processes_created: false,
            status_table,
        }
    }

    /// Nothing available.
    #[must_use]
    pub const fn none() -> Self {
        Self {
            processes_count: false,
            processes_created: false,
            status_table: StatusTable::Linux,
        }
    }
}

impl Default for Capabilities {
    fn default() -> Self {
        Self::current()
    }
}
