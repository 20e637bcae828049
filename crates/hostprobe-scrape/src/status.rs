//! Logical process status classification.
//!
//! Operating systems report process state as a short code (`R`, `S`, `D`,
//! ...) whose meaning differs per platform. A [`StatusTable`] maps the first
//! character of a code onto the closed set of logical [`Status`] labels.

use std::fmt;

/// Logical process status, used as the `status` label value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Status {
    /// Running or runnable.
    Running,
    /// Interruptible sleep.
    Sleeping,
    /// Stopped by a signal or a tracer.
    Stopped,
    /// Terminated but not reaped.
    Zombies,
    /// Uninterruptible wait, usually disk I/O.
    Blocked,
    /// Paging (Linux before 2.6).
    Paging,
    /// Idle kernel thread or long sleep.
    Idle,
    /// Waiting on an interrupt or a CPU.
    Wait,
    /// Waiting to acquire a lock.
    Locked,
    /// Code with no mapping on this platform.
    Unknown,
}

impl Status {
    /// Every status, in label order.
    pub const ALL: [Self; 10] = [
        Self::Blocked,
        Self::Idle,
        Self::Locked,
        Self::Paging,
        Self::Running,
        Self::Sleeping,
        Self::Stopped,
        Self::Unknown,
        Self::Wait,
        Self::Zombies,
    ];

    /// Label value.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Running => "running",
            Self::Sleeping => "sleeping",
            Self::Stopped => "stopped",
            Self::Zombies => "zombies",
            Self::Blocked => "blocked",
            Self::Paging => "paging",
            Self::Idle => "idle",
            Self::Wait => "wait",
            Self::Locked => "locked",
            Self::Unknown => "unknown",
        }
    }

    const fn index(self) -> usize {
        self as usize
    }
}

impl fmt::Display for Status {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Platform mapping from raw status codes to [`Status`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StatusTable {
    /// `/proc/<pid>/stat` state letters.
    Linux,
    /// `ps` stat column on macOS.
    Darwin,
    /// `ps` stat column on FreeBSD.
    FreeBsd,
    /// `ps` stat column on OpenBSD.
    OpenBsd,
    /// `ps -o s` on Solaris and illumos.
    Solaris,
}

impl StatusTable {
    /// Table for the platform this crate was built for.
    #[must_use]
    pub const fn current() -> Self {
        if cfg!(target_os = "macos") {
            Self::Darwin
        } else if cfg!(target_os = "freebsd") {
            Self::FreeBsd
        } else if cfg!(target_os = "openbsd") {
            Self::OpenBsd
        } else if cfg!(any(target_os = "solaris", target_os = "illumos")) {
            Self::Solaris
        } else {
            Self::Linux
        }
    }

    /// Classifies a raw status code by its first character.
    #[must_use]
    pub fn classify(self, raw: &str) -> Status {
        let Some(code) = raw.chars().next() else {
            return Status::Unknown;
        };
        match (self, code) {
            (Self::Linux, 'R') => Status::Running,
            (Self::Linux, 'S') => Status::Sleeping,
            (Self::Linux, 'D') => Status::Blocked,
            (Self::Linux, 'Z') => Status::Zombies,
            (Self::Linux, 'T' | 't') => Status::Stopped,
            (Self::Linux, 'W') => Status::Paging,
            (Self::Linux, 'I') => Status::Idle,

            (Self::Darwin, 'R') => Status::Running,
            (Self::Darwin, 'S') => Status::Sleeping,
            (Self::Darwin, 'I') => Status::Idle,
            (Self::Darwin, 'U' | 'D') => Status::Blocked,
            (Self::Darwin, 'T') => Status::Stopped,
            (Self::Darwin, 'Z') => Status::Zombies,

            (Self::FreeBsd, 'R') => Status::Running,
            (Self::FreeBsd, 'S') => Status::Sleeping,
            (Self::FreeBsd, 'I') => Status::Idle,
            (Self::FreeBsd, 'D') => Status::Blocked,
            (Self::FreeBsd, 'T') => Status::Stopped,
            (Self::FreeBsd, 'Z') => Status::Zombies,
            (Self::FreeBsd, 'W') => Status::Wait,
            (Self::FreeBsd, 'L') => Status::Locked,

            (Self::OpenBsd, 'R') => Status::Running,
            (Self::OpenBsd, 'S') => Status::Sleeping,
            (Self::OpenBsd, 'I') => Status::Idle,
            (Self::OpenBsd, 'D') => Status::Blocked,
            (Self::OpenBsd, 'T') => Status::Stopped,
            (Self::OpenBsd, 'Z') => Status::Zombies,

            (Self::Solaris, 'O' | 'R') => Status::Running,
            (Self::Solaris, 'S') => Status::Sleeping,
            (Self::Solaris, 'T') => Status::Stopped,
            (Self::Solaris, 'Z') => Status::Zombies,
            (Self::Solaris, 'W') => Status::Wait,

            _ => Status::Unknown,
        }
    }
}

/// Per-status process counts for one tick.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct StatusCounts {
    counts: [i64; Status::ALL.len()],
}

impl StatusCounts {
    /// Creates an all-zero table.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds one to `status`.
    pub fn increment(&mut self, status: Status) {
        self.counts[status.index()] += 1;
    }

    /// Current count for `status`.
    #[must_use]
    pub fn get(&self, status: Status) -> i64 {
        self.counts[status.index()]
    }

    /// Overwrites the count for `status`.
    pub fn set(&mut self, status: Status, value: i64) {
        self.counts[status.index()] = value;
    }

    /// Adds `value` to the count for `status`.
    pub fn add(&mut self, status: Status, value: i64) {
        self.counts[status.index()] += value;
    }

    /// Sum over every status.
    #[must_use]
    pub fn total(&self) -> i64 {
        self.counts.iter().sum()
    }

    /// Non-zero buckets in label order.
    pub fn iter_non_zero(&self) -> impl Iterator<Item = (Status, i64)> + '_ {
        Status::ALL
            .iter()
            .map(|s| (*s, self.get(*s)))
            .filter(|(_, n)| *n != 0)
    }
}
