//! System metadata providers.
//!
//! A [`SystemMetadata`] provider answers the three questions the system
//! detector asks of the host: the OS type, the OS hostname and the fully
//! qualified domain name. [`OsSystemMetadata`] asks the running operating
//! system; [`StaticMetadata`] answers from fixed values and is used by hosts
//! that already know their identity and by tests.

use hostprobe_core::{Context, CoreError, Result};

/// Source of host identity facts.
///
/// Every call takes a [`Context`] and must fail with
/// [`CoreError::Cancelled`] instead of starting work once it is cancelled.
pub trait SystemMetadata: Send + Sync {
    /// Returns the normalized OS type (`linux`, `darwin`, `windows`, ...).
    ///
    /// # Errors
    /// Returns an error if the OS type cannot be determined.
    fn os_type(&self, ctx: &Context) -> Result<String>;

    /// Returns the host name as reported by the operating system.
    ///
    /// # Errors
    /// Returns an error if the host name cannot be read.
    fn hostname(&self, ctx: &Context) -> Result<String>;

    /// Returns the fully qualified domain name of the host.
    ///
    /// # Errors
    /// Returns an error if the name cannot be resolved.
    fn fqdn(&self, ctx: &Context) -> Result<String>;
}

/// Maps a Rust target OS name to the `os.type` semantic convention value.
///
/// Returns `None` for targets with no defined convention value.
#[must_use]
pub fn os_type_of(target_os: &str) -> Option<&'static str> {
    match target_os {
        "linux" | "android" => Some("linux"),
        "macos" | "ios" => Some("darwin"),
        "windows" => Some("windows"),
        "freebsd" => Some("freebsd"),
        "netbsd" => Some("netbsd"),
        "openbsd" => Some("openbsd"),
        "dragonfly" => Some("dragonflybsd"),
        "solaris" | "illumos" => Some("solaris"),
        "aix" => Some("aix"),
        _ => None,
    }
}

/// Metadata read from the running operating system.
#[derive(Debug, Clone, Copy, Default)]
pub struct OsSystemMetadata;

impl OsSystemMetadata {
    /// Creates the provider.
    #[must_use]
    pub const fn new() -> Self {
        Self
    }
}

impl SystemMetadata for OsSystemMetadata {
    fn os_type(&self, ctx: &Context) -> Result<String> {
        ctx.check()?;
        let target = std::env::consts::OS;
        os_type_of(target)
            .map(str::to_string)
            .ok_or_else(|| CoreError::not_supported(format!("unknown OS type {target:?}")))
    }

    fn hostname(&self, ctx: &Context) -> Result<String> {
        ctx.check()?;
        os_hostname()
    }

    fn fqdn(&self, ctx: &Context) -> Result<String> {
        ctx.check()?;
        let host = os_hostname()?;
        ctx.check()?;
        canonical_name(&host)
    }
}

#[cfg(unix)]
fn os_hostname() -> Result<String> {
    let name = nix::unistd::gethostname()
        .map_err(|e| CoreError::source(format!("gethostname: {e}")))?;
    name.into_string()
        .map_err(|_| CoreError::parse("hostname is not valid UTF-8"))
}

#[cfg(not(unix))]
fn os_hostname() -> Result<String> {
    std::env::var("COMPUTERNAME")
        .map_err(|e| CoreError::source(format!("COMPUTERNAME: {e}")))
}

/// Resolves the canonical name of `host` through the system resolver.
#[cfg(unix)]
#[allow(unsafe_code)]
fn canonical_name(host: &str) -> Result<String> {
    use std::ffi::{CStr, CString};
    use std::ptr;

    let node =
        CString::new(host).map_err(|_| CoreError::parse("hostname contains a NUL byte"))?;

    // SAFETY: addrinfo is a plain C struct for which all-zero means "no hints".
    let mut hints: libc::addrinfo = unsafe { std::mem::zeroed() };
    hints.ai_family = libc::AF_UNSPEC;
    hints.ai_socktype = libc::SOCK_STREAM;
    hints.ai_flags = libc::AI_CANONNAME;

    let mut res: *mut libc::addrinfo = ptr::null_mut();
    // SAFETY: node is NUL-terminated and outlives the call; hints and res are
    // valid pointers for the duration of the call.
    let rc = unsafe { libc::getaddrinfo(node.as_ptr(), ptr::null(), &hints, &mut res) };
    if rc != 0 {
        // SAFETY: gai_strerror returns a pointer to a static NUL-terminated string.
        let msg = unsafe { CStr::from_ptr(libc::gai_strerror(rc)) }
            .to_string_lossy()
            .into_owned();
        return Err(CoreError::source(format!("lookup {host}: {msg}")));
    }

    // SAFETY: on success res is either null or the head of a list owned by us
    // until freeaddrinfo; ai_canonname is null or NUL-terminated.
    let canon = unsafe {
        let name = if res.is_null() || (*res).ai_canonname.is_null() {
            None
        } else {
            Some(
                CStr::from_ptr((*res).ai_canonname)
                    .to_string_lossy()
                    .into_owned(),
            )
        };
        if !res.is_null() {
            libc::freeaddrinfo(res);
        }
        name
    };

    canon
        .map(|name| name.trim_end_matches('.').to_string())
        .filter(|name| !name.is_empty())
        .ok_or_else(|| CoreError::source(format!("lookup {host}: no canonical name")))
}

#[cfg(not(unix))]
fn canonical_name(host: &str) -> Result<String> {
    Err(CoreError::not_supported(format!(
        "canonical name lookup for {host}"
    )))
}

/// Metadata served from fixed values.
///
/// Unset values fail with a descriptive error, so a provider built with only
/// an OS type exercises every hostname fallback path.
#[derive(Debug, Clone)]
pub struct StaticMetadata {
    os_type: std::result::Result<String, String>,
    hostname: std::result::Result<String, String>,
    fqdn: std::result::Result<String, String>,
}

impl StaticMetadata {
    /// Creates a provider with the given OS type and no host names.
    #[must_use]
    pub fn new(os_type: impl Into<String>) -> Self {
        Self {
            os_type: Ok(os_type.into()),
            hostname: Err("hostname not set".to_string()),
            fqdn: Err("fqdn not set".to_string()),
        }
    }

    /// Makes `os_type` fail with `msg`.
    #[must_use]
    pub fn with_os_type_error(mut self, msg: impl Into<String>) -> Self {
        self.os_type = Err(msg.into());
        self
    }

    /// Sets the OS host name.
    #[must_use]
    pub fn with_hostname(mut self, hostname: impl Into<String>) -> Self {
        self.hostname = Ok(hostname.into());
        self
    }

    /// Makes `hostname` fail with `msg`.
    #[must_use]
    pub fn with_hostname_error(mut self, msg: impl Into<String>) -> Self {
        self.hostname = Err(msg.into());
        self
    }

    /// Sets the fully qualified domain name.
    #[must_use]
    pub fn with_fqdn(mut self, fqdn: impl Into<String>) -> Self {
        self.fqdn = Ok(fqdn.into());
        self
    }

    /// Makes `fqdn` fail with `msg`.
    #[must_use]
    pub fn with_fqdn_error(mut self, msg: impl Into<String>) -> Self {
        self.fqdn = Err(msg.into());
        self
    }

    fn answer(ctx: &Context, value: &std::result::Result<String, String>) -> Result<String> {
        ctx.check()?;
        value.clone().map_err(CoreError::source)
    }
}

impl SystemMetadata for StaticMetadata {
    fn os_type(&self, ctx: &Context) -> Result<String> {
        Self::answer(ctx, &self.os_type)
    }

    fn hostname(&self, ctx: &Context) -> Result<String> {
        Self::answer(ctx, &self.hostname)
    }

    fn fqdn(&self, ctx: &Context) -> Result<String> {
        Self::answer(ctx, &self.fqdn)
    }
}
