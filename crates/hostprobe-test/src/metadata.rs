//! Recording system metadata provider.
//!
//! Serves configurable answers and logs every call in order, so tests can
//! check which OS queries the detector made and in what sequence.

use std::sync::Arc;

use hostprobe_core::{Context, CoreError, Result};
use hostprobe_detect::SystemMetadata;

/// One call made against a [`RecordingMetadata`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MetadataCall {
    /// `os_type`
    OsType,
    /// `hostname`
    Hostname,
    /// `fqdn`
    Fqdn,
}

#[derive(Debug)]
struct Answers {
    os_type: std::result::Result<String, String>,
    hostname: std::result::Result<String, String>,
    fqdn: std::result::Result<String, String>,
}

/// Metadata provider that records its calls.
///
/// Clones share the same answers and call log.
#[derive(Debug, Clone)]
pub struct RecordingMetadata {
    answers: Arc<parking_lot::RwLock<Answers>>,
    calls: Arc<parking_lot::Mutex<Vec<MetadataCall>>>,
}

impl RecordingMetadata {
    /// Provider answering `linux`, `test-host` and `test-host.example.com`.
    #[must_use]
    pub fn new() -> Self {
        Self {
            answers: Arc::new(parking_lot::RwLock::new(Answers {
                os_type: Ok("linux".to_string()),
                hostname: Ok("test-host".to_string()),
                fqdn: Ok("test-host.example.com".to_string()),
            })),
            calls: Arc::new(parking_lot::Mutex::new(Vec::new())),
        }
    }

    /// Sets the OS type answer.
    #[must_use]
    pub fn with_os_type(self, result: std::result::Result<&str, &str>) -> Self {
        self.answers.write().os_type = owned(result);
        self
    }

    /// Sets the OS hostname answer.
    #[must_use]
    pub fn with_hostname(self, result: std::result::Result<&str, &str>) -> Self {
        self.answers.write().hostname = owned(result);
        self
    }

    /// Sets the FQDN answer.
    #[must_use]
    pub fn with_fqdn(self, result: std::result::Result<&str, &str>) -> Self {
        self.answers.write().fqdn = owned(result);
        self
    }

    /// Calls made so far, in order.
    #[must_use]
    pub fn calls(&self) -> Vec<MetadataCall> {
        self.calls.lock().clone()
    }

    /// Clears the call log.
    pub fn reset(&self) {
        self.calls.lock().clear();
    }

    fn record(
        &self,
        ctx: &Context,
        call: MetadataCall,
        pick: impl FnOnce(&Answers) -> &std::result::Result<String, String>,
    ) -> Result<String> {
        self.calls.lock().push(call);
        ctx.check()?;
        let answers = self.answers.read();
        pick(&*answers).clone().map_err(CoreError::source)
    }
}

fn owned(result: std::result::Result<&str, &str>) -> std::result::Result<String, String> {
    result.map(str::to_string).map_err(str::to_string)
}

impl Default for RecordingMetadata {
    fn default() -> Self {
        Self::new()
    }
}

impl SystemMetadata for RecordingMetadata {
    fn os_type(&self, ctx: &Context) -> Result<String> {
        self.record(ctx, MetadataCall::OsType, |a| &a.os_type)
    }

    fn hostname(&self, ctx: &Context) -> Result<String> {
        self.record(ctx, MetadataCall::Hostname, |a| &a.hostname)
    }

    fn fqdn(&self, ctx: &Context) -> Result<String> {
        self.record(ctx, MetadataCall::Fqdn, |a| &a.fqdn)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_answers() {
        let ctx = Context::new();
        let m = RecordingMetadata::new();
        assert_eq!(m.os_type(&ctx).unwrap(), "linux");
        assert_eq!(m.hostname(&ctx).unwrap(), "test-host");
        assert_eq!(m.fqdn(&ctx).unwrap(), "test-host.example.com");
    }

    #[test]
    fn test_calls_recorded_in_order() {
        let ctx = Context::new();
        let m = RecordingMetadata::new().with_fqdn(Err("no dns"));
        assert!(m.fqdn(&ctx).is_err());
        let _ = m.hostname(&ctx);
        assert_eq!(m.calls(), vec![MetadataCall::Fqdn, MetadataCall::Hostname]);
        m.reset();
        assert!(m.calls().is_empty());
    }

    #[test]
    fn test_clones_share_log() {
        let ctx = Context::new();
        let m = RecordingMetadata::new();
        let clone = m.clone();
        let _ = clone.os_type(&ctx);
        assert_eq!(m.calls(), vec![MetadataCall::OsType]);
    }

    #[test]
    fn test_cancelled_call_still_recorded() {
        let ctx = Context::new();
        ctx.cancel();
        let m = RecordingMetadata::new();
        assert!(m.os_type(&ctx).unwrap_err().is_cancelled());
        assert_eq!(m.calls(), vec![MetadataCall::OsType]);
    }
}
