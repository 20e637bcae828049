//! Ordered hostname source chain.

use hostprobe_core::{Context, DEFAULT_HOSTNAME_SOURCES, HostnameSource};

use crate::error::{DetectError, Result};
use crate::provider::SystemMetadata;

type Resolver = fn(&dyn SystemMetadata, &Context) -> Result<String>;

fn resolve_fqdn(provider: &dyn SystemMetadata, ctx: &Context) -> Result<String> {
    provider
        .fqdn(ctx)
        .map_err(|e| DetectError::source_failed(HostnameSource::Dns, "FQDN", e))
}

fn resolve_os_hostname(provider: &dyn SystemMetadata, ctx: &Context) -> Result<String> {
    provider
        .hostname(ctx)
        .map_err(|e| DetectError::source_failed(HostnameSource::Os, "OS hostname", e))
}

/// One named hostname resolution strategy.
#[derive(Clone, Copy)]
pub struct SourceEntry {
    source: HostnameSource,
    resolve: Resolver,
}

impl SourceEntry {
    /// Creates the entry for a source.
    #[must_use]
    pub fn for_source(source: HostnameSource) -> Self {
        let resolve: Resolver = match source {
            HostnameSource::Dns => resolve_fqdn,
            HostnameSource::Os => resolve_os_hostname,
        };
        Self { source, resolve }
    }

    /// The source this entry resolves.
    #[must_use]
    pub const fn source(&self) -> HostnameSource {
        self.source
    }

    /// Configuration name of the source.
    #[must_use]
    pub const fn name(&self) -> &'static str {
        self.source.name()
    }

    /// Runs the resolver.
    ///
    /// # Errors
    /// Returns [`DetectError::Source`] if the provider call fails.
    pub fn resolve(&self, provider: &dyn SystemMetadata, ctx: &Context) -> Result<String> {
        (self.resolve)(provider, ctx)
    }
}

impl std::fmt::Debug for SourceEntry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SourceEntry")
            .field("source", &self.source)
            .finish_non_exhaustive()
    }
}

/// Hostname sources in priority order.
///
/// Built once from configuration; an empty list yields the default
/// `dns` then `os` order.
#[derive(Debug, Clone)]
pub struct SourceChain {
    entries: Vec<SourceEntry>,
}

impl Default for SourceChain {
    fn default() -> Self {
        Self::new(&[])
    }
}

impl SourceChain {
    /// Builds the chain.
    #[must_use]
    pub fn new(sources: &[HostnameSource]) -> Self {
        let sources: &[HostnameSource] = if sources.is_empty() {
            &DEFAULT_HOSTNAME_SOURCES
        } else {
            sources
        };
        Self {
            entries: sources.iter().copied().map(SourceEntry::for_source).collect(),
        }
    }

    /// Entries in the order they are tried.
    #[must_use]
    pub fn entries(&self) -> &[SourceEntry] {
        &self.entries
    }

    /// Source names in the order they are tried.
    #[must_use]
    pub fn names(&self) -> Vec<&'static str> {
        self.entries.iter().map(SourceEntry::name).collect()
    }

    /// Tries each source in order and returns the first hostname produced.
    ///
    /// Sources after the first success are never called. Each failure is
    /// logged at debug level before moving on.
    ///
    /// # Errors
    /// Returns [`DetectError::AllSourcesFailed`] if every source fails.
    pub fn resolve(
        &self,
        provider: &dyn SystemMetadata,
        ctx: &Context,
    ) -> Result<(HostnameSource, String)> {
        for entry in &self.entries {
            match entry.resolve(provider, ctx) {
                Ok(hostname) => return Ok((entry.source(), hostname)),
                Err(e) => {
                    tracing::debug!(source = entry.name(), error = %e, "hostname source failed");
                }
            }
        }
        Err(DetectError::AllSourcesFailed)
    }
}
