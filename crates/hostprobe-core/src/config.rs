//! Collector configuration types.
//!
//! Configuration is validated at load time, with sensible defaults and clear
//! error messages. Unknown hostname source names are rejected while parsing,
//! so a detector can never be built around a source that does not exist.

use std::fmt;
use std::str::FromStr;
use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::error::{CoreError, Result};
use crate::metadata;

/// Top-level configuration for a host running the detector and scrapers.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CollectorConfig {
    /// How often the host ticks the scrapers.
    #[serde(default = "default_collection_interval")]
    #[serde(with = "humantime_serde")]
    pub collection_interval: Duration,

    /// System resource detector settings.
    #[serde(default)]
    pub detector: SystemDetectorConfig,

    /// Processes scraper settings.
    #[serde(default)]
    pub processes: ProcessesScraperConfig,
}

fn default_collection_interval() -> Duration {
    Duration::from_secs(60)
}

impl Default for CollectorConfig {
    fn default() -> Self {
        Self {
            collection_interval: default_collection_interval(),
            detector: SystemDetectorConfig::default(),
            processes: ProcessesScraperConfig::default(),
        }
    }
}

impl CollectorConfig {
    /// Validates the configuration.
    ///
    /// # Errors
    /// Returns an error if the configuration is invalid.
    pub fn validate(&self) -> Result<()> {
        if self.collection_interval.is_zero() {
            return Err(CoreError::config("collection_interval must be positive"));
        }
        self.detector.validate()?;
        Ok(())
    }

    /// Parses and validates configuration from a TOML string.
    ///
    /// # Errors
    /// Returns an error if the string cannot be parsed or is invalid.
    pub fn from_toml_str(content: &str) -> Result<Self> {
        let config: Self = toml::from_str(content)
            .map_err(|e| CoreError::config(format!("failed to parse config: {e}")))?;
        config.validate()?;
        Ok(config)
    }

    /// Loads configuration from a TOML file.
    ///
    /// # Errors
    /// Returns an error if the file cannot be read or parsed.
    pub fn load(path: impl AsRef<std::path::Path>) -> Result<Self> {
        let content = std::fs::read_to_string(path.as_ref())
            .map_err(|e| CoreError::config(format!("failed to read config: {e}")))?;
        Self::from_toml_str(&content)
    }
}

/// A named strategy for resolving the host name.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum HostnameSource {
    /// Fully qualified domain name via the resolver.
    Dns,
    /// Host name as reported by the operating system.
    Os,
}

/// Source order used when the configuration lists none.
pub const DEFAULT_HOSTNAME_SOURCES: [HostnameSource; 2] = [HostnameSource::Dns, HostnameSource::Os];

impl HostnameSource {
    /// Returns the configuration name of the source.
    #[must_use]
    pub const fn name(&self) -> &'static str {
        match self {
            Self::Dns => "dns",
            Self::Os => "os",
        }
    }
}

impl fmt::Display for HostnameSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for HostnameSource {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "dns" => Ok(Self::Dns),
            "os" => Ok(Self::Os),
            other => Err(CoreError::config(format!(
                "invalid hostname source {other:?}, expected one of \"dns\", \"os\""
            ))),
        }
    }
}

/// System resource detector configuration.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SystemDetectorConfig {
    /// Hostname sources in priority order. Empty means `["dns", "os"]`.
    ///
    /// Each source may appear at most once; [`validate`](Self::validate)
    /// rejects a repeated source.
    #[serde(default)]
    pub hostname_sources: Vec<HostnameSource>,
}

impl SystemDetectorConfig {
    /// Creates a configuration with an explicit source order.
    #[must_use]
    pub fn with_sources(sources: impl Into<Vec<HostnameSource>>) -> Self {
        Self {
            hostname_sources: sources.into(),
        }
    }

    /// Validates the source list.
    ///
    /// # Errors
    /// Returns an error if a source is listed twice.
    pub fn validate(&self) -> Result<()> {
        for (i, source) in self.hostname_sources.iter().enumerate() {
            if self.hostname_sources[..i].contains(source) {
                return Err(CoreError::config(format!(
                    "hostname source {source:?} listed more than once"
                )));
            }
        }
        Ok(())
    }
}

/// Per-metric switch.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct MetricSettings {
    /// Whether the metric is collected.
    #[serde(default = "default_true")]
    pub enabled: bool,
}

fn default_true() -> bool {
    true
}

impl Default for MetricSettings {
    fn default() -> Self {
        Self { enabled: true }
    }
}

/// Switches for every metric of the processes scraper.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct MetricsSettings {
    /// `system.processes.count`
    #[serde(rename = "system.processes.count", default)]
    pub system_processes_count: MetricSettings,

    /// `system.processes.created`
    #[serde(rename = "system.processes.created", default)]
    pub system_processes_created: MetricSettings,
}

impl MetricsSettings {
    /// Returns whether the named metric is enabled. Unknown names are disabled.
    #[must_use]
    pub fn is_enabled(&self, name: &str) -> bool {
        if name == metadata::SYSTEM_PROCESSES_COUNT.name {
            self.system_processes_count.enabled
        } else if name == metadata::SYSTEM_PROCESSES_CREATED.name {
            self.system_processes_created.enabled
        } else {
            false
        }
    }
}

/// Processes scraper configuration.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProcessesScraperConfig {
    /// Replace the enumerated `running`/`blocked` buckets with the kernel's
    /// aggregate counters, and attribute the remaining gap to `unknown`.
    #[serde(default)]
    pub reconcile_with_counters: bool,

    /// Per-metric switches.
    #[serde(default)]
    pub metrics: MetricsSettings,
}

/// Serde helper for humantime durations.
mod humantime_serde {
    use serde::{Deserialize, Deserializer, Serializer};
    use std::time::Duration;

    /// Serializes a duration as a human-readable string.
    ///
    /// # Errors
    /// Returns an error if serialization fails.
    pub fn serialize<S>(duration: &Duration, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(&humantime::format_duration(*duration).to_string())
    }

    /// Deserializes a duration from a human-readable string.
    ///
    /// # Errors
    /// Returns an error if the string cannot be parsed.
    pub fn deserialize<'de, D>(deserializer: D) -> Result<Duration, D::Error>
    where
        D: Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        humantime::parse_duration(&s).map_err(serde::de::Error::custom)
    }
}
