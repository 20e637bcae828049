//! Typed metric records emitted by scrapers.
//!
//! The model is deliberately small: every metric this crate family produces
//! is a cumulative integer sum, monotonic or not, carrying a list of data
//! points that share the scrape's start time and observation time.

use std::collections::BTreeMap;
use std::fmt;
use std::time::{Duration, SystemTime, UNIX_EPOCH};

use serde::{Deserialize, Serialize};

/// Point in time as nanoseconds since the Unix epoch.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Timestamp(u64);

impl Timestamp {
    /// Reads the wall clock.
    #[must_use]
    pub fn now() -> Self {
        SystemTime::now().into()
    }

    /// Creates a timestamp from nanoseconds since the epoch.
    #[must_use]
    pub const fn from_nanos(nanos: u64) -> Self {
        Self(nanos)
    }

    /// Nanoseconds since the epoch.
    #[must_use]
    pub const fn as_nanos(&self) -> u64 {
        self.0
    }
}

impl From<SystemTime> for Timestamp {
    fn from(time: SystemTime) -> Self {
        // Clocks before 1970 clamp to the epoch.
        let since_epoch = time.duration_since(UNIX_EPOCH).unwrap_or(Duration::ZERO);
        Self(since_epoch.as_nanos() as u64)
    }
}

impl fmt::Display for Timestamp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let secs = self.0 / 1_000_000_000;
        let nanos = self.0 % 1_000_000_000;
        write!(f, "{secs}.{nanos:09}")
    }
}

/// Aggregation temporality of a sum.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Temporality {
    /// Values accumulate since `start_time`.
    Cumulative,
}

/// One integer observation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NumberDataPoint {
    /// Observed value.
    pub value: i64,
    /// Start of the accumulation window.
    pub start_time: Timestamp,
    /// When the value was observed.
    pub timestamp: Timestamp,
    /// Point labels.
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub attributes: BTreeMap<String, String>,
}

impl NumberDataPoint {
    /// Creates an unlabelled point.
    #[must_use]
    pub fn new(value: i64, start_time: Timestamp, timestamp: Timestamp) -> Self {
        Self {
            value,
            start_time,
            timestamp,
            attributes: BTreeMap::new(),
        }
    }

    /// Adds a label.
    #[must_use]
    pub fn with_attribute(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.attributes.insert(key.into(), value.into());
        self
    }
}

/// Cumulative integer sum.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Sum {
    /// Whether the sum never decreases within one collector lifetime.
    pub is_monotonic: bool,
    /// Aggregation temporality.
    pub temporality: Temporality,
    /// Data points.
    pub data_points: Vec<NumberDataPoint>,
}

/// A named metric with its data.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Metric {
    /// Metric name, e.g. `system.processes.count`.
    pub name: String,
    /// Human-readable description.
    pub description: String,
    /// UCUM unit.
    pub unit: String,
    /// Sum data.
    pub sum: Sum,
}

impl Metric {
    /// Data points of this metric.
    #[must_use]
    pub fn data_points(&self) -> &[NumberDataPoint] {
        &self.sum.data_points
    }

    /// Appends a data point.
    pub fn push(&mut self, point: NumberDataPoint) {
        self.sum.data_points.push(point);
    }
}
