// Allow unwrap/expect in tests for clear failure messages
#![cfg_attr(test, allow(clippy::unwrap_used, clippy::expect_used, clippy::panic))]

//! # hostprobe-core
//!
//! Shared primitives for host telemetry collection.
//!
//! This crate provides the types that detectors, scrapers and hosts agree on:
//!
//! - [`Resource`] for identity attributes (`host.name`, `os.type`)
//! - [`Metric`] / [`NumberDataPoint`] / [`Timestamp`] for scraped data
//! - [`metadata`] for the fixed metric descriptor catalog
//! - [`Context`] for cancellation-aware calls into the OS
//! - [`PartialScrapeError`] for partial-success scrape results
//! - [`CollectorConfig`] for TOML configuration
//!
//! ## Example
//!
//! ```rust
//! use hostprobe_core::{Resource, resource};
//!
//! let mut res = Resource::new();
//! res.insert(resource::HOST_NAME, "web-1");
//! res.insert(resource::OS_TYPE, "linux");
//! assert_eq!(res.len(), 2);
//! ```

#![deny(unsafe_code)]
#![warn(missing_docs)]

pub mod config;
pub mod context;
pub mod error;
pub mod metadata;
pub mod metric;
pub mod resource;
pub mod scrape_error;

pub use config::{
    CollectorConfig, DEFAULT_HOSTNAME_SOURCES, HostnameSource, MetricSettings, MetricsSettings,
    ProcessesScraperConfig, SystemDetectorConfig,
};
pub use context::Context;
pub use error::{CoreError, Result};
pub use metadata::MetricDescriptor;
pub use metric::{Metric, NumberDataPoint, Sum, Temporality, Timestamp};
pub use resource::{AttributeValue, Resource};
pub use scrape_error::{PartialScrapeError, ScrapeFailure};
