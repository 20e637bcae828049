// Allow unwrap/expect in tests for clear failure messages
#![cfg_attr(test, allow(clippy::unwrap_used, clippy::expect_used, clippy::panic))]

//! # hostprobe-scrape
//!
//! Stateful scrapers for host process metrics.
//!
//! This crate provides:
//! - **[`Scraper`]**: start / scrape / shutdown lifecycle
//! - **[`ProcessesScraper`]**: `system.processes.count` by logical status and
//!   `system.processes.created`
//! - **Readers**: `/proc` on Linux, `ps(1)` on other unix systems
//! - **Classification**: per-platform [`StatusTable`]s
//!
//! A failing reader costs only the metric it feeds. The tick still returns
//! everything else, with the failures collected in a
//! [`PartialScrapeError`](hostprobe_core::PartialScrapeError).
//!
//! ## Example
//!
//! ```rust
//! use hostprobe_core::{Context, ProcessesScraperConfig, Timestamp};
//! use hostprobe_scrape::{
//!     Capabilities, MiscStat, ProcessReaders, ProcessesScraper, Scraper, StatusTable,
//! };
//!
//! # tokio_test::block_on(async {
//! let readers = ProcessReaders::fixed(Timestamp::from_nanos(1), MiscStat::default(), &["R", "S"]);
//! let mut scraper = ProcessesScraper::new(ProcessesScraperConfig::default())
//!     .with_readers(readers)
//!     .with_capabilities(Capabilities::count_only(StatusTable::Linux));
//!
//! let ctx = Context::new();
//! scraper.start(&ctx).await?;
//! let output = scraper.scrape(&ctx).await?;
//! assert_eq!(output.metrics[0].data_points().len(), 2);
//! # Ok::<(), hostprobe_core::CoreError>(())
//! # }).unwrap();
//! ```

#![deny(unsafe_code)]
#![warn(missing_docs)]

pub mod capabilities;
pub mod processes;
#[cfg(target_os = "linux")]
pub mod procfs;
#[cfg(unix)]
pub mod ps;
pub mod reader;
pub mod scraper;
pub mod status;
#[cfg(test)]
pub mod tests;

pub use capabilities::Capabilities;
pub use processes::{ProcessesScraper, reconcile_with_counters};
pub use reader::{MiscStat, ProcessHandle, ProcessReaders, StaticProcess};
pub use scraper::{ScrapeOutput, Scraper};
pub use status::{Status, StatusCounts, StatusTable};
