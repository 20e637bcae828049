// Allow unwrap/expect in tests for clear failure messages
#![cfg_attr(test, allow(clippy::unwrap_used, clippy::expect_used, clippy::panic))]

//! # hostprobe-test
//!
//! Testing infrastructure for hostprobe.
//!
//! This crate provides:
//! - **Recording metadata**: a `SystemMetadata` fake that logs every call
//! - **Fault injection**: deterministic reader failures for scrapers
//! - **Collection harness**: detect, start, tick and shut down in one call
//! - **Falsification tests**: numbered tests that try to refute each
//!   documented property (see `tests/falsification.rs`)
//!
//! ## Example
//!
//! ```rust
//! use hostprobe_test::{ChaosConfig, CollectorHarness, MetadataCall, RecordingMetadata};
//!
//! # tokio_test::block_on(async {
//! let metadata = RecordingMetadata::new().with_fqdn(Err("no resolver"));
//! let harness = CollectorHarness::builder()
//!     .with_metadata(metadata.clone())
//!     .with_chaos(ChaosConfig::processes_failures(2))
//!     .build();
//!
//! let collection = harness.run(2).await.unwrap();
//! assert_eq!(
//!     metadata.calls(),
//!     vec![MetadataCall::OsType, MetadataCall::Fqdn, MetadataCall::Hostname]
//! );
//! assert_eq!(collection.ticks[1].failed(), 1);
//! # });
//! ```

#![deny(unsafe_code)]
#![warn(missing_docs)]

pub mod chaos;
pub mod error;
pub mod harness;
pub mod metadata;

pub use chaos::{ChaosConfig, ChaosInjector};
pub use error::{Result, TestError};
pub use harness::{Collection, CollectorHarness, CollectorHarnessBuilder};
pub use metadata::{MetadataCall, RecordingMetadata};
