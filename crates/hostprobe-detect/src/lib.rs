// Allow unwrap/expect in tests for clear failure messages
#![cfg_attr(test, allow(clippy::unwrap_used, clippy::expect_used, clippy::panic))]

//! # hostprobe-detect
//!
//! Host resource detection.
//!
//! The [`SystemDetector`] reports two attributes:
//!
//! - **`os.type`**: normalized OS family, required for a successful detection
//! - **`host.name`**: first success of an ordered chain of hostname sources
//!   (`dns` for the FQDN, `os` for the kernel host name)
//!
//! OS access goes through the [`SystemMetadata`] trait, so hosts and tests can
//! swap the live [`OsSystemMetadata`] for a [`StaticMetadata`] or their own
//! provider.
//!
//! ## Example
//!
//! ```rust
//! use std::sync::Arc;
//! use hostprobe_core::{Context, HostnameSource, SystemDetectorConfig};
//! use hostprobe_detect::{StaticMetadata, SystemDetector};
//!
//! let provider = StaticMetadata::new("linux")
//!     .with_fqdn_error("no resolver")
//!     .with_hostname("web-1");
//! let config = SystemDetectorConfig::with_sources([HostnameSource::Dns, HostnameSource::Os]);
//! let detector = SystemDetector::with_provider(&config, Arc::new(provider))?;
//!
//! let detected = detector.detect_now(&Context::new())?;
//! assert_eq!(detected.resource.get_str("host.name"), Some("web-1"));
//! # Ok::<(), hostprobe_detect::DetectError>(())
//! ```

#![deny(unsafe_code)]
#![warn(missing_docs)]

pub mod detect;
pub mod error;
pub mod provider;
pub mod source;
pub mod system;

pub use detect::{DetectedResource, Detector, detect_resource};
pub use error::{DetectError, Result};
pub use provider::{OsSystemMetadata, StaticMetadata, SystemMetadata, os_type_of};
pub use source::{SourceChain, SourceEntry};
pub use system::SystemDetector;
