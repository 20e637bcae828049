//! # hostprobe
//!
//! Host resource detection and process-state scraping for telemetry
//! pipelines.
//!
//! The facade re-exports the member crates:
//!
//! - [`core`]: configuration, data model, context, errors
//! - [`detect`]: the `system` resource detector (`host.name`, `os.type`)
//! - [`scrape`]: the `processes` scraper (`system.processes.*`)
//!
//! # Quick Start
//!
//! ```rust,no_run
//! use hostprobe::prelude::*;
//!
//! # async fn run() -> Result<(), Box<dyn std::error::Error>> {
//! let config = CollectorConfig::default();
//! let ctx = Context::new();
//!
//! let detectors: Vec<Box<dyn Detector>> =
//!     vec![Box::new(SystemDetector::new(&config.detector)?)];
//! let resource = detect_resource(&detectors, &ctx).await;
//!
//! let mut scraper = ProcessesScraper::new(config.processes);
//! scraper.start(&ctx).await?;
//! let output = scraper.scrape(&ctx).await?;
//! println!("{} metrics for {:?}", output.metrics.len(), resource.resource);
//! scraper.shutdown(&ctx).await?;
//! # Ok(())
//! # }
//! ```

#![deny(unsafe_code)]
#![warn(missing_docs)]

pub use hostprobe_core as core;
pub use hostprobe_detect as detect;
pub use hostprobe_scrape as scrape;

/// Prelude module for common imports.
pub mod prelude {
    pub use hostprobe_core::{
        CollectorConfig, Context, CoreError, HostnameSource, Metric, PartialScrapeError,
        ProcessesScraperConfig, Resource, SystemDetectorConfig, Timestamp,
    };
    pub use hostprobe_detect::{
        DetectError, DetectedResource, Detector, SystemDetector, detect_resource,
    };
    pub use hostprobe_scrape::{ProcessesScraper, ScrapeOutput, Scraper};
}
