//! Collection test harness.
//!
//! Wires a [`SystemDetector`] and a [`ProcessesScraper`] to fakes and runs
//! them the way a host would: detect once, start the scraper, tick, shut down.

use std::sync::Arc;

use hostprobe_core::{Context, ProcessesScraperConfig, SystemDetectorConfig, Timestamp};
use hostprobe_detect::{DetectedResource, Detector, SystemDetector, detect_resource};
use hostprobe_scrape::{
    Capabilities, MiscStat, ProcessReaders, ProcessesScraper, ScrapeOutput, Scraper, StatusTable,
};

use crate::chaos::{ChaosConfig, ChaosInjector};
use crate::error::Result;
use crate::metadata::RecordingMetadata;

/// Result of one harness run.
#[derive(Debug)]
pub struct Collection {
    /// Merged resource from every detector.
    pub resource: DetectedResource,
    /// One output per tick, in order.
    pub ticks: Vec<ScrapeOutput>,
}

/// Test harness for detector plus scraper runs.
pub struct CollectorHarness {
    metadata: RecordingMetadata,
    detector_config: SystemDetectorConfig,
    scraper_config: ProcessesScraperConfig,
    readers: ProcessReaders,
    capabilities: Capabilities,
    chaos: Option<ChaosConfig>,
}

impl CollectorHarness {
    /// Creates a new test harness builder.
    #[must_use]
    pub fn builder() -> CollectorHarnessBuilder {
        CollectorHarnessBuilder::default()
    }

    /// Creates a harness with default fakes.
    #[must_use]
    pub fn new() -> Self {
        Self::builder().build()
    }

    /// The metadata provider behind the detector.
    #[must_use]
    pub const fn metadata(&self) -> &RecordingMetadata {
        &self.metadata
    }

    /// Builds the system detector.
    ///
    /// # Errors
    /// Returns an error if the detector configuration is invalid.
    pub fn detector(&self) -> Result<SystemDetector> {
        Ok(SystemDetector::with_provider(
            &self.detector_config,
            Arc::new(self.metadata.clone()),
        )?)
    }

    /// Builds the processes scraper, with chaos applied if configured.
    #[must_use]
    pub fn scraper(&self) -> ProcessesScraper {
        let readers = match self.chaos {
            Some(config) => ChaosInjector::new(config).wrap(self.readers.clone()),
            None => self.readers.clone(),
        };
        ProcessesScraper::new(self.scraper_config)
            .with_readers(readers)
            .with_capabilities(self.capabilities)
    }

    /// Detects the resource, then runs `ticks` scrapes.
    ///
    /// # Errors
    /// Returns an error if the detector cannot be built or the scraper
    /// lifecycle fails. Partial scrape failures are kept in the ticks.
    pub async fn run(&self, ticks: usize) -> Result<Collection> {
        let ctx = Context::new();
        let detectors: Vec<Box<dyn Detector>> = vec![Box::new(self.detector()?)];
        let resource = detect_resource(&detectors, &ctx).await;

        let mut scraper = self.scraper();
        scraper.start(&ctx).await?;
        let mut outputs = Vec::with_capacity(ticks);
        for _ in 0..ticks {
            outputs.push(scraper.scrape(&ctx).await?);
        }
        scraper.shutdown(&ctx).await?;

        tracing::debug!(ticks, attributes = resource.resource.len(), "harness run complete");
        Ok(Collection {
            resource,
            ticks: outputs,
        })
    }
}

impl Default for CollectorHarness {
    fn default() -> Self {
        Self::new()
    }
}

/// Builder for [`CollectorHarness`].
#[derive(Default)]
pub struct CollectorHarnessBuilder {
    metadata: Option<RecordingMetadata>,
    detector_config: SystemDetectorConfig,
    scraper_config: ProcessesScraperConfig,
    readers: Option<ProcessReaders>,
    capabilities: Option<Capabilities>,
    chaos: Option<ChaosConfig>,
}

impl CollectorHarnessBuilder {
    /// Sets the metadata provider.
    #[must_use]
    pub fn with_metadata(mut self, metadata: RecordingMetadata) -> Self {
        self.metadata = Some(metadata);
        self
    }

    /// Sets the detector configuration.
    #[must_use]
    pub fn with_detector_config(mut self, config: SystemDetectorConfig) -> Self {
        self.detector_config = config;
        self
    }

    /// Sets the scraper configuration.
    #[must_use]
    pub fn with_scraper_config(mut self, config: ProcessesScraperConfig) -> Self {
        self.scraper_config = config;
        self
    }

    /// Sets the scraper readers.
    #[must_use]
    pub fn with_readers(mut self, readers: ProcessReaders) -> Self {
        self.readers = Some(readers);
        self
    }

    /// Sets the platform capabilities.
    #[must_use]
    pub fn with_capabilities(mut self, capabilities: Capabilities) -> Self {
        self.capabilities = Some(capabilities);
        self
    }

    /// Enables fault injection on the readers.
    #[must_use]
    pub fn with_chaos(mut self, config: ChaosConfig) -> Self {
        self.chaos = Some(config);
        self
    }

    /// Builds the harness.
    ///
    /// Defaults: a [`RecordingMetadata`], both metrics on the Linux table, and
    /// readers serving one running and one sleeping process.
    #[must_use]
    pub fn build(self) -> CollectorHarness {
        let readers = self.readers.unwrap_or_else(|| {
            ProcessReaders::fixed(
                Timestamp::from_nanos(1_000),
                MiscStat {
                    procs_created: 10,
                    procs_running: 1,
                    procs_blocked: 0,
                    procs_total: 2,
                },
                &["R", "S"],
            )
        });
        CollectorHarness {
            metadata: self.metadata.unwrap_or_default(),
            detector_config: self.detector_config,
            scraper_config: self.scraper_config,
            readers,
            capabilities: self
                .capabilities
                .unwrap_or_else(|| Capabilities::all(StatusTable::Linux)),
            chaos: self.chaos,
        }
    }
}
