//! Minimal collection host.
//!
//! Detects the host resource once, then scrapes process states on the
//! configured interval and prints each tick as JSON.
//!
//! ```text
//! RUST_LOG=debug cargo run --example collect -- [config.toml] [ticks]
//! ```

use hostprobe::prelude::*;
use tracing_subscriber::EnvFilter;

const DEFAULT_TICKS: usize = 3;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    let mut args = std::env::args().skip(1);
    let config = match args.next() {
        Some(path) => CollectorConfig::load(path)?,
        None => CollectorConfig::default(),
    };
    let ticks = match args.next() {
        Some(n) => n.parse()?,
        None => DEFAULT_TICKS,
    };

    let ctx = Context::new();
    let detectors: Vec<Box<dyn Detector>> =
        vec![Box::new(SystemDetector::new(&config.detector)?)];
    let detected = detect_resource(&detectors, &ctx).await;
    println!("{}", serde_json::to_string_pretty(&detected.resource)?);

    let mut scraper = ProcessesScraper::new(config.processes);
    scraper.start(&ctx).await?;

    let mut interval = tokio::time::interval(config.collection_interval);
    for tick in 0..ticks {
        interval.tick().await;
        let output = scraper.scrape(&ctx).await?;
        if let Some(err) = &output.error {
            tracing::warn!(tick, failed = err.failed(), error = %err, "partial scrape");
        }
        println!("{}", serde_json::to_string_pretty(&output.metrics)?);
    }

    scraper.shutdown(&ctx).await?;
    Ok(())
}
