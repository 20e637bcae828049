//! Falsification Tests: Category C - Configuration (F041-F050)

use std::time::Duration;

use hostprobe_core::{CollectorConfig, HostnameSource};
use hostprobe_detect::SystemDetector;
use hostprobe_scrape::{Capabilities, ProcessesScraper, StatusTable};

/// F041: An empty file is a valid configuration
#[test]
fn f041_empty_config_valid() {
    let config = CollectorConfig::from_toml_str("").unwrap();
    assert_eq!(config.collection_interval, Duration::from_secs(60));
    let detector = SystemDetector::new(&config.detector).unwrap();
    assert_eq!(detector.chain().names(), vec!["dns", "os"], "F041 FALSIFIED");
}

/// F042: Unknown hostname source names never reach a detector
///
/// # Falsification Attempt
/// Configure a source name that has no resolver.
#[test]
fn f042_unknown_source_rejected() {
    let result = CollectorConfig::from_toml_str(
        r#"
        [detector]
        hostname_sources = ["os", "cloud"]
        "#,
    );
    assert!(result.is_err(), "F042 FALSIFIED: unknown source accepted");
}

/// F043: Configured order reaches the chain unchanged
#[test]
fn f043_configured_order_preserved() {
    let config = CollectorConfig::from_toml_str(
        r#"
        [detector]
        hostname_sources = ["os", "dns"]
        "#,
    )
    .unwrap();
    assert_eq!(
        config.detector.hostname_sources,
        vec![HostnameSource::Os, HostnameSource::Dns]
    );
    let detector = SystemDetector::new(&config.detector).unwrap();
    assert_eq!(detector.chain().names(), vec!["os", "dns"], "F043 FALSIFIED");
}

/// F044: Metric switches reach the scraper
#[test]
fn f044_metric_switches_applied() {
    let config = CollectorConfig::from_toml_str(
        r#"
        [processes]
        reconcile_with_counters = true

        [processes.metrics."system.processes.count"]
        enabled = false
        "#,
    )
    .unwrap();
    assert!(config.processes.reconcile_with_counters);
    let scraper = ProcessesScraper::new(config.processes)
        .with_capabilities(Capabilities::all(StatusTable::Linux));
    assert!(!scraper.count_attempted(), "F044 FALSIFIED: disabled metric attempted");
    assert!(scraper.created_attempted());
}

/// F045: Zero collection interval is rejected
#[test]
fn f045_zero_interval_rejected() {
    assert!(CollectorConfig::from_toml_str(r#"collection_interval = "0s""#).is_err());
}

/// F046: Humantime intervals parse
#[test]
fn f046_humantime_interval() {
    let config = CollectorConfig::from_toml_str(r#"collection_interval = "1m 30s""#).unwrap();
    assert_eq!(config.collection_interval, Duration::from_secs(90));
}
