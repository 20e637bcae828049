//! Falsification Tests: Category A - Resource Detection (F001-F020)

use std::sync::Arc;

use proptest::prelude::*;

use hostprobe_core::{Context, HostnameSource, SystemDetectorConfig, resource};
use hostprobe_detect::{DetectError, Detector, SystemDetector, detect_resource};
use hostprobe_test::{MetadataCall, RecordingMetadata};

fn detector(metadata: &RecordingMetadata, sources: &[HostnameSource]) -> SystemDetector {
    SystemDetector::with_provider(
        &SystemDetectorConfig::with_sources(sources.to_vec()),
        Arc::new(metadata.clone()),
    )
    .unwrap()
}

fn call_for(source: HostnameSource) -> MetadataCall {
    match source {
        HostnameSource::Dns => MetadataCall::Fqdn,
        HostnameSource::Os => MetadataCall::Hostname,
    }
}

fn orderings() -> impl Strategy<Value = Vec<HostnameSource>> {
    prop_oneof![
        Just(vec![HostnameSource::Dns]),
        Just(vec![HostnameSource::Os]),
        Just(vec![HostnameSource::Dns, HostnameSource::Os]),
        Just(vec![HostnameSource::Os, HostnameSource::Dns]),
    ]
}

// =============================================================================
// F001-F005: Source ordering
// =============================================================================

proptest! {
    /// F001: Sources are called strictly in order and stop at the first success
    ///
    /// # Falsification Attempt
    /// Over every ordering and failure mask, the call log must be the OS type
    /// query followed by exactly the prefix of the chain up to and including
    /// the first working source.
    #[test]
    fn f001_sources_called_in_order_until_success(
        sources in orderings(),
        dns_ok in any::<bool>(),
        os_ok in any::<bool>(),
    ) {
        let metadata = RecordingMetadata::new()
            .with_fqdn(if dns_ok { Ok("host.example.com") } else { Err("dns down") })
            .with_hostname(if os_ok { Ok("host") } else { Err("no hostname") });
        let result = detector(&metadata, &sources).detect_now(&Context::new());

        let works = |s: &HostnameSource| match s {
            HostnameSource::Dns => dns_ok,
            HostnameSource::Os => os_ok,
        };
        let tried = sources
            .iter()
            .position(works)
            .map_or(sources.len(), |i| i + 1);

        let mut expected = vec![MetadataCall::OsType];
        expected.extend(sources[..tried].iter().copied().map(call_for));
        prop_assert_eq!(metadata.calls(), expected, "F001 FALSIFIED: call order");
        prop_assert_eq!(result.is_ok(), sources.iter().any(works));
    }
}

/// F002: Default order is dns, then os
#[test]
fn f002_default_order_dns_then_os() {
    let metadata = RecordingMetadata::new().with_fqdn(Err("dns down"));
    let detected = detector(&metadata, &[]).detect_now(&Context::new()).unwrap();
    assert_eq!(
        metadata.calls(),
        vec![MetadataCall::OsType, MetadataCall::Fqdn, MetadataCall::Hostname],
        "F002 FALSIFIED: default order"
    );
    assert_eq!(detected.resource.get_str(resource::HOST_NAME), Some("test-host"));
}

/// F003: A successful first source short-circuits the chain
#[test]
fn f003_first_success_short_circuits() {
    let metadata = RecordingMetadata::new();
    detector(&metadata, &[HostnameSource::Os, HostnameSource::Dns])
        .detect_now(&Context::new())
        .unwrap();
    assert!(
        !metadata.calls().contains(&MetadataCall::Fqdn),
        "F003 FALSIFIED: dns queried after os succeeded"
    );
}

// =============================================================================
// F006-F012: Failure handling
// =============================================================================

/// F006: OS type failure stops detection before any hostname source
///
/// # Falsification Attempt
/// Make the OS type unreadable while every hostname source works.
#[test]
fn f006_os_type_failure_skips_hostname_sources() {
    let metadata = RecordingMetadata::new().with_os_type(Err("uname failed"));
    let err = detector(&metadata, &[])
        .detect_now(&Context::new())
        .unwrap_err();
    assert!(matches!(err, DetectError::OsType(_)), "F006 FALSIFIED: {err}");
    assert_eq!(err.to_string(), "failed getting OS type: uname failed");
    assert_eq!(
        metadata.calls(),
        vec![MetadataCall::OsType],
        "F006 FALSIFIED: hostname source called after OS type failure"
    );
}

/// F007: Exhausted chain yields the aggregate error
#[test]
fn f007_all_sources_failed() {
    let metadata = RecordingMetadata::new()
        .with_fqdn(Err("dns down"))
        .with_hostname(Err("no hostname"));
    let err = detector(&metadata, &[])
        .detect_now(&Context::new())
        .unwrap_err();
    assert!(
        matches!(err, DetectError::AllSourcesFailed),
        "F007 FALSIFIED: {err}"
    );
}

/// F008: Failed detection contributes an empty resource and no schema
#[tokio::test]
async fn f008_failed_detection_is_empty_after_merge() {
    let metadata = RecordingMetadata::new()
        .with_fqdn(Err("dns down"))
        .with_hostname(Err("no hostname"));
    let detectors: Vec<Box<dyn Detector>> = vec![Box::new(detector(&metadata, &[]))];
    let merged = detect_resource(&detectors, &Context::new()).await;
    assert!(merged.is_empty(), "F008 FALSIFIED: attributes leaked");
    assert!(merged.schema_url.is_empty(), "F008 FALSIFIED: schema leaked");
}

/// F009: Cancellation surfaces as an ordinary failure
#[test]
fn f009_cancelled_context_fails_detection() {
    let metadata = RecordingMetadata::new();
    let ctx = Context::new();
    ctx.cancel();
    let err = detector(&metadata, &[]).detect_now(&ctx).unwrap_err();
    assert!(matches!(err, DetectError::OsType(ref e) if e.is_cancelled()));
}

/// F010: Duplicate sources are rejected when the detector is built
#[test]
fn f010_duplicate_sources_rejected() {
    let result = SystemDetector::with_provider(
        &SystemDetectorConfig::with_sources([HostnameSource::Os, HostnameSource::Os]),
        Arc::new(RecordingMetadata::new()),
    );
    assert!(matches!(result, Err(DetectError::Config(_))), "F010 FALSIFIED");
}

// =============================================================================
// F013-F020: Output shape
// =============================================================================

/// F013: Success yields exactly host.name and os.type
#[tokio::test]
async fn f013_success_has_exactly_two_attributes() {
    let metadata = RecordingMetadata::new();
    let detected = detector(&metadata, &[]).detect(&Context::new()).await.unwrap();
    let keys: Vec<_> = detected.resource.iter().map(|(k, _)| k).collect();
    assert_eq!(keys, vec!["host.name", "os.type"], "F013 FALSIFIED");
    assert_eq!(
        detected.resource.get_str(resource::HOST_NAME),
        Some("test-host.example.com")
    );
    assert_eq!(detected.resource.get_str(resource::OS_TYPE), Some("linux"));
}

/// F014: Success carries the semantic conventions schema URL
#[test]
fn f014_schema_url() {
    let detected = detector(&RecordingMetadata::new(), &[])
        .detect_now(&Context::new())
        .unwrap();
    assert_eq!(detected.schema_url, "https://opentelemetry.io/schemas/1.5.0");
}

/// F015: Detector reports its type name
#[test]
fn f015_detector_type_name() {
    assert_eq!(detector(&RecordingMetadata::new(), &[]).name(), "system");
}

/// F016: Repeated detection is stable
#[test]
fn f016_repeated_detection_is_stable() {
    let d = detector(&RecordingMetadata::new(), &[]);
    let first = d.detect_now(&Context::new()).unwrap();
    let second = d.detect_now(&Context::new()).unwrap();
    assert_eq!(first, second, "F016 FALSIFIED");
}

/// F017: Live detection on this host produces both attributes
#[cfg(target_os = "linux")]
#[test]
fn f017_live_detection_on_linux() {
    let d = SystemDetector::new(&SystemDetectorConfig::default()).unwrap();
    let detected = d.detect_now(&Context::new()).unwrap();
    assert_eq!(detected.resource.get_str(resource::OS_TYPE), Some("linux"));
    let host = detected.resource.get_str(resource::HOST_NAME).unwrap();
    assert!(!host.is_empty(), "F017 FALSIFIED: empty host name");
}
