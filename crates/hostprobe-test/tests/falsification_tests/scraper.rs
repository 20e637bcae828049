//! Falsification Tests: Category B - Processes Scraping (F021-F040)

use std::collections::BTreeMap;

use proptest::prelude::*;

use hostprobe_core::{Context, ProcessesScraperConfig, Timestamp};
use hostprobe_scrape::{
    Capabilities, MiscStat, ProcessReaders, ProcessesScraper, ScrapeOutput, Scraper, StatusTable,
};
use hostprobe_test::{ChaosConfig, CollectorHarness};

const FAKE_MISC: MiscStat = MiscStat {
    procs_created: 1,
    procs_running: 2,
    procs_blocked: 3,
    procs_total: 30,
};

fn fake_codes() -> Vec<&'static str> {
    [("W", 1), ("D", 2), ("R", 3), ("S", 4), ("T", 5), ("Z", 6)]
        .iter()
        .flat_map(|(code, n)| std::iter::repeat_n(*code, *n))
        .collect()
}

fn fake_readers() -> ProcessReaders {
    ProcessReaders::fixed(Timestamp::from_nanos(5_000), FAKE_MISC, &fake_codes())
}

fn buckets(output: &ScrapeOutput) -> BTreeMap<&str, i64> {
    output
        .metric("system.processes.count")
        .map(|m| {
            m.data_points()
                .iter()
                .map(|p| (p.attributes["status"].as_str(), p.value))
                .collect()
        })
        .unwrap_or_default()
}

async fn one_tick(scraper: &mut ProcessesScraper) -> ScrapeOutput {
    let ctx = Context::new();
    scraper.start(&ctx).await.unwrap();
    scraper.scrape(&ctx).await.unwrap()
}

// =============================================================================
// F021-F026: Partial failure matrix
// =============================================================================

proptest! {
    /// F021: Emitted plus failed equals attempted
    ///
    /// # Falsification Attempt
    /// Over every combination of reader outcomes, capabilities and metric
    /// switches, no metric is both emitted and failed, and none goes missing.
    #[test]
    fn f021_emitted_plus_failed_equals_attempted(
        misc_ok in any::<bool>(),
        enum_ok in any::<bool>(),
        count_cap in any::<bool>(),
        created_cap in any::<bool>(),
        count_on in any::<bool>(),
        created_on in any::<bool>(),
    ) {
        let mut readers = fake_readers();
        if !misc_ok {
            readers = readers.with_misc_stat(|_| Err(hostprobe_core::CoreError::source("err1")));
        }
        if !enum_ok {
            readers = readers.with_processes(|_| Err(hostprobe_core::CoreError::source("err2")));
        }
        let mut config = ProcessesScraperConfig::default();
        config.metrics.system_processes_count.enabled = count_on;
        config.metrics.system_processes_created.enabled = created_on;
        let caps = Capabilities {
            processes_count: count_cap,
            processes_created: created_cap,
            status_table: StatusTable::Linux,
        };
        let mut scraper = ProcessesScraper::new(config)
            .with_readers(readers)
            .with_capabilities(caps);

        let output = tokio_test::block_on(one_tick(&mut scraper));

        let count_attempted = count_cap && count_on;
        let created_attempted = created_cap && created_on;
        let attempted = usize::from(count_attempted) + usize::from(created_attempted);
        let succeeded = usize::from(count_attempted && enum_ok)
            + usize::from(created_attempted && misc_ok);

        prop_assert_eq!(output.metrics.len(), succeeded, "F021 FALSIFIED: emitted");
        prop_assert_eq!(output.failed(), attempted - succeeded, "F021 FALSIFIED: failed");
        prop_assert!(output.failed() <= attempted);
    }
}

/// F022: Errors are reported verbatim
#[tokio::test]
async fn f022_error_text_verbatim() {
    let readers =
        fake_readers().with_misc_stat(|_| Err(hostprobe_core::CoreError::source("err1")));
    let mut scraper = ProcessesScraper::new(ProcessesScraperConfig::default())
        .with_readers(readers)
        .with_capabilities(Capabilities::all(StatusTable::Linux));
    let output = one_tick(&mut scraper).await;
    assert_eq!(output.error.unwrap().to_string(), "err1", "F022 FALSIFIED");
}

/// F023: A failing tick does not poison later ticks
#[tokio::test]
async fn f023_recovery_after_failed_tick() {
    let harness = CollectorHarness::builder()
        .with_readers(fake_readers())
        .with_chaos(ChaosConfig::processes_failures(2))
        .build();
    let collection = harness.run(3).await.unwrap();
    let emitted: Vec<_> = collection.ticks.iter().map(|t| t.metrics.len()).collect();
    assert_eq!(emitted, vec![2, 1, 2], "F023 FALSIFIED: tick state leaked");
}

// =============================================================================
// F027-F034: Classification
// =============================================================================

/// F027: Linux table over the canned status mix
#[tokio::test]
async fn f027_linux_buckets() {
    let mut scraper = ProcessesScraper::new(ProcessesScraperConfig::default())
        .with_readers(fake_readers())
        .with_capabilities(Capabilities::all(StatusTable::Linux));
    let output = one_tick(&mut scraper).await;
    let expected: BTreeMap<&str, i64> = [
        ("blocked", 2),
        ("paging", 1),
        ("running", 3),
        ("sleeping", 4),
        ("stopped", 5),
        ("zombies", 6),
    ]
    .into_iter()
    .collect();
    assert_eq!(buckets(&output), expected, "F027 FALSIFIED");
    let created = output.metric("system.processes.created").unwrap();
    assert_eq!(created.data_points().len(), 1);
    assert_eq!(created.data_points()[0].value, 1);
    assert!(created.data_points()[0].attributes.is_empty());
}

/// F028: Reconciled Linux table matches the kernel counters
///
/// # Falsification Attempt
/// Enumerated running/blocked disagree with the counters and the enumeration
/// is 9 short of the kernel total.
#[tokio::test]
async fn f028_reconciled_buckets() {
    let config = ProcessesScraperConfig {
        reconcile_with_counters: true,
        ..ProcessesScraperConfig::default()
    };
    let mut scraper = ProcessesScraper::new(config)
        .with_readers(fake_readers())
        .with_capabilities(Capabilities::all(StatusTable::Linux));
    let output = one_tick(&mut scraper).await;
    let expected: BTreeMap<&str, i64> = [
        ("blocked", 3),
        ("paging", 1),
        ("running", 2),
        ("sleeping", 4),
        ("stopped", 5),
        ("unknown", 9),
        ("zombies", 6),
    ]
    .into_iter()
    .collect();
    assert_eq!(buckets(&output), expected, "F028 FALSIFIED");
}

/// F029: Darwin table classifies the same mix differently
#[tokio::test]
async fn f029_darwin_buckets() {
    let mut scraper = ProcessesScraper::new(ProcessesScraperConfig::default())
        .with_readers(fake_readers())
        .with_capabilities(Capabilities::count_only(StatusTable::Darwin));
    let output = one_tick(&mut scraper).await;
    let b = buckets(&output);
    assert_eq!(b["blocked"], 2);
    assert_eq!(b["unknown"], 1, "F029 FALSIFIED: W has no Darwin meaning");
    assert!(!b.contains_key("paging"));
    assert!(output.metric("system.processes.created").is_none());
}

/// F030: Unreadable handles are excluded without failing the tick
#[tokio::test]
async fn f030_failing_handles_excluded() {
    let harness = CollectorHarness::builder()
        .with_readers(fake_readers())
        .with_chaos(ChaosConfig::handle_failures(7))
        .build();
    let collection = harness.run(1).await.unwrap();
    let tick = &collection.ticks[0];
    let total: i64 = buckets(tick).values().sum();
    assert_eq!(total, 21 - 3, "F030 FALSIFIED: failing handles counted");
    assert!(tick.is_complete(), "F030 FALSIFIED: handle loss reported as failure");
}

// =============================================================================
// F035-F040: Timestamps and idempotence
// =============================================================================

/// F035: Every point shares start time and timestamp
#[tokio::test]
async fn f035_shared_timestamps() {
    let mut scraper = ProcessesScraper::new(ProcessesScraperConfig::default())
        .with_readers(fake_readers())
        .with_capabilities(Capabilities::all(StatusTable::Linux));
    let output = one_tick(&mut scraper).await;
    let start = scraper.start_time().unwrap();
    for metric in &output.metrics {
        for point in metric.data_points() {
            assert_eq!(point.start_time, start, "F035 FALSIFIED: start time");
            assert_eq!(point.timestamp, Timestamp::from_nanos(5_000), "F035 FALSIFIED: timestamp");
        }
    }
}

/// F036: Two scrapes over unchanged readers are identical
#[tokio::test]
async fn f036_idempotent() {
    let collection = CollectorHarness::builder()
        .with_readers(fake_readers())
        .build()
        .run(2)
        .await
        .unwrap();
    assert_eq!(
        collection.ticks[0].metrics, collection.ticks[1].metrics,
        "F036 FALSIFIED"
    );
}

/// F037: Live scrape on Linux reports at least this process
#[cfg(target_os = "linux")]
#[tokio::test]
async fn f037_live_scrape_on_linux() {
    let mut scraper = ProcessesScraper::new(ProcessesScraperConfig::default());
    let output = one_tick(&mut scraper).await;
    assert!(output.is_complete(), "F037 FALSIFIED: {:?}", output.error);
    let total: i64 = buckets(&output).values().sum();
    assert!(total >= 1);
    let created = output.metric("system.processes.created").unwrap();
    assert!(created.data_points()[0].value > 0);
}
