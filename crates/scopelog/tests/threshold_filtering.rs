//! Integration tests for per-destination threshold filtering.
//!
//! A message at severity S reaches a destination with threshold T exactly
//! when S >= T, with passthru passing everything except `Off`.

use std::sync::Arc;

use proptest::prelude::*;
use scopelog::{DefaultDestination, Level, LevelFilter, Logger, LoggerConfig, MemorySink, Sink};

fn detached(level: LevelFilter) -> Logger {
    Logger::with_config(
        &LoggerConfig::default()
            .with_level(level)
            .with_default_destination(DefaultDestination::Disabled),
    )
}

fn level_strategy() -> impl Strategy<Value = Level> {
    prop::sample::select(Level::ALL.to_vec())
}

fn filter_strategy() -> impl Strategy<Value = LevelFilter> {
    (0u8..=5).prop_map(|index| LevelFilter::from_u8(index).expect("index in range"))
}

// ============================================================================
// Delivery rules
// ============================================================================

/// A capture sink at Info next to a Warn built-in receives exactly the
/// rendered info line.
#[test]
fn info_reaches_capture_but_not_warn_builtin() {
    let dir = tempfile::tempdir().expect("tempdir");
    let builtin_path = dir.path().join("builtin.log");
    let logger = Logger::with_config(
        &LoggerConfig::default()
            .with_level(LevelFilter::Warn)
            .with_default_destination(DefaultDestination::File(builtin_path.clone())),
    );
    let capture = Arc::new(MemorySink::new());
    logger.add_destination(capture.clone(), Some(LevelFilter::Info));

    scopelog::info!(logger: &logger; "value={}", 42);
    logger.flush();

    assert_eq!(capture.contents(), "INFO: value=42\n");
    assert_eq!(std::fs::read_to_string(&builtin_path).expect("read"), "");
}

/// Each destination applies its own threshold to the same line.
#[test]
fn destinations_filter_independently() {
    let logger = detached(LevelFilter::Warn);
    let verbose = Arc::new(MemorySink::new());
    let quiet = Arc::new(MemorySink::new());
    logger.add_destination(verbose.clone(), Some(LevelFilter::Debug));
    logger.add_destination(quiet.clone(), Some(LevelFilter::Error));

    logger.debug("d");
    logger.info("i");
    logger.warn("w");
    logger.error("e");
    logger.passthru("raw");

    assert_eq!(
        verbose.lines(),
        ["DEBG: d", "INFO: i", "WARN: w", "ERRR: e", "raw"]
    );
    assert_eq!(quiet.lines(), ["ERRR: e", "raw"]);
}

/// Passthru text carries no prefix and is rejected only by `Off`.
#[test]
fn passthru_is_blocked_only_by_off() {
    let logger = detached(LevelFilter::Warn);
    let open = Arc::new(MemorySink::new());
    let closed = Arc::new(MemorySink::new());
    logger.add_destination(open.clone(), Some(LevelFilter::Passthru));
    logger.add_destination(closed.clone(), Some(LevelFilter::Off));

    scopelog::passthru!(logger: &logger; "{} bytes", 512);
    logger.error("not passthru");

    assert_eq!(open.contents(), "512 bytes\n");
    assert!(closed.is_empty());
}

proptest! {
    /// Delivery matches the severity ordering for every pair.
    #[test]
    fn delivery_is_monotonic(level in level_strategy(), threshold in filter_strategy()) {
        let logger = detached(LevelFilter::Warn);
        let capture = Arc::new(MemorySink::new());
        logger.add_destination(capture.clone(), Some(threshold));

        logger.log(level, "probe");

        let expected = threshold != LevelFilter::Off && level.as_u8() >= threshold.as_u8();
        prop_assert_eq!(!capture.is_empty(), expected);
    }

    /// Raising a threshold never lets more messages through.
    #[test]
    fn stricter_threshold_delivers_subset(
        level in level_strategy(),
        lower in filter_strategy(),
        higher in filter_strategy(),
    ) {
        prop_assume!(lower <= higher);
        prop_assert!(!higher.admits(level) || lower.admits(level));
    }
}

// ============================================================================
// Registry maintenance
// ============================================================================

/// Removing a sink twice is a harmless no-op.
#[test]
fn removal_is_idempotent() {
    let logger = detached(LevelFilter::Info);
    let capture = Arc::new(MemorySink::new());
    logger.add_destination(capture.clone(), None);

    assert!(logger.remove_destination(&capture));
    assert!(!logger.remove_destination(&capture));

    logger.error("after removal");
    assert!(capture.is_empty());
}

/// Re-adding a sink replaces its threshold instead of duplicating output.
#[test]
fn re_adding_updates_threshold_without_duplicates() {
    let logger = detached(LevelFilter::Warn);
    let capture = Arc::new(MemorySink::new());
    logger.add_destination(capture.clone(), Some(LevelFilter::Error));
    logger.add_destination(capture.clone(), Some(LevelFilter::Info));

    logger.info("once");

    assert_eq!(capture.contents(), "INFO: once\n");
    assert_eq!(logger.destinations().len(), 1);
}

/// `set_log_level` moves the built-in destination with the default while
/// explicitly registered sinks keep their thresholds.
#[test]
fn set_log_level_synchronizes_builtin() {
    let logger = Logger::new(LevelFilter::Warn);
    let capture = Arc::new(MemorySink::new());
    logger.add_destination(capture.clone(), Some(LevelFilter::Error));
    let builtin: Arc<dyn Sink> = logger.default_sink().expect("stderr").clone();

    for level in [LevelFilter::Debug, LevelFilter::Off, LevelFilter::Info] {
        logger.set_log_level(level);
        assert_eq!(logger.log_level(), level);
        assert_eq!(logger.destination_threshold(&builtin), Some(level));
        assert_eq!(
            logger.destination_threshold(&capture),
            Some(LevelFilter::Error)
        );
    }
}

/// Destinations added without a threshold pick up the default in force at
/// registration time.
#[test]
fn unspecified_threshold_uses_current_default() {
    let logger = detached(LevelFilter::Warn);
    logger.set_log_level(LevelFilter::Debug);
    let capture = Arc::new(MemorySink::new());
    logger.add_destination(capture.clone(), None);

    logger.debug("visible");

    assert_eq!(capture.contents(), "DEBG: visible\n");
}

/// A dropped sink that was never deregistered goes quiet instead of
/// keeping the sink alive.
#[test]
fn dropped_sink_stops_receiving() {
    let logger = detached(LevelFilter::Info);
    let capture = Arc::new(MemorySink::new());
    logger.add_destination(capture.clone(), None);

    assert!(logger.destinations()[0].alive);
    drop(capture);
    assert!(!logger.destinations()[0].alive);

    logger.error("nobody listening");
    assert!(logger.destinations().is_empty());
}
