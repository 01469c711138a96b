//! # Metrics
//!
//! Prometheus metrics for monitoring the poller.
//!
//! ## Metrics Exposed
//!
//! - `roblox_monitor_cycles_total` - Total number of completed poll cycles
//! - `roblox_monitor_cycle_duration_seconds` - Duration of poll cycles
//! - `roblox_monitor_fetch_errors_total` - Failed remote reads, by source
//! - `roblox_monitor_notifications_sent_total` - Delivered notifications, by event kind
//! - `roblox_monitor_notification_errors_total` - Failed deliveries, by event kind
//! - `roblox_monitor_badges_tracked` - Badges in the current baseline

use anyhow::Result;
use prometheus::{Histogram, IntCounter, IntCounterVec, IntGauge, Registry};
use std::sync::LazyLock;

pub(crate) static REGISTRY: LazyLock<Registry> = LazyLock::new(Registry::new);

static CYCLES_TOTAL: LazyLock<IntCounter> = LazyLock::new(|| {
    IntCounter::new(
        "roblox_monitor_cycles_total",
        "Total number of completed poll cycles",
    )
    .expect("Failed to create CYCLES_TOTAL metric - this should never happen")
});

static CYCLE_DURATION: LazyLock<Histogram> = LazyLock::new(|| {
    Histogram::with_opts(
        prometheus::HistogramOpts::new(
            "roblox_monitor_cycle_duration_seconds",
            "Duration of poll cycles in seconds",
        )
        .buckets(vec![0.1, 0.5, 1.0, 2.0, 5.0, 10.0, 30.0]),
    )
    .expect("Failed to create CYCLE_DURATION metric - this should never happen")
});

static FETCH_ERRORS_TOTAL: LazyLock<IntCounterVec> = LazyLock::new(|| {
    IntCounterVec::new(
        prometheus::Opts::new(
            "roblox_monitor_fetch_errors_total",
            "Total number of failed remote state reads by source",
        ),
        &["source"],
    )
    .expect("Failed to create FETCH_ERRORS_TOTAL metric - this should never happen")
});

static NOTIFICATIONS_SENT_TOTAL: LazyLock<IntCounterVec> = LazyLock::new(|| {
    IntCounterVec::new(
        prometheus::Opts::new(
            "roblox_monitor_notifications_sent_total",
            "Total number of delivered webhook notifications by event kind",
        ),
        &["kind"],
    )
    .expect("Failed to create NOTIFICATIONS_SENT_TOTAL metric - this should never happen")
});

static NOTIFICATION_ERRORS_TOTAL: LazyLock<IntCounterVec> = LazyLock::new(|| {
    IntCounterVec::new(
        prometheus::Opts::new(
            "roblox_monitor_notification_errors_total",
            "Total number of failed webhook deliveries by event kind",
        ),
        &["kind"],
    )
    .expect("Failed to create NOTIFICATION_ERRORS_TOTAL metric - this should never happen")
});

static BADGES_TRACKED: LazyLock<IntGauge> = LazyLock::new(|| {
    IntGauge::new(
        "roblox_monitor_badges_tracked",
        "Number of badges in the current baseline",
    )
    .expect("Failed to create BADGES_TRACKED metric - this should never happen")
});

/// Register all metrics with the registry served on `/metrics`
///
/// # Errors
/// Fails if called twice for the same registry.
pub fn register_metrics() -> Result<()> {
    REGISTRY.register(Box::new(CYCLES_TOTAL.clone()))?;
    REGISTRY.register(Box::new(CYCLE_DURATION.clone()))?;
    REGISTRY.register(Box::new(FETCH_ERRORS_TOTAL.clone()))?;
    REGISTRY.register(Box::new(NOTIFICATIONS_SENT_TOTAL.clone()))?;
    REGISTRY.register(Box::new(NOTIFICATION_ERRORS_TOTAL.clone()))?;
    REGISTRY.register(Box::new(BADGES_TRACKED.clone()))?;
    Ok(())
}

pub fn increment_cycles() {
    CYCLES_TOTAL.inc();
}

pub fn observe_cycle_duration(duration: f64) {
    CYCLE_DURATION.observe(duration);
}

pub fn increment_fetch_errors(source: &str) {
    FETCH_ERRORS_TOTAL.with_label_values(&[source]).inc();
}

pub fn increment_notifications_sent(kind: &str) {
    NOTIFICATIONS_SENT_TOTAL.with_label_values(&[kind]).inc();
}

pub fn increment_notification_errors(kind: &str) {
    NOTIFICATION_ERRORS_TOTAL.with_label_values(&[kind]).inc();
}

pub fn set_badges_tracked(count: usize) {
    BADGES_TRACKED.set(i64::try_from(count).unwrap_or(i64::MAX));
}
