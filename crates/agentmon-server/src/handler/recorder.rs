//! Concurrent recorder for a handler's own counters and gauges.
//!
//! Entries live in `DashMap`s so the owning handler can update from any task
//! while snapshot requests copy them out. Every update holds the entry's shard
//! lock, so a reader sees either the old or the new value, never a mix.

use std::time::Duration;

use dashmap::DashMap;

use agentmon_core::InternalMetrics;

/// Counter bumped once per `record_emission`.
pub const EMISSIONS: &str = "emissions";
/// Counter of metrics sent, summed over emissions.
pub const METRICS_EMITTED: &str = "metrics_emitted";
/// Gauge with the duration of the latest emission in milliseconds.
pub const LAST_EMISSION_MS: &str = "last_emission_ms";

#[derive(Debug, Default)]
pub struct MetricsRecorder {
    counters: DashMap<String, f64>,
    gauges: DashMap<String, f64>,
    dimensions: DashMap<String, String>,
}

impl MetricsRecorder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Increment a counter by 1.
    pub fn inc_counter(&self, name: &str) {
        self.add_counter(name, 1.0);
    }

    /// Increment a counter by an arbitrary amount.
    pub fn add_counter(&self, name: &str, v: f64) {
        *self.counters.entry(name.to_string()).or_insert(0.0) += v;
    }

    pub fn set_gauge(&self, name: &str, v: f64) {
        self.gauges.insert(name.to_string(), v);
    }

    pub fn set_dimension(&self, name: &str, value: &str) {
        self.dimensions.insert(name.to_string(), value.to_string());
    }

    /// Account for one batch sent to the backend.
    pub fn record_emission(&self, metric_count: usize, took: Duration) {
        self.inc_counter(EMISSIONS);
        self.add_counter(METRICS_EMITTED, metric_count as f64);
        self.set_gauge(LAST_EMISSION_MS, took.as_secs_f64() * 1000.0);
    }

    /// Copy the current values out.
    ///
    /// Entries are copied one at a time; a concurrent writer may land between
    /// two entries, so values can be from slightly different instants.
    pub fn snapshot(&self) -> InternalMetrics {
        let mut out = InternalMetrics::new();
        out.counters
            .extend(self.counters.iter().map(|r| (r.key().clone(), *r.value())));
        out.gauges
            .extend(self.gauges.iter().map(|r| (r.key().clone(), *r.value())));
        out.dimensions
            .extend(self.dimensions.iter().map(|r| (r.key().clone(), r.value().clone())));
        out
    }
}
