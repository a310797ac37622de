//! Per-handler operational metrics.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// Counters, gauges, and dimensions a handler reports about itself.
///
/// Maps are ordered so the JSON encoding is canonical. All three are always
/// present (possibly empty), including after deserializing a document that
/// omits them.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct InternalMetrics {
    /// Cumulative values (e.g. total emissions).
    #[serde(default)]
    pub counters: BTreeMap<String, f64>,
    /// Instantaneous values (e.g. last emission latency).
    #[serde(default)]
    pub gauges: BTreeMap<String, f64>,
    /// Handler-level tags.
    #[serde(default)]
    pub dimensions: BTreeMap<String, String>,
}

impl InternalMetrics {
    /// All three maps present and empty.
    pub fn new() -> Self {
        Self::default()
    }

    /// True when no counter, gauge, or dimension has been recorded.
    pub fn is_empty(&self) -> bool {
        self.counters.is_empty() && self.gauges.is_empty() && self.dimensions.is_empty()
    }
}
