//! Metric value object.
//!
//! A `Metric` owns the sanitization contract: its name and every dimension
//! key/value are sanitized on the way in, so nothing stored ever contains a
//! reserved character. Lookups accept raw keys and sanitize them the same way.

mod internal;
mod sanitizer;

use std::collections::HashMap;
use std::fmt;

use serde::{Deserialize, Serialize};

pub use internal::InternalMetrics;
pub use sanitizer::{sanitize, RESERVED, REPLACEMENT};

/// How downstream stores should interpret a metric's value.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum MetricType {
    /// Point-in-time value.
    #[default]
    #[serde(rename = "gauge")]
    Gauge,
    /// Delta since the previous report.
    #[serde(rename = "counter")]
    Counter,
    /// Monotonic total since process start.
    #[serde(rename = "cumcounter")]
    CumulativeCounter,
}

impl MetricType {
    /// Wire name used in JSON and by downstream stores.
    pub fn as_str(self) -> &'static str {
        match self {
            MetricType::Gauge => "gauge",
            MetricType::Counter => "counter",
            MetricType::CumulativeCounter => "cumcounter",
        }
    }
}

impl fmt::Display for MetricType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One named, typed, dimensioned measurement.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(from = "RawMetric")]
pub struct Metric {
    pub name: String,
    #[serde(rename = "type")]
    pub metric_type: MetricType,
    pub value: f64,
    pub dimensions: HashMap<String, String>,
}

impl Metric {
    /// Gauge named `sanitize(name)` with value 0.0 and no dimensions.
    pub fn new(name: &str) -> Self {
        Self {
            name: sanitize(name),
            metric_type: MetricType::Gauge,
            value: 0.0,
            dimensions: HashMap::new(),
        }
    }

    /// Like `new`, with an initial value.
    pub fn with_value(name: &str, value: f64) -> Self {
        let mut m = Self::new(name);
        m.value = value;
        m
    }

    /// Replace the value; name and dimensions are untouched.
    pub fn set_value(&mut self, value: f64) {
        self.value = value;
    }

    /// Store `sanitize(value)` under `sanitize(name)`, replacing any previous value.
    ///
    /// Raw names that sanitize to the same key overwrite each other.
    pub fn add_dimension(&mut self, name: &str, value: &str) {
        self.dimensions.insert(sanitize(name), sanitize(value));
    }

    /// `add_dimension` for every entry of `dims`.
    pub fn add_dimensions(&mut self, dims: &HashMap<String, String>) {
        for (k, v) in dims {
            self.add_dimension(k, v);
        }
    }

    /// Look up a dimension, falling back to `defaults`.
    ///
    /// Own dimensions are searched with the sanitized key. `defaults` are
    /// searched with `name` exactly as given: callers keep them pre-sanitized.
    pub fn get_dimension_value(
        &self,
        name: &str,
        defaults: &HashMap<String, String>,
    ) -> Option<String> {
        self.dimensions
            .get(&sanitize(name))
            .or_else(|| defaults.get(name))
            .cloned()
    }

    /// `defaults` merged with this metric's dimensions; own entries win.
    pub fn get_dimensions(&self, defaults: &HashMap<String, String>) -> HashMap<String, String> {
        let mut merged = defaults.clone();
        merged.extend(self.dimensions.iter().map(|(k, v)| (k.clone(), v.clone())));
        merged
    }
}

/// Add every entry of `dims` to every metric in `metrics`.
pub fn add_to_all(metrics: &mut [Metric], dims: &HashMap<String, String>) {
    for m in metrics.iter_mut() {
        m.add_dimensions(dims);
    }
}

// Decoded metrics go back through the sanitizing constructors.
#[derive(Deserialize)]
struct RawMetric {
    name: String,
    #[serde(default, rename = "type")]
    metric_type: MetricType,
    #[serde(default)]
    value: f64,
    #[serde(default)]
    dimensions: HashMap<String, String>,
}

impl From<RawMetric> for Metric {
    fn from(raw: RawMetric) -> Self {
        let mut m = Metric::with_value(&raw.name, raw.value);
        m.metric_type = raw.metric_type;
        m.add_dimensions(&raw.dimensions);
        m
    }
}
