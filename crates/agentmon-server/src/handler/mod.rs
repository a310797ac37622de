//! Handler capability seen by the snapshot server.
//!
//! A handler forwards metrics to some backend (outside this crate) and keeps
//! operational metrics about itself. The server only ever asks for its name
//! and a copy of those metrics.

pub mod recorder;

use agentmon_core::InternalMetrics;

pub use recorder::MetricsRecorder;

/// Anything that can be listed in the snapshot.
///
/// `internal_metrics` is called from request tasks while the handler keeps
/// updating its own state, so implementations must hand out a consistent copy
/// without data races (e.g. by reading through a `MetricsRecorder`).
pub trait Handler: Send + Sync {
    fn name(&self) -> &str;
    fn internal_metrics(&self) -> InternalMetrics;
}
