//! agentmon core: metric identity, sanitization, and the internal-metrics shape.
//!
//! This crate defines the value types shared by the snapshot server and by
//! handler implementations. It carries no transport or runtime dependencies
//! so handlers can depend on it without pulling in the HTTP stack.
//!
//! # Defensive guarantees
//! Panics, `unwrap`, and `expect` are compile-denied here
//! (`#![deny(clippy::panic, clippy::unwrap_used, clippy::expect_used)]`).
//! Fallible paths surface as `AgentError`/`Result`.

#![deny(clippy::unwrap_used)]
#![deny(clippy::expect_used)]
#![deny(clippy::panic)]

pub mod error;
pub mod metric;

/// Shared result type.
pub use error::{AgentError, Result};
pub use metric::{add_to_all, sanitize, InternalMetrics, Metric, MetricType};
