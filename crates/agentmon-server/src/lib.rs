//! agentmon snapshot server library entry.
//!
//! This crate wires the handler capability, the memory probe, the snapshot
//! aggregator, and the HTTP transport together. It is consumed by the binary
//! (`main.rs`) and by integration tests.

pub mod app_state;
pub mod config;
pub mod handler;
pub mod obs;
pub mod ops;
pub mod router;
pub mod server;
pub mod snapshot;

pub use handler::{Handler, MetricsRecorder};
pub use snapshot::{build_response, ResponseFormat};
