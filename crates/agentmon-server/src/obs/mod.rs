//! Process self-observation.
//!
//! The memory probe is the only process-wide source for the snapshot; it
//! reads procfs on every call and never caches.

pub mod memory;

pub use memory::{MemoryProbe, MemoryStats, ProcfsProbe};
