//! Top-level facade crate for agentmon.
//!
//! Re-exports the core metric types and the snapshot server so users can depend on a single crate.

pub mod core {
    pub use agentmon_core::*;
}

pub mod server {
    pub use agentmon_server::*;
}
