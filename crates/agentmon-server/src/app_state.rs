//! Shared state for the snapshot server.
//!
//! The handler list is fixed at construction: request tasks share it
//! read-only and nothing can register or drop a handler afterwards.

use std::sync::Arc;

use agentmon_core::error::Result;

use crate::handler::Handler;
use crate::obs::MemoryProbe;
use crate::snapshot;

#[derive(Clone)]
pub struct AppState {
    inner: Arc<AppStateInner>,
}

struct AppStateInner {
    handlers: Arc<[Arc<dyn Handler>]>,
    probe: Arc<dyn MemoryProbe>,
}

impl AppState {
    pub fn new(handlers: Vec<Arc<dyn Handler>>, probe: Arc<dyn MemoryProbe>) -> Self {
        Self {
            inner: Arc::new(AppStateInner {
                handlers: handlers.into(),
                probe,
            }),
        }
    }

    pub fn handlers(&self) -> &[Arc<dyn Handler>] {
        &self.inner.handlers
    }

    pub fn probe(&self) -> &dyn MemoryProbe {
        self.inner.probe.as_ref()
    }

    /// Build the JSON snapshot for one request.
    pub fn build_response(&self) -> Result<Vec<u8>> {
        snapshot::build_response(self.handlers(), self.probe())
    }
}
