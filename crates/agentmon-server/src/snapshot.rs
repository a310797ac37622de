//! Snapshot aggregation.
//!
//! Every call reads the probe and every handler from scratch; nothing is
//! cached between requests.

use std::collections::BTreeMap;
use std::sync::Arc;

use serde::{ser::Error as _, Deserialize, Serialize};

use agentmon_core::error::{AgentError, Result};
use agentmon_core::InternalMetrics;

use crate::handler::Handler;
use crate::obs::MemoryProbe;

/// Body of `GET /metrics`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ResponseFormat {
    pub memory: InternalMetrics,
    #[serde(default)]
    pub handlers: BTreeMap<String, InternalMetrics>,
}

/// Assemble the snapshot. Handlers sharing a name: the later one wins.
pub fn collect(handlers: &[Arc<dyn Handler>], probe: &dyn MemoryProbe) -> ResponseFormat {
    let memory = probe.sample().to_internal_metrics();
    let handlers = handlers
        .iter()
        .map(|h| (h.name().to_string(), h.internal_metrics()))
        .collect();
    ResponseFormat { memory, handlers }
}

/// First counter or gauge that JSON cannot carry as a number, as `(section, name)`.
fn find_non_finite(rsp: &ResponseFormat) -> Option<(&str, &str)> {
    std::iter::once(("memory", &rsp.memory))
        .chain(rsp.handlers.iter().map(|(k, m)| (k.as_str(), m)))
        .find_map(|(section, m)| {
            m.counters
                .iter()
                .chain(m.gauges.iter())
                .find(|(_, v)| !v.is_finite())
                .map(|(name, _)| (section, name.as_str()))
        })
}

/// Assemble and encode the snapshot as JSON.
///
/// NaN and infinities have no JSON encoding and fail the build. An encoding
/// failure fails this call only; no partial body is returned.
pub fn build_response(handlers: &[Arc<dyn Handler>], probe: &dyn MemoryProbe) -> Result<Vec<u8>> {
    let rsp = collect(handlers, probe);
    if let Some((section, name)) = find_non_finite(&rsp) {
        return Err(AgentError::Serialize(serde_json::Error::custom(format!(
            "non-finite value for {section}/{name}"
        ))));
    }
    let body = serde_json::to_vec(&rsp)?;
    tracing::debug!(handlers = rsp.handlers.len(), bytes = body.len(), "snapshot built");
    Ok(body)
}
