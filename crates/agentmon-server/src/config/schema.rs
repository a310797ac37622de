use std::fmt;

use serde::Deserialize;

use agentmon_core::error::{AgentError, Result};

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct AgentConfig {
    pub version: u32,

    pub internal_server: InternalServerConfig,
}

impl AgentConfig {
    pub fn validate(&self) -> Result<()> {
        if self.version != 1 {
            return Err(AgentError::UnsupportedVersion(self.version));
        }
        self.internal_server.validate()?;
        Ok(())
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct InternalServerConfig {
    pub port: Port,
}

impl InternalServerConfig {
    pub fn validate(&self) -> Result<()> {
        self.port.number().map(|_| ())
    }
}

/// Listening port, written either as a YAML integer or a string.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(untagged)]
pub enum Port {
    Number(u64),
    Text(String),
}

impl Port {
    /// Resolve to a TCP port. `0` asks the OS for a free one.
    pub fn number(&self) -> Result<u16> {
        let n = match self {
            Port::Number(n) => *n,
            Port::Text(s) => s.trim().parse::<u64>().map_err(|_| {
                AgentError::BadConfig(format!("internal_server.port is not a number: {s:?}"))
            })?,
        };
        u16::try_from(n).map_err(|_| {
            AgentError::BadConfig(format!("internal_server.port out of range: {n}"))
        })
    }
}

impl fmt::Display for Port {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Port::Number(n) => write!(f, "{n}"),
            Port::Text(s) => f.write_str(s),
        }
    }
}
