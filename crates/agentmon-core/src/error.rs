//! Shared error type across agentmon crates.

use thiserror::Error;

/// Stable error codes, used in JSON error bodies and startup logs.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCode {
    /// Missing or invalid configuration.
    BadConfig,
    /// Unsupported config version.
    UnsupportedVersion,
    /// Snapshot could not be encoded.
    Serialize,
    /// Socket or file I/O failed.
    Io,
    /// Internal error.
    Internal,
}

impl ErrorCode {
    /// String representation used in JSON responses.
    pub fn as_str(self) -> &'static str {
        match self {
            ErrorCode::BadConfig => "BAD_CONFIG",
            ErrorCode::UnsupportedVersion => "UNSUPPORTED_VERSION",
            ErrorCode::Serialize => "SERIALIZE",
            ErrorCode::Io => "IO",
            ErrorCode::Internal => "INTERNAL",
        }
    }
}

/// Shared result type.
pub type Result<T> = std::result::Result<T, AgentError>;

/// Unified error type used by core and server.
#[derive(Debug, Error)]
pub enum AgentError {
    #[error("bad config: {0}")]
    BadConfig(String),
    #[error("unsupported config version: {0}")]
    UnsupportedVersion(u32),
    #[error("serialize: {0}")]
    Serialize(#[from] serde_json::Error),
    #[error("io: {0}")]
    Io(#[from] std::io::Error),
    #[error("internal: {0}")]
    Internal(String),
}

impl AgentError {
    /// Map an error to its stable code.
    pub fn code(&self) -> ErrorCode {
        match self {
            AgentError::BadConfig(_) => ErrorCode::BadConfig,
            AgentError::UnsupportedVersion(_) => ErrorCode::UnsupportedVersion,
            AgentError::Serialize(_) => ErrorCode::Serialize,
            AgentError::Io(_) => ErrorCode::Io,
            AgentError::Internal(_) => ErrorCode::Internal,
        }
    }
}
