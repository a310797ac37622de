//! agentmon snapshot server.
//!
//! Usage: `agentmon-server [config.yaml]` (default `agentmon.yaml`).
//! Serves `GET /metrics` with process memory statistics. Handlers are
//! registered by the embedding agent through the library; this binary runs
//! with none.

use std::process::ExitCode;

use tracing_subscriber::{fmt, EnvFilter};

use agentmon_server::{config, server};

#[tokio::main]
async fn main() -> ExitCode {
    fmt().with_env_filter(EnvFilter::from_default_env()).init();

    let path = std::env::args().nth(1).unwrap_or_else(|| "agentmon.yaml".into());
    let cfg = match config::load_from_file(&path) {
        Ok(cfg) => cfg,
        Err(e) => {
            tracing::error!(code = e.code().as_str(), error = %e, path = %path, "config load failed");
            return ExitCode::FAILURE;
        }
    };

    tracing::info!(port = %cfg.internal_server.port, "agentmon-server starting");
    if let Err(e) = server::run_server(&cfg.internal_server, Vec::new()).await {
        tracing::error!(code = e.code().as_str(), error = %e, "server failed");
        return ExitCode::FAILURE;
    }
    ExitCode::SUCCESS
}
