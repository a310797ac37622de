//! Listener setup and serve loop.
//!
//! axum runs each connection on its own tokio task, so snapshot requests are
//! served concurrently with each other and with handler updates.

use std::net::{Ipv4Addr, SocketAddr};
use std::sync::Arc;

use tokio::net::TcpListener;

use agentmon_core::error::Result;

use crate::app_state::AppState;
use crate::config::InternalServerConfig;
use crate::handler::Handler;
use crate::obs::ProcfsProbe;
use crate::router;

/// Bind `0.0.0.0:<port>`.
pub async fn bind(cfg: &InternalServerConfig) -> Result<TcpListener> {
    let port = cfg.port.number()?;
    let addr = SocketAddr::from((Ipv4Addr::UNSPECIFIED, port));
    let listener = TcpListener::bind(addr).await?;
    tracing::info!(addr = %listener.local_addr()?, "internal server listening");
    Ok(listener)
}

/// Serve `/metrics` on `listener` until the server fails.
pub async fn serve(listener: TcpListener, state: AppState) -> Result<()> {
    let app = router::build_router(state);
    axum::serve(listener, app).await?;
    Ok(())
}

/// Bind from config and serve with the procfs memory probe.
pub async fn run_server(cfg: &InternalServerConfig, handlers: Vec<Arc<dyn Handler>>) -> Result<()> {
    let listener = bind(cfg).await?;
    let state = AppState::new(handlers, Arc::new(ProcfsProbe::default()));
    serve(listener, state).await
}
