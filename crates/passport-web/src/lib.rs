//! # Passport Web
//!
//! HTTP surface for the passport pipeline: one endpoint per stage, a
//! server-side aggregate at `/api/profile`, and static assets for everything
//! else. All API responses are JSON; failures are `{error}` with the status
//! of the stage's error kind.

pub mod cli;
pub mod error;
pub mod handlers;
pub mod logging;
pub mod router;
pub mod state;

use std::net::SocketAddr;
use std::path::Path;
use std::sync::Arc;

use passport_core::{HttpClient, ReqwestHttpClient, UpstreamClient, UpstreamConfig};
use tracing::{info, warn};

pub use error::{ApiError, ServerError};
pub use router::create_router;
pub use state::AppState;

/// Builds the router over a caller-supplied transport.
pub fn app(http: Arc<dyn HttpClient>, config: UpstreamConfig, static_dir: &Path) -> axum::Router {
    let client = UpstreamClient::new(http, Arc::new(config));
    create_router(AppState::new(client), static_dir)
}

/// Binds `addr` and serves until Ctrl-C.
pub async fn serve(
    addr: SocketAddr,
    static_dir: &Path,
    config: UpstreamConfig,
) -> Result<(), ServerError> {
    let router = app(Arc::new(ReqwestHttpClient::new()), config, static_dir);

    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .map_err(|source| ServerError::Bind { addr, source })?;
    info!(%addr, static_dir = %static_dir.display(), "passport listening");

    axum::serve(listener, router)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    info!("passport stopped");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(error) = tokio::signal::ctrl_c().await {
        warn!(error = %error, "failed to listen for shutdown signal");
        std::future::pending::<()>().await;
    }
}
