//! HTTP server lifecycle: bind, spawn the axum server, and hand back a
//! handle with a shutdown channel.

use std::net::SocketAddr;
use std::sync::Arc;

use axum::Router;
use tokio::sync::oneshot;

use crate::api::router::register_router;
use crate::auth::AdminAuth;
use crate::store::DocumentStore;

#[derive(Debug, thiserror::Error)]
pub enum ServerError {
    #[error("Failed to bind {addr}: {source}")]
    Bind {
        addr: SocketAddr,
        source: std::io::Error,
    },
    #[error("Server error: {0}")]
    Io(#[from] std::io::Error),
}

/// Handle to a running register server.
pub struct RegisterServer {
    pub addr: SocketAddr,
    shutdown_tx: Option<oneshot::Sender<()>>,
}

impl RegisterServer {
    /// Shut down the server gracefully.
    pub fn shutdown(&mut self) {
        if let Some(tx) = self.shutdown_tx.take() {
            let _ = tx.send(());
            tracing::info!("Register server shutdown signal sent");
        }
    }
}

async fn bind(addr: SocketAddr) -> Result<tokio::net::TcpListener, ServerError> {
    tokio::net::TcpListener::bind(addr)
        .await
        .map_err(|source| ServerError::Bind { addr, source })
}

fn app(store: Arc<dyn DocumentStore>, auth: AdminAuth) -> Router {
    register_router(store, auth)
}

/// Start the server on `addr` (port 0 picks an ephemeral port) in a
/// background task.
pub async fn start_server_on(
    store: Arc<dyn DocumentStore>,
    auth: AdminAuth,
    addr: SocketAddr,
) -> Result<RegisterServer, ServerError> {
    let listener = bind(addr).await?;
    let addr = listener.local_addr()?;
    let app = app(store, auth);

    let (shutdown_tx, shutdown_rx) = oneshot::channel::<()>();

    tokio::spawn(async move {
        let shutdown_signal = async move {
            let _ = shutdown_rx.await;
            tracing::info!("Register server received shutdown signal");
        };

        tracing::info!(%addr, "Register server started");

        if let Err(e) = axum::serve(listener, app)
            .with_graceful_shutdown(shutdown_signal)
            .await
        {
            tracing::error!("Register server error: {e}");
        }

        tracing::info!("Register server stopped");
    });

    Ok(RegisterServer {
        addr,
        shutdown_tx: Some(shutdown_tx),
    })
}

/// Serve in the foreground until Ctrl-C.
pub async fn serve(
    store: Arc<dyn DocumentStore>,
    auth: AdminAuth,
    addr: SocketAddr,
) -> Result<(), ServerError> {
    let listener = bind(addr).await?;
    tracing::info!(addr = %listener.local_addr()?, "Register server listening");

    axum::serve(listener, app(store, auth))
        .with_graceful_shutdown(async {
            if let Err(e) = tokio::signal::ctrl_c().await {
                tracing::error!("Failed to listen for shutdown signal: {e}");
            }
            tracing::info!("Shutdown requested");
        })
        .await?;

    tracing::info!("Register server stopped");
    Ok(())
}
