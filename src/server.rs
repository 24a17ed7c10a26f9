use std::net::SocketAddr;

use anyhow::Context;
use axum::Router;
use tokio::net::TcpListener;

/// Bind `addr` and serve `router` until Ctrl-C
pub async fn serve(router: Router, addr: SocketAddr) -> anyhow::Result<()> {
    let listener = TcpListener::bind(addr)
        .await
        .with_context(|| format!("failed to bind {}", addr))?;

    serve_listener(router, listener).await
}

/// Serve on an already-bound listener
pub async fn serve_listener(router: Router, listener: TcpListener) -> anyhow::Result<()> {
    let local_addr = listener.local_addr().context("listener has no local address")?;
    tracing::info!("Pocket Code API listening on http://{}", local_addr);

    axum::serve(listener, router)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("server terminated unexpectedly")
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!("Failed to listen for shutdown signal: {}", e);
        // Without a signal handler, keep serving rather than exit immediately
        std::future::pending::<()>().await;
    }
    tracing::info!("Shutdown signal received, draining connections");
}
