//! Signal handling for graceful shutdown.

/// Wait for a shutdown signal (Ctrl+C).
pub async fn wait_for_signal() {
    tokio::signal::ctrl_c()
        .await
        .expect("Failed to install Ctrl+C handler");
    tracing::info!("Shutdown signal received");
}
