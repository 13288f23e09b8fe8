//! Termination signal handling for graceful shutdown.

use tracing::{info, warn};

/// Resolves once SIGINT or SIGTERM is received (Ctrl+C on non-Unix
/// platforms). Used with `axum::serve(..).with_graceful_shutdown`, so the
/// listener stops accepting and in-flight requests drain before return.
pub async fn shutdown_signal() {
    #[cfg(unix)]
    {
        use tokio::signal::unix::{signal, SignalKind};

        match (
            signal(SignalKind::interrupt()),
            signal(SignalKind::terminate()),
        ) {
            (Ok(mut sigint), Ok(mut sigterm)) => {
                tokio::select! {
                    _ = sigint.recv() => info!("SIGINT received, shutting down"),
                    _ = sigterm.recv() => info!("SIGTERM received, shutting down"),
                }
            }
            _ => {
                warn!("Could not install Unix signal handlers, falling back to Ctrl+C");
                ctrl_c().await;
            }
        }
    }

    #[cfg(not(unix))]
    ctrl_c().await;
}

async fn ctrl_c() {
    match tokio::signal::ctrl_c().await {
        Ok(()) => info!("Ctrl+C received, shutting down"),
        Err(e) => {
            // Without a handler the server can only be stopped by killing it.
            warn!(error = %e, "Failed to listen for Ctrl+C");
            std::future::pending::<()>().await;
        }
    }
}
