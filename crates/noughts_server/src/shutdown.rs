//! Graceful shutdown handling.
//!
//! Cross-platform signal handling: the returned receiver resolves once a
//! termination signal arrives, at which point the caller stops the server.

use tokio::sync::oneshot;
use tracing::info;

/// Set up a shutdown signal handler.
///
/// # Platform support
/// * Unix: SIGINT (Ctrl+C) and SIGTERM
/// * Windows: Ctrl+C events
pub async fn setup_shutdown_handler() -> oneshot::Receiver<()> {
    let (tx, rx) = oneshot::channel();

    tokio::spawn(async move {
        #[cfg(unix)]
        {
            use tokio::signal::unix::{signal, SignalKind};

            let mut sigint =
                signal(SignalKind::interrupt()).expect("failed to create SIGINT handler");
            let mut sigterm =
                signal(SignalKind::terminate()).expect("failed to create SIGTERM handler");

            tokio::select! {
                _ = sigint.recv() => {
                    info!("SIGINT received - initiating graceful shutdown");
                }
                _ = sigterm.recv() => {
                    info!("SIGTERM received - initiating graceful shutdown");
                }
            }
        }

        #[cfg(windows)]
        {
            use tokio::signal::windows::ctrl_c;

            let mut ctrl_c = ctrl_c().expect("failed to create Ctrl+C handler");
            ctrl_c.recv().await;
            info!("Ctrl+C received - initiating graceful shutdown");
        }

        let _ = tx.send(());
    });

    rx
}
