//! Core server implementation.
//!
//! `GameServer` owns the listener-facing side: it binds the socket, accepts
//! connections, spawns one handler task per client, and coordinates
//! graceful shutdown. The game itself is the session's business.

use crate::config::ServerConfig;
use crate::connection::handle_connection;
use crate::error::ServerError;
use noughts_session::GameSession;
use std::sync::Arc;
use std::time::Duration;
use tokio::net::TcpListener;
use tokio::sync::watch;
use tracing::{debug, error, info};

/// The WebSocket server for one game session.
pub struct GameServer {
    config: ServerConfig,
    session: Arc<GameSession>,
    shutdown: watch::Sender<bool>,
}

impl GameServer {
    /// Creates a server and its game session from the runtime configuration.
    pub fn new(config: ServerConfig) -> Self {
        let session =
            GameSession::with_reset_delay(Duration::from_millis(config.reset_delay_ms));
        let (shutdown, _) = watch::channel(false);
        Self {
            config,
            session,
            shutdown,
        }
    }

    /// The session this server fronts.
    pub fn session(&self) -> Arc<GameSession> {
        self.session.clone()
    }

    /// Binds the configured address and serves until shutdown.
    pub async fn start(&self) -> Result<(), ServerError> {
        let listener = TcpListener::bind(self.config.bind_address)
            .await
            .map_err(|e| {
                ServerError::Network(format!("failed to bind {}: {e}", self.config.bind_address))
            })?;
        info!("game server listening on {}", self.config.bind_address);
        self.run(listener).await
    }

    /// Serves connections from an already-bound listener until shutdown.
    ///
    /// Split out from [`start`](Self::start) so tests can drive the server
    /// on an ephemeral port.
    pub async fn run(&self, listener: TcpListener) -> Result<(), ServerError> {
        let mut shutdown_rx = self.shutdown.subscribe();
        loop {
            // A shutdown requested before the loop subscribed still counts.
            if *shutdown_rx.borrow() {
                break;
            }
            tokio::select! {
                result = listener.accept() => {
                    match result {
                        Ok((stream, addr)) => {
                            debug!(%addr, "accepted connection");
                            let session = self.session.clone();
                            tokio::spawn(async move {
                                if let Err(e) = handle_connection(stream, addr, session).await {
                                    error!(%addr, "connection error: {e}");
                                }
                            });
                        }
                        Err(e) => {
                            error!("failed to accept connection: {e}");
                        }
                    }
                }
                _ = shutdown_rx.changed() => {
                    info!("shutdown signal received");
                    break;
                }
            }
        }

        // Tear down the session so a pending round reset never fires into
        // a stopped server.
        self.session.shutdown().await;
        info!("server stopped");
        Ok(())
    }

    /// Requests a graceful stop of the accept loop.
    pub fn shutdown(&self) {
        self.shutdown.send_replace(true);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn run_stops_on_shutdown() {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let config = ServerConfig {
            bind_address: listener.local_addr().unwrap(),
            reset_delay_ms: 5000,
        };
        let server = Arc::new(GameServer::new(config));

        let run = server.clone();
        let handle = tokio::spawn(async move { run.run(listener).await });

        server.shutdown();
        handle.await.unwrap().unwrap();
    }

    #[tokio::test]
    async fn shutdown_before_run_is_not_lost() {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let config = ServerConfig {
            bind_address: listener.local_addr().unwrap(),
            reset_delay_ms: 5000,
        };
        let server = GameServer::new(config);

        server.shutdown();
        server.run(listener).await.unwrap();
    }

    #[tokio::test]
    async fn start_fails_when_the_address_is_taken() {
        let occupied = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let config = ServerConfig {
            bind_address: occupied.local_addr().unwrap(),
            reset_delay_ms: 5000,
        };
        let server = GameServer::new(config);
        assert!(matches!(
            server.start().await,
            Err(ServerError::Network(_))
        ));
    }
}
