//! Main application entry point for the noughts server.
//!
//! Parses arguments, loads configuration, initializes logging, and runs the
//! WebSocket server until a termination signal arrives.

use anyhow::Result;
use clap::Parser;
use noughts_server::config::{load_config, Args};
use noughts_server::logging::setup_logging;
use noughts_server::shutdown::setup_shutdown_handler;
use noughts_server::GameServer;
use std::sync::Arc;
use tracing::{error, info};

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();

    let mut config = load_config(&args).await?;
    if let Some(listen) = &args.listen {
        config.server.listen_addr = listen.clone();
    }

    let logging = config.logging.clone().unwrap_or_default();
    setup_logging(&logging, args.debug)?;

    info!("starting noughts server");
    info!("  listen address: {}", config.server.listen_addr);
    info!("  round reset delay: {}ms", config.game.reset_delay_ms);

    let server = Arc::new(GameServer::new(config.to_server_config()?));

    let mut server_task = {
        let server = server.clone();
        tokio::spawn(async move { server.start().await })
    };

    let shutdown_rx = setup_shutdown_handler().await;

    // Run until a termination signal arrives or the server fails on its own
    // (for example when the listen address is already taken).
    tokio::select! {
        _ = shutdown_rx => {
            server.shutdown();
            server_task.await??;
            info!("server exited cleanly");
        }
        result = &mut server_task => {
            result.map_err(|e| {
                error!("server task failed: {e}");
                e
            })??;
        }
    }

    Ok(())
}
