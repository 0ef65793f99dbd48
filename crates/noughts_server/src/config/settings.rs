//! Configuration settings structures.

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::net::SocketAddr;

/// Root configuration object, serialized to/from TOML.
#[derive(Deserialize, Serialize, Debug, Clone)]
pub struct Config {
    /// Network settings.
    pub server: ServerSettings,
    /// Game session settings.
    pub game: GameSettings,
    /// Optional logging configuration.
    pub logging: Option<LoggingSettings>,
}

/// Network settings.
#[derive(Deserialize, Serialize, Debug, Clone)]
pub struct ServerSettings {
    /// Address to bind the WebSocket listener to, format "IP:PORT".
    pub listen_addr: String,
}

/// Game session settings.
#[derive(Deserialize, Serialize, Debug, Clone)]
pub struct GameSettings {
    /// Pause between the end of a round and the automatic board reset,
    /// in milliseconds.
    pub reset_delay_ms: u64,
}

/// Logging system configuration.
#[derive(Deserialize, Serialize, Debug, Clone)]
pub struct LoggingSettings {
    /// Level filter: "trace", "debug", "info", "warn" or "error".
    pub level: String,
    /// Emit structured JSON logs instead of human-readable output.
    pub json_format: bool,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            server: ServerSettings {
                listen_addr: "127.0.0.1:8080".to_string(),
            },
            game: GameSettings {
                reset_delay_ms: 5000,
            },
            logging: Some(LoggingSettings::default()),
        }
    }
}

impl Default for LoggingSettings {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            json_format: false,
        }
    }
}

/// Validated runtime configuration handed to [`crate::GameServer`].
#[derive(Debug, Clone)]
pub struct ServerConfig {
    /// The socket address to bind the listener to.
    pub bind_address: SocketAddr,
    /// Delay before a finished round resets, in milliseconds.
    pub reset_delay_ms: u64,
}

impl Config {
    /// Parse the file-level settings into the runtime configuration.
    pub fn to_server_config(&self) -> Result<ServerConfig> {
        let bind_address = self
            .server
            .listen_addr
            .parse()
            .with_context(|| format!("invalid listen address: {}", self.server.listen_addr))?;
        Ok(ServerConfig {
            bind_address,
            reset_delay_ms: self.game.reset_delay_ms,
        })
    }
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            bind_address: SocketAddr::from(([127, 0, 0, 1], 8080)),
            reset_delay_ms: 5000,
        }
    }
}
