//! Configuration: command-line arguments and the TOML config file.

pub mod args;
pub mod settings;

pub use args::Args;
pub use settings::{Config, GameSettings, LoggingSettings, ServerConfig, ServerSettings};

use anyhow::Result;
use tracing::{info, warn};

/// Load configuration from file or create a default configuration.
///
/// If the file named by `args.config` does not exist, a default config file
/// is written there and the defaults are returned, so a first run leaves a
/// template behind for the operator to edit.
pub async fn load_config(args: &Args) -> Result<Config> {
    if args.config.exists() {
        let config_str = tokio::fs::read_to_string(&args.config).await?;
        match toml::de::from_str::<Config>(&config_str) {
            Ok(config) => Ok(config),
            Err(e) => {
                warn!("failed to parse config file {}: {}", args.config.display(), e);
                Err(e.into())
            }
        }
    } else {
        warn!(
            "configuration file not found: {}, using defaults",
            args.config.display()
        );

        let default_config = Config::default();
        let config_str = toml::to_string_pretty(&default_config)?;
        tokio::fs::write(&args.config, config_str).await?;
        info!("created default configuration file: {}", args.config.display());

        Ok(default_config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[tokio::test]
    async fn load_config_creates_default_file_when_missing() {
        let temp_file = NamedTempFile::new().unwrap();
        let path = temp_file.path().to_path_buf();
        let args = Args {
            config: path.clone(),
            ..Default::default()
        };

        // Delete the file so the loader has to create it.
        drop(temp_file);

        let config = load_config(&args).await.unwrap();
        assert_eq!(config.server.listen_addr, "127.0.0.1:8080");
        assert!(path.exists());
        std::fs::remove_file(path).ok();
    }

    #[tokio::test]
    async fn load_config_reads_existing_file() {
        let mut temp_file = NamedTempFile::new().unwrap();
        let config_content = r#"
[server]
listen_addr = "0.0.0.0:9090"

[game]
reset_delay_ms = 2500

[logging]
level = "debug"
json_format = true
        "#;
        temp_file.write_all(config_content.as_bytes()).unwrap();

        let args = Args {
            config: temp_file.path().to_path_buf(),
            ..Default::default()
        };

        let config = load_config(&args).await.unwrap();
        assert_eq!(config.server.listen_addr, "0.0.0.0:9090");
        assert_eq!(config.game.reset_delay_ms, 2500);
        assert_eq!(config.logging.unwrap().level, "debug");
    }

    #[tokio::test]
    async fn load_config_rejects_malformed_file() {
        let mut temp_file = NamedTempFile::new().unwrap();
        temp_file.write_all(b"[server\nlisten_addr = ").unwrap();

        let args = Args {
            config: temp_file.path().to_path_buf(),
            ..Default::default()
        };

        assert!(load_config(&args).await.is_err());
    }
}
