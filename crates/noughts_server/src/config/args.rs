//! Command-line argument parsing.

use clap::Parser;
use std::path::PathBuf;

/// Command-line arguments for the noughts server.
///
/// Arguments override the corresponding configuration file settings.
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
pub struct Args {
    /// Configuration file path.
    ///
    /// If the file doesn't exist, a default configuration will be created.
    #[arg(short, long, default_value = "config.toml")]
    pub config: PathBuf,

    /// Listen address override, format "IP:PORT" (e.g. "0.0.0.0:8080").
    #[arg(short, long)]
    pub listen: Option<String>,

    /// Enable debug logging.
    #[arg(short, long)]
    pub debug: bool,
}

impl Default for Args {
    fn default() -> Self {
        Self {
            config: PathBuf::from("config.toml"),
            listen: None,
            debug: false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn args_default() {
        let args = Args::default();
        assert_eq!(args.config, PathBuf::from("config.toml"));
        assert!(args.listen.is_none());
        assert!(!args.debug);
    }
}
