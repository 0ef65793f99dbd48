//! Logging system setup.
//!
//! Initializes the tracing-based logging used throughout the server. The
//! filter honors `RUST_LOG` when set, otherwise the configured level (or
//! "debug" when the `--debug` flag is given).

use crate::config::LoggingSettings;
use anyhow::Result;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

/// Initialize the global tracing subscriber.
///
/// Returns an error if a subscriber was already installed, which only
/// happens when called twice in one process.
pub fn setup_logging(settings: &LoggingSettings, debug: bool) -> Result<()> {
    let level = if debug { "debug" } else { settings.level.as_str() };

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));

    let registry = tracing_subscriber::registry().with(filter);
    if settings.json_format {
        registry.with(fmt::layer().json().with_target(false)).try_init()?;
    } else {
        registry.with(fmt::layer().with_target(false)).try_init()?;
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn setup_logging_installs_a_subscriber_once() {
        let settings = LoggingSettings::default();
        assert!(setup_logging(&settings, false).is_ok());
        // The global subscriber can only be installed once per process.
        assert!(setup_logging(&settings, true).is_err());
    }
}
