//! Structured logging setup.
//!
//! Installs a global `tracing-subscriber` fmt subscriber from a
//! [`LoggingConfig`]. `RUST_LOG` takes precedence over the configured level.

use crate::config::LoggingConfig;
use crate::error::{constants, ProtocolError, Result};
use once_cell::sync::OnceCell;
use std::fs::OpenOptions;
use std::sync::Mutex;
use tracing_subscriber::fmt::writer::{BoxMakeWriter, MakeWriterExt};
use tracing_subscriber::EnvFilter;

static INSTALLED: OnceCell<()> = OnceCell::new();

/// Install the global subscriber. Calls after the first successful one are no-ops,
/// but a config asking for file output without a path is always rejected.
pub fn init_logging(config: &LoggingConfig) -> Result<()> {
    if config.log_to_file && config.log_file_path.is_none() {
        return Err(ProtocolError::ConfigError(constants::ERR_LOG_FILE_PATH.to_string()));
    }
    INSTALLED.get_or_try_init(|| install(config)).map(|_| ())
}

fn install(config: &LoggingConfig) -> Result<()> {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(config.log_level.to_string().to_lowercase()));

    let writer = if config.log_to_file {
        let path = config
            .log_file_path
            .as_deref()
            .ok_or_else(|| ProtocolError::ConfigError(constants::ERR_LOG_FILE_PATH.to_string()))?;
        let file = OpenOptions::new().create(true).append(true).open(path)?;
        if config.log_to_console {
            BoxMakeWriter::new(std::io::stderr.and(Mutex::new(file)))
        } else {
            BoxMakeWriter::new(Mutex::new(file))
        }
    } else {
        BoxMakeWriter::new(std::io::stderr)
    };

    let builder = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(writer)
        .with_target(false);

    let installed = if config.json_format {
        builder.json().try_init()
    } else {
        builder.try_init()
    };
    installed.map_err(|e| ProtocolError::ConfigError(format!("Failed to install subscriber: {e}")))?;

    tracing::info!(app = %config.app_name, "Logging initialized");
    Ok(())
}
