//! Routing `tracing` events to a log file
use crate::config::Config;
use std::path::{Path, PathBuf};
use std::sync::Mutex;
use thiserror::Error;
use tracing_subscriber::EnvFilter;

/// Environment variable for overriding which events get logged
pub(crate) const LOG_ENV_VAR: &str = "SNAKE_ODYSSEY_LOG";

const DEFAULT_FILTER: &str = "snake_odyssey=info";

/// Install a global subscriber that appends log lines to the configured log
/// file.  If logging is disabled in the configuration, nothing is installed.
pub(crate) fn init(config: &Config) -> Result<(), LoggingError> {
    let Some(path) = config.log_file() else {
        return Ok(());
    };
    let file = open_log(&path)?;
    let filter =
        EnvFilter::try_from_env(LOG_ENV_VAR).unwrap_or_else(|_| EnvFilter::new(DEFAULT_FILTER));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_ansi(false)
        .with_writer(Mutex::new(file))
        .try_init()
        .map_err(|source| LoggingError::Install { source })
}

fn open_log(path: &Path) -> Result<fs_err::File, LoggingError> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs_err::create_dir_all(parent).map_err(|source| LoggingError::Open {
            path: path.to_owned(),
            source,
        })?;
    }
    fs_err::OpenOptions::new()
        .create(true)
        .append(true)
        .open(path)
        .map_err(|source| LoggingError::Open {
            path: path.to_owned(),
            source,
        })
}

#[derive(Debug, Error)]
pub(crate) enum LoggingError {
    #[error("failed to open log file {}", .path.display())]
    Open {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("failed to install log subscriber")]
    Install {
        source: Box<dyn std::error::Error + Send + Sync + 'static>,
    },
}
