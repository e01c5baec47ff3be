//! File-backed `tracing` setup.
//!
//! The terminal belongs to the scene, so log output only ever goes to the
//! file named in `[logging]`. Without one no subscriber is installed.

use std::{fs::OpenOptions, path::PathBuf, sync::Mutex};

use thiserror::Error;
use tracing_subscriber::EnvFilter;

use crate::config::LoggingSettings;

#[derive(Debug, Error)]
pub enum LoggingError {
    #[error("failed to open log file {path}: {source}")]
    Open {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("failed to install log subscriber: {0}")]
    Install(String),
}

/// Install the global subscriber. Returns whether logging is active.
pub fn init(settings: &LoggingSettings) -> Result<bool, LoggingError> {
    let Some(path) = settings.file.as_ref() else {
        return Ok(false);
    };

    let file = OpenOptions::new()
        .create(true)
        .append(true)
        .open(path)
        .map_err(|source| LoggingError::Open {
            path: path.clone(),
            source,
        })?;

    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(settings.level.as_str()));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(Mutex::new(file))
        .with_ansi(false)
        .try_init()
        .map_err(|e| LoggingError::Install(e.to_string()))?;

    Ok(true)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn no_file_means_no_subscriber() {
        let settings = LoggingSettings::default();
        assert!(!init(&settings).unwrap());
    }

    #[test]
    fn unopenable_file_is_reported() {
        let dir = tempfile::tempdir().unwrap();
        let settings = LoggingSettings {
            file: Some(dir.path().join("missing").join("lofi.log")),
            level: "debug".into(),
        };
        assert!(matches!(init(&settings), Err(LoggingError::Open { .. })));
    }
}
