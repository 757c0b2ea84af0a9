//! Configuration of the logging backend that redirected streams forward into.
use crate::logging::{ConsoleLogger, FileLogger, Level, LineFormat, Registry, RegistryError};
use crate::redirect::{FILE_LOGGER, SCREEN_LOGGER};
use serde::Deserialize;
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use thiserror::Error;

/// Default log file, relative to the working directory.
pub const DEFAULT_LOGFILE: &str = "logs/streamlog.log";

/// Errors that can occur while loading or installing a configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// Failed to read a configuration file.
    #[error("failed to read config file {path}: {source}")]
    Read {
        path: PathBuf,
        source: std::io::Error,
    },

    /// Failed to parse a JSON configuration file.
    #[error("failed to parse config file {path}: {source}")]
    Parse {
        path: PathBuf,
        source: serde_json::Error,
    },

    /// Failed to open the log file.
    #[error("failed to open log file {path}: {source}")]
    OpenLog {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error(transparent)]
    Registry(#[from] RegistryError),
}

/// Settings for the "console" and "logfile" loggers.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct BackendConfig {
    /// Name shown after the level tag on every line.
    pub app_name: Option<String>,
    /// Where the "logfile" logger writes.
    pub logfile: PathBuf,
    /// Empty the log file on startup instead of appending.
    pub truncate: bool,
    /// Minimum level printed by the "console" logger.
    pub screen_level: Level,
    /// Minimum level written by the "logfile" logger.
    pub file_level: Level,
}

impl Default for BackendConfig {
    fn default() -> Self {
        Self {
            app_name: None,
            logfile: PathBuf::from(DEFAULT_LOGFILE),
            truncate: false,
            screen_level: Level::Debug,
            file_level: Level::Debug,
        }
    }
}

impl BackendConfig {
    /// Loads a configuration from a JSON file. Missing fields take defaults.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Read`] or [`ConfigError::Parse`].
    pub fn from_json_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let text = fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        serde_json::from_str(&text).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })
    }

    fn line_format(&self) -> LineFormat {
        LineFormat::new(self.app_name.clone())
    }

    /// Creates the console and file loggers and registers them under the names
    /// the redirector looks up.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::OpenLog`] if the log file cannot be opened, or
    /// [`ConfigError::Registry`] if either name is already registered. Nothing
    /// is registered on error.
    pub fn install(&self, registry: &Registry) -> Result<(), ConfigError> {
        for name in [SCREEN_LOGGER, FILE_LOGGER] {
            if registry.contains(name) {
                return Err(RegistryError::AlreadyRegistered(name.to_string()).into());
            }
        }

        let file = FileLogger::open(FILE_LOGGER, &self.logfile, self.truncate, self.line_format())
            .map_err(|source| ConfigError::OpenLog {
                path: self.logfile.clone(),
                source,
            })?
            .with_level(self.file_level);
        let screen =
            ConsoleLogger::stdout(SCREEN_LOGGER, self.line_format()).with_level(self.screen_level);

        registry.register(Arc::new(screen))?;
        if let Err(err) = registry.register(Arc::new(file)) {
            registry.remove(SCREEN_LOGGER);
            return Err(err.into());
        }

        tracing::debug!(
            logfile = %self.logfile.display(),
            screen_level = %self.screen_level,
            file_level = %self.file_level,
            "logging backend installed"
        );
        Ok(())
    }
}
