//! This module provides a logger that hands messages over to `tracing`, so
//! redirected output can flow into whatever subscriber the program installed.
use super::logger::{LevelCell, Logger};
use super::Level;

/// Re-emits each accepted message as a `tracing` event.
///
/// Events carry the target `streamlog::sink` and a `logger` field holding the
/// logger's name.
pub struct TracingLogger {
    name: String,
    level: LevelCell,
}

impl TracingLogger {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            level: LevelCell::new(Level::Trace),
        }
    }
}

impl Logger for TracingLogger {
    fn name(&self) -> &str {
        &self.name
    }

    fn level(&self) -> Level {
        self.level.get()
    }

    fn set_level(&self, level: Level) {
        self.level.set(level);
    }

    fn log(&self, level: Level, msg: &str) {
        if !self.should_log(level) {
            return;
        }
        let logger = self.name.as_str();
        match level {
            Level::Trace => tracing::trace!(target: "streamlog::sink", logger, "{}", msg),
            Level::Debug => tracing::debug!(target: "streamlog::sink", logger, "{}", msg),
            Level::Info => tracing::info!(target: "streamlog::sink", logger, "{}", msg),
            Level::Warn => tracing::warn!(target: "streamlog::sink", logger, "{}", msg),
            Level::Error => tracing::error!(target: "streamlog::sink", logger, "{}", msg),
        }
    }
}
