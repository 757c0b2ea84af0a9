//! A logger that prints formatted lines to the terminal, colouring the level
//! tag the way colour console sinks usually do.
use super::logger::{LevelCell, LineFormat, Logger};
use super::Level;
use chrono::Local;
use colored::{ColoredString, Colorize};
use std::io::{self, IsTerminal, Write};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Mutex, PoisonError};

/// Writes every accepted message as one formatted line.
pub struct ConsoleLogger {
    name: String,
    level: LevelCell,
    format: LineFormat,
    colors: bool,
    out: Mutex<Box<dyn Write + Send>>,
    /// Set after the first write failure so it is only reported once.
    failed: AtomicBool,
}

impl ConsoleLogger {
    /// Creates a logger printing to stdout. Colours are enabled when stdout is
    /// a terminal.
    pub fn stdout(name: impl Into<String>, format: LineFormat) -> Self {
        let colors = io::stdout().is_terminal();
        Self::with_writer(name, Box::new(io::stdout()), format).with_colors(colors)
    }

    /// Creates a logger printing to stderr.
    pub fn stderr(name: impl Into<String>, format: LineFormat) -> Self {
        let colors = io::stderr().is_terminal();
        Self::with_writer(name, Box::new(io::stderr()), format).with_colors(colors)
    }

    /// Creates a logger printing to an arbitrary writer, without colours.
    pub fn with_writer(
        name: impl Into<String>,
        out: Box<dyn Write + Send>,
        format: LineFormat,
    ) -> Self {
        Self {
            name: name.into(),
            level: LevelCell::new(Level::Info),
            format,
            colors: false,
            out: Mutex::new(out),
            failed: AtomicBool::new(false),
        }
    }

    pub fn with_colors(mut self, colors: bool) -> Self {
        self.colors = colors;
        self
    }

    pub fn with_level(self, level: Level) -> Self {
        self.level.set(level);
        self
    }

    fn styled_tag(&self, level: Level) -> String {
        let tag = level.short_tag().to_string();
        if !self.colors {
            return tag;
        }
        let tag = tag.as_str();
        let styled: ColoredString = match level {
            Level::Trace => tag.white(),
            Level::Debug => tag.cyan(),
            Level::Info => tag.green(),
            Level::Warn => tag.yellow().bold(),
            Level::Error => tag.red().bold(),
        };
        styled.to_string()
    }

    fn report_failure(&self, err: &io::Error) {
        if !self.failed.swap(true, Ordering::Relaxed) {
            tracing::warn!(logger = %self.name, error = %err, "console logger write failed");
        }
    }
}

impl Logger for ConsoleLogger {
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
        let line = self.format.render(Local::now(), &self.styled_tag(level), msg);
        let mut out = self.out.lock().unwrap_or_else(PoisonError::into_inner);
        if let Err(err) = out.write_all(line.as_bytes()).and_then(|()| out.flush()) {
            drop(out);
            self.report_failure(&err);
        }
    }

    fn flush(&self) {
        let mut out = self.out.lock().unwrap_or_else(PoisonError::into_inner);
        if let Err(err) = out.flush() {
            drop(out);
            self.report_failure(&err);
        }
    }
}
