//! This module defines the `Logger` trait shared by every sink of the backend,
//! together with the line format used by the text-producing loggers.
use super::Level;
use chrono::{DateTime, Local};
use std::borrow::Cow;
use std::sync::{Mutex, PoisonError};

/// A named, levelled logging sink.
///
/// Loggers are shared behind `Arc<dyn Logger>` between the registry and any
/// number of producers, so implementations guard their own mutable state.
pub trait Logger: Send + Sync {
    /// The name the logger is registered under.
    fn name(&self) -> &str;

    /// The minimum level this logger accepts.
    fn level(&self) -> Level;

    /// Changes the minimum level this logger accepts.
    fn set_level(&self, level: Level);

    /// Records `msg` at `level`. Messages below [`Logger::level`] are dropped.
    fn log(&self, level: Level, msg: &str);

    /// Pushes any buffered output to its destination.
    fn flush(&self) {}

    fn should_log(&self, level: Level) -> bool {
        level >= self.level()
    }

    fn trace(&self, msg: &str) {
        self.log(Level::Trace, msg);
    }

    fn debug(&self, msg: &str) {
        self.log(Level::Debug, msg);
    }

    fn info(&self, msg: &str) {
        self.log(Level::Info, msg);
    }

    fn warn(&self, msg: &str) {
        self.log(Level::Warn, msg);
    }

    fn error(&self, msg: &str) {
        self.log(Level::Error, msg);
    }
}

/// Minimum-level filter shared by the concrete loggers.
#[derive(Debug)]
pub(crate) struct LevelCell(Mutex<Level>);

impl LevelCell {
    pub(crate) fn new(level: Level) -> Self {
        Self(Mutex::new(level))
    }

    pub(crate) fn get(&self) -> Level {
        *self.0.lock().unwrap_or_else(PoisonError::into_inner)
    }

    pub(crate) fn set(&self, level: Level) {
        *self.0.lock().unwrap_or_else(PoisonError::into_inner) = level;
    }
}

/// Renders lines as `[HH:MM:SS.mmm] L: app: message`.
///
/// The application segment is omitted when no app name is configured. A single
/// trailing line terminator on the message is dropped, since every rendered
/// line already ends with one. A terminator sitting just before a closing SGR
/// escape (`text\n\x1b[00m`) is dropped too, keeping the escape.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LineFormat {
    app_name: Option<String>,
}

impl LineFormat {
    pub fn new(app_name: Option<String>) -> Self {
        Self { app_name }
    }

    pub fn app_name(&self) -> Option<&str> {
        self.app_name.as_deref()
    }

    /// Renders one line. `tag` is the already-styled level tag.
    pub fn render(&self, timestamp: DateTime<Local>, tag: &str, msg: &str) -> String {
        let body = strip_line_end(msg);
        let time = timestamp.format("%H:%M:%S%.3f");
        match &self.app_name {
            Some(app) => format!("[{time}] {tag}: {app}: {body}\n"),
            None => format!("[{time}] {tag}: {body}\n"),
        }
    }
}

fn strip_newline(text: &str) -> Option<&str> {
    text.strip_suffix("\r\n")
        .or_else(|| text.strip_suffix('\n'))
}

/// True for a complete SGR sequence such as `\x1b[00m` or `\x1b[1;31m`.
fn is_sgr(seq: &str) -> bool {
    seq.strip_prefix("\x1b[")
        .and_then(|rest| rest.strip_suffix('m'))
        .is_some_and(|params| params.bytes().all(|b| b.is_ascii_digit() || b == b';'))
}

fn strip_line_end(msg: &str) -> Cow<'_, str> {
    if let Some(body) = strip_newline(msg) {
        return Cow::Borrowed(body);
    }
    if let Some(start) = msg.rfind('\x1b') {
        let (text, seq) = msg.split_at(start);
        if is_sgr(seq) {
            if let Some(body) = strip_newline(text) {
                return Cow::Owned(format!("{body}{seq}"));
            }
        }
    }
    Cow::Borrowed(msg)
}
