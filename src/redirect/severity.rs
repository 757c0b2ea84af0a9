//! Severity choices for a redirected stream and the forwarding they select.
use crate::logging::{Level, Logger};
use std::fmt;
use std::sync::Arc;

/// Bright yellow, used for `info` output on the screen.
pub const YELLOW: &str = "\x1b[93m";
/// Bright red, used for `error` output on the screen.
pub const RED: &str = "\x1b[91m";
/// Resets terminal attributes.
pub const RESET: &str = "\x1b[00m";

/// The severity a redirected stream is logged at.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SeverityLevel {
    Info,
    Debug,
    Error,
}

impl SeverityLevel {
    /// The backend level both loggers are called at.
    pub fn log_level(self) -> Level {
        match self {
            SeverityLevel::Info => Level::Info,
            SeverityLevel::Debug => Level::Debug,
            SeverityLevel::Error => Level::Error,
        }
    }

    /// The escape sequence opening screen output.
    pub fn screen_color(self) -> &'static str {
        match self {
            SeverityLevel::Info => YELLOW,
            SeverityLevel::Debug => RESET,
            SeverityLevel::Error => RED,
        }
    }

    /// Wraps `msg` the way it is shown on the screen logger.
    pub fn wrap(self, msg: &str) -> String {
        wrap_in(self.screen_color(), msg)
    }
}

fn wrap_in(color: &str, msg: &str) -> String {
    format!("{color}{msg}{RESET}")
}

impl fmt::Display for SeverityLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&self.log_level(), f)
    }
}

/// The forwarding behaviour of one redirector, fixed when it is built.
///
/// The level and colour are resolved from the [`SeverityLevel`] once, so a
/// flush only formats and dispatches.
pub(crate) struct Forwarder {
    level: Level,
    color: &'static str,
    screen: Arc<dyn Logger>,
    file: Arc<dyn Logger>,
}

impl Forwarder {
    pub(crate) fn new(
        severity: SeverityLevel,
        screen: Arc<dyn Logger>,
        file: Arc<dyn Logger>,
    ) -> Self {
        Self {
            level: severity.log_level(),
            color: severity.screen_color(),
            screen,
            file,
        }
    }

    /// Sends `msg` colour-wrapped to the screen logger and verbatim to the
    /// file logger.
    pub(crate) fn forward(&self, msg: &str) {
        let wrapped = wrap_in(self.color, msg);
        self.screen.log(self.level, &wrapped);
        self.file.log(self.level, msg);
    }
}
