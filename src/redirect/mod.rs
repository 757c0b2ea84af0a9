//! This module redirects an output stream into the logging backend.
//!
//! A [`StreamRedirector`] swaps itself in as the stream's sink, buffers what
//! is written, and on every flush sends the text to the "console" logger
//! (colour-wrapped) and the "logfile" logger (verbatim).
pub mod error;
pub mod redirector;
pub mod severity;

pub use error::RedirectError;
pub use redirector::StreamRedirector;
pub use severity::SeverityLevel;

/// Registry name of the logger receiving colour-wrapped screen output.
pub const SCREEN_LOGGER: &str = "console";
/// Registry name of the logger receiving plain file output.
pub const FILE_LOGGER: &str = "logfile";
