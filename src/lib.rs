//! Redirects output streams into a logging backend.
//!
//! A [`StreamRedirector`] takes over an [`OutputStream`]'s sink, collects what
//! is written to it and, on every flush, logs the text to a screen logger and a
//! file logger at a fixed severity. Dropping the redirector gives the stream
//! its original sink back.
//!
//! ```no_run
//! use std::io::Write;
//! use streamlog::config::BackendConfig;
//! use streamlog::logging::registry;
//! use streamlog::{OutputStream, SeverityLevel, StreamRedirector};
//!
//! # fn main() -> anyhow::Result<()> {
//! BackendConfig::default().install(registry::global())?;
//!
//! let mut out = OutputStream::stdout();
//! let mut redirect = StreamRedirector::new(&mut out, SeverityLevel::Info)?;
//! writeln!(redirect, "goes to the console and the log file")?;
//! redirect.finish()?;
//! # Ok(())
//! # }
//! ```

/// Backend configuration and installation into a registry.
pub mod config;
/// Loggers and the registry they are looked up in.
pub mod logging;
/// The stream redirector.
pub mod redirect;
/// The host output stream.
pub mod stream;

pub use redirect::{RedirectError, SeverityLevel, StreamRedirector};
pub use stream::{BoxedSink, OutputStream, SinkSlot};
