//! The scoped redirector: installs an intercepting sink into a stream and puts
//! the original sink back when dropped.
use super::error::RedirectError;
use super::severity::{Forwarder, SeverityLevel};
use super::{FILE_LOGGER, SCREEN_LOGGER};
use crate::logging::{registry, Logger, Registry};
use crate::stream::{BoxedSink, OutputStream, SinkSlot};
use std::io::{self, Write};
use std::ops::Deref;
use std::sync::Arc;

/// The sink installed into a redirected stream.
///
/// Bytes accumulate in `pending` until the stream is flushed; each non-empty
/// flush forwards the accumulated text as one message.
struct Interceptor {
    pending: Vec<u8>,
    forwarder: Forwarder,
}

impl Write for Interceptor {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.pending.extend_from_slice(buf);
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        if self.pending.is_empty() {
            return Ok(());
        }
        let text = String::from_utf8_lossy(&self.pending);
        tracing::trace!(bytes = self.pending.len(), "forwarding redirected output");
        self.forwarder.forward(&text);
        self.pending.clear();
        Ok(())
    }
}

impl Drop for Interceptor {
    fn drop(&mut self) {
        if !self.pending.is_empty() {
            tracing::debug!(
                bytes = self.pending.len(),
                "discarding unflushed redirected output"
            );
        }
    }
}

/// Redirects a stream into the "console" and "logfile" loggers for as long as
/// it is alive.
///
/// While the redirector exists, every byte written to the stream is buffered
/// and each flush sends the buffered text to both loggers at the chosen
/// [`SeverityLevel`]. Dropping the redirector restores the stream's original
/// sink, on every exit path including unwinding.
///
/// Text still buffered when the redirector is dropped is discarded, not
/// forwarded. Flush the stream first, or use [`StreamRedirector::finish`].
///
/// The redirector holds the stream's only mutable borrow, so writes go
/// through it: it implements `Write` and dereferences to the stream for
/// read-only access. The sink cannot be swapped while the redirection is
/// active:
///
/// ```compile_fail
/// use std::io;
/// use std::sync::Arc;
/// use streamlog::logging::MemoryLogger;
/// use streamlog::{OutputStream, SeverityLevel, SinkSlot, StreamRedirector};
///
/// let mut stream = OutputStream::new(Box::new(io::sink()));
/// let mut redirect = StreamRedirector::with_loggers(
///     &mut stream,
///     SeverityLevel::Info,
///     Arc::new(MemoryLogger::new("console", 4)),
///     Arc::new(MemoryLogger::new("logfile", 4)),
/// );
/// redirect.replace_sink(Box::new(io::sink()));
/// ```
///
/// Sharing a redirected stream between threads requires external locking.
pub struct StreamRedirector<'a, S: SinkSlot = OutputStream> {
    target: &'a mut S,
    original: Option<BoxedSink>,
    severity: SeverityLevel,
}

impl<'a, S: SinkSlot> StreamRedirector<'a, S> {
    /// Redirects `target` using the loggers of the global registry.
    ///
    /// # Errors
    ///
    /// Returns [`RedirectError::MissingSink`] if "console" or "logfile" is not
    /// registered. The stream is left untouched in that case.
    pub fn new(target: &'a mut S, severity: SeverityLevel) -> Result<Self, RedirectError> {
        Self::attach(target, severity, registry::global())
    }

    /// Redirects `target` using the loggers registered in `registry`.
    ///
    /// # Errors
    ///
    /// Returns [`RedirectError::MissingSink`] if "console" or "logfile" is not
    /// registered. The stream is left untouched in that case.
    pub fn attach(
        target: &'a mut S,
        severity: SeverityLevel,
        registry: &Registry,
    ) -> Result<Self, RedirectError> {
        let screen = registry
            .get(SCREEN_LOGGER)
            .ok_or(RedirectError::MissingSink(SCREEN_LOGGER))?;
        let file = registry
            .get(FILE_LOGGER)
            .ok_or(RedirectError::MissingSink(FILE_LOGGER))?;
        Ok(Self::with_loggers(target, severity, screen, file))
    }

    /// Redirects `target` into explicitly supplied loggers.
    pub fn with_loggers(
        target: &'a mut S,
        severity: SeverityLevel,
        screen: Arc<dyn Logger>,
        file: Arc<dyn Logger>,
    ) -> Self {
        tracing::debug!(
            %severity,
            screen = screen.name(),
            file = file.name(),
            "redirecting stream"
        );
        let interceptor = Interceptor {
            pending: Vec::new(),
            forwarder: Forwarder::new(severity, screen, file),
        };
        let original = target.replace_sink(Box::new(interceptor));
        Self {
            target,
            original: Some(original),
            severity,
        }
    }

    pub fn severity(&self) -> SeverityLevel {
        self.severity
    }
}

impl<S: SinkSlot + Write> StreamRedirector<'_, S> {
    /// Flushes pending text to the loggers, then restores the original sink.
    ///
    /// # Errors
    ///
    /// Returns the error of the stream's flush. The sink is restored either way.
    pub fn finish(self) -> io::Result<()> {
        self.target.flush()
    }
}

impl<S: SinkSlot + Write> Write for StreamRedirector<'_, S> {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.target.write(buf)
    }

    fn flush(&mut self) -> io::Result<()> {
        self.target.flush()
    }
}

impl<S: SinkSlot> Deref for StreamRedirector<'_, S> {
    type Target = S;

    fn deref(&self) -> &S {
        &*self.target
    }
}

impl<S: SinkSlot> Drop for StreamRedirector<'_, S> {
    fn drop(&mut self) {
        if let Some(original) = self.original.take() {
            drop(self.target.replace_sink(original));
            tracing::debug!(severity = %self.severity, "stream restored");
        }
    }
}
