//! This module defines the host output stream whose sink can be swapped out.
use std::fmt;
use std::io::{self, Write};

/// The boxed byte sink an [`OutputStream`] writes into.
pub type BoxedSink = Box<dyn Write + Send>;

/// A stream whose underlying sink can be exchanged at runtime.
pub trait SinkSlot {
    /// Installs `sink` and hands back the one it replaces.
    fn replace_sink(&mut self, sink: BoxedSink) -> BoxedSink;
}

/// An output stream writing through a replaceable sink.
///
/// In line-buffered mode, every write that contains a newline is followed by
/// a flush of the sink, the way an interactive standard stream behaves.
pub struct OutputStream {
    sink: BoxedSink,
    line_buffered: bool,
}

impl OutputStream {
    pub fn new(sink: BoxedSink) -> Self {
        Self {
            sink,
            line_buffered: false,
        }
    }

    /// A line-buffered stream over the process's standard output.
    pub fn stdout() -> Self {
        Self::new(Box::new(io::stdout())).line_buffered(true)
    }

    /// A line-buffered stream over the process's standard error.
    pub fn stderr() -> Self {
        Self::new(Box::new(io::stderr())).line_buffered(true)
    }

    pub fn line_buffered(mut self, enabled: bool) -> Self {
        self.line_buffered = enabled;
        self
    }

    pub fn is_line_buffered(&self) -> bool {
        self.line_buffered
    }

    pub fn into_inner(self) -> BoxedSink {
        self.sink
    }
}

impl SinkSlot for OutputStream {
    fn replace_sink(&mut self, sink: BoxedSink) -> BoxedSink {
        std::mem::replace(&mut self.sink, sink)
    }
}

impl Write for OutputStream {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        let written = self.sink.write(buf)?;
        if self.line_buffered && buf[..written].contains(&b'\n') {
            self.sink.flush()?;
        }
        Ok(written)
    }

    fn flush(&mut self) -> io::Result<()> {
        self.sink.flush()
    }
}

impl fmt::Debug for OutputStream {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("OutputStream")
            .field("line_buffered", &self.line_buffered)
            .finish_non_exhaustive()
    }
}
