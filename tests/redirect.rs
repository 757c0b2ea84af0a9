use std::fs;
use std::io::{self, Write};
use std::sync::{Arc, Mutex};

use streamlog::config::BackendConfig;
use streamlog::logging::{ConsoleLogger, Level, LineFormat, Logger, MemoryLogger, Registry};
use streamlog::redirect::{FILE_LOGGER, SCREEN_LOGGER};
use streamlog::{OutputStream, RedirectError, SeverityLevel, StreamRedirector};

/// A sink standing in for the terminal a stream normally writes to.
#[derive(Clone, Default)]
struct Terminal(Arc<Mutex<Vec<u8>>>);

impl Write for Terminal {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.0.lock().unwrap().extend_from_slice(buf);
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}

impl Terminal {
    fn text(&self) -> String {
        String::from_utf8(self.0.lock().unwrap().clone()).unwrap()
    }
}

struct Backend {
    registry: Registry,
    screen: Arc<MemoryLogger>,
    file: Arc<MemoryLogger>,
}

fn backend() -> Backend {
    let registry = Registry::new();
    let screen = Arc::new(MemoryLogger::new(SCREEN_LOGGER, 64));
    let file = Arc::new(MemoryLogger::new(FILE_LOGGER, 64));
    registry.register(screen.clone()).unwrap();
    registry.register(file.clone()).unwrap();
    Backend {
        registry,
        screen,
        file,
    }
}

#[test]
fn hello_at_info() {
    let backend = backend();
    let mut stream = OutputStream::new(Box::new(io::sink()));
    let mut redirect =
        StreamRedirector::attach(&mut stream, SeverityLevel::Info, &backend.registry).unwrap();

    for c in ['H', 'e', 'l', 'l', 'o'] {
        write!(redirect, "{c}").unwrap();
    }
    redirect.flush().unwrap();

    assert_eq!(
        backend.screen.messages(),
        vec![(Level::Info, "\x1b[93mHello\x1b[00m".to_string())]
    );
    assert_eq!(
        backend.file.messages(),
        vec![(Level::Info, "Hello".to_string())]
    );

    // Nothing is left pending.
    redirect.flush().unwrap();
    assert_eq!(backend.screen.len(), 1);
    assert_eq!(backend.file.len(), 1);
}

#[test]
fn empty_flush_makes_no_calls() {
    let backend = backend();
    let mut stream = OutputStream::new(Box::new(io::sink()));
    let mut redirect =
        StreamRedirector::attach(&mut stream, SeverityLevel::Error, &backend.registry).unwrap();

    redirect.flush().unwrap();

    assert!(backend.screen.is_empty());
    assert!(backend.file.is_empty());
}

#[test]
fn separate_flushes_are_separate_messages() {
    let backend = backend();
    let mut stream = OutputStream::new(Box::new(io::sink()));
    let mut redirect =
        StreamRedirector::attach(&mut stream, SeverityLevel::Debug, &backend.registry).unwrap();

    write!(redirect, "A").unwrap();
    redirect.flush().unwrap();
    write!(redirect, "B").unwrap();
    redirect.flush().unwrap();

    assert_eq!(
        backend.file.messages(),
        vec![
            (Level::Debug, "A".to_string()),
            (Level::Debug, "B".to_string())
        ]
    );
    assert_eq!(
        backend.screen.messages(),
        vec![
            (Level::Debug, "\x1b[00mA\x1b[00m".to_string()),
            (Level::Debug, "\x1b[00mB\x1b[00m".to_string())
        ]
    );
}

#[test]
fn error_wraps_in_red() {
    let backend = backend();
    let mut stream = OutputStream::new(Box::new(io::sink()));
    let mut redirect =
        StreamRedirector::attach(&mut stream, SeverityLevel::Error, &backend.registry).unwrap();

    write!(redirect, "disk full").unwrap();
    redirect.flush().unwrap();

    assert_eq!(
        backend.screen.messages(),
        vec![(Level::Error, "\x1b[91mdisk full\x1b[00m".to_string())]
    );
    assert_eq!(
        backend.file.messages(),
        vec![(Level::Error, "disk full".to_string())]
    );
}

#[test]
fn concatenates_arbitrary_writes_in_order() {
    let backend = backend();
    let mut stream = OutputStream::new(Box::new(io::sink()));
    let mut redirect =
        StreamRedirector::attach(&mut stream, SeverityLevel::Info, &backend.registry).unwrap();

    let pieces = ["", "one", " ", "two\n", "thrée", "\t", "4"];
    for piece in pieces {
        redirect.write_all(piece.as_bytes()).unwrap();
    }
    redirect.flush().unwrap();

    assert_eq!(
        backend.file.messages(),
        vec![(Level::Info, pieces.concat())]
    );
}

#[test]
fn line_buffered_stream_forwards_each_line() {
    let backend = backend();
    let mut stream = OutputStream::new(Box::new(io::sink())).line_buffered(true);
    let mut redirect =
        StreamRedirector::attach(&mut stream, SeverityLevel::Info, &backend.registry).unwrap();

    write!(redirect, "first ").unwrap();
    assert!(backend.file.is_empty());
    writeln!(redirect, "line").unwrap();
    writeln!(redirect, "second line").unwrap();

    assert_eq!(
        backend.file.messages(),
        vec![
            (Level::Info, "first line\n".to_string()),
            (Level::Info, "second line\n".to_string())
        ]
    );
}

#[test]
fn original_sink_is_restored_on_drop() {
    let backend = backend();
    let terminal = Terminal::default();
    let mut stream = OutputStream::new(Box::new(terminal.clone()));

    write!(stream, "before ").unwrap();
    {
        let mut redirect =
            StreamRedirector::attach(&mut stream, SeverityLevel::Info, &backend.registry)
                .unwrap();
        write!(redirect, "during").unwrap();
        redirect.flush().unwrap();
    }
    write!(stream, "after").unwrap();
    stream.flush().unwrap();

    assert_eq!(terminal.text(), "before after");
    assert_eq!(
        backend.file.messages(),
        vec![(Level::Info, "during".to_string())]
    );
}

#[test]
fn unflushed_text_is_discarded_on_drop() {
    let backend = backend();
    let terminal = Terminal::default();
    let mut stream = OutputStream::new(Box::new(terminal.clone()));
    {
        let mut redirect =
            StreamRedirector::attach(&mut stream, SeverityLevel::Info, &backend.registry)
                .unwrap();
        write!(redirect, "trailing partial line").unwrap();
    }
    stream.flush().unwrap();

    assert!(backend.screen.is_empty());
    assert!(backend.file.is_empty());
    assert!(terminal.text().is_empty());
}

#[test]
fn sink_is_restored_when_unwinding() {
    let backend = backend();
    let terminal = Terminal::default();
    let mut stream = OutputStream::new(Box::new(terminal.clone()));

    let result = std::panic::catch_unwind(std::panic::AssertUnwindSafe(|| {
        let mut redirect =
            StreamRedirector::attach(&mut stream, SeverityLevel::Error, &backend.registry)
                .unwrap();
        write!(redirect, "doomed").unwrap();
        panic!("boom");
    }));
    assert!(result.is_err());

    write!(stream, "still works").unwrap();
    assert_eq!(terminal.text(), "still works");
    assert!(backend.file.is_empty());
}

#[test]
fn finish_flushes_before_restoring() {
    let backend = backend();
    let terminal = Terminal::default();
    let mut stream = OutputStream::new(Box::new(terminal.clone()));

    let mut redirect =
        StreamRedirector::attach(&mut stream, SeverityLevel::Info, &backend.registry).unwrap();
    write!(redirect, "last words").unwrap();
    redirect.finish().unwrap();

    write!(stream, "plain").unwrap();
    assert_eq!(
        backend.file.messages(),
        vec![(Level::Info, "last words".to_string())]
    );
    assert_eq!(terminal.text(), "plain");
}

#[test]
fn several_streams_share_the_loggers() {
    let backend = backend();
    let mut out = OutputStream::new(Box::new(io::sink()));
    let mut log = OutputStream::new(Box::new(io::sink()));
    let mut err = OutputStream::new(Box::new(io::sink()));

    let mut out =
        StreamRedirector::attach(&mut out, SeverityLevel::Info, &backend.registry).unwrap();
    let mut log =
        StreamRedirector::attach(&mut log, SeverityLevel::Debug, &backend.registry).unwrap();
    let mut err =
        StreamRedirector::attach(&mut err, SeverityLevel::Error, &backend.registry).unwrap();

    write!(out, "o").unwrap();
    write!(log, "l").unwrap();
    write!(err, "e").unwrap();
    err.flush().unwrap();
    out.flush().unwrap();
    log.flush().unwrap();

    assert_eq!(
        backend.file.messages(),
        vec![
            (Level::Error, "e".to_string()),
            (Level::Info, "o".to_string()),
            (Level::Debug, "l".to_string())
        ]
    );
}

#[test]
fn missing_loggers_are_reported() {
    let registry = Registry::new();
    let mut stream = OutputStream::new(Box::new(io::sink()));

    let err = StreamRedirector::attach(&mut stream, SeverityLevel::Info, &registry)
        .err()
        .unwrap();
    assert_eq!(err, RedirectError::MissingSink(SCREEN_LOGGER));
    assert_eq!(
        err.to_string(),
        "logger 'console' is not registered; register it before redirecting a stream"
    );
}

#[test]
fn installed_backend_writes_plain_text_to_the_log_file() {
    let dir = tempfile::tempdir().unwrap();
    let logfile = dir.path().join("app.log");
    let config = BackendConfig {
        app_name: Some("itest".to_string()),
        logfile: logfile.clone(),
        ..BackendConfig::default()
    };
    let registry = Registry::new();
    config.install(&registry).unwrap();
    registry.get(SCREEN_LOGGER).unwrap().set_level(Level::Error);

    let mut stream = OutputStream::new(Box::new(io::sink()));
    {
        let mut redirect =
            StreamRedirector::attach(&mut stream, SeverityLevel::Info, &registry).unwrap();
        write!(redirect, "to the file").unwrap();
        redirect.flush().unwrap();
    }
    registry.flush_all();

    let text = fs::read_to_string(&logfile).unwrap();
    assert!(text.ends_with("I: itest: to the file\n"), "{text:?}");
    assert!(!text.contains('\x1b'));
}

#[test]
fn console_prints_one_line_per_line_buffered_write() {
    let terminal = Terminal::default();
    let screen = ConsoleLogger::with_writer(
        SCREEN_LOGGER,
        Box::new(terminal.clone()),
        LineFormat::default(),
    );
    let file = Arc::new(MemoryLogger::new(FILE_LOGGER, 8));
    let mut stream = OutputStream::new(Box::new(io::sink())).line_buffered(true);
    let mut redirect = StreamRedirector::with_loggers(
        &mut stream,
        SeverityLevel::Info,
        Arc::new(screen),
        file.clone(),
    );

    writeln!(redirect, "hello").unwrap();
    writeln!(redirect, "world").unwrap();

    let text = terminal.text();
    let lines: Vec<&str> = text.lines().collect();
    assert_eq!(lines.len(), 2, "{text:?}");
    assert!(lines[0].ends_with("] I: \x1b[93mhello\x1b[00m"), "{text:?}");
    assert!(lines[1].ends_with("] I: \x1b[93mworld\x1b[00m"), "{text:?}");
    assert_eq!(
        file.messages(),
        vec![
            (Level::Info, "hello\n".to_string()),
            (Level::Info, "world\n".to_string())
        ]
    );
}
