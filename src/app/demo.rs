//! Redirects three streams, in the roles of stdout, the diagnostic log stream
//! and stderr, and writes through each of them.
use anyhow::Result;
use std::io::Write;
use streamlog::config::BackendConfig;
use streamlog::{OutputStream, SeverityLevel, StreamRedirector};

/// Writes `text` and flushes, so it is forwarded as one message.
fn emit(out: &mut impl Write, text: &str) -> Result<()> {
    out.write_all(text.as_bytes())?;
    out.flush()?;
    Ok(())
}

pub fn run(config: &BackendConfig) -> Result<()> {
    let mut out = OutputStream::stdout();
    let mut log = OutputStream::stderr();
    let mut err = OutputStream::stderr();

    {
        let mut out = StreamRedirector::new(&mut out, SeverityLevel::Info)?;
        let mut log = StreamRedirector::new(&mut log, SeverityLevel::Debug)?;
        let mut err = StreamRedirector::new(&mut err, SeverityLevel::Error)?;

        emit(&mut out, "regular output is logged at info")?;
        emit(&mut log, "diagnostics are logged at debug")?;
        emit(&mut err, "errors are logged at error")?;

        write!(out, "pieces ")?;
        write!(out, "written separately ")?;
        emit(&mut out, "arrive as one message")?;

        write!(err, "unflushed text is dropped with the redirector")?;
    }

    emit(&mut out, "stdout is back to normal\n")?;
    println!();
    println!("Log written to {}", config.logfile.display());
    Ok(())
}
