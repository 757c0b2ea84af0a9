//! A logger appending plain formatted lines to a file.
use super::logger::{LevelCell, LineFormat, Logger};
use super::Level;
use chrono::Local;
use std::fs::{self, File, OpenOptions};
use std::io::{self, BufWriter, Write};
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Mutex, PoisonError};

/// Writes accepted messages to a log file, buffered.
///
/// The buffer is flushed on every message at or above the flush level
/// (`Warn` by default), on [`Logger::flush`] and when the logger is dropped.
pub struct FileLogger {
    name: String,
    path: PathBuf,
    level: LevelCell,
    flush_on: LevelCell,
    format: LineFormat,
    out: Mutex<BufWriter<File>>,
    failed: AtomicBool,
}

impl FileLogger {
    /// Opens (creating parent directories as needed) the log file at `path`.
    ///
    /// With `truncate` the file is emptied first, otherwise lines are appended.
    ///
    /// # Errors
    ///
    /// Returns the I/O error if the directory or file cannot be created.
    pub fn open(
        name: impl Into<String>,
        path: impl AsRef<Path>,
        truncate: bool,
        format: LineFormat,
    ) -> io::Result<Self> {
        let path = path.as_ref().to_path_buf();
        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent)?;
        }

        let mut options = OpenOptions::new();
        options.create(true);
        if truncate {
            options.write(true).truncate(true);
        } else {
            options.append(true);
        }
        let file = options.open(&path)?;

        Ok(Self {
            name: name.into(),
            path,
            level: LevelCell::new(Level::Info),
            flush_on: LevelCell::new(Level::Warn),
            format,
            out: Mutex::new(BufWriter::new(file)),
            failed: AtomicBool::new(false),
        })
    }

    pub fn with_level(self, level: Level) -> Self {
        self.level.set(level);
        self
    }

    /// Flush the file after every message at or above `level`.
    pub fn flush_on(&self, level: Level) {
        self.flush_on.set(level);
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn report_failure(&self, err: &io::Error) {
        if !self.failed.swap(true, Ordering::Relaxed) {
            tracing::warn!(
                logger = %self.name,
                path = %self.path.display(),
                error = %err,
                "file logger write failed"
            );
        }
    }
}

impl Logger for FileLogger {
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
        let tag = level.short_tag().to_string();
        let line = self.format.render(Local::now(), &tag, msg);

        let mut out = self.out.lock().unwrap_or_else(PoisonError::into_inner);
        let mut result = out.write_all(line.as_bytes());
        if result.is_ok() && level >= self.flush_on.get() {
            result = out.flush();
        }
        drop(out);

        if let Err(err) = result {
            self.report_failure(&err);
        }
    }

    fn flush(&self) {
        let result = self
            .out
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .flush();
        if let Err(err) = result {
            self.report_failure(&err);
        }
    }
}
