//! This module provides an in-memory logger that keeps the most recent
//! records, for inspection by tests and by the embedding program.
use super::logger::{LevelCell, Logger};
use super::Level;
use chrono::{DateTime, Utc};
use std::collections::VecDeque;
use std::sync::{Mutex, PoisonError};

/// A single captured message.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Record {
    /// When the message was accepted.
    pub timestamp: DateTime<Utc>,
    pub level: Level,
    /// The message text, exactly as received.
    pub message: String,
}

/// A bounded logger storing records in a circular buffer.
pub struct MemoryLogger {
    name: String,
    level: LevelCell,
    /// The circular buffer of records.
    entries: Mutex<VecDeque<Record>>,
    /// The maximum number of records kept; the oldest is evicted first.
    max_size: usize,
}

impl MemoryLogger {
    /// Creates a new `MemoryLogger` accepting every level.
    ///
    /// # Arguments
    ///
    /// * `name` - The registry name of the logger.
    /// * `max_size` - The maximum number of records to keep.
    pub fn new(name: impl Into<String>, max_size: usize) -> Self {
        Self {
            name: name.into(),
            level: LevelCell::new(Level::Trace),
            entries: Mutex::new(VecDeque::with_capacity(max_size.min(1024))),
            max_size,
        }
    }

    /// A copy of every stored record, oldest first.
    pub fn records(&self) -> Vec<Record> {
        self.lock().iter().cloned().collect()
    }

    /// `(level, message)` pairs, oldest first.
    pub fn messages(&self) -> Vec<(Level, String)> {
        self.lock()
            .iter()
            .map(|r| (r.level, r.message.clone()))
            .collect()
    }

    pub fn len(&self) -> usize {
        self.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.lock().is_empty()
    }

    pub fn clear(&self) {
        self.lock().clear();
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, VecDeque<Record>> {
        self.entries.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

impl Logger for MemoryLogger {
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
        if !self.should_log(level) || self.max_size == 0 {
            return;
        }
        let mut entries = self.lock();
        if entries.len() >= self.max_size {
            entries.pop_front();
        }
        entries.push_back(Record {
            timestamp: Utc::now(),
            level,
            message: msg.to_string(),
        });
    }
}
