//! This module contains the logging backend the redirector forwards into.
//!
//! It includes the `Logger` trait, a registry of named loggers, and the
//! console, file, in-memory and `tracing` loggers.
pub mod buffer;
pub mod console;
pub mod file;
pub mod level;
pub mod logger;
pub mod registry;
pub mod tracing_sink;

pub use buffer::{MemoryLogger, Record};
pub use console::ConsoleLogger;
pub use file::FileLogger;
pub use level::{Level, ParseLevelError};
pub use logger::{LineFormat, Logger};
pub use registry::{Registry, RegistryError};
pub use tracing_sink::TracingLogger;
