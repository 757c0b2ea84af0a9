//! This module provides the registry that maps logger names to shared logger
//! handles, plus the process-wide instance.
use super::Logger;
use std::collections::HashMap;
use std::sync::{Arc, OnceLock, PoisonError, RwLock};

/// Errors raised when mutating a [`Registry`].
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum RegistryError {
    #[error("a logger named '{0}' is already registered")]
    AlreadyRegistered(String),
}

/// Maps names to shared loggers.
#[derive(Default)]
pub struct Registry {
    loggers: RwLock<HashMap<String, Arc<dyn Logger>>>,
}

impl Registry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers `logger` under its own name.
    ///
    /// # Errors
    ///
    /// Returns [`RegistryError::AlreadyRegistered`] if the name is taken.
    pub fn register(&self, logger: Arc<dyn Logger>) -> Result<(), RegistryError> {
        let mut loggers = self.loggers.write().unwrap_or_else(PoisonError::into_inner);
        let name = logger.name().to_string();
        if loggers.contains_key(&name) {
            return Err(RegistryError::AlreadyRegistered(name));
        }
        tracing::debug!(logger = %name, "registered logger");
        loggers.insert(name, logger);
        Ok(())
    }

    /// Registers `logger`, returning the one it displaced, if any.
    pub fn register_or_replace(&self, logger: Arc<dyn Logger>) -> Option<Arc<dyn Logger>> {
        let name = logger.name().to_string();
        self.loggers
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .insert(name, logger)
    }

    /// Looks up a logger by name.
    pub fn get(&self, name: &str) -> Option<Arc<dyn Logger>> {
        self.loggers
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .get(name)
            .cloned()
    }

    pub fn contains(&self, name: &str) -> bool {
        self.loggers
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .contains_key(name)
    }

    /// Removes a logger. Handles already given out stay valid.
    pub fn remove(&self, name: &str) -> Option<Arc<dyn Logger>> {
        self.loggers
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .remove(name)
    }

    /// Flushes every registered logger.
    pub fn flush_all(&self) {
        for logger in self
            .loggers
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .values()
        {
            logger.flush();
        }
    }

    /// Flushes and removes every registered logger.
    pub fn drop_all(&self) {
        let drained: Vec<_> = self
            .loggers
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .drain()
            .collect();
        for (_, logger) in drained {
            logger.flush();
        }
    }

    /// Registered names, sorted.
    pub fn names(&self) -> Vec<String> {
        let mut names: Vec<String> = self
            .loggers
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .keys()
            .cloned()
            .collect();
        names.sort();
        names
    }
}

/// The process-wide registry.
pub fn global() -> &'static Registry {
    static GLOBAL: OnceLock<Registry> = OnceLock::new();
    GLOBAL.get_or_init(Registry::new)
}
