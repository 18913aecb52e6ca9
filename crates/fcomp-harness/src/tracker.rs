//! Shared call log.

use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

/// Ordered log of string keys, cheap to clone and share between fixtures.
#[derive(Debug, Clone, Default)]
pub struct Tracker {
    log: Arc<Mutex<Vec<String>>>,
}

impl Tracker {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Append `key` to the log.
    pub fn track(&self, key: impl Into<String>) {
        self.lock().push(key.into());
    }

    /// Snapshot of every key in call order.
    #[must_use]
    pub fn log(&self) -> Vec<String> {
        self.lock().clone()
    }

    /// How many times `key` was tracked.
    #[must_use]
    pub fn count(&self, key: &str) -> usize {
        self.lock().iter().filter(|k| *k == key).count()
    }

    /// Keys that start with `prefix`, in call order.
    #[must_use]
    pub fn with_prefix(&self, prefix: &str) -> Vec<String> {
        self.lock()
            .iter()
            .filter(|k| k.starts_with(prefix))
            .cloned()
            .collect()
    }

    #[must_use]
    pub fn total(&self) -> usize {
        self.lock().len()
    }

    pub fn clear(&self) {
        self.lock().clear();
    }

    fn lock(&self) -> MutexGuard<'_, Vec<String>> {
        self.log.lock().unwrap_or_else(PoisonError::into_inner)
    }
}
