use std::collections::HashSet;
use std::sync::{Condvar, Mutex, MutexGuard};

/// Per-key mutual exclusion.
///
/// Holding a [`KeyGuard`] for a key blocks every other `lock` call for the
/// same key until the guard drops. Distinct keys never wait on each other.
/// Only keys currently held occupy memory.
#[derive(Debug, Default)]
pub struct KeyedLocks {
    held: Mutex<HashSet<String>>,
    released: Condvar,
}

impl KeyedLocks {
    pub fn new() -> Self {
        Self::default()
    }

    /// Block until `key` is free, then take it.
    pub fn lock(&self, key: &str) -> KeyGuard<'_> {
        let mut held = self.held_set();
        while held.contains(key) {
            held = self
                .released
                .wait(held)
                .unwrap_or_else(|poisoned| poisoned.into_inner());
        }
        held.insert(key.to_string());
        KeyGuard {
            locks: self,
            key: key.to_string(),
        }
    }

    /// Number of keys currently held.
    pub fn held_count(&self) -> usize {
        self.held_set().len()
    }

    // The set only changes through insert/remove of whole keys, so it is
    // consistent even if a holder panicked.
    fn held_set(&self) -> MutexGuard<'_, HashSet<String>> {
        self.held.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }
}

/// Exclusive hold on one key of a [`KeyedLocks`] table.
#[derive(Debug)]
pub struct KeyGuard<'a> {
    locks: &'a KeyedLocks,
    key: String,
}

impl KeyGuard<'_> {
    pub fn key(&self) -> &str {
        &self.key
    }
}

impl Drop for KeyGuard<'_> {
    fn drop(&mut self) {
        self.locks.held_set().remove(&self.key);
        self.locks.released.notify_all();
    }
}
