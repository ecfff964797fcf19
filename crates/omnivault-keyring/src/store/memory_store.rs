//! In-memory native store

use std::collections::{HashMap, HashSet};
use std::sync::atomic::{AtomicUsize, Ordering};

use parking_lot::RwLock;

use super::traits::{NativeStore, StoreError, StoreResult};

/// Which operations an injected fault applies to
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Fault {
    /// `set` and `delete` fail, `get` still works
    Writes,
    /// Every operation fails
    All,
}

/// In-memory native store for testing and ephemeral use
///
/// Entries are keyed by `(service, key)` and lost when the store is
/// dropped. Faults can be injected per key to simulate a failing platform
/// store, and the `raw_*` helpers mutate entries the way an external tool
/// would, bypassing any provider bookkeeping.
///
/// # Thread Safety
///
/// The store uses `RwLock` internally and is safe to use from multiple threads.
///
/// # Example
///
/// ```
/// use omnivault_keyring::store::{MemoryStore, NativeStore};
///
/// let store = MemoryStore::new();
/// store.set("myapp", "token", "abc").unwrap();
/// assert_eq!(store.get("myapp", "token").unwrap(), "abc");
/// ```
#[derive(Debug, Default)]
pub struct MemoryStore {
    entries: RwLock<HashMap<(String, String), String>>,
    faults: RwLock<HashMap<String, Fault>>,
    calls: AtomicUsize,
}

impl MemoryStore {
    /// Create a new empty memory store
    pub fn new() -> Self {
        Self::default()
    }

    /// Make `set` and `delete` on `key` fail with a platform error
    pub fn fail_writes(&self, key: impl Into<String>) {
        self.faults.write().insert(key.into(), Fault::Writes);
    }

    /// Make every operation on `key` fail with a platform error
    pub fn fail_all(&self, key: impl Into<String>) {
        self.faults.write().insert(key.into(), Fault::All);
    }

    /// Remove all injected faults
    pub fn clear_faults(&self) {
        self.faults.write().clear();
    }

    /// Number of `NativeStore` calls made against this store
    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    /// Number of entries across all services
    pub fn len(&self) -> usize {
        self.entries.read().len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Read an entry without going through the store contract
    pub fn raw_get(&self, service: &str, key: &str) -> Option<String> {
        self.entries
            .read()
            .get(&(service.to_string(), key.to_string()))
            .cloned()
    }

    /// Write an entry without going through the store contract
    pub fn raw_set(&self, service: &str, key: &str, value: &str) {
        self.entries
            .write()
            .insert((service.to_string(), key.to_string()), value.to_string());
    }

    /// Remove an entry without going through the store contract
    pub fn raw_delete(&self, service: &str, key: &str) {
        self.entries
            .write()
            .remove(&(service.to_string(), key.to_string()));
    }

    /// Distinct service identities that currently hold entries
    pub fn services(&self) -> HashSet<String> {
        self.entries
            .read()
            .keys()
            .map(|(service, _)| service.clone())
            .collect()
    }

    fn check(&self, key: &str, write: bool) -> StoreResult<()> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        match self.faults.read().get(key) {
            Some(Fault::All) => Err(StoreError::platform(format!("injected fault on {key}"))),
            Some(Fault::Writes) if write => {
                Err(StoreError::platform(format!("injected write fault on {key}")))
            }
            _ => Ok(()),
        }
    }
}

impl NativeStore for MemoryStore {
    fn name(&self) -> &str {
        "memory"
    }

    fn get(&self, service: &str, key: &str) -> StoreResult<String> {
        self.check(key, false)?;
        self.raw_get(service, key).ok_or(StoreError::NotFound)
    }

    fn set(&self, service: &str, key: &str, value: &str) -> StoreResult<()> {
        self.check(key, true)?;
        self.raw_set(service, key, value);
        Ok(())
    }

    fn delete(&self, service: &str, key: &str) -> StoreResult<()> {
        self.check(key, true)?;
        self.entries
            .write()
            .remove(&(service.to_string(), key.to_string()))
            .map(|_| ())
            .ok_or(StoreError::NotFound)
    }
}
