//! Self-maintained index of stored keys
//!
//! Native credential stores cannot enumerate their entries, so the keys
//! written through a provider are tracked in a JSON array stored under the
//! reserved key [`INDEX_KEY`] of the same service.
//!
//! The index is a best-effort cache. Entries removed by other tools stay
//! listed, and keys are missing if an index write failed. Failures are
//! reported to the configured [`IndexErrorSink`] and never returned.
//!
//! `Index` does no locking of its own: callers must hold exclusive access
//! across `add`/`remove`, which are load-modify-save cycles.

use thiserror::Error;
use tracing::debug;

use crate::sink::IndexErrorSink;
use crate::store::{NativeStore, StoreError};

/// Reserved key holding the index document
///
/// This key is not addressable as a secret path: it is never listed and
/// never added to or removed from the index.
pub const INDEX_KEY: &str = "__omnivault_index__";

/// Index maintenance step that failed
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum IndexOp {
    /// Reading the index entry from the store
    Load,
    /// Parsing the index entry
    Unmarshal,
    /// Serializing the index
    Marshal,
    /// Writing the index entry to the store
    Save,
}

impl IndexOp {
    pub fn as_str(&self) -> &'static str {
        match self {
            IndexOp::Load => "load",
            IndexOp::Unmarshal => "unmarshal",
            IndexOp::Marshal => "marshal",
            IndexOp::Save => "save",
        }
    }
}

impl std::fmt::Display for IndexOp {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Cause of an index maintenance failure
#[derive(Error, Debug)]
pub enum IndexError {
    #[error("index store error: {0}")]
    Store(#[from] StoreError),

    #[error("index JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Index manager bound to one service identity
pub struct Index<'a> {
    store: &'a dyn NativeStore,
    service: &'a str,
    sink: &'a dyn IndexErrorSink,
}

impl<'a> Index<'a> {
    pub fn new(store: &'a dyn NativeStore, service: &'a str, sink: &'a dyn IndexErrorSink) -> Self {
        Self {
            store,
            service,
            sink,
        }
    }

    /// Load the known keys in insertion order
    ///
    /// A missing index is the first-use case and yields an empty list
    /// without a report. Any other failure is reported and also yields an
    /// empty list.
    pub fn load(&self) -> Vec<String> {
        let raw = match self.store.get(self.service, INDEX_KEY) {
            Ok(raw) => raw,
            Err(StoreError::NotFound) => return Vec::new(),
            Err(err) => {
                self.report(IndexOp::Load, err.into());
                return Vec::new();
            }
        };

        match serde_json::from_str::<Vec<String>>(&raw) {
            Ok(keys) => keys,
            Err(err) => {
                self.report(IndexOp::Unmarshal, err.into());
                Vec::new()
            }
        }
    }

    /// Record `key`, appending it if it is not already present
    ///
    /// A failed load counts as an empty index, so a successful save then
    /// replaces whatever index was stored with `[key]`.
    pub fn add(&self, key: &str) {
        if key == INDEX_KEY {
            return;
        }

        let mut keys = self.load();
        if keys.iter().any(|k| k == key) {
            return;
        }
        keys.push(key.to_string());
        debug!(service = self.service, key, total = keys.len(), "index add");
        self.save(&keys);
    }

    /// Forget every occurrence of `key`
    ///
    /// The index is written back even when `key` was not present.
    pub fn remove(&self, key: &str) {
        if key == INDEX_KEY {
            return;
        }

        let mut keys = self.load();
        keys.retain(|k| k != key);
        debug!(service = self.service, key, total = keys.len(), "index remove");
        self.save(&keys);
    }

    /// Keys starting with `prefix`, in index order
    pub fn matching(&self, prefix: &str) -> Vec<String> {
        self.load()
            .into_iter()
            .filter(|k| k.starts_with(prefix))
            .collect()
    }

    fn save(&self, keys: &[String]) {
        let data = match serde_json::to_string(keys) {
            Ok(data) => data,
            Err(err) => {
                self.report(IndexOp::Marshal, err.into());
                return;
            }
        };
        if let Err(err) = self.store.set(self.service, INDEX_KEY, &data) {
            self.report(IndexOp::Save, err.into());
        }
    }

    fn report(&self, op: IndexOp, err: IndexError) {
        debug!(service = self.service, op = op.as_str(), error = %err, "index error");
        self.sink.report(op, &err);
    }
}
