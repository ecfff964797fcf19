//! System keychain native store
//!
//! Uses the OS keychain through the `keyring` crate:
//! - macOS: Keychain
//! - Windows: Credential Manager
//! - Linux: Secret Service (GNOME Keyring, KWallet)

use keyring::Entry;
use tracing::debug;

use super::traits::{NativeStore, StoreError, StoreResult};

/// Native store backed by the system keychain
///
/// Every `(service, key)` pair maps to one keyring entry whose target is
/// the service and whose user is the key.
///
/// # Example
///
/// ```no_run
/// use omnivault_keyring::store::{KeyringStore, NativeStore};
///
/// let store = KeyringStore::new();
/// store.set("myapp", "api-key", "sk-...").unwrap();
/// assert_eq!(store.get("myapp", "api-key").unwrap(), "sk-...");
/// ```
#[derive(Debug, Clone, Copy, Default)]
pub struct KeyringStore;

impl KeyringStore {
    pub fn new() -> Self {
        Self
    }

    fn entry(service: &str, key: &str) -> StoreResult<Entry> {
        Entry::new(service, key).map_err(map_keyring_error)
    }
}

/// Map a `keyring` failure onto the store error taxonomy
fn map_keyring_error(err: keyring::Error) -> StoreError {
    match err {
        keyring::Error::NoEntry => StoreError::NotFound,
        keyring::Error::TooLong(attr, limit) => {
            StoreError::TooLong(format!("{attr} exceeds {limit}"))
        }
        other => StoreError::Platform(other.to_string()),
    }
}

impl NativeStore for KeyringStore {
    fn name(&self) -> &str {
        "keychain"
    }

    fn get(&self, service: &str, key: &str) -> StoreResult<String> {
        let entry = Self::entry(service, key)?;
        let value = entry.get_password().map_err(map_keyring_error)?;
        debug!(service, key, len = value.len(), "keychain read");
        Ok(value)
    }

    fn set(&self, service: &str, key: &str, value: &str) -> StoreResult<()> {
        let entry = Self::entry(service, key)?;
        entry.set_password(value).map_err(map_keyring_error)?;
        debug!(service, key, len = value.len(), "keychain write");
        Ok(())
    }

    fn delete(&self, service: &str, key: &str) -> StoreResult<()> {
        let entry = Self::entry(service, key)?;
        entry.delete_credential().map_err(map_keyring_error)?;
        debug!(service, key, "keychain delete");
        Ok(())
    }
}
