//! Native credential store contract

use thiserror::Error;

/// Errors reported by a native credential store
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum StoreError {
    /// No entry exists for the service/key pair
    #[error("no entry found")]
    NotFound,

    /// The value exceeds the platform size limit
    #[error("value too long for the platform store: {0}")]
    TooLong(String),

    /// Any other platform failure (locked keychain, daemon unavailable, access denied)
    #[error("platform store error: {0}")]
    Platform(String),
}

impl StoreError {
    /// Create a platform error
    pub fn platform(message: impl Into<String>) -> Self {
        Self::Platform(message.into())
    }

    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound)
    }
}

pub type StoreResult<T> = Result<T, StoreError>;

/// A flat, per-service key/value credential store
///
/// This is the boundary to the OS: one namespace per service identity,
/// text values only, no enumeration and no transactions. Calls are
/// blocking and may wait on platform unlock prompts.
///
/// Implementations:
/// - `KeyringStore`: macOS Keychain, Windows Credential Manager, Linux Secret Service
/// - `MemoryStore`: in-memory, for testing and ephemeral use
pub trait NativeStore: Send + Sync {
    /// Human-readable name of this store
    fn name(&self) -> &str;

    /// Read the value stored under `(service, key)`
    ///
    /// Returns `Err(StoreError::NotFound)` if nothing is stored there.
    fn get(&self, service: &str, key: &str) -> StoreResult<String>;

    /// Store `value` under `(service, key)`, replacing any previous value
    fn set(&self, service: &str, key: &str, value: &str) -> StoreResult<()>;

    /// Remove the entry under `(service, key)`
    ///
    /// Returns `Err(StoreError::NotFound)` if nothing is stored there.
    fn delete(&self, service: &str, key: &str) -> StoreResult<()>;
}
