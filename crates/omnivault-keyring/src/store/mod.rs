//! Native credential store adapters
//!
//! The provider reaches the platform only through the [`NativeStore`] trait:
//! - `KeyringStore`: the OS keychain via the `keyring` crate
//! - `MemoryStore`: in-memory with fault injection, for tests

mod traits;
mod keychain_store;
mod memory_store;

pub use traits::{NativeStore, StoreError, StoreResult};
pub use keychain_store::KeyringStore;
pub use memory_store::MemoryStore;
