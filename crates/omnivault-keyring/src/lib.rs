//! OmniVault Keyring
//!
//! A vault provider over the OS credential store:
//! - macOS: Keychain
//! - Windows: Credential Manager
//! - Linux: Secret Service (GNOME Keyring, KWallet)
//!
//! Secrets are namespaced under a service identity. In JSON format a secret
//! keeps named fields and tags next to its primary value. Because OS
//! keyrings cannot enumerate entries, the provider tracks written paths in
//! an index entry of its own to support prefix listing.
//!
//! ```rust,no_run
//! use omnivault_keyring::{Context, KeyringConfig, KeyringProvider, Secret, Vault};
//!
//! let vault = KeyringProvider::new(
//!     KeyringConfig::new()
//!         .with_service_name("myapp")
//!         .with_json_format(true),
//! );
//! let ctx = Context::background();
//!
//! vault.set(&ctx, "database/credentials", &Secret::new("mypassword")
//!     .with_field("username", "admin"))?;
//!
//! let secret = vault.get(&ctx, "database/credentials")?;
//! assert_eq!(secret.field("username"), Some("admin"));
//!
//! for path in vault.list(&ctx, "database/")? {
//!     println!("{path}");
//! }
//! # Ok::<(), omnivault_keyring::VaultError>(())
//! ```

pub mod codec;
pub mod config;
pub mod index;
pub mod provider;
pub mod sink;
pub mod store;
pub mod types;
pub mod vault;

// Re-export commonly used types
pub use types::{Capabilities, Context, Metadata, Secret};

pub use vault::{Vault, VaultError, VaultResult};

pub use provider::{KeyringProvider, PROVIDER_NAME};

pub use config::{ConfigError, ConfigFile, ConfigResult, KeyringConfig, DEFAULT_SERVICE_NAME};

pub use codec::{Decoded, Format};

pub use index::{IndexError, IndexOp, INDEX_KEY};

pub use sink::{IndexErrorSink, NoOpSink, SharedSink, TracingSink};

pub use store::{KeyringStore, MemoryStore, NativeStore, StoreError, StoreResult};
