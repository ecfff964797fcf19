//! Generic vault interface implemented by the keyring provider

use thiserror::Error;

use crate::store::StoreError;
use crate::types::{Capabilities, Context, Secret};

/// Errors returned by vault operations
///
/// Every variant records the operation, the path and the provider name.
#[derive(Error, Debug)]
pub enum VaultError {
    /// The provider was closed before the call
    #[error("{provider}: {op} {path}: vault is closed")]
    Closed {
        op: &'static str,
        path: String,
        provider: String,
    },

    /// Nothing is stored at the path
    #[error("{provider}: {op} {path}: secret not found")]
    SecretNotFound {
        op: &'static str,
        path: String,
        provider: String,
    },

    /// The native store failed for a reason other than absence
    #[error("{provider}: {op} {path}: {source}")]
    Backend {
        op: &'static str,
        path: String,
        provider: String,
        #[source]
        source: StoreError,
    },

    /// The secret could not be serialized; nothing was written
    #[error("{provider}: {op} {path}: failed to encode secret: {source}")]
    Encode {
        op: &'static str,
        path: String,
        provider: String,
        #[source]
        source: serde_json::Error,
    },
}

impl VaultError {
    /// Create a closed error
    pub fn closed(op: &'static str, path: impl Into<String>, provider: impl Into<String>) -> Self {
        Self::Closed {
            op,
            path: path.into(),
            provider: provider.into(),
        }
    }

    /// Create a not-found error
    pub fn not_found(
        op: &'static str,
        path: impl Into<String>,
        provider: impl Into<String>,
    ) -> Self {
        Self::SecretNotFound {
            op,
            path: path.into(),
            provider: provider.into(),
        }
    }

    /// Create a backend error
    pub fn backend(
        op: &'static str,
        path: impl Into<String>,
        provider: impl Into<String>,
        source: StoreError,
    ) -> Self {
        Self::Backend {
            op,
            path: path.into(),
            provider: provider.into(),
            source,
        }
    }

    /// Create an encode error
    pub fn encode(
        op: &'static str,
        path: impl Into<String>,
        provider: impl Into<String>,
        source: serde_json::Error,
    ) -> Self {
        Self::Encode {
            op,
            path: path.into(),
            provider: provider.into(),
            source,
        }
    }

    pub fn is_closed(&self) -> bool {
        matches!(self, Self::Closed { .. })
    }

    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::SecretNotFound { .. })
    }

    /// Name of the failed operation (`"Get"`, `"Set"`, ...)
    pub fn op(&self) -> &'static str {
        match self {
            Self::Closed { op, .. }
            | Self::SecretNotFound { op, .. }
            | Self::Backend { op, .. }
            | Self::Encode { op, .. } => *op,
        }
    }

    pub fn path(&self) -> &str {
        match self {
            Self::Closed { path, .. }
            | Self::SecretNotFound { path, .. }
            | Self::Backend { path, .. }
            | Self::Encode { path, .. } => path.as_str(),
        }
    }

    pub fn provider(&self) -> &str {
        match self {
            Self::Closed { provider, .. }
            | Self::SecretNotFound { provider, .. }
            | Self::Backend { provider, .. }
            | Self::Encode { provider, .. } => provider.as_str(),
        }
    }
}

pub type VaultResult<T> = Result<T, VaultError>;

/// A secret vault
///
/// Paths are opaque strings; `/` has no special meaning beyond prefix
/// matching in [`Vault::list`]. All calls may block.
pub trait Vault: Send + Sync {
    /// Retrieve the secret at `path`
    fn get(&self, ctx: &Context, path: &str) -> VaultResult<Secret>;

    /// Store `secret` at `path`, replacing any existing value
    fn set(&self, ctx: &Context, path: &str, secret: &Secret) -> VaultResult<()>;

    /// Remove the secret at `path`. Removing an absent path succeeds.
    fn delete(&self, ctx: &Context, path: &str) -> VaultResult<()>;

    /// Check whether a secret exists at `path`
    fn exists(&self, ctx: &Context, path: &str) -> VaultResult<bool>;

    /// Paths starting with `prefix`; an empty prefix matches everything
    fn list(&self, ctx: &Context, prefix: &str) -> VaultResult<Vec<String>>;

    /// Provider name
    fn name(&self) -> &str;

    /// Supported operations
    fn capabilities(&self) -> Capabilities;

    /// Release the vault. Later calls fail with [`VaultError::Closed`].
    fn close(&self) -> VaultResult<()>;
}
