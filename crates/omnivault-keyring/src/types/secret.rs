//! Secret values and provider capabilities

use std::collections::BTreeMap;
use std::fmt;

/// Descriptive data attached to a secret
///
/// `provider` and `path` are filled in by the provider when a secret is
/// read and are never persisted. `tags` survive only in structured format.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Metadata {
    /// Name of the provider that returned the secret
    pub provider: String,
    /// Path the secret was read from
    pub path: String,
    /// Free-form tags
    pub tags: BTreeMap<String, String>,
}

/// A stored secret
///
/// The primary value is the conventional password/token field. Additional
/// named fields are only kept when the provider uses structured format.
///
/// # Example
///
/// ```
/// use omnivault_keyring::Secret;
///
/// let secret = Secret::new("hunter2")
///     .with_field("username", "admin")
///     .with_tag("env", "prod");
///
/// assert_eq!(secret.value(), "hunter2");
/// assert_eq!(secret.field("username"), Some("admin"));
/// // Formatting never leaks the value
/// assert_eq!(format!("{}", secret), "[REDACTED]");
/// ```
#[derive(Clone, Default, PartialEq, Eq)]
pub struct Secret {
    /// Primary value
    pub value: String,
    /// Named fields for multi-field secrets
    pub fields: BTreeMap<String, String>,
    /// Metadata
    pub metadata: Metadata,
}

impl Secret {
    /// Create a secret holding only a primary value
    pub fn new(value: impl Into<String>) -> Self {
        Self {
            value: value.into(),
            ..Default::default()
        }
    }

    /// Add a named field
    pub fn with_field(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.fields.insert(name.into(), value.into());
        self
    }

    /// Add a metadata tag
    pub fn with_tag(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.metadata.tags.insert(name.into(), value.into());
        self
    }

    /// The primary value
    pub fn value(&self) -> &str {
        &self.value
    }

    /// Look up a named field
    pub fn field(&self, name: &str) -> Option<&str> {
        self.fields.get(name).map(String::as_str)
    }
}

impl From<String> for Secret {
    fn from(value: String) -> Self {
        Self::new(value)
    }
}

impl From<&str> for Secret {
    fn from(value: &str) -> Self {
        Self::new(value)
    }
}

// Never print secret values
impl fmt::Debug for Secret {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Secret")
            .field("value", &"[REDACTED]")
            .field("fields", &self.fields.keys().collect::<Vec<_>>())
            .field("metadata", &self.metadata)
            .finish()
    }
}

impl fmt::Display for Secret {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("[REDACTED]")
    }
}

/// Operations supported by a vault provider
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Capabilities {
    pub read: bool,
    pub write: bool,
    pub delete: bool,
    pub list: bool,
    /// Whether secrets may carry named fields in addition to the value
    pub multi_field: bool,
}
