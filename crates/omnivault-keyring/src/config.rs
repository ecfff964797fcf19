//! Provider configuration
//!
//! [`KeyringConfig`] is the in-process configuration. [`ConfigFile`] is its
//! serializable subset, read from YAML (`~/.config/omnivault/keyring.yaml`
//! by default) with an environment override for the service name.

use std::fs;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use serde::{Deserialize, Serialize};

use crate::codec::Format;
use crate::sink::{IndexErrorSink, SharedSink};

/// Default service identity used when none is configured
pub const DEFAULT_SERVICE_NAME: &str = "omnivault";

/// Environment variable overriding the configured service identity
pub const SERVICE_NAME_ENV: &str = "OMNIVAULT_KEYRING_SERVICE";

/// Configuration for a keyring provider
///
/// # Example
///
/// ```
/// use omnivault_keyring::{IndexError, IndexOp, KeyringConfig};
///
/// let config = KeyringConfig::new()
///     .with_service_name("myapp")
///     .with_json_format(true)
///     .with_index_error_handler(|op: IndexOp, err: &IndexError| {
///         eprintln!("index {op} failed: {err}");
///     });
/// assert_eq!(config.service_name, "myapp");
/// ```
#[derive(Clone)]
pub struct KeyringConfig {
    /// Namespace for all secrets of one application.
    /// On macOS this is the "Where" field in Keychain Access.
    pub service_name: String,

    /// Store secrets as JSON with fields and tags instead of the bare value
    pub json_format: bool,

    /// Receives index maintenance failures; dropped when unset
    pub on_index_error: Option<SharedSink>,
}

impl Default for KeyringConfig {
    fn default() -> Self {
        Self::new()
    }
}

impl KeyringConfig {
    pub fn new() -> Self {
        Self {
            service_name: DEFAULT_SERVICE_NAME.to_string(),
            json_format: false,
            on_index_error: None,
        }
    }

    /// Set the service identity. An empty name keeps the default.
    pub fn with_service_name(mut self, name: impl Into<String>) -> Self {
        self.service_name = name.into();
        self.normalized()
    }

    pub fn with_json_format(mut self, json: bool) -> Self {
        self.json_format = json;
        self
    }

    /// Install a sink for index maintenance failures
    pub fn with_index_error_handler(mut self, sink: impl IndexErrorSink + 'static) -> Self {
        self.on_index_error = Some(Arc::new(sink));
        self
    }

    /// Install an already shared sink
    pub fn with_shared_index_error_handler(mut self, sink: SharedSink) -> Self {
        self.on_index_error = Some(sink);
        self
    }

    /// Storage format implied by `json_format`
    pub fn format(&self) -> Format {
        Format::from_json_flag(self.json_format)
    }

    /// Load the serializable settings from a YAML file
    pub fn from_file(path: impl AsRef<Path>) -> ConfigResult<Self> {
        Ok(ConfigFile::load(path)?.apply_env().into())
    }

    /// Replace an empty service name with the default
    pub(crate) fn normalized(mut self) -> Self {
        if self.service_name.is_empty() {
            self.service_name = DEFAULT_SERVICE_NAME.to_string();
        }
        self
    }
}

impl std::fmt::Debug for KeyringConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("KeyringConfig")
            .field("service_name", &self.service_name)
            .field("json_format", &self.json_format)
            .field("on_index_error", &self.on_index_error.is_some())
            .finish()
    }
}

/// Errors that can occur while loading or saving configuration
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Failed to parse YAML: {0}")]
    Yaml(#[from] serde_yaml::Error),

    #[error("Configuration error: {0}")]
    Other(String),
}

pub type ConfigResult<T> = Result<T, ConfigError>;

/// On-disk configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ConfigFile {
    pub service_name: String,
    pub json_format: bool,
}

impl Default for ConfigFile {
    fn default() -> Self {
        Self {
            service_name: DEFAULT_SERVICE_NAME.to_string(),
            json_format: false,
        }
    }
}

impl ConfigFile {
    /// User-level config location (`<config dir>/omnivault/keyring.yaml`)
    pub fn user_path() -> ConfigResult<PathBuf> {
        let config_dir = dirs::config_dir()
            .or_else(|| dirs::home_dir().map(|home| home.join(".config")))
            .ok_or_else(|| ConfigError::Other("no config or home directory".to_string()))?;
        Ok(config_dir.join("omnivault").join("keyring.yaml"))
    }

    /// Read a config file; a missing file yields the defaults
    pub fn load(path: impl AsRef<Path>) -> ConfigResult<Self> {
        let path = path.as_ref();
        if !path.exists() {
            return Ok(Self::default());
        }

        let content = fs::read_to_string(path)?;
        let file: ConfigFile = serde_yaml::from_str(&content)?;
        Ok(file)
    }

    /// Write the config file, creating parent directories
    pub fn save(&self, path: impl AsRef<Path>) -> ConfigResult<()> {
        let path = path.as_ref();
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }
        fs::write(path, serde_yaml::to_string(self)?)?;
        Ok(())
    }

    /// Apply `OMNIVAULT_KEYRING_SERVICE` when it is set and non-empty
    pub fn apply_env(self) -> Self {
        self.apply_service_override(std::env::var(SERVICE_NAME_ENV).ok())
    }

    fn apply_service_override(mut self, value: Option<String>) -> Self {
        if let Some(name) = value.filter(|name| !name.trim().is_empty()) {
            self.service_name = name.trim().to_string();
        }
        self
    }
}

impl From<ConfigFile> for KeyringConfig {
    fn from(file: ConfigFile) -> Self {
        KeyringConfig {
            service_name: file.service_name,
            json_format: file.json_format,
            on_index_error: None,
        }
        .normalized()
    }
}
