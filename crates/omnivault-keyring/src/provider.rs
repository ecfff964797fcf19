//! Vault provider backed by the OS credential store
//!
//! Supported backends:
//! - macOS: Keychain
//! - Windows: Credential Manager
//! - Linux: Secret Service (GNOME Keyring, KWallet)
//!
//! OS keyrings cannot enumerate their entries, so [`Vault::list`] is served
//! from the index described in [`crate::index`].
//!
//! # Locking
//!
//! One reader/writer lock per provider guards the lifecycle state and every
//! native store call. `get`, `exists` and `list` share it; `set`, `delete`
//! and `close` take it exclusively, which also covers the index
//! load-modify-save performed by `set` and `delete`.

use std::sync::Arc;

use parking_lot::RwLock;
use tracing::debug;

use crate::codec::{self, Format};
use crate::config::KeyringConfig;
use crate::index::{Index, INDEX_KEY};
use crate::sink::{IndexErrorSink, NoOpSink};
use crate::store::{KeyringStore, NativeStore, StoreError};
use crate::types::{Capabilities, Context, Secret};
use crate::vault::{Vault, VaultError, VaultResult};

/// Name reported by [`KeyringProvider::name`] and stamped on read secrets
pub const PROVIDER_NAME: &str = "keyring";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Lifecycle {
    Open,
    Closed,
}

/// Vault implementation over a native credential store
///
/// # Example
///
/// ```no_run
/// use omnivault_keyring::{Context, KeyringConfig, KeyringProvider, Secret, Vault};
///
/// let vault = KeyringProvider::new(KeyringConfig::new().with_service_name("myapp"));
/// let ctx = Context::background();
///
/// vault.set(&ctx, "api-key", &Secret::new("secret123")).unwrap();
/// let secret = vault.get(&ctx, "api-key").unwrap();
/// assert_eq!(secret.value(), "secret123");
/// ```
pub struct KeyringProvider {
    config: KeyringConfig,
    format: Format,
    store: Arc<dyn NativeStore>,
    state: RwLock<Lifecycle>,
}

impl KeyringProvider {
    /// Create a provider over the system keychain
    pub fn new(config: KeyringConfig) -> Self {
        Self::with_store(config, Arc::new(KeyringStore::new()))
    }

    /// Create a provider over the system keychain with only a service name
    pub fn with_service_name(service_name: impl Into<String>) -> Self {
        Self::new(KeyringConfig::new().with_service_name(service_name))
    }

    /// Create a provider over an arbitrary native store
    pub fn with_store(config: KeyringConfig, store: Arc<dyn NativeStore>) -> Self {
        let config = config.normalized();
        let format = config.format();
        Self {
            config,
            format,
            store,
            state: RwLock::new(Lifecycle::Open),
        }
    }

    /// Provider name
    pub fn name(&self) -> &str {
        PROVIDER_NAME
    }

    /// Configured service identity
    pub fn service_name(&self) -> &str {
        &self.config.service_name
    }

    /// Human-readable name of the backing store
    pub fn backend(&self) -> &str {
        match self.store.name() {
            "keychain" => platform_backend(),
            other => other,
        }
    }

    /// Whether [`Vault::close`] has been called
    pub fn is_closed(&self) -> bool {
        *self.state.read() == Lifecycle::Closed
    }

    fn sink(&self) -> &dyn IndexErrorSink {
        match self.config.on_index_error.as_deref() {
            Some(sink) => sink,
            None => &NoOpSink,
        }
    }

    fn index(&self) -> Index<'_> {
        Index::new(self.store.as_ref(), &self.config.service_name, self.sink())
    }
}

/// Name of the OS credential store for the current platform
fn platform_backend() -> &'static str {
    if cfg!(target_os = "macos") {
        "macOS Keychain"
    } else if cfg!(target_os = "windows") {
        "Windows Credential Manager"
    } else if cfg!(target_os = "linux") {
        "Secret Service (GNOME Keyring/KWallet)"
    } else {
        "Unknown"
    }
}

impl std::fmt::Debug for KeyringProvider {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("KeyringProvider")
            .field("service_name", &self.config.service_name)
            .field("format", &self.format)
            .field("store", &self.store.name())
            .field("closed", &self.is_closed())
            .finish()
    }
}

impl Vault for KeyringProvider {
    fn get(&self, _ctx: &Context, path: &str) -> VaultResult<Secret> {
        let state = self.state.read();
        if *state == Lifecycle::Closed {
            return Err(VaultError::closed("Get", path, PROVIDER_NAME));
        }

        let raw = self
            .store
            .get(&self.config.service_name, path)
            .map_err(|err| match err {
                StoreError::NotFound => VaultError::not_found("Get", path, PROVIDER_NAME),
                other => VaultError::backend("Get", path, PROVIDER_NAME, other),
            })?;

        let decoded = codec::decode(&raw, self.format);
        if self.format.is_structured() && decoded.is_fallback() {
            debug!(
                service = %self.config.service_name,
                path,
                "stored value is not an envelope, reading as plain"
            );
        }

        let mut secret = decoded.into_secret();
        secret.metadata.provider = PROVIDER_NAME.to_string();
        secret.metadata.path = path.to_string();
        Ok(secret)
    }

    fn set(&self, _ctx: &Context, path: &str, secret: &Secret) -> VaultResult<()> {
        let state = self.state.write();
        if *state == Lifecycle::Closed {
            return Err(VaultError::closed("Set", path, PROVIDER_NAME));
        }

        let value = codec::encode(secret, self.format)
            .map_err(|err| VaultError::encode("Set", path, PROVIDER_NAME, err))?;

        self.store
            .set(&self.config.service_name, path, &value)
            .map_err(|err| VaultError::backend("Set", path, PROVIDER_NAME, err))?;
        debug!(service = %self.config.service_name, path, len = value.len(), "secret stored");

        if path != INDEX_KEY {
            self.index().add(path);
        }
        Ok(())
    }

    fn delete(&self, _ctx: &Context, path: &str) -> VaultResult<()> {
        let state = self.state.write();
        if *state == Lifecycle::Closed {
            return Err(VaultError::closed("Delete", path, PROVIDER_NAME));
        }

        match self.store.delete(&self.config.service_name, path) {
            Ok(()) => {}
            // Already deleted
            Err(StoreError::NotFound) => return Ok(()),
            Err(err) => return Err(VaultError::backend("Delete", path, PROVIDER_NAME, err)),
        }
        debug!(service = %self.config.service_name, path, "secret deleted");

        if path != INDEX_KEY {
            self.index().remove(path);
        }
        Ok(())
    }

    fn exists(&self, _ctx: &Context, path: &str) -> VaultResult<bool> {
        let state = self.state.read();
        if *state == Lifecycle::Closed {
            return Err(VaultError::closed("Exists", path, PROVIDER_NAME));
        }

        match self.store.get(&self.config.service_name, path) {
            Ok(_) => Ok(true),
            Err(StoreError::NotFound) => Ok(false),
            Err(err) => Err(VaultError::backend("Exists", path, PROVIDER_NAME, err)),
        }
    }

    fn list(&self, _ctx: &Context, prefix: &str) -> VaultResult<Vec<String>> {
        let state = self.state.read();
        if *state == Lifecycle::Closed {
            return Err(VaultError::closed("List", prefix, PROVIDER_NAME));
        }

        Ok(self.index().matching(prefix))
    }

    fn name(&self) -> &str {
        PROVIDER_NAME
    }

    fn capabilities(&self) -> Capabilities {
        Capabilities {
            read: true,
            write: true,
            delete: true,
            // Via the index
            list: true,
            multi_field: self.format.is_structured(),
        }
    }

    fn close(&self) -> VaultResult<()> {
        let mut state = self.state.write();
        if *state == Lifecycle::Open {
            debug!(service = %self.config.service_name, "provider closed");
        }
        *state = Lifecycle::Closed;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::index::{IndexError, IndexOp};
    use crate::store::MemoryStore;
    use parking_lot::Mutex;
    use std::thread;

    fn memory_provider(config: KeyringConfig) -> (KeyringProvider, Arc<MemoryStore>) {
        let store = Arc::new(MemoryStore::new());
        let provider = KeyringProvider::with_store(config, store.clone());
        (provider, store)
    }

    fn structured() -> KeyringConfig {
        KeyringConfig::new().with_service_name("test-json").with_json_format(true)
    }

    /// Sink recording every report
    fn recording_config(service: &str) -> (KeyringConfig, Arc<Mutex<Vec<IndexOp>>>) {
        let reports = Arc::new(Mutex::new(Vec::new()));
        let reports_clone = Arc::clone(&reports);
        let config = KeyringConfig::new()
            .with_service_name(service)
            .with_index_error_handler(move |op: IndexOp, _err: &IndexError| {
                reports_clone.lock().push(op);
            });
        (config, reports)
    }

    #[test]
    fn test_default_service_name() {
        let (provider, _) = memory_provider(KeyringConfig::default());
        assert_eq!(provider.service_name(), "omnivault");

        let (provider, _) = memory_provider(KeyringConfig::new().with_service_name("myapp"));
        assert_eq!(provider.service_name(), "myapp");

        let mut blank = KeyringConfig::new();
        blank.service_name = String::new();
        let (provider, _) = memory_provider(blank);
        assert_eq!(provider.service_name(), "omnivault");
    }

    #[test]
    fn test_with_service_name() {
        let provider = KeyringProvider::with_service_name("testapp");
        assert_eq!(provider.service_name(), "testapp");
        assert_eq!(provider.backend(), platform_backend());
    }

    #[test]
    fn test_name_and_backend() {
        let (provider, _) = memory_provider(KeyringConfig::new());
        assert_eq!(provider.name(), "keyring");
        assert_eq!(Vault::name(&provider), "keyring");
        assert_eq!(provider.backend(), "memory");
        assert!(!platform_backend().is_empty());
    }

    #[test]
    fn test_set_and_get() {
        let (provider, store) =
            memory_provider(KeyringConfig::new().with_service_name("test-set-get"));
        let ctx = Context::background();

        provider.set(&ctx, "key1", &Secret::new("value1")).unwrap();
        let secret = provider.get(&ctx, "key1").unwrap();
        assert_eq!(secret.value, "value1");
        assert_eq!(secret.metadata.provider, "keyring");
        assert_eq!(secret.metadata.path, "key1");

        // Plain format stores the bare value
        assert_eq!(store.raw_get("test-set-get", "key1").as_deref(), Some("value1"));

        provider
            .set(&ctx, "database/prod/password", &Secret::new("secret123"))
            .unwrap();
        let secret = provider.get(&ctx, "database/prod/password").unwrap();
        assert_eq!(secret.value, "secret123");
    }

    #[test]
    fn test_plain_format_drops_fields() {
        let (provider, _) = memory_provider(KeyringConfig::new());
        let ctx = Context::background();

        provider
            .set(&ctx, "creds", &Secret::new("pw").with_field("username", "admin"))
            .unwrap();
        let secret = provider.get(&ctx, "creds").unwrap();
        assert_eq!(secret.value, "pw");
        assert!(secret.fields.is_empty());
    }

    #[test]
    fn test_set_overwrites() {
        let (provider, _) = memory_provider(KeyringConfig::new());
        let ctx = Context::background();

        provider.set(&ctx, "key", &Secret::new("old_value")).unwrap();
        provider.set(&ctx, "key", &Secret::new("new_value")).unwrap();
        assert_eq!(provider.get(&ctx, "key").unwrap().value, "new_value");
    }

    #[test]
    fn test_multi_field_secret_json_format() {
        let (provider, _) = memory_provider(structured());
        let ctx = Context::background();

        let secret = Secret::new("password123")
            .with_field("username", "admin")
            .with_field("host", "localhost")
            .with_field("port", "5432")
            .with_tag("owner", "platform");
        provider.set(&ctx, "db-creds", &secret).unwrap();

        let back = provider.get(&ctx, "db-creds").unwrap();
        assert_eq!(back.value, "password123");
        assert_eq!(back.fields, secret.fields);
        assert_eq!(back.metadata.tags, secret.metadata.tags);
        assert_eq!(back.metadata.provider, "keyring");
        assert_eq!(back.metadata.path, "db-creds");
    }

    #[test]
    fn test_caller_metadata_is_not_trusted() {
        let (provider, _) = memory_provider(structured());
        let ctx = Context::background();

        let mut secret = Secret::new("v");
        secret.metadata.provider = "other".to_string();
        secret.metadata.path = "somewhere/else".to_string();
        provider.set(&ctx, "real/path", &secret).unwrap();

        let back = provider.get(&ctx, "real/path").unwrap();
        assert_eq!(back.metadata.provider, "keyring");
        assert_eq!(back.metadata.path, "real/path");
    }

    #[test]
    fn test_plain_value_readable_in_json_format() {
        let store = Arc::new(MemoryStore::new());
        let ctx = Context::background();
        let plain = KeyringProvider::with_store(
            KeyringConfig::new().with_service_name("shared"),
            store.clone(),
        );
        let json = KeyringProvider::with_store(
            KeyringConfig::new().with_service_name("shared").with_json_format(true),
            store.clone(),
        );

        let texts = [
            "hunter2",
            "{not json",
            "[\"a\"]",
            "12345",
            "",
            "{}",
            r#"{"type":"service_account","private_key":"abc"}"#,
        ];
        for text in texts {
            plain.set(&ctx, "legacy", &Secret::new(text)).unwrap();
            let secret = json.get(&ctx, "legacy").unwrap();
            assert_eq!(secret.value, text);
            assert!(secret.fields.is_empty());
        }

        // Written by another tool
        store.raw_set("shared", "external", "raw-token");
        assert_eq!(json.get(&ctx, "external").unwrap().value, "raw-token");
    }

    #[test]
    fn test_get_not_found() {
        let (provider, _) = memory_provider(KeyringConfig::new());
        let ctx = Context::background();

        let err = provider.get(&ctx, "nonexistent").unwrap_err();
        assert!(err.is_not_found());
        assert_eq!(err.op(), "Get");
        assert_eq!(err.path(), "nonexistent");

        assert!(!provider.exists(&ctx, "nonexistent").unwrap());
    }

    #[test]
    fn test_backend_errors() {
        let (provider, store) = memory_provider(KeyringConfig::new());
        let ctx = Context::background();
        store.fail_all("locked");

        let err = provider.get(&ctx, "locked").unwrap_err();
        assert!(matches!(
            &err,
            VaultError::Backend { op: "Get", path, provider, source: StoreError::Platform(_) }
                if path == "locked" && provider == "keyring"
        ));

        let err = provider.exists(&ctx, "locked").unwrap_err();
        assert!(matches!(err, VaultError::Backend { op: "Exists", .. }));

        let err = provider.set(&ctx, "locked", &Secret::new("v")).unwrap_err();
        assert!(matches!(err, VaultError::Backend { op: "Set", .. }));

        let err = provider.delete(&ctx, "locked").unwrap_err();
        assert!(matches!(err, VaultError::Backend { op: "Delete", .. }));

        // A failed write is not indexed
        assert!(provider.list(&ctx, "").unwrap().is_empty());
    }

    #[test]
    fn test_delete() {
        let (provider, _) = memory_provider(KeyringConfig::new().with_service_name("test-delete"));
        let ctx = Context::background();

        provider.set(&ctx, "to-delete", &Secret::new("temp")).unwrap();
        assert!(provider.exists(&ctx, "to-delete").unwrap());

        provider.delete(&ctx, "to-delete").unwrap();
        assert!(!provider.exists(&ctx, "to-delete").unwrap());

        // Deleting again, or something never written, is not an error
        provider.delete(&ctx, "to-delete").unwrap();
        provider.delete(&ctx, "nonexistent").unwrap();
    }

    #[test]
    fn test_exists() {
        let (provider, _) = memory_provider(KeyringConfig::new());
        let ctx = Context::background();

        assert!(!provider.exists(&ctx, "missing").unwrap());
        provider.set(&ctx, "present", &Secret::new("here")).unwrap();
        assert!(provider.exists(&ctx, "present").unwrap());
    }

    #[test]
    fn test_list() {
        let (provider, _) = memory_provider(KeyringConfig::new().with_service_name("test-list"));
        let ctx = Context::background();

        let paths = [
            "database/prod",
            "database/staging",
            "api/github",
            "api/stripe",
            "standalone",
        ];
        for path in paths {
            provider.set(&ctx, path, &Secret::new("test")).unwrap();
        }

        assert_eq!(provider.list(&ctx, "").unwrap(), paths.to_vec());
        assert_eq!(
            provider.list(&ctx, "database/").unwrap(),
            vec!["database/prod", "database/staging"]
        );
        assert_eq!(provider.list(&ctx, "api/").unwrap(), vec!["api/github", "api/stripe"]);
        assert!(provider.list(&ctx, "nonexistent/").unwrap().is_empty());
    }

    #[test]
    fn test_list_reads_only_the_index() {
        let (provider, store) = memory_provider(KeyringConfig::new());
        let ctx = Context::background();
        provider.set(&ctx, "a", &Secret::new("1")).unwrap();
        provider.set(&ctx, "b", &Secret::new("2")).unwrap();

        let before = store.calls();
        provider.list(&ctx, "").unwrap();
        assert_eq!(store.calls(), before + 1);
    }

    #[test]
    fn test_index_membership() {
        let (provider, _) = memory_provider(KeyringConfig::new());
        let ctx = Context::background();

        provider.set(&ctx, "p", &Secret::new("v")).unwrap();
        assert!(provider.list(&ctx, "").unwrap().contains(&"p".to_string()));

        provider.delete(&ctx, "p").unwrap();
        assert!(!provider.list(&ctx, "").unwrap().contains(&"p".to_string()));
    }

    #[test]
    fn test_set_twice_does_not_duplicate_index_entry() {
        let (provider, _) = memory_provider(KeyringConfig::new());
        let ctx = Context::background();

        provider.set(&ctx, "dup", &Secret::new("1")).unwrap();
        provider.set(&ctx, "dup", &Secret::new("2")).unwrap();
        assert_eq!(provider.list(&ctx, "").unwrap(), vec!["dup"]);
    }

    #[test]
    fn test_index_key_is_never_listed() {
        let (provider, store) = memory_provider(KeyringConfig::new());
        let ctx = Context::background();
        provider.set(&ctx, "visible", &Secret::new("v")).unwrap();

        assert_eq!(provider.list(&ctx, "__").unwrap(), Vec::<String>::new());
        assert!(store.raw_get("omnivault", INDEX_KEY).is_some());
    }

    #[test]
    fn test_stale_index_is_trusted() {
        let (provider, store) = memory_provider(KeyringConfig::new().with_service_name("stale"));
        let ctx = Context::background();
        provider.set(&ctx, "gone", &Secret::new("v")).unwrap();

        // Removed by another tool behind the provider's back
        store.raw_delete("stale", "gone");

        assert_eq!(provider.list(&ctx, "").unwrap(), vec!["gone"]);
        assert!(!provider.exists(&ctx, "gone").unwrap());

        // Deleting the absent entry leaves the index untouched
        provider.delete(&ctx, "gone").unwrap();
        assert_eq!(provider.list(&ctx, "").unwrap(), vec!["gone"]);
    }

    #[test]
    fn test_capabilities() {
        let (plain, _) = memory_provider(KeyringConfig::new());
        let caps = plain.capabilities();
        assert!(caps.read && caps.write && caps.delete && caps.list);
        assert!(!caps.multi_field);

        let (json, _) = memory_provider(structured());
        assert!(json.capabilities().multi_field);
    }

    #[test]
    fn test_close() {
        let (provider, store) =
            memory_provider(KeyringConfig::new().with_service_name("test-close"));
        let ctx = Context::background();

        provider.set(&ctx, "test", &Secret::new("value")).unwrap();
        provider.close().unwrap();
        assert!(provider.is_closed());

        let calls = store.calls();
        assert!(provider.get(&ctx, "test").unwrap_err().is_closed());
        assert!(provider
            .set(&ctx, "test2", &Secret::new("value"))
            .unwrap_err()
            .is_closed());
        assert!(provider.delete(&ctx, "test").unwrap_err().is_closed());
        assert!(provider.exists(&ctx, "test").unwrap_err().is_closed());
        assert!(provider.list(&ctx, "").unwrap_err().is_closed());
        assert_eq!(store.calls(), calls, "closed provider touched the store");

        // Close is idempotent
        provider.close().unwrap();
        assert!(provider.is_closed());
        assert_eq!(store.raw_get("test-close", "test").as_deref(), Some("value"));
    }

    #[test]
    fn test_normal_operations_do_not_report_index_errors() {
        let (config, reports) = recording_config("test-index-ok");
        let (provider, _) = memory_provider(config);
        let ctx = Context::background();

        provider.set(&ctx, "normal-key", &Secret::new("value")).unwrap();
        provider.list(&ctx, "").unwrap();
        provider.delete(&ctx, "normal-key").unwrap();

        assert!(reports.lock().is_empty());
    }

    #[test]
    fn test_index_save_failure_is_isolated() {
        let (config, reports) = recording_config("test-index-save");
        let (provider, store) = memory_provider(config);
        let ctx = Context::background();
        store.fail_writes(INDEX_KEY);

        provider.set(&ctx, "app/token", &Secret::new("value")).unwrap();
        assert_eq!(*reports.lock(), vec![IndexOp::Save]);
        assert_eq!(provider.get(&ctx, "app/token").unwrap().value, "value");

        provider.delete(&ctx, "app/token").unwrap();
        assert_eq!(*reports.lock(), vec![IndexOp::Save, IndexOp::Save]);
        assert!(!provider.exists(&ctx, "app/token").unwrap());

        // The index never got written
        assert!(provider.list(&ctx, "").unwrap().is_empty());
        assert_eq!(reports.lock().len(), 2);
    }

    #[test]
    fn test_index_unavailable_is_isolated() {
        let (config, reports) = recording_config("test-index-down");
        let (provider, store) = memory_provider(config);
        let ctx = Context::background();
        store.fail_all(INDEX_KEY);

        provider.set(&ctx, "k", &Secret::new("v")).unwrap();
        assert_eq!(*reports.lock(), vec![IndexOp::Load, IndexOp::Save]);

        assert!(provider.list(&ctx, "").unwrap().is_empty());
        assert_eq!(reports.lock().last(), Some(&IndexOp::Load));
    }

    #[test]
    fn test_corrupt_index_is_isolated() {
        let (config, reports) = recording_config("test-index-corrupt");
        let (provider, store) = memory_provider(config);
        let ctx = Context::background();
        store.raw_set("test-index-corrupt", INDEX_KEY, "{garbage");

        assert!(provider.list(&ctx, "").unwrap().is_empty());
        assert_eq!(*reports.lock(), vec![IndexOp::Unmarshal]);

        // The next write rebuilds the index from scratch
        provider.set(&ctx, "fresh", &Secret::new("v")).unwrap();
        assert_eq!(provider.list(&ctx, "").unwrap(), vec!["fresh"]);
    }

    #[test]
    fn test_index_errors_without_handler_are_dropped() {
        let (provider, store) = memory_provider(KeyringConfig::new());
        let ctx = Context::background();
        store.fail_writes(INDEX_KEY);

        provider.set(&ctx, "k", &Secret::new("v")).unwrap();
        provider.delete(&ctx, "k").unwrap();
    }

    #[test]
    fn test_cancelled_context_is_accepted() {
        let (provider, _) = memory_provider(KeyringConfig::new());
        let ctx = Context::background();
        ctx.cancel();

        provider.set(&ctx, "k", &Secret::new("v")).unwrap();
        assert_eq!(provider.get(&ctx, "k").unwrap().value, "v");
    }

    #[test]
    fn test_services_are_isolated() {
        let store = Arc::new(MemoryStore::new());
        let ctx = Context::background();
        let a =
            KeyringProvider::with_store(KeyringConfig::new().with_service_name("a"), store.clone());
        let b =
            KeyringProvider::with_store(KeyringConfig::new().with_service_name("b"), store.clone());

        a.set(&ctx, "token", &Secret::new("from-a")).unwrap();
        assert!(b.get(&ctx, "token").unwrap_err().is_not_found());
        assert!(b.list(&ctx, "").unwrap().is_empty());
        assert_eq!(a.list(&ctx, "").unwrap(), vec!["token"]);
    }

    #[test]
    fn test_usable_as_trait_object() {
        let (provider, _) = memory_provider(KeyringConfig::new());
        let vault: Arc<dyn Vault> = Arc::new(provider);
        let ctx = Context::background();

        vault.set(&ctx, "k", &Secret::new("v")).unwrap();
        assert_eq!(vault.get(&ctx, "k").unwrap().value, "v");
        vault.close().unwrap();
    }

    #[test]
    fn test_concurrent_access() {
        let (provider, _) =
            memory_provider(KeyringConfig::new().with_service_name("test-concurrent"));
        let provider = Arc::new(provider);
        let mut handles = vec![];

        for i in 0..10 {
            let writer = Arc::clone(&provider);
            handles.push(thread::spawn(move || {
                let ctx = Context::background();
                writer
                    .set(&ctx, "concurrent-key", &Secret::new("value"))
                    .unwrap();
                writer
                    .set(&ctx, &format!("key-{i}"), &Secret::new("value"))
                    .unwrap();
            }));

            let reader = Arc::clone(&provider);
            handles.push(thread::spawn(move || {
                let ctx = Context::background();
                let _ = reader.get(&ctx, "concurrent-key");
                let _ = reader.exists(&ctx, "concurrent-key");
                reader.list(&ctx, "").unwrap();
            }));
        }

        for handle in handles {
            handle.join().unwrap();
        }

        let ctx = Context::background();
        let listed = provider.list(&ctx, "").unwrap();
        assert_eq!(listed.len(), 11);
        assert_eq!(listed.iter().filter(|k| *k == "concurrent-key").count(), 1);
        for i in 0..10 {
            assert!(listed.contains(&format!("key-{i}")));
        }
    }

    #[test]
    #[ignore] // Requires system keychain
    fn test_system_keychain_roundtrip() {
        let provider = KeyringProvider::new(
            KeyringConfig::new()
                .with_service_name("omnivault-keyring-test")
                .with_json_format(true),
        );
        let ctx = Context::background();

        provider
            .set(&ctx, "db", &Secret::new("pw").with_field("user", "admin"))
            .unwrap();
        let secret = provider.get(&ctx, "db").unwrap();
        assert_eq!(secret.field("user"), Some("admin"));
        assert!(provider.list(&ctx, "").unwrap().contains(&"db".to_string()));

        provider.delete(&ctx, "db").unwrap();
        provider.delete(&ctx, INDEX_KEY).unwrap();
    }
}
