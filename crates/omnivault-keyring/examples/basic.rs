//! Store, read, list and delete secrets in the OS keychain.
//!
//! ```sh
//! RUST_LOG=omnivault_keyring=debug cargo run --example basic
//! ```

use std::sync::Arc;

use omnivault_keyring::{
    Context, KeyringConfig, KeyringProvider, Secret, TracingSink, Vault, VaultError,
};
use tracing_subscriber::EnvFilter;

fn main() -> Result<(), VaultError> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    let vault = KeyringProvider::new(
        KeyringConfig::new()
            .with_service_name("myapp")
            .with_json_format(true)
            .with_shared_index_error_handler(Arc::new(TracingSink::for_service("myapp"))),
    );
    let ctx = Context::background();

    println!("Using backend: {}", vault.backend());
    println!("Service name: {}\n", vault.service_name());

    vault.set(
        &ctx,
        "database/credentials",
        &Secret::new("mypassword")
            .with_field("username", "admin")
            .with_field("host", "localhost")
            .with_field("port", "5432"),
    )?;
    vault.set(&ctx, "api/token", &Secret::new("secret-token-12345"))?;

    let secret = vault.get(&ctx, "database/credentials")?;
    println!("Username: {}", secret.field("username").unwrap_or_default());
    println!("Host: {}\n", secret.field("host").unwrap_or_default());

    println!("Secrets:");
    for path in vault.list(&ctx, "")? {
        println!("  - {path}");
    }

    vault.delete(&ctx, "database/credentials")?;
    vault.delete(&ctx, "api/token")?;
    vault.close()
}
