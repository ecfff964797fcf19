//! Core types shared by the vault interface and the keyring provider

mod context;
mod secret;

pub use context::Context;
pub use secret::{Capabilities, Metadata, Secret};
