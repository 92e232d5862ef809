//! HashiCorp Vault client for certificator.
//!
//! Authenticates once at construction (explicit token, dev root token or
//! approle) and exposes KV v2 reads and writes under a fixed path prefix.

#![forbid(unsafe_code)]
#![warn(missing_docs)]

pub mod auth;
pub mod client;
pub mod config;
pub mod error;
pub mod secrets;
pub mod transport;

pub use auth::{AuthStrategy, DEV_ROOT_TOKEN_VAR};
pub use client::VaultClient;
pub use config::{DEFAULT_KV_STORAGE_PATH, DEFAULT_VAULT_ADDR, VaultConfig};
pub use error::{VaultError, VaultResult};
pub use secrets::{ApproleLogin, Secret, SecretAuth};
pub use transport::{APPROLE_LOGIN_PATH, HttpTransport, VaultTransport};
