//! Certificator - configuration resolution and Vault-backed certificate storage.
//!
//! Resolves the process configuration from environment variables (with a
//! domains file or an explicit domain list) and connects to Vault, where
//! certificates are kept under a KV v2 prefix.

#![forbid(unsafe_code)]
#![warn(missing_docs)]

pub mod config;
pub mod domains;
pub mod error;
pub mod startup;

pub use config::{AcmeConfig, Config, LogConfig};
pub use domains::DomainSource;
pub use error::ConfigError;
pub use startup::{DomainStatus, inventory};
