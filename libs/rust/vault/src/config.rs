//! Vault client configuration.

use secrecy::{ExposeSecret, SecretString};
use std::time::Duration;

/// Default Vault address, matching the Vault CLI.
pub const DEFAULT_VAULT_ADDR: &str = "https://127.0.0.1:8200";

/// Default KV v2 storage prefix.
pub const DEFAULT_KV_STORAGE_PATH: &str = "secret/data/certificator/";

/// Vault client configuration.
#[derive(Debug, Clone)]
pub struct VaultConfig {
    /// Vault server address
    pub addr: String,
    /// Approle role ID
    pub approle_role_id: String,
    /// Approle secret ID
    pub approle_secret_id: SecretString,
    /// Pre-issued token; when present approle login is skipped
    pub token: Option<SecretString>,
    /// Prefix prepended verbatim to every KV path
    pub kv_storage_path: String,
    /// Request timeout
    pub timeout: Duration,
}

impl Default for VaultConfig {
    fn default() -> Self {
        Self {
            addr: DEFAULT_VAULT_ADDR.to_string(),
            approle_role_id: String::new(),
            approle_secret_id: SecretString::from(String::new()),
            token: None,
            kv_storage_path: DEFAULT_KV_STORAGE_PATH.to_string(),
            timeout: Duration::from_secs(30),
        }
    }
}

impl PartialEq for VaultConfig {
    fn eq(&self, other: &Self) -> bool {
        self.addr == other.addr
            && self.approle_role_id == other.approle_role_id
            && self.approle_secret_id.expose_secret() == other.approle_secret_id.expose_secret()
            && self.token.as_ref().map(|t| t.expose_secret())
                == other.token.as_ref().map(|t| t.expose_secret())
            && self.kv_storage_path == other.kv_storage_path
            && self.timeout == other.timeout
    }
}

impl VaultConfig {
    /// Create a configuration pointing at `addr`.
    #[must_use]
    pub fn new(addr: impl Into<String>) -> Self {
        Self {
            addr: addr.into(),
            ..Default::default()
        }
    }

    /// Set approle credentials.
    #[must_use]
    pub fn with_approle(mut self, role_id: impl Into<String>, secret_id: impl Into<String>) -> Self {
        self.approle_role_id = role_id.into();
        self.approle_secret_id = SecretString::from(secret_id.into());
        self
    }

    /// Set a pre-issued token.
    #[must_use]
    pub fn with_token(mut self, token: impl Into<String>) -> Self {
        self.token = Some(SecretString::from(token.into()));
        self
    }

    /// Set the KV storage prefix.
    #[must_use]
    pub fn with_kv_storage_path(mut self, path: impl Into<String>) -> Self {
        self.kv_storage_path = path.into();
        self
    }

    /// Set request timeout.
    #[must_use]
    pub const fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = VaultConfig::default();
        assert_eq!(config.addr, "https://127.0.0.1:8200");
        assert_eq!(config.kv_storage_path, "secret/data/certificator/");
        assert!(config.approle_role_id.is_empty());
        assert!(config.token.is_none());
        assert_eq!(config.timeout, Duration::from_secs(30));
    }

    #[test]
    fn test_builder() {
        let config = VaultConfig::default()
            .with_approle("role", "secret")
            .with_token("tok")
            .with_kv_storage_path("kv/");

        assert_eq!(config.approle_role_id, "role");
        assert_eq!(config.approle_secret_id.expose_secret(), "secret");
        assert_eq!(config.token.as_ref().map(|t| t.expose_secret()), Some("tok"));
        assert_eq!(config.kv_storage_path, "kv/");
    }

    #[test]
    fn test_equality_compares_secrets() {
        let a = VaultConfig::default().with_token("one");
        let b = VaultConfig::default().with_token("two");
        assert_ne!(a, b);
        assert_eq!(a, a.clone());
    }

    #[test]
    fn test_debug_redacts_secrets() {
        let config = VaultConfig::default()
            .with_approle("my-role-id", "approle-secret-value")
            .with_token("token-value");
        let debug = format!("{config:?}");
        assert!(!debug.contains("approle-secret-value"));
        assert!(!debug.contains("token-value"));
        assert!(debug.contains("my-role-id"));
    }
}
