//! Vault KV v2 client.

use crate::{
    auth::AuthStrategy,
    config::VaultConfig,
    error::{VaultError, VaultResult},
    secrets::KvWriteRequest,
    transport::{HttpTransport, VaultTransport},
};
use certificator_common::{EnvSource, Environment};
use secrecy::SecretString;
use serde_json::{Map, Value};
use std::collections::HashMap;
use tracing::{info, instrument};

/// Authenticated Vault client scoped to a KV path prefix.
///
/// The session token is obtained once in the constructor and never renewed.
pub struct VaultClient<T = HttpTransport> {
    transport: T,
    token: SecretString,
    kv_prefix: String,
}

impl VaultClient<HttpTransport> {
    /// Authenticate against the Vault at `config.addr`.
    ///
    /// # Errors
    ///
    /// Fails on an invalid address or when approle login fails.
    pub async fn new(
        config: &VaultConfig,
        environment: &Environment,
        env: &impl EnvSource,
    ) -> VaultResult<Self> {
        let transport = HttpTransport::new(config)?;
        Self::with_transport(transport, config, environment, env).await
    }
}

impl<T: VaultTransport> VaultClient<T> {
    /// Authenticate over a caller-supplied transport.
    ///
    /// # Errors
    ///
    /// Returns [`VaultError::AuthenticationFailed`] when approle login fails.
    #[instrument(skip_all, fields(environment = %environment))]
    pub async fn with_transport(
        transport: T,
        config: &VaultConfig,
        environment: &Environment,
        env: &impl EnvSource,
    ) -> VaultResult<Self> {
        let strategy = AuthStrategy::resolve(config, environment, env);
        let method = strategy.name();
        let token = strategy.authenticate(&transport).await?;

        info!(method, "Authenticated with Vault");

        Ok(Self {
            transport,
            token,
            kv_prefix: config.kv_storage_path.clone(),
        })
    }

    /// Session token.
    #[must_use]
    pub const fn token(&self) -> &SecretString {
        &self.token
    }

    /// KV path prefix.
    #[must_use]
    pub fn kv_prefix(&self) -> &str {
        &self.kv_prefix
    }

    /// The transport in use.
    #[must_use]
    pub const fn transport(&self) -> &T {
        &self.transport
    }

    /// Prefix + path, concatenated verbatim.
    #[must_use]
    pub fn full_path(&self, path: &str) -> String {
        format!("{}{}", self.kv_prefix, path)
    }

    /// Write `value` to KV v2 storage under `path`.
    ///
    /// # Errors
    ///
    /// Returns [`VaultError::KvWrite`] carrying the full path and raw response.
    pub async fn kv_write(&self, path: &str, value: &HashMap<String, String>) -> VaultResult<()> {
        let full_path = self.full_path(path);
        info!(path = %full_path, "Writing to Vault path");

        let payload = serde_json::to_value(KvWriteRequest { data: value })
            .map_err(|e| VaultError::kv_write(&full_path, e.into()))?;

        self.transport
            .write(&self.token, &full_path, &payload)
            .await
            .map_err(|e| VaultError::kv_write(&full_path, e))?;

        Ok(())
    }

    /// Read the KV v2 payload stored under `path`.
    ///
    /// `Ok(None)` covers both "nothing stored" and a response whose
    /// `data.data` is not an object.
    ///
    /// # Errors
    ///
    /// Returns [`VaultError::KvRead`] carrying the full path and raw response.
    pub async fn kv_read(&self, path: &str) -> VaultResult<Option<Map<String, Value>>> {
        let full_path = self.full_path(path);
        info!(path = %full_path, "Reading Vault path");

        let secret = self
            .transport
            .read(&self.token, &full_path)
            .await
            .map_err(|e| VaultError::kv_read(&full_path, e))?;

        Ok(secret.and_then(|secret| secret.into_kv_data()))
    }
}

impl<T> std::fmt::Debug for VaultClient<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("VaultClient")
            .field("token", &"[REDACTED]")
            .field("kv_prefix", &self.kv_prefix)
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::secrets::{ApproleLogin, Secret};
    use async_trait::async_trait;
    use certificator_common::MapEnv;
    use secrecy::ExposeSecret;

    struct Unreachable;

    #[async_trait]
    impl VaultTransport for Unreachable {
        async fn login(&self, _: &ApproleLogin) -> VaultResult<Option<Secret>> {
            Err(VaultError::unavailable("connection refused"))
        }

        async fn read(&self, _: &SecretString, _: &str) -> VaultResult<Option<Secret>> {
            Err(VaultError::unavailable("connection refused"))
        }

        async fn write(&self, _: &SecretString, _: &str, _: &Value) -> VaultResult<Option<Secret>> {
            Err(VaultError::unavailable("connection refused"))
        }
    }

    async fn token_client(prefix: &str) -> VaultClient<Unreachable> {
        let config = VaultConfig::default()
            .with_token("tok")
            .with_kv_storage_path(prefix);
        VaultClient::with_transport(Unreachable, &config, &Environment::Prod, &MapEnv::new())
            .await
            .unwrap()
    }

    fn _assert_send_sync<T: Send + Sync>() {}

    #[test]
    fn client_is_send_sync() {
        _assert_send_sync::<VaultClient>();
        _assert_send_sync::<VaultClient<Unreachable>>();
    }

    #[tokio::test]
    async fn test_explicit_token_needs_no_network() {
        let client = token_client("secret/data/certificator/").await;
        assert_eq!(client.token().expose_secret(), "tok");
        assert_eq!(client.kv_prefix(), "secret/data/certificator/");
    }

    #[tokio::test]
    async fn test_full_path_is_plain_concatenation() {
        let client = token_client("secret/data/certificator/").await;
        assert_eq!(client.full_path("foo/bar"), "secret/data/certificator/foo/bar");
        assert_eq!(client.full_path("/foo"), "secret/data/certificator//foo");

        let client = token_client("kv").await;
        assert_eq!(client.full_path("foo"), "kvfoo");
    }

    #[tokio::test]
    async fn test_approle_login_failure_is_fatal() {
        let config = VaultConfig::default().with_approle("role", "secret");
        let err = VaultClient::with_transport(Unreachable, &config, &Environment::Prod, &MapEnv::new())
            .await
            .unwrap_err();
        assert!(matches!(err, VaultError::AuthenticationFailed { .. }));
    }

    #[tokio::test]
    async fn test_transport_errors_are_wrapped() {
        let client = token_client("secret/").await;

        let err = client.kv_read("a").await.unwrap_err();
        assert!(matches!(&err, VaultError::KvRead { path, response: None, .. } if path == "secret/a"));

        let err = client.kv_write("b", &HashMap::new()).await.unwrap_err();
        assert!(matches!(&err, VaultError::KvWrite { path, response: None, .. } if path == "secret/b"));
    }

    #[tokio::test]
    async fn test_debug_hides_token() {
        let client = token_client("secret/").await;
        let debug = format!("{client:?}");
        assert!(debug.contains("[REDACTED]"));
        assert!(!debug.contains("tok\""));
    }
}
