//! Vault HTTP surface.
//!
//! [`VaultTransport`] is the seam between the client logic and the network:
//! [`HttpTransport`] talks to a real Vault over reqwest, tests substitute an
//! in-memory implementation.

use crate::{
    config::VaultConfig,
    error::{VaultError, VaultResult},
    secrets::{ApproleLogin, Secret},
};
use async_trait::async_trait;
use certificator_common::{HttpConfig, build_http_client};
use reqwest::{Client, Method, RequestBuilder, Response, StatusCode};
use secrecy::{ExposeSecret, SecretString};
use serde_json::Value;
use tracing::debug;
use url::Url;

/// Approle login endpoint, relative to `/v1/`.
pub const APPROLE_LOGIN_PATH: &str = "auth/approle/login";

/// Login, read and write against a Vault server.
///
/// `Ok(None)` means Vault answered without a body (or, for reads, that
/// nothing is stored at the path).
#[async_trait]
pub trait VaultTransport: Send + Sync {
    /// Exchange approle credentials for a session.
    async fn login(&self, credentials: &ApproleLogin) -> VaultResult<Option<Secret>>;

    /// Read the logical path.
    async fn read(&self, token: &SecretString, path: &str) -> VaultResult<Option<Secret>>;

    /// Write `body` to the logical path.
    async fn write(
        &self,
        token: &SecretString,
        path: &str,
        body: &Value,
    ) -> VaultResult<Option<Secret>>;
}

/// reqwest-backed transport.
#[derive(Debug, Clone)]
pub struct HttpTransport {
    addr: Url,
    http: Client,
}

impl HttpTransport {
    /// Create a transport for `config.addr`.
    ///
    /// # Errors
    ///
    /// Fails if the address is not a URL or the HTTP client cannot be built.
    pub fn new(config: &VaultConfig) -> VaultResult<Self> {
        let addr = Url::parse(&config.addr)
            .map_err(|e| VaultError::InvalidConfig(format!("Vault address {}: {e}", config.addr)))?;
        let http = build_http_client(&HttpConfig::default().with_timeout(config.timeout))?;
        Ok(Self { addr, http })
    }

    /// Server address.
    #[must_use]
    pub const fn addr(&self) -> &Url {
        &self.addr
    }

    fn url(&self, path: &str) -> String {
        format!("{}/v1/{}", self.addr.as_str().trim_end_matches('/'), path)
    }

    fn request(&self, method: Method, token: Option<&SecretString>, path: &str) -> RequestBuilder {
        let request = self.http.request(method, self.url(path));
        match token.map(|t| t.expose_secret()) {
            Some(token) if !token.is_empty() => request.header("X-Vault-Token", token),
            _ => request,
        }
    }

    async fn send(request: RequestBuilder) -> VaultResult<Response> {
        request
            .send()
            .await
            .map_err(|e| VaultError::unavailable(e.to_string()))
    }

    async fn parse(response: Response) -> VaultResult<Option<Secret>> {
        let status = response.status();
        let body = response.text().await?;

        if !status.is_success() {
            return Err(VaultError::Api {
                status: status.as_u16(),
                body,
            });
        }

        if body.trim().is_empty() {
            return Ok(None);
        }

        Ok(Some(serde_json::from_str(&body)?))
    }
}

#[async_trait]
impl VaultTransport for HttpTransport {
    async fn login(&self, credentials: &ApproleLogin) -> VaultResult<Option<Secret>> {
        let request = self
            .request(Method::PUT, None, APPROLE_LOGIN_PATH)
            .json(credentials);
        Self::parse(Self::send(request).await?).await
    }

    async fn read(&self, token: &SecretString, path: &str) -> VaultResult<Option<Secret>> {
        let response = Self::send(self.request(Method::GET, Some(token), path)).await?;

        if response.status() == StatusCode::NOT_FOUND {
            debug!(path, "Nothing stored at Vault path");
            return Ok(None);
        }

        Self::parse(response).await
    }

    async fn write(
        &self,
        token: &SecretString,
        path: &str,
        body: &Value,
    ) -> VaultResult<Option<Secret>> {
        let request = self.request(Method::PUT, Some(token), path).json(body);
        Self::parse(Self::send(request).await?).await
    }
}
