//! Authentication strategy selection.
//!
//! The strategy is picked once, before any network call, in this order:
//! an explicit token, the dev root token (dev environment only), approle.

use crate::{
    config::VaultConfig,
    error::{VaultError, VaultResult},
    secrets::ApproleLogin,
    transport::VaultTransport,
};
use certificator_common::{EnvSource, Environment};
use secrecy::{ExposeSecret, SecretString};
use tracing::{debug, warn};

/// Variable holding the root token of a dev-mode Vault.
pub const DEV_ROOT_TOKEN_VAR: &str = "VAULT_DEV_ROOT_TOKEN_ID";

/// How the client obtains its session token.
#[derive(Debug, Clone)]
pub enum AuthStrategy {
    /// Use the configured token as-is.
    ExplicitToken(SecretString),
    /// Use the dev-mode root token from the environment.
    DevToken(SecretString),
    /// Log in with approle credentials.
    Approle {
        /// Role ID
        role_id: String,
        /// Secret ID
        secret_id: SecretString,
    },
}

impl AuthStrategy {
    /// Pick the strategy for `config` in `environment`.
    pub fn resolve(config: &VaultConfig, environment: &Environment, env: &impl EnvSource) -> Self {
        if let Some(token) = config
            .token
            .as_ref()
            .filter(|token| !token.expose_secret().is_empty())
        {
            return Self::ExplicitToken(token.clone());
        }

        if environment.is_dev() {
            let token = env.get(DEV_ROOT_TOKEN_VAR).unwrap_or_default();
            if token.is_empty() {
                warn!(var = DEV_ROOT_TOKEN_VAR, "Dev root token is empty");
            }
            return Self::DevToken(SecretString::from(token));
        }

        Self::Approle {
            role_id: config.approle_role_id.clone(),
            secret_id: config.approle_secret_id.clone(),
        }
    }

    /// Short name for logs.
    #[must_use]
    pub const fn name(&self) -> &'static str {
        match self {
            Self::ExplicitToken(_) => "token",
            Self::DevToken(_) => "dev-token",
            Self::Approle { .. } => "approle",
        }
    }

    /// Obtain the session token.
    ///
    /// Only the approle strategy touches the network.
    ///
    /// # Errors
    ///
    /// Returns [`VaultError::AuthenticationFailed`] if the approle login
    /// fails or its response carries no client token.
    pub async fn authenticate<T>(self, transport: &T) -> VaultResult<SecretString>
    where
        T: VaultTransport + ?Sized,
    {
        match self {
            Self::ExplicitToken(token) | Self::DevToken(token) => Ok(token),
            Self::Approle { role_id, secret_id } => {
                debug!(role_id = %role_id, "Logging in with approle");
                let credentials = ApproleLogin { role_id, secret_id };
                let response = transport
                    .login(&credentials)
                    .await
                    .map_err(VaultError::auth_failed)?;

                response
                    .as_ref()
                    .and_then(|secret| secret.client_token())
                    .map(|token| SecretString::from(token.to_owned()))
                    .ok_or_else(|| {
                        VaultError::auth_failed(VaultError::invalid_response(
                            "login response carried no client token",
                        ))
                    })
            }
        }
    }
}
