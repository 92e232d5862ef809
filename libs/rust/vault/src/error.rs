//! Vault error types using thiserror 2.0.
//!
//! KV and authentication failures wrap the transport-level cause so callers
//! see both the path involved and what actually went wrong.

use thiserror::Error;

/// Vault-specific errors.
#[derive(Error, Debug)]
pub enum VaultError {
    /// Vault server unreachable
    #[error("Vault unavailable: {0}")]
    Unavailable(String),

    /// Vault answered with a non-success status
    #[error("Vault responded with status {status}: {body}")]
    Api {
        /// HTTP status code
        status: u16,
        /// Raw response body
        body: String,
    },

    /// HTTP error
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// Serialization error
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// Invalid configuration
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    /// Vault answered successfully but the body lacks a required field
    #[error("Unexpected Vault response: {0}")]
    InvalidResponse(String),

    /// Approle login failed
    #[error("Authentication failed: {source}")]
    AuthenticationFailed {
        /// Underlying cause
        #[source]
        source: Box<VaultError>,
    },

    /// KV write failed
    #[error(
        "failed storing KV value to Vault at path: {path}, got: {}, error: {source}",
        .response.as_deref().unwrap_or("<none>")
    )]
    KvWrite {
        /// Full path including the prefix
        path: String,
        /// Raw response body, if Vault returned one
        response: Option<String>,
        /// Underlying cause
        #[source]
        source: Box<VaultError>,
    },

    /// KV read failed
    #[error(
        "failed reading KV from Vault at path: {path}, got: {}, error: {source}",
        .response.as_deref().unwrap_or("<none>")
    )]
    KvRead {
        /// Full path including the prefix
        path: String,
        /// Raw response body, if Vault returned one
        response: Option<String>,
        /// Underlying cause
        #[source]
        source: Box<VaultError>,
    },
}

/// Result type for Vault operations.
pub type VaultResult<T> = Result<T, VaultError>;

impl VaultError {
    /// Check if error is retryable.
    ///
    /// Nothing in this crate retries; the classification is for callers.
    #[must_use]
    pub fn is_retryable(&self) -> bool {
        match self {
            Self::Unavailable(_) | Self::Http(_) => true,
            Self::Api { status, .. } => *status == 429 || *status >= 500,
            Self::AuthenticationFailed { source }
            | Self::KvWrite { source, .. }
            | Self::KvRead { source, .. } => source.is_retryable(),
            Self::Serialization(_) | Self::InvalidConfig(_) | Self::InvalidResponse(_) => false,
        }
    }

    /// Raw response body carried by this error, if any.
    #[must_use]
    pub fn raw_response(&self) -> Option<&str> {
        match self {
            Self::Api { body, .. } => Some(body),
            Self::KvWrite { response, .. } | Self::KvRead { response, .. } => response.as_deref(),
            Self::AuthenticationFailed { source } => source.raw_response(),
            _ => None,
        }
    }

    /// Create an unavailable error.
    #[must_use]
    pub fn unavailable(msg: impl Into<String>) -> Self {
        Self::Unavailable(msg.into())
    }

    /// Create an invalid response error.
    #[must_use]
    pub fn invalid_response(msg: impl Into<String>) -> Self {
        Self::InvalidResponse(msg.into())
    }

    /// Wrap a login failure.
    #[must_use]
    pub fn auth_failed(source: Self) -> Self {
        Self::AuthenticationFailed {
            source: Box::new(source),
        }
    }

    /// Wrap a KV write failure at `path`.
    #[must_use]
    pub fn kv_write(path: impl Into<String>, source: Self) -> Self {
        Self::KvWrite {
            path: path.into(),
            response: source.raw_response().map(str::to_owned),
            source: Box::new(source),
        }
    }

    /// Wrap a KV read failure at `path`.
    #[must_use]
    pub fn kv_read(path: impl Into<String>, source: Self) -> Self {
        Self::KvRead {
            path: path.into(),
            response: source.raw_response().map(str::to_owned),
            source: Box::new(source),
        }
    }
}
