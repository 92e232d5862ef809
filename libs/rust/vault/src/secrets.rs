//! Vault wire types.

use secrecy::{ExposeSecret, SecretString};
use serde::{Deserialize, Serialize, Serializer};
use serde_json::{Map, Value};
use std::collections::HashMap;

/// Generic Vault logical response.
///
/// KV v2 reads return `{"data": {"data": {...}, "metadata": {...}}}`; login
/// responses carry an `auth` block instead.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Secret {
    /// Response payload
    #[serde(default)]
    pub data: Option<Map<String, Value>>,
    /// Auth block, present on login responses
    #[serde(default)]
    pub auth: Option<SecretAuth>,
}

impl Secret {
    /// The KV v2 payload nested under `data.data`.
    ///
    /// Returns `None` when the envelope is missing or not an object.
    #[must_use]
    pub fn into_kv_data(self) -> Option<Map<String, Value>> {
        match self.data?.remove("data")? {
            Value::Object(map) => Some(map),
            _ => None,
        }
    }

    /// The client token from a login response.
    #[must_use]
    pub fn client_token(&self) -> Option<&str> {
        self.auth
            .as_ref()
            .and_then(|auth| auth.client_token.as_deref())
            .filter(|token| !token.is_empty())
    }
}

/// Auth block of a login response.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct SecretAuth {
    /// Session token issued by the login
    #[serde(default)]
    pub client_token: Option<String>,
}

/// Approle login request body.
#[derive(Debug, Clone, Serialize)]
pub struct ApproleLogin {
    /// Role ID
    pub role_id: String,
    /// Secret ID, exposed only when serialized
    #[serde(serialize_with = "expose")]
    pub secret_id: SecretString,
}

/// KV v2 write request body.
#[derive(Debug, Serialize)]
pub struct KvWriteRequest<'a> {
    /// Key/value pairs to store
    pub data: &'a HashMap<String, String>,
}

fn expose<S: Serializer>(secret: &SecretString, serializer: S) -> Result<S::Ok, S::Error> {
    serializer.serialize_str(secret.expose_secret())
}
