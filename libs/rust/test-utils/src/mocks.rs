//! Mock implementations for testing.
//!
//! [`MockTransport`] emulates a KV v2 Vault in memory: writes are stored
//! under their full path and served back with the `data.data` envelope.

use async_trait::async_trait;
use certificator_vault::{ApproleLogin, Secret, VaultError, VaultResult, VaultTransport};
use secrecy::{ExposeSecret, SecretString};
use serde_json::{Value, json};
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::RwLock;

/// A write observed by the mock.
#[derive(Debug, Clone, PartialEq)]
pub struct RecordedWrite {
    /// Full logical path
    pub path: String,
    /// Token sent with the request
    pub token: String,
    /// Request body
    pub body: Value,
}

#[derive(Debug, Default)]
struct MockState {
    responses: HashMap<String, Value>,
    writes: Vec<RecordedWrite>,
    logins: Vec<(String, String)>,
    approle: Option<(String, String, String)>,
    failure: Option<(u16, String)>,
}

/// In-memory Vault transport.
#[derive(Debug, Clone, Default)]
pub struct MockTransport {
    state: Arc<RwLock<MockState>>,
}

impl MockTransport {
    /// Create an empty mock that rejects every approle login.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Create an empty mock accepting approle logins for
    /// `role_id`/`secret_id` and issuing `token`.
    #[must_use]
    pub fn with_approle(role_id: &str, secret_id: &str, token: &str) -> Self {
        let state = MockState {
            approle: Some((role_id.to_string(), secret_id.to_string(), token.to_string())),
            ..MockState::default()
        };
        Self {
            state: Arc::new(RwLock::new(state)),
        }
    }

    /// Serve `response` verbatim for reads of `path`.
    pub async fn insert_raw(&self, path: &str, response: Value) {
        self.state
            .write()
            .await
            .responses
            .insert(path.to_string(), response);
    }

    /// Fail every read and write with the given status and body.
    pub async fn fail_with(&self, status: u16, body: &str) {
        self.state.write().await.failure = Some((status, body.to_string()));
    }

    /// All writes seen so far.
    pub async fn writes(&self) -> Vec<RecordedWrite> {
        self.state.read().await.writes.clone()
    }

    /// Number of login attempts.
    pub async fn login_count(&self) -> usize {
        self.state.read().await.logins.len()
    }

    /// Credentials of every login attempt, as `(role_id, secret_id)`.
    pub async fn logins(&self) -> Vec<(String, String)> {
        self.state.read().await.logins.clone()
    }

    fn failure(state: &MockState) -> VaultResult<()> {
        match &state.failure {
            Some((status, body)) => Err(VaultError::Api {
                status: *status,
                body: body.clone(),
            }),
            None => Ok(()),
        }
    }
}

#[async_trait]
impl VaultTransport for MockTransport {
    async fn login(&self, credentials: &ApproleLogin) -> VaultResult<Option<Secret>> {
        let mut state = self.state.write().await;
        let role_id = credentials.role_id.clone();
        let secret_id = credentials.secret_id.expose_secret().to_string();
        state.logins.push((role_id.clone(), secret_id.clone()));

        match &state.approle {
            Some((role, secret, token)) if *role == role_id && *secret == secret_id => {
                let response = json!({"auth": {"client_token": token}});
                Ok(Some(serde_json::from_value(response)?))
            }
            _ => Err(VaultError::Api {
                status: 403,
                body: "permission denied".to_string(),
            }),
        }
    }

    async fn read(&self, _token: &SecretString, path: &str) -> VaultResult<Option<Secret>> {
        let state = self.state.read().await;
        Self::failure(&state)?;

        match state.responses.get(path) {
            Some(response) => Ok(Some(serde_json::from_value(response.clone())?)),
            None => Ok(None),
        }
    }

    async fn write(
        &self,
        token: &SecretString,
        path: &str,
        body: &Value,
    ) -> VaultResult<Option<Secret>> {
        let mut state = self.state.write().await;
        Self::failure(&state)?;

        state.writes.push(RecordedWrite {
            path: path.to_string(),
            token: token.expose_secret().to_string(),
            body: body.clone(),
        });
        let stored = json!({
            "data": {
                "data": body.get("data").cloned().unwrap_or(Value::Null),
                "metadata": {"version": 1}
            }
        });
        state.responses.insert(path.to_string(), stored);

        Ok(None)
    }
}
