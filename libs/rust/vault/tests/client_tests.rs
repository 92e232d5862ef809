//! Client tests against the in-memory transport.

use certificator_common::{Environment, MapEnv};
use certificator_test_utils::MockTransport;
use certificator_vault::{DEV_ROOT_TOKEN_VAR, VaultClient, VaultConfig, VaultError};
use secrecy::ExposeSecret;
use serde_json::json;
use std::collections::HashMap;

const ROLE_ID: &str = "roleIDexample";
const SECRET_ID: &str = "secretIDexample";
const PROD_TOKEN: &str = "secretProdTokensss";
const DEV_TOKEN: &str = "secretDevToken";
const VAULT_TOKEN: &str = "vault-token";

fn approle_config() -> VaultConfig {
    VaultConfig::default()
        .with_approle(ROLE_ID, SECRET_ID)
        .with_kv_storage_path("testPrefix")
}

fn env() -> MapEnv {
    MapEnv::new().with(DEV_ROOT_TOKEN_VAR, DEV_TOKEN)
}

fn transport() -> MockTransport {
    MockTransport::with_approle(ROLE_ID, SECRET_ID, PROD_TOKEN)
}

#[tokio::test]
async fn prod_environment_logs_in_with_approle() {
    let transport = transport();
    let client = VaultClient::with_transport(transport.clone(), &approle_config(), &Environment::Prod, &env())
        .await
        .unwrap();

    assert_eq!(client.token().expose_secret(), PROD_TOKEN);
    assert_eq!(
        transport.logins().await,
        vec![(ROLE_ID.to_string(), SECRET_ID.to_string())]
    );
}

#[tokio::test]
async fn unknown_environment_logs_in_with_approle() {
    let transport = transport();
    let environment = Environment::from("staging");
    let client = VaultClient::with_transport(transport.clone(), &approle_config(), &environment, &env())
        .await
        .unwrap();

    assert_eq!(client.token().expose_secret(), PROD_TOKEN);
    assert_eq!(transport.login_count().await, 1);
}

#[tokio::test]
async fn dev_environment_uses_root_token_even_with_approle_set() {
    let transport = transport();
    let client = VaultClient::with_transport(transport.clone(), &approle_config(), &Environment::Dev, &env())
        .await
        .unwrap();

    assert_eq!(client.token().expose_secret(), DEV_TOKEN);
    assert_eq!(transport.login_count().await, 0);
}

#[tokio::test]
async fn explicit_token_bypasses_dev_and_approle() {
    let config = approle_config().with_token(VAULT_TOKEN);

    for environment in [Environment::Prod, Environment::Dev] {
        let transport = transport();
        let client = VaultClient::with_transport(transport.clone(), &config, &environment, &env())
            .await
            .unwrap();

        assert_eq!(client.token().expose_secret(), VAULT_TOKEN);
        assert_eq!(transport.login_count().await, 0);
    }
}

#[tokio::test]
async fn wrong_approle_credentials_fail_construction() {
    let config = VaultConfig::default().with_approle(ROLE_ID, "wrong");
    let err = VaultClient::with_transport(transport(), &config, &Environment::Prod, &env())
        .await
        .unwrap_err();

    assert!(matches!(err, VaultError::AuthenticationFailed { .. }));
    assert_eq!(err.raw_response(), Some("permission denied"));
}

#[tokio::test]
async fn write_then_read_uses_prefixed_path() {
    let transport = MockTransport::new();
    let config = VaultConfig::default().with_token(VAULT_TOKEN);
    let client = VaultClient::with_transport(transport.clone(), &config, &Environment::Prod, &env())
        .await
        .unwrap();

    let value = HashMap::from([("k".to_string(), "v".to_string())]);
    client.kv_write("foo/bar", &value).await.unwrap();

    let writes = transport.writes().await;
    assert_eq!(writes.len(), 1);
    assert_eq!(writes[0].path, "secret/data/certificator/foo/bar");
    assert_eq!(writes[0].body, json!({"data": {"k": "v"}}));
    assert_eq!(writes[0].token, VAULT_TOKEN);

    let read = client.kv_read("foo/bar").await.unwrap().unwrap();
    assert_eq!(read.get("k"), Some(&json!("v")));
}

#[tokio::test]
async fn read_of_missing_or_malformed_secret_is_none() {
    let transport = MockTransport::new();
    transport
        .insert_raw("secret/data/certificator/flat", json!({"data": {"k": "v"}}))
        .await;
    transport
        .insert_raw("secret/data/certificator/string", json!({"data": {"data": "v"}}))
        .await;
    let config = VaultConfig::default().with_token(VAULT_TOKEN);
    let client = VaultClient::with_transport(transport, &config, &Environment::Prod, &env())
        .await
        .unwrap();

    assert!(client.kv_read("absent").await.unwrap().is_none());
    assert!(client.kv_read("flat").await.unwrap().is_none());
    assert!(client.kv_read("string").await.unwrap().is_none());
}

#[tokio::test]
async fn kv_failures_carry_path_and_raw_response() {
    let transport = MockTransport::new();
    transport.fail_with(403, "permission denied").await;
    let config = VaultConfig::default().with_token(VAULT_TOKEN);
    let client = VaultClient::with_transport(transport, &config, &Environment::Prod, &env())
        .await
        .unwrap();

    let err = client.kv_read("foo").await.unwrap_err();
    assert!(matches!(&err, VaultError::KvRead { path, .. } if path == "secret/data/certificator/foo"));
    assert_eq!(err.raw_response(), Some("permission denied"));
    assert!(err.to_string().contains("secret/data/certificator/foo"));

    let err = client.kv_write("foo", &HashMap::new()).await.unwrap_err();
    assert!(matches!(&err, VaultError::KvWrite { path, .. } if path == "secret/data/certificator/foo"));
    assert!(err.to_string().contains("permission denied"));
}
