//! Property-based tests for the Vault client.

use certificator_common::{Environment, MapEnv};
use certificator_test_utils::{
    MockTransport, kv_path_strategy, kv_prefix_strategy, kv_value_strategy,
};
use certificator_vault::{VaultClient, VaultConfig};
use proptest::prelude::*;
use secrecy::ExposeSecret;
use serde_json::json;
use tokio_test::block_on;

proptest! {
    #![proptest_config(ProptestConfig::with_cases(64))]

    /// The full path is the prefix followed by the path, nothing normalised.
    #[test]
    fn prop_full_path_is_concatenation(
        prefix in kv_prefix_strategy(),
        path in kv_path_strategy(),
    ) {
        let config = VaultConfig::default().with_token("t").with_kv_storage_path(prefix.clone());
        let client = block_on(VaultClient::with_transport(MockTransport::new(), &config, &Environment::Prod, &MapEnv::new()))
            .unwrap();

        let full = client.full_path(&path);
        prop_assert!(full.starts_with(&prefix));
        prop_assert!(full.ends_with(&path));
        prop_assert_eq!(full.len(), prefix.len() + path.len());
    }

    /// Writes always land at prefix + path wrapped in a `data` envelope.
    #[test]
    fn prop_write_envelope(
        path in kv_path_strategy(),
        value in kv_value_strategy(),
    ) {
        let transport = MockTransport::new();
        let config = VaultConfig::default().with_token("t");

        let writes = block_on(async {
            let client = VaultClient::with_transport(transport.clone(), &config, &Environment::Prod, &MapEnv::new())
                .await
                .unwrap();
            client.kv_write(&path, &value).await.unwrap();
            transport.writes().await
        });

        prop_assert_eq!(writes.len(), 1);
        prop_assert_eq!(&writes[0].path, &format!("secret/data/certificator/{path}"));
        prop_assert_eq!(&writes[0].body, &json!({"data": value}));
    }

    /// An explicit token is used verbatim whatever the environment.
    #[test]
    fn prop_explicit_token_verbatim(
        token in "[A-Za-z0-9.]{1,40}",
        dev in any::<bool>(),
    ) {
        let environment = if dev { Environment::Dev } else { Environment::Prod };
        let config = VaultConfig::default().with_token(token.clone());
        let client = block_on(VaultClient::with_transport(MockTransport::new(), &config, &environment, &MapEnv::new()))
            .unwrap();

        prop_assert_eq!(client.token().expose_secret(), token.as_str());
    }
}

#[test]
fn test_config_debug_does_not_leak_secrets() {
    let config = VaultConfig::default()
        .with_approle("role", "super-secret-id")
        .with_token("super-secret-token");

    let debug = format!("{config:?}");
    assert!(!debug.contains("super-secret-id"));
    assert!(!debug.contains("super-secret-token"));
}
