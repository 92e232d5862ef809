//! Shared proptest generators.

use proptest::prelude::*;
use std::collections::HashMap;

/// Generate DNS-style domain names.
pub fn domain_strategy() -> impl Strategy<Value = String> {
    (
        prop::collection::vec("[a-z][a-z0-9-]{0,10}[a-z0-9]", 1..4),
        "(com|org|net|io|lt)",
    )
        .prop_map(|(labels, tld)| format!("{}.{tld}", labels.join(".")))
}

/// Generate non-empty ordered domain lists.
pub fn domain_list_strategy() -> impl Strategy<Value = Vec<String>> {
    prop::collection::vec(domain_strategy(), 1..8)
}

/// Generate surrounding whitespace for list entries.
pub fn padding_strategy() -> impl Strategy<Value = String> {
    "[ \t]{0,3}"
}

/// Generate KV logical paths, separators included or not.
pub fn kv_path_strategy() -> impl Strategy<Value = String> {
    prop_oneof![
        Just("foo/bar".to_string()),
        domain_strategy(),
        prop::collection::vec("[a-z0-9_.-]{1,12}", 1..4).prop_map(|segments| segments.join("/")),
        "/[a-z]{1,8}".prop_map(|s| s.to_string()),
    ]
}

/// Generate KV prefixes.
pub fn kv_prefix_strategy() -> impl Strategy<Value = String> {
    prop_oneof![
        Just("secret/data/certificator/".to_string()),
        Just(String::new()),
        "[a-z]{1,8}(/[a-z]{1,8}){0,3}/?".prop_map(|s| s.to_string()),
    ]
}

/// Generate small string-to-string secret payloads.
pub fn kv_value_strategy() -> impl Strategy<Value = HashMap<String, String>> {
    prop::collection::hash_map("[a-z_]{1,12}", "[ -~]{0,32}", 0..5)
}
