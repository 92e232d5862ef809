//! Test fixtures with sample data.

use certificator_common::MapEnv;
use std::io::Write;
use tempfile::NamedTempFile;

/// Account email used by [`required_env`].
pub const ACCOUNT_EMAIL: &str = "test@test.com";

/// Challenge provider used by [`required_env`].
pub const DNS_CHALLENGE_PROVIDER: &str = "exec";

/// Domains file content mirroring the sample `domains.yml`.
pub const SAMPLE_DOMAINS_YAML: &str = "- mydomain.com,www.mydomain.com\n- example.com\n";

/// Entries of [`SAMPLE_DOMAINS_YAML`].
#[must_use]
pub fn sample_domains() -> Vec<String> {
    vec![
        "mydomain.com,www.mydomain.com".to_string(),
        "example.com".to_string(),
    ]
}

/// Environment with only the three required variables set.
#[must_use]
pub fn required_env(domains_file: &str) -> MapEnv {
    MapEnv::new()
        .with("ACME_ACCOUNT_EMAIL", ACCOUNT_EMAIL)
        .with("ACME_DNS_CHALLENGE_PROVIDER", DNS_CHALLENGE_PROVIDER)
        .with("CERTIFICATOR_DOMAINS_FILE", domains_file)
}

/// A temporary file holding `contents`.
///
/// # Panics
///
/// Panics if the file cannot be created or written.
#[must_use]
#[allow(clippy::expect_used)]
pub fn domains_file(contents: &str) -> NamedTempFile {
    let mut file = NamedTempFile::new().expect("create temp domains file");
    file.write_all(contents.as_bytes())
        .expect("write temp domains file");
    file
}

/// A temporary file holding [`SAMPLE_DOMAINS_YAML`].
#[must_use]
pub fn sample_domains_file() -> NamedTempFile {
    domains_file(SAMPLE_DOMAINS_YAML)
}

/// Path of a temporary file as a string.
#[must_use]
pub fn path_of(file: &NamedTempFile) -> String {
    file.path().display().to_string()
}
