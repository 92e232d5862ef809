//! Type-safe configuration resolved from environment variables.
//!
//! Every value is taken from its variable when set and non-empty, otherwise
//! from the default below. Required fields have no default.

use crate::{
    domains::{DomainSource, resolve_domains},
    error::ConfigError,
};
use certificator_common::{EnvSource, Environment, LogFormat, ProcessEnv, TracingConfig};
use certificator_vault::{DEFAULT_KV_STORAGE_PATH, DEFAULT_VAULT_ADDR, VaultConfig};
use secrecy::SecretString;
use std::str::FromStr;
use url::Url;

/// ACME account email (required).
pub const ACME_ACCOUNT_EMAIL: &str = "ACME_ACCOUNT_EMAIL";
/// DNS-01 challenge provider (required).
pub const ACME_DNS_CHALLENGE_PROVIDER: &str = "ACME_DNS_CHALLENGE_PROVIDER";
/// Whether DNS propagation must be checked.
pub const ACME_DNS_PROPAGATION_REQUIREMENT: &str = "ACME_DNS_PROPAGATION_REQUIREMENT";
/// Whether to register the ACME account again.
pub const ACME_REREGISTER_ACCOUNT: &str = "ACME_REREGISTER_ACCOUNT";
/// ACME directory URL.
pub const ACME_SERVER_URL: &str = "ACME_SERVER_URL";
/// Vault server address.
pub const VAULT_ADDR: &str = "VAULT_ADDR";
/// Pre-issued Vault token.
pub const VAULT_TOKEN: &str = "VAULT_TOKEN";
/// Approle role ID.
pub const VAULT_APPROLE_ROLE_ID: &str = "VAULT_APPROLE_ROLE_ID";
/// Approle secret ID.
pub const VAULT_APPROLE_SECRET_ID: &str = "VAULT_APPROLE_SECRET_ID";
/// KV storage prefix.
pub const VAULT_KV_STORAGE_PATH: &str = "VAULT_KV_STORAGE_PATH";
/// Log format tag.
pub const LOG_FORMAT: &str = "LOG_FORMAT";
/// Log level tag.
pub const LOG_LEVEL: &str = "LOG_LEVEL";
/// DNS resolver address.
pub const DNS_ADDRESS: &str = "DNS_ADDRESS";
/// Deployment environment.
pub const ENVIRONMENT: &str = "ENVIRONMENT";
/// Domains file path (required).
pub const CERTIFICATOR_DOMAINS_FILE: &str = "CERTIFICATOR_DOMAINS_FILE";
/// Comma-separated domain list overriding the file.
pub const CERTIFICATOR_DOMAINS_LIST: &str = "CERTIFICATOR_DOMAINS_LIST";
/// Days before expiry at which certificates are renewed.
pub const CERTIFICATOR_RENEW_BEFORE_DAYS: &str = "CERTIFICATOR_RENEW_BEFORE_DAYS";

/// Let's Encrypt staging directory.
pub const DEFAULT_ACME_SERVER_URL: &str = "https://acme-staging-v02.api.letsencrypt.org/directory";
/// Default DNS resolver.
pub const DEFAULT_DNS_ADDRESS: &str = "127.0.0.1:53";
/// Default deployment environment tag.
pub const DEFAULT_ENVIRONMENT: &str = "prod";
/// Default log level tag.
pub const DEFAULT_LOG_LEVEL: &str = "INFO";
/// Default renewal threshold in days.
pub const DEFAULT_RENEW_BEFORE_DAYS: i64 = 30;

/// ACME settings.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AcmeConfig {
    /// Account email
    pub account_email: String,
    /// DNS challenge provider identifier
    pub dns_challenge_provider: String,
    /// Wait for DNS propagation before validating
    pub dns_propagation_requirement: bool,
    /// Register the account again on startup
    pub reregister_account: bool,
    /// ACME directory URL
    pub server_url: String,
}

/// Logging settings.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LogConfig {
    /// Output format
    pub format: LogFormat,
    /// Level tag
    pub level: String,
}

/// Service configuration.
#[derive(Debug, Clone, PartialEq)]
pub struct Config {
    /// ACME settings
    pub acme: AcmeConfig,
    /// Vault settings
    pub vault: VaultConfig,
    /// Logging settings
    pub log: LogConfig,
    /// DNS resolver address
    pub dns_address: String,
    /// Deployment environment
    pub environment: Environment,
    /// Domains file path
    pub domains_file: String,
    /// Domain entries; file entries are kept verbatim
    pub domains: Vec<String>,
    /// Set only when the explicit list override was used
    pub domains_list: Option<Vec<String>>,
    /// Renewal threshold in days
    pub renew_before_days: i64,
}

impl Config {
    /// Loads configuration from the process environment.
    ///
    /// # Errors
    ///
    /// See [`Config::load`].
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::load(&ProcessEnv)
    }

    /// Loads configuration from `env`.
    ///
    /// # Errors
    ///
    /// Returns the first missing, unparseable or domains-file error.
    pub fn load(env: &impl EnvSource) -> Result<Self, ConfigError> {
        let acme = AcmeConfig {
            account_email: required(env, ACME_ACCOUNT_EMAIL)?,
            dns_challenge_provider: required(env, ACME_DNS_CHALLENGE_PROVIDER)?,
            dns_propagation_requirement: parse_bool(env, ACME_DNS_PROPAGATION_REQUIREMENT, true)?,
            reregister_account: parse_bool(env, ACME_REREGISTER_ACCOUNT, false)?,
            server_url: string_or(env, ACME_SERVER_URL, DEFAULT_ACME_SERVER_URL),
        };

        let vault = VaultConfig {
            addr: parse_url(env, VAULT_ADDR, DEFAULT_VAULT_ADDR)?,
            approle_role_id: string_or(env, VAULT_APPROLE_ROLE_ID, ""),
            approle_secret_id: SecretString::from(string_or(env, VAULT_APPROLE_SECRET_ID, "")),
            token: env.get_non_empty(VAULT_TOKEN).map(SecretString::from),
            kv_storage_path: string_or(env, VAULT_KV_STORAGE_PATH, DEFAULT_KV_STORAGE_PATH),
            ..VaultConfig::default()
        };

        let log = LogConfig {
            format: parse_tag(env, LOG_FORMAT, LogFormat::Json)?,
            level: string_or(env, LOG_LEVEL, DEFAULT_LOG_LEVEL),
        };

        let dns_address = string_or(env, DNS_ADDRESS, DEFAULT_DNS_ADDRESS);
        let environment =
            Environment::from(string_or(env, ENVIRONMENT, DEFAULT_ENVIRONMENT).as_str());
        let domains_file = required(env, CERTIFICATOR_DOMAINS_FILE)?;
        let renew_before_days =
            parse_int(env, CERTIFICATOR_RENEW_BEFORE_DAYS, DEFAULT_RENEW_BEFORE_DAYS)?;

        let source = resolve_domains(
            env.get_non_empty(CERTIFICATOR_DOMAINS_LIST).as_deref(),
            &domains_file,
        )?;
        let (domains, domains_list) = source.into_fields();

        Ok(Self {
            acme,
            vault,
            log,
            dns_address,
            environment,
            domains_file,
            domains,
            domains_list,
            renew_before_days,
        })
    }

    /// Which source the domain list came from.
    #[must_use]
    pub fn domain_source(&self) -> DomainSource {
        match &self.domains_list {
            Some(list) => DomainSource::Explicit(list.clone()),
            None => DomainSource::FromFile(self.domains.clone()),
        }
    }

    /// Tracing settings derived from the log configuration.
    #[must_use]
    pub fn tracing_config(&self) -> TracingConfig {
        TracingConfig::default()
            .with_log_level(&self.log.level)
            .with_format(self.log.format)
    }
}

fn string_or(env: &impl EnvSource, name: &str, default: &str) -> String {
    env.get_non_empty(name).unwrap_or_else(|| default.to_string())
}

fn required(env: &impl EnvSource, name: &str) -> Result<String, ConfigError> {
    env.get_non_empty(name).ok_or_else(|| ConfigError::MissingRequired(name.to_string()))
}

/// Strict `true` / `false`.
fn parse_bool(env: &impl EnvSource, name: &str, default: bool) -> Result<bool, ConfigError> {
    match env.get_non_empty(name) {
        Some(value) => value.parse().map_err(|_| ConfigError::InvalidBoolean {
            name: name.to_string(),
            value,
        }),
        None => Ok(default),
    }
}

fn parse_int(env: &impl EnvSource, name: &str, default: i64) -> Result<i64, ConfigError> {
    match env.get_non_empty(name) {
        Some(value) => value.parse().map_err(|e: std::num::ParseIntError| {
            ConfigError::InvalidInteger {
                name: name.to_string(),
                reason: e.to_string(),
                value,
            }
        }),
        None => Ok(default),
    }
}

fn parse_tag<T>(env: &impl EnvSource, name: &str, default: T) -> Result<T, ConfigError>
where
    T: FromStr<Err = String>,
{
    match env.get_non_empty(name) {
        Some(value) => T::from_str(&value).map_err(|reason| ConfigError::InvalidValue {
            name: name.to_string(),
            value,
            reason,
        }),
        None => Ok(default),
    }
}

/// Validates the URL but keeps the raw string.
fn parse_url(env: &impl EnvSource, name: &str, default: &str) -> Result<String, ConfigError> {
    let value = string_or(env, name, default);
    Url::parse(&value).map_err(|e| ConfigError::InvalidUrl {
        name: name.to_string(),
        reason: e.to_string(),
    })?;
    Ok(value)
}
