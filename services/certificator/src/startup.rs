//! Startup inventory of stored certificates.

use crate::{config::Config, domains::domain_group};
use certificator_vault::{VaultClient, VaultResult, VaultTransport};
use tracing::info;

/// Whether Vault already holds an entry for a domain group.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DomainStatus {
    /// Names in the group; the first one is the storage key
    pub domains: Vec<String>,
    /// An entry exists under the storage key
    pub stored: bool,
}

impl DomainStatus {
    /// Storage key for this group.
    #[must_use]
    pub fn key(&self) -> Option<&str> {
        self.domains.first().map(String::as_str)
    }
}

/// Check each configured domain group against Vault.
///
/// Groups whose first name is empty are skipped.
///
/// # Errors
///
/// Stops at the first failed read.
pub async fn inventory<T: VaultTransport>(
    client: &VaultClient<T>,
    config: &Config,
) -> VaultResult<Vec<DomainStatus>> {
    let mut statuses = Vec::with_capacity(config.domains.len());

    for entry in &config.domains {
        let domains = domain_group(entry);
        let Some(key) = domains.first().filter(|key| !key.is_empty()) else {
            continue;
        };

        let stored = client.kv_read(key).await?.is_some();
        info!(domain = %key, names = domains.len(), stored, "Checked stored certificate");

        statuses.push(DomainStatus { domains, stored });
    }

    Ok(statuses)
}
