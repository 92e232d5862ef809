//! Certificator - Main Entry Point
//!
//! Resolves configuration, authenticates with Vault and reports which
//! configured domains already have a stored certificate.

use anyhow::Context;
use certificator::{Config, inventory};
use certificator_common::{ProcessEnv, init_tracing};
use certificator_vault::VaultClient;
use tracing::info;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    let config = Config::from_env().context("failed to load configuration")?;
    init_tracing(&config.tracing_config()).context("failed to initialise logging")?;

    info!(
        environment = %config.environment,
        domains = config.domains.len(),
        explicit_list = config.domains_list.is_some(),
        "Configuration loaded"
    );

    let client = VaultClient::new(&config.vault, &config.environment, &ProcessEnv)
        .await
        .context("failed to create Vault client")?;

    let statuses = inventory(&client, &config)
        .await
        .context("failed to read stored certificates")?;
    let missing = statuses.iter().filter(|status| !status.stored).count();

    info!(
        total = statuses.len(),
        missing,
        renew_before_days = config.renew_before_days,
        "Certificate inventory complete"
    );

    Ok(())
}
