use super::config_model::{DotEnvyConfig, ExpirySweep};
use anyhow::{Context, Result};
use crates::infra::subscriber_store::SubscriberStoreConfig;

pub fn load() -> Result<DotEnvyConfig> {
    dotenvy::dotenv().ok();

    let expiry_sweep = ExpirySweep {
        interval_secs: std::env::var("EXPIRY_SWEEP_INTERVAL_SECS")
            .unwrap_or_else(|_| "3600".to_string())
            .parse::<u64>()
            .context("EXPIRY_SWEEP_INTERVAL_SECS is invalid")?
            .max(1),
        dry_run: std::env::var("EXPIRY_SWEEP_DRY_RUN")
            .unwrap_or_else(|_| "false".to_string())
            .trim()
            .parse()
            .context("EXPIRY_SWEEP_DRY_RUN is invalid")?,
    };

    Ok(DotEnvyConfig {
        store: SubscriberStoreConfig::from_env()?,
        expiry_sweep,
    })
}
