use crates::infra::subscriber_store::SubscriberStoreConfig;

#[derive(Debug, Clone)]
pub struct DotEnvyConfig {
    pub store: SubscriberStoreConfig,
    pub expiry_sweep: ExpirySweep,
}

#[derive(Debug, Clone)]
pub struct ExpirySweep {
    pub interval_secs: u64,
    pub dry_run: bool,
}
