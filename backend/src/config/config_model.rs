use crates::infra::subscriber_store::SubscriberStoreConfig;

use super::stage::Stage;

#[derive(Debug, Clone)]
pub struct DotEnvyConfig {
    pub backend_server: BackendServer,
    pub store: SubscriberStoreConfig,
    pub registration: Registration,
    pub cors: Cors,
    pub stage: Stage,
}

#[derive(Debug, Clone)]
pub struct BackendServer {
    pub port: u16,
    pub body_limit: u64,
    pub timeout: u64,
}

#[derive(Debug, Clone)]
pub struct Registration {
    pub session_ttl_secs: u64,
    pub max_sessions: usize,
}

#[derive(Debug, Clone)]
pub struct Cors {
    /// `None` allows any origin.
    pub allowed_origin: Option<String>,
}
