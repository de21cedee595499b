use anyhow::{Context, Result};
use crates::infra::subscriber_store::SubscriberStoreConfig;

use super::{
    config_model::{BackendServer, Cors, DotEnvyConfig, Registration},
    stage::Stage,
};

const DEFAULT_SESSION_TTL_SECS: u64 = 1800;
const DEFAULT_MAX_SESSIONS: usize = 10_000;

pub fn load() -> Result<DotEnvyConfig> {
    dotenvy::dotenv().ok();

    let backend_server = BackendServer {
        port: std::env::var("SERVER_PORT_BACKEND")
            .context("SERVER_PORT_BACKEND is invalid")?
            .parse()?,
        body_limit: std::env::var("SERVER_BODY_LIMIT")
            .context("SERVER_BODY_LIMIT is invalid")?
            .parse()?,
        timeout: std::env::var("SERVER_TIMEOUT")
            .context("SERVER_TIMEOUT is invalid")?
            .parse()?,
    };

    let registration = Registration {
        session_ttl_secs: match std::env::var("REGISTRATION_SESSION_TTL_SECS") {
            Ok(raw) => raw
                .trim()
                .parse()
                .context("REGISTRATION_SESSION_TTL_SECS is invalid")?,
            Err(_) => DEFAULT_SESSION_TTL_SECS,
        },
        max_sessions: match std::env::var("REGISTRATION_MAX_SESSIONS") {
            Ok(raw) => raw
                .trim()
                .parse()
                .context("REGISTRATION_MAX_SESSIONS is invalid")?,
            Err(_) => DEFAULT_MAX_SESSIONS,
        },
    };

    let cors = Cors {
        allowed_origin: std::env::var("CORS_ALLOWED_ORIGIN")
            .ok()
            .map(|origin| origin.trim().to_string())
            .filter(|origin| !origin.is_empty() && origin != "*"),
    };

    let store = SubscriberStoreConfig::from_env()?;

    Ok(DotEnvyConfig {
        backend_server,
        store,
        registration,
        cors,
        stage: get_stage(),
    })
}

pub fn get_stage() -> Stage {
    dotenvy::dotenv().ok();

    let stage_str = std::env::var("STAGE").unwrap_or("".to_string());
    Stage::try_from(&stage_str).unwrap_or_default()
}
