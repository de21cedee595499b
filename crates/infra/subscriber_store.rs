use std::sync::Arc;

use anyhow::{Result, bail};
use tracing::info;

use crate::domain::repositories::subscribers::SubscriberRepository;
use crate::infra::{
    db::{postgres::postgres_connection, repositories::subscribers::SubscriberPostgres},
    supabase::subscriber_table::{SubscriberSupabase, SupabaseTableConfig},
};

pub type SharedSubscriberRepository = Arc<dyn SubscriberRepository + Send + Sync>;

#[derive(Debug, Clone)]
pub enum SubscriberStoreConfig {
    Supabase(SupabaseTableConfig),
    Postgres { database_url: String },
}

impl SubscriberStoreConfig {
    /// Reads `STORE_BACKEND` (`supabase` by default, or `postgres`) and the variables that
    /// backend needs.
    pub fn from_env() -> Result<Self> {
        let backend = std::env::var("STORE_BACKEND").unwrap_or_else(|_| "supabase".to_string());

        match backend.trim().to_ascii_lowercase().as_str() {
            "supabase" => Ok(Self::Supabase(SupabaseTableConfig {
                project_url: required("SUPABASE_PROJECT_URL")?,
                api_key: required("SUPABASE_ANON_KEY")?,
                table: std::env::var("SUPABASE_SUBSCRIBERS_TABLE")
                    .unwrap_or_else(|_| "subscribers".to_string()),
                timeout_secs: match std::env::var("SUPABASE_TIMEOUT") {
                    Ok(raw) => raw.trim().parse()?,
                    Err(_) => 10,
                },
            })),
            "postgres" => Ok(Self::Postgres {
                database_url: required("DATABASE_URL")?,
            }),
            other => bail!("STORE_BACKEND is invalid: {other} (expected supabase or postgres)"),
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            Self::Supabase(_) => "supabase",
            Self::Postgres { .. } => "postgres",
        }
    }
}

pub fn connect(config: &SubscriberStoreConfig) -> Result<SharedSubscriberRepository> {
    let repository: SharedSubscriberRepository = match config {
        SubscriberStoreConfig::Supabase(table_config) => {
            Arc::new(SubscriberSupabase::new(table_config.clone())?)
        }
        SubscriberStoreConfig::Postgres { database_url } => {
            let pool = postgres_connection::establish_connection(database_url)?;
            info!("Postgres connection has been established");
            Arc::new(SubscriberPostgres::new(Arc::new(pool)))
        }
    };

    info!(store = config.name(), "subscriber store is ready");
    Ok(repository)
}

fn required(key: &str) -> Result<String> {
    match std::env::var(key) {
        Ok(value) if !value.trim().is_empty() => Ok(value),
        _ => bail!("{key} is invalid"),
    }
}
