use anyhow::Result;
use crates::infra::subscriber_store;
use std::sync::Arc;
use tracing::{error, info};
use worker::{
    config, services::worker_loop, usecases::expire_subscriptions::ExpireSubscriptionsUseCase,
};

#[tokio::main]
async fn main() -> Result<()> {
    if let Err(error) = run().await {
        error!("Worker exited with error: {:#}", error);
        std::process::exit(1);
    }
    Ok(())
}

async fn run() -> Result<()> {
    dotenvy::dotenv().ok();
    crates::observability::init_observability("worker")?;

    let dotenvy_env = config::config_loader::load()?;
    info!("ENV has been loaded");

    let subscriber_repository = subscriber_store::connect(&dotenvy_env.store)?;
    let expire_usecase = Arc::new(ExpireSubscriptionsUseCase::new(subscriber_repository));

    let expiry_loop = tokio::spawn(worker_loop::run_worker_loop(
        expire_usecase,
        dotenvy_env.expiry_sweep.clone(),
    ));

    tokio::select! {
        result = expiry_loop => result??,
        _ = tokio::signal::ctrl_c() => info!("Received ctrl+C signal"),
    };
    Ok(())
}
