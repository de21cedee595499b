use crate::{
    config::config_model::ExpirySweep, usecases::expire_subscriptions::ExpireSubscriptionsUseCase,
};
use anyhow::Result;
use chrono::Utc;
use std::{sync::Arc, time::Duration};
use tracing::{error, info};

pub async fn run_worker_loop(
    usecase: Arc<ExpireSubscriptionsUseCase>,
    config: ExpirySweep,
) -> Result<()> {
    let mut interval = tokio::time::interval(Duration::from_secs(config.interval_secs));
    interval.set_missed_tick_behavior(tokio::time::MissedTickBehavior::Delay);

    info!(
        interval_secs = config.interval_secs,
        dry_run = config.dry_run,
        "expire_subscriptions: worker loop started"
    );

    loop {
        interval.tick().await;

        if let Err(e) = usecase.run(Utc::now(), config.dry_run).await {
            error!(error = ?e, "expire_subscriptions: sweep failed; retrying next tick");
        }
    }
}
