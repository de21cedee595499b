use anyhow::Result;
use chrono::{DateTime, Utc};
use crates::{
    domain::value_objects::{
        enums::subscriber_statuses::SubscriberStatus, subscribers::mask_email,
    },
    infra::subscriber_store::SharedSubscriberRepository,
};
use tracing::{error, info};
use uuid::Uuid;

const MAX_REPORTED_IDS: usize = 20;

#[derive(Debug, Clone, Default)]
pub struct ExpireSubscriptionsResult {
    pub scanned: usize,
    pub due: usize,
    pub expired: usize,
    pub failed: usize,
    pub due_ids: Vec<Uuid>,
    pub failed_ids: Vec<Uuid>,
}

pub struct ExpireSubscriptionsUseCase {
    subscriber_repository: SharedSubscriberRepository,
}

impl ExpireSubscriptionsUseCase {
    pub fn new(subscriber_repository: SharedSubscriberRepository) -> Self {
        Self {
            subscriber_repository,
        }
    }

    /// Marks active subscriptions whose end date has passed as expired. A failed update is
    /// counted and the sweep moves on.
    pub async fn run(&self, now: DateTime<Utc>, dry_run: bool) -> Result<ExpireSubscriptionsResult> {
        let active = self.subscriber_repository.list_active().await?;

        let mut result = ExpireSubscriptionsResult {
            scanned: active.len(),
            ..Default::default()
        };

        for subscriber in active
            .into_iter()
            .filter(|subscriber| subscriber.subscription_end_date <= now)
        {
            result.due += 1;
            if result.due_ids.len() < MAX_REPORTED_IDS {
                result.due_ids.push(subscriber.id);
            }

            if dry_run {
                continue;
            }

            match self
                .subscriber_repository
                .update_status_by_email(&subscriber.email, SubscriberStatus::Expired)
                .await
            {
                Ok(()) => result.expired += 1,
                Err(err) => {
                    error!(
                        subscriber_id = %subscriber.id,
                        email = %mask_email(&subscriber.email),
                        db_error = ?err,
                        "expire_subscriptions: failed to mark subscriber expired"
                    );
                    result.failed += 1;
                    if result.failed_ids.len() < MAX_REPORTED_IDS {
                        result.failed_ids.push(subscriber.id);
                    }
                }
            }
        }

        info!(
            scanned = result.scanned,
            due = result.due,
            expired = result.expired,
            failed = result.failed,
            dry_run,
            "expire_subscriptions: completed"
        );

        Ok(result)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use anyhow::anyhow;
    use chrono::{Duration, TimeZone};
    use crates::domain::{
        entities::subscribers::SubscriberEntity,
        repositories::subscribers::MockSubscriberRepository,
    };
    use mockall::predicate;
    use std::sync::Arc;

    fn now() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2025, 7, 5, 12, 0, 0).unwrap()
    }

    fn subscriber(email: &str, end: DateTime<Utc>) -> SubscriberEntity {
        let start = end - Duration::days(90);
        SubscriberEntity {
            id: Uuid::new_v4(),
            email: email.to_string(),
            plan_type: "basic".to_string(),
            plan_name: "Basic".to_string(),
            plan_price: 500,
            plan_duration_months: 3,
            purchase_code: "09TTUYH".to_string(),
            subscription_start_date: start,
            subscription_end_date: end,
            status: SubscriberStatus::Active.to_string(),
            created_at: start,
            updated_at: start,
        }
    }

    #[tokio::test]
    async fn only_past_due_rows_are_expired() {
        let mut repo = MockSubscriberRepository::new();
        repo.expect_list_active().times(1).returning(|| {
            Ok(vec![
                subscriber("late@example.com", now() - Duration::days(1)),
                subscriber("boundary@example.com", now()),
                subscriber("current@example.com", now() + Duration::days(30)),
            ])
        });
        repo.expect_update_status_by_email()
            .with(
                predicate::eq("late@example.com"),
                predicate::eq(SubscriberStatus::Expired),
            )
            .times(1)
            .returning(|_, _| Ok(()));
        repo.expect_update_status_by_email()
            .with(
                predicate::eq("boundary@example.com"),
                predicate::eq(SubscriberStatus::Expired),
            )
            .times(1)
            .returning(|_, _| Ok(()));

        let usecase = ExpireSubscriptionsUseCase::new(Arc::new(repo));
        let result = usecase.run(now(), false).await.unwrap();

        assert_eq!(result.scanned, 3);
        assert_eq!(result.due, 2);
        assert_eq!(result.expired, 2);
        assert_eq!(result.failed, 0);
    }

    #[tokio::test]
    async fn failing_update_does_not_abort_sweep() {
        let mut repo = MockSubscriberRepository::new();
        repo.expect_list_active().returning(|| {
            Ok(vec![
                subscriber("broken@example.com", now() - Duration::days(3)),
                subscriber("fine@example.com", now() - Duration::days(2)),
            ])
        });
        repo.expect_update_status_by_email()
            .withf(|email, _| email == "broken@example.com")
            .times(1)
            .returning(|_, _| Err(anyhow!("connection reset")));
        repo.expect_update_status_by_email()
            .withf(|email, _| email == "fine@example.com")
            .times(1)
            .returning(|_, _| Ok(()));

        let usecase = ExpireSubscriptionsUseCase::new(Arc::new(repo));
        let result = usecase.run(now(), false).await.unwrap();

        assert_eq!(result.expired, 1);
        assert_eq!(result.failed, 1);
        assert_eq!(result.failed_ids.len(), 1);
    }

    #[tokio::test]
    async fn dry_run_touches_nothing() {
        let mut repo = MockSubscriberRepository::new();
        repo.expect_list_active()
            .returning(|| Ok(vec![subscriber("late@example.com", now() - Duration::days(1))]));
        repo.expect_update_status_by_email().never();

        let usecase = ExpireSubscriptionsUseCase::new(Arc::new(repo));
        let result = usecase.run(now(), true).await.unwrap();

        assert_eq!(result.due, 1);
        assert_eq!(result.expired, 0);
    }

    #[tokio::test]
    async fn listing_failure_is_returned() {
        let mut repo = MockSubscriberRepository::new();
        repo.expect_list_active()
            .returning(|| Err(anyhow!("store unavailable")));

        let usecase = ExpireSubscriptionsUseCase::new(Arc::new(repo));
        assert!(usecase.run(now(), false).await.is_err());
    }
}
