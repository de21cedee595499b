use anyhow::{Context, Result};
use async_trait::async_trait;
use chrono::Utc;
use diesel::{
    RunQueryDsl, insert_into,
    prelude::*,
    result::{DatabaseErrorKind, Error as DieselError},
    update,
};
use std::sync::Arc;

use crate::{
    domain,
    infra::db::postgres::{postgres_connection::PgPoolSquad, schema::subscribers},
};
use domain::{
    entities::subscribers::{InsertSubscriberEntity, SubscriberEntity},
    repositories::subscribers::{InsertSubscriberError, SubscriberRepository},
    value_objects::enums::subscriber_statuses::SubscriberStatus,
};

pub struct SubscriberPostgres {
    db_pool: Arc<PgPoolSquad>,
}

impl SubscriberPostgres {
    pub fn new(db_pool: Arc<PgPoolSquad>) -> Self {
        Self { db_pool }
    }
}

#[async_trait]
impl SubscriberRepository for SubscriberPostgres {
    async fn find_by_email(&self, email: &str) -> Result<Option<SubscriberEntity>> {
        let mut conn = Arc::clone(&self.db_pool).get()?;

        let result = subscribers::table
            .filter(subscribers::email.eq(email))
            .select(SubscriberEntity::as_select())
            .first::<SubscriberEntity>(&mut conn)
            .optional()?;

        Ok(result)
    }

    async fn insert(
        &self,
        insert_subscriber_entity: InsertSubscriberEntity,
    ) -> std::result::Result<SubscriberEntity, InsertSubscriberError> {
        let mut conn = Arc::clone(&self.db_pool)
            .get()
            .context("failed to get postgres connection")?;

        let result = insert_into(subscribers::table)
            .values(&insert_subscriber_entity)
            .returning(SubscriberEntity::as_returning())
            .get_result::<SubscriberEntity>(&mut conn);

        match result {
            Ok(subscriber) => Ok(subscriber),
            Err(DieselError::DatabaseError(DatabaseErrorKind::UniqueViolation, _)) => {
                Err(InsertSubscriberError::DuplicateEmail)
            }
            Err(err) => Err(InsertSubscriberError::Store(
                anyhow::Error::new(err).context("failed to insert subscriber"),
            )),
        }
    }

    async fn list_active(&self) -> Result<Vec<SubscriberEntity>> {
        let mut conn = Arc::clone(&self.db_pool).get()?;

        let results = subscribers::table
            .filter(subscribers::status.eq(SubscriberStatus::Active.to_string()))
            .order(subscribers::created_at.desc())
            .select(SubscriberEntity::as_select())
            .load::<SubscriberEntity>(&mut conn)?;

        Ok(results)
    }

    async fn update_status_by_email(&self, email: &str, status: SubscriberStatus) -> Result<()> {
        let mut conn = Arc::clone(&self.db_pool).get()?;

        update(subscribers::table)
            .filter(subscribers::email.eq(email))
            .set((
                subscribers::status.eq(status.to_string()),
                subscribers::updated_at.eq(Utc::now()),
            ))
            .execute(&mut conn)?;

        Ok(())
    }
}
