use anyhow::Result;
use async_trait::async_trait;
use mockall::automock;
use thiserror::Error;

use crate::domain::entities::subscribers::{InsertSubscriberEntity, SubscriberEntity};
use crate::domain::value_objects::enums::subscriber_statuses::SubscriberStatus;

#[derive(Debug, Error)]
pub enum InsertSubscriberError {
    /// The store's uniqueness constraint on `email` rejected the row.
    #[error("email already registered")]
    DuplicateEmail,
    #[error(transparent)]
    Store(#[from] anyhow::Error),
}

/// Table of subscriber rows. Emails passed in are expected to be normalized already.
#[automock]
#[async_trait]
pub trait SubscriberRepository {
    async fn find_by_email(&self, email: &str) -> Result<Option<SubscriberEntity>>;

    async fn insert(
        &self,
        insert_subscriber_entity: InsertSubscriberEntity,
    ) -> std::result::Result<SubscriberEntity, InsertSubscriberError>;

    /// Active rows, newest first.
    async fn list_active(&self) -> Result<Vec<SubscriberEntity>>;

    async fn update_status_by_email(&self, email: &str, status: SubscriberStatus) -> Result<()>;
}
