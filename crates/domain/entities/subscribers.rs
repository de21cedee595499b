use anyhow::{Context, Result};
use chrono::{DateTime, Utc};
use diesel::prelude::*;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::domain::value_objects::{
    enums::subscriber_statuses::SubscriberStatus,
    plans::{Plan, normalize_purchase_code},
    subscribers::{add_calendar_months, normalize_email},
};
use crate::infra::db::postgres::schema::subscribers;

#[derive(Debug, Clone, PartialEq, Identifiable, Selectable, Queryable, Serialize, Deserialize)]
#[diesel(table_name = subscribers)]
pub struct SubscriberEntity {
    pub id: Uuid,
    pub email: String,
    pub plan_type: String,
    pub plan_name: String,
    pub plan_price: i32,
    pub plan_duration_months: i32,
    pub purchase_code: String,
    pub subscription_start_date: DateTime<Utc>,
    pub subscription_end_date: DateTime<Utc>,
    pub status: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Row written on registration. `id`, `created_at` and `updated_at` are assigned by the store.
#[derive(Debug, Clone, PartialEq, Insertable, Serialize)]
#[diesel(table_name = subscribers)]
pub struct InsertSubscriberEntity {
    pub email: String,
    pub plan_type: String,
    pub plan_name: String,
    pub plan_price: i32,
    pub plan_duration_months: i32,
    pub purchase_code: String,
    pub subscription_start_date: DateTime<Utc>,
    pub subscription_end_date: DateTime<Utc>,
    pub status: String,
}

impl InsertSubscriberEntity {
    /// Snapshots the plan terms at `now` and derives the subscription window.
    pub fn for_plan(
        plan: &Plan,
        email: &str,
        purchase_code: &str,
        now: DateTime<Utc>,
    ) -> Result<Self> {
        let subscription_end_date = add_calendar_months(now, plan.duration_months)
            .context("failed to compute subscription end date")?;
        let plan_duration_months = i32::try_from(plan.duration_months)
            .context("plan duration does not fit the subscribers table")?;

        Ok(Self {
            email: normalize_email(email),
            plan_type: plan.id.to_string(),
            plan_name: plan.name.to_string(),
            plan_price: plan.price,
            plan_duration_months,
            purchase_code: normalize_purchase_code(purchase_code),
            subscription_start_date: now,
            subscription_end_date,
            status: SubscriberStatus::Active.to_string(),
        })
    }
}
