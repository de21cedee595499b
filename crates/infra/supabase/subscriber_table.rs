use std::time::Duration;

use anyhow::{Context, Result};
use async_trait::async_trait;
use chrono::Utc;
use reqwest::{
    Method, StatusCode,
    header::{CONTENT_TYPE, HeaderValue},
};
use serde::Deserialize;
use thiserror::Error;
use tracing::error;
use url::Url;

use crate::domain::{
    entities::subscribers::{InsertSubscriberEntity, SubscriberEntity},
    repositories::subscribers::{InsertSubscriberError, SubscriberRepository},
    value_objects::{enums::subscriber_statuses::SubscriberStatus, subscribers::mask_email},
};

/// Postgres SQLSTATE for unique_violation, passed through by PostgREST.
const UNIQUE_VIOLATION: &str = "23505";
const BODY_PREVIEW_CHARS: usize = 512;

#[derive(Debug, Clone)]
pub struct SupabaseTableConfig {
    pub project_url: String,
    pub api_key: String,
    pub table: String,
    pub timeout_secs: u64,
}

/// `subscribers` table reached through Supabase's PostgREST API.
pub struct SubscriberSupabase {
    http: reqwest::Client,
    table_url: Url,
    api_key: String,
}

#[derive(Debug, Deserialize)]
struct PostgrestErrorBody {
    code: Option<String>,
    message: Option<String>,
}

#[derive(Debug, Error)]
#[error("supabase request failed: {context} (status {status}, code {code:?}): {message}")]
pub struct PostgrestFailure {
    pub context: &'static str,
    pub status: StatusCode,
    pub code: Option<String>,
    pub message: String,
}

impl PostgrestFailure {
    fn from_body(context: &'static str, status: StatusCode, body: &str) -> Self {
        let parsed = serde_json::from_str::<PostgrestErrorBody>(body).ok();
        let code = parsed.as_ref().and_then(|p| p.code.clone());
        let message = parsed
            .and_then(|p| p.message)
            .unwrap_or_else(|| body.chars().take(BODY_PREVIEW_CHARS).collect());

        Self {
            context,
            status,
            code,
            message,
        }
    }

    pub fn is_unique_violation(&self) -> bool {
        self.status == StatusCode::CONFLICT || self.code.as_deref() == Some(UNIQUE_VIOLATION)
    }
}

impl SubscriberSupabase {
    pub fn new(config: SupabaseTableConfig) -> Result<Self> {
        let table_url = table_url(&config.project_url, &config.table)?;
        let http = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()
            .context("failed to build supabase http client")?;

        Ok(Self {
            http,
            table_url,
            api_key: config.api_key,
        })
    }

    fn request(&self, method: Method) -> reqwest::RequestBuilder {
        self.http
            .request(method, self.table_url.clone())
            .header("apikey", &self.api_key)
            .bearer_auth(&self.api_key)
    }

    async fn ensure_success(
        resp: reqwest::Response,
        context: &'static str,
    ) -> std::result::Result<reqwest::Response, PostgrestFailure> {
        if resp.status().is_success() {
            return Ok(resp);
        }

        let status = resp.status();
        let body = match resp.text().await {
            Ok(text) if !text.is_empty() => text,
            Ok(_) => "<empty response body>".to_string(),
            Err(err) => format!("<failed to read response body: {err}>"),
        };

        let failure = PostgrestFailure::from_body(context, status, &body);
        error!(
            status = %status,
            postgrest_code = ?failure.code,
            postgrest_message = %failure.message,
            context = %context,
            "supabase: table request failed"
        );

        Err(failure)
    }
}

#[async_trait]
impl SubscriberRepository for SubscriberSupabase {
    async fn find_by_email(&self, email: &str) -> Result<Option<SubscriberEntity>> {
        let resp = self
            .request(Method::GET)
            .query(&[
                ("select", "*".to_string()),
                ("email", format!("eq.{email}")),
                ("limit", "1".to_string()),
            ])
            .send()
            .await
            .with_context(|| format!("failed to look up subscriber {}", mask_email(email)))?;
        let resp = Self::ensure_success(resp, "find subscriber by email").await?;

        let rows: Vec<SubscriberEntity> = resp
            .json()
            .await
            .context("failed to decode subscriber lookup response")?;
        Ok(rows.into_iter().next())
    }

    async fn insert(
        &self,
        insert_subscriber_entity: InsertSubscriberEntity,
    ) -> std::result::Result<SubscriberEntity, InsertSubscriberError> {
        let resp = self
            .request(Method::POST)
            .header("Prefer", HeaderValue::from_static("return=representation"))
            .header(CONTENT_TYPE, HeaderValue::from_static("application/json"))
            .json(&[&insert_subscriber_entity])
            .send()
            .await
            .context("failed to send subscriber insert")?;

        let resp = match Self::ensure_success(resp, "insert subscriber").await {
            Ok(resp) => resp,
            Err(failure) if failure.is_unique_violation() => {
                return Err(InsertSubscriberError::DuplicateEmail);
            }
            Err(failure) => return Err(InsertSubscriberError::Store(failure.into())),
        };

        let rows: Vec<SubscriberEntity> = resp
            .json()
            .await
            .context("failed to decode inserted subscriber")?;
        let stored = rows
            .into_iter()
            .next()
            .context("supabase returned no row for the inserted subscriber")?;
        Ok(stored)
    }

    async fn list_active(&self) -> Result<Vec<SubscriberEntity>> {
        let resp = self
            .request(Method::GET)
            .query(&[
                ("select", "*".to_string()),
                ("status", format!("eq.{}", SubscriberStatus::Active)),
                ("order", "created_at.desc".to_string()),
            ])
            .send()
            .await
            .context("failed to list active subscribers")?;
        let resp = Self::ensure_success(resp, "list active subscribers").await?;

        let rows = resp
            .json()
            .await
            .context("failed to decode active subscribers")?;
        Ok(rows)
    }

    async fn update_status_by_email(&self, email: &str, status: SubscriberStatus) -> Result<()> {
        let resp = self
            .request(Method::PATCH)
            .query(&[("email", format!("eq.{email}"))])
            .json(&serde_json::json!({
                "status": status,
                "updated_at": Utc::now(),
            }))
            .send()
            .await
            .with_context(|| format!("failed to update status for {}", mask_email(email)))?;
        Self::ensure_success(resp, "update subscriber status").await?;

        Ok(())
    }
}

fn table_url(project_url: &str, table: &str) -> Result<Url> {
    let table = table.trim_matches('/');
    if table.is_empty() {
        anyhow::bail!("supabase table name is empty");
    }

    let raw = format!("{}/rest/v1/{}", project_url.trim_end_matches('/'), table);
    Url::parse(&raw).with_context(|| format!("invalid supabase project url: {project_url}"))
}
