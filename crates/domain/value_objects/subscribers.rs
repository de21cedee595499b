use chrono::{DateTime, Months, Utc};
use serde::Serialize;
use uuid::Uuid;

use crate::domain::entities::subscribers::SubscriberEntity;
use crate::domain::value_objects::enums::subscriber_statuses::SubscriberStatus;

/// Lower-cases and trims an email, the form used for storage and for lookups.
pub fn normalize_email(raw: &str) -> String {
    raw.trim().to_lowercase()
}

/// Syntactic check only: non-empty and contains an `@`.
pub fn is_plausible_email(raw: &str) -> bool {
    let trimmed = raw.trim();
    !trimmed.is_empty() && trimmed.contains('@')
}

/// Masks the local part for logs, `alice@example.com` -> `a***@example.com`.
pub fn mask_email(raw: &str) -> String {
    match raw.split_once('@') {
        Some((local, domain)) => {
            let first = local.chars().next().map(String::from).unwrap_or_default();
            format!("{}***@{}", first, domain)
        }
        None => "***".to_string(),
    }
}

/// Adds whole calendar months. A day past the end of the target month clamps to its
/// last day (Jan 31 + 1 month = Feb 28/29).
pub fn add_calendar_months(start: DateTime<Utc>, months: u32) -> Option<DateTime<Utc>> {
    start.checked_add_months(Months::new(months))
}

/// Long month-name date, e.g. `January 5, 2025`.
pub fn format_display_date(value: DateTime<Utc>) -> String {
    value.format("%B %-d, %Y").to_string()
}

#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct SubscriberDto {
    pub id: Uuid,
    pub email: String,
    pub plan_type: String,
    pub plan_name: String,
    pub plan_price: i32,
    pub plan_duration_months: i32,
    pub subscription_start_date: DateTime<Utc>,
    pub subscription_end_date: DateTime<Utc>,
    pub status: SubscriberStatus,
}

impl From<SubscriberEntity> for SubscriberDto {
    fn from(value: SubscriberEntity) -> Self {
        Self {
            id: value.id,
            email: value.email,
            plan_type: value.plan_type,
            plan_name: value.plan_name,
            plan_price: value.plan_price,
            plan_duration_months: value.plan_duration_months,
            subscription_start_date: value.subscription_start_date,
            subscription_end_date: value.subscription_end_date,
            status: SubscriberStatus::from_str(&value.status),
        }
    }
}

/// What a successful registration hands back to the visitor.
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct RegistrationReceipt {
    pub subscriber: SubscriberDto,
    pub start_date: String,
    pub end_date: String,
}

impl From<SubscriberEntity> for RegistrationReceipt {
    fn from(value: SubscriberEntity) -> Self {
        let start_date = format_display_date(value.subscription_start_date);
        let end_date = format_display_date(value.subscription_end_date);

        Self {
            subscriber: SubscriberDto::from(value),
            start_date,
            end_date,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn email_checks() {
        assert!(is_plausible_email("new@example.com"));
        assert!(is_plausible_email("  a@b "));
        assert!(!is_plausible_email(""));
        assert!(!is_plausible_email("   "));
        assert!(!is_plausible_email("no-at-sign.example.com"));

        assert_eq!(normalize_email("  New@Example.COM "), "new@example.com");
    }

    #[test]
    fn mask_email_keeps_domain() {
        assert_eq!(mask_email("alice@example.com"), "a***@example.com");
        assert_eq!(mask_email("@example.com"), "***@example.com");
        assert_eq!(mask_email("nobody"), "***");
    }

    #[test]
    fn adds_calendar_months() {
        let start = Utc.with_ymd_and_hms(2025, 1, 5, 9, 30, 0).unwrap();

        assert_eq!(
            add_calendar_months(start, 6),
            Some(Utc.with_ymd_and_hms(2025, 7, 5, 9, 30, 0).unwrap())
        );
        assert_eq!(
            add_calendar_months(start, 12),
            Some(Utc.with_ymd_and_hms(2026, 1, 5, 9, 30, 0).unwrap())
        );
    }

    #[test]
    fn month_end_clamps() {
        let start = Utc.with_ymd_and_hms(2024, 11, 30, 0, 0, 0).unwrap();
        assert_eq!(
            add_calendar_months(start, 3),
            Some(Utc.with_ymd_and_hms(2025, 2, 28, 0, 0, 0).unwrap())
        );
    }

    #[test]
    fn display_date_uses_long_month_name() {
        let value = Utc.with_ymd_and_hms(2025, 1, 5, 23, 0, 0).unwrap();
        assert_eq!(format_display_date(value), "January 5, 2025");
    }
}
