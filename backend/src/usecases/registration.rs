use anyhow::anyhow;
use axum::http::StatusCode;
use chrono::Utc;
use crates::{
    domain::{
        entities::subscribers::InsertSubscriberEntity,
        repositories::subscribers::InsertSubscriberError,
        value_objects::{
            plans::{Plan, normalize_purchase_code},
            registration_sessions::{Notice, NoticeKind},
            subscribers::{RegistrationReceipt, is_plausible_email, mask_email, normalize_email},
        },
    },
    infra::subscriber_store::SharedSubscriberRepository,
};
use thiserror::Error;
use tracing::{error, info, warn};

/// Outcomes a visitor can see. The display text is shown to them verbatim.
#[derive(Debug, Error)]
pub enum RegistrationError {
    #[error("Invalid purchase code. Please contact your signal account manager.")]
    InvalidPurchaseCode,
    #[error("Please enter a valid email address.")]
    InvalidEmail,
    #[error("This email is already registered. Please use a different email or contact support.")]
    EmailAlreadyRegistered,
    #[error("An error occurred while processing your registration. Please try again.")]
    StoreFailure(anyhow::Error),
    #[error("An unexpected error occurred. Please try again.")]
    Unexpected(anyhow::Error),
}

impl RegistrationError {
    pub fn status_code(&self) -> StatusCode {
        match self {
            RegistrationError::InvalidPurchaseCode | RegistrationError::InvalidEmail => {
                StatusCode::UNPROCESSABLE_ENTITY
            }
            RegistrationError::EmailAlreadyRegistered => StatusCode::CONFLICT,
            RegistrationError::StoreFailure(_) => StatusCode::BAD_GATEWAY,
            RegistrationError::Unexpected(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    pub fn notice(&self) -> Notice {
        let kind = match self {
            RegistrationError::InvalidPurchaseCode
            | RegistrationError::InvalidEmail
            | RegistrationError::EmailAlreadyRegistered => NoticeKind::Rejected,
            RegistrationError::StoreFailure(_) | RegistrationError::Unexpected(_) => {
                NoticeKind::Failed
            }
        };

        Notice {
            kind,
            message: self.to_string(),
        }
    }
}

pub type UseCaseResult<T> = std::result::Result<T, RegistrationError>;

pub struct RegistrationUseCase {
    subscriber_repository: SharedSubscriberRepository,
}

impl RegistrationUseCase {
    pub fn new(subscriber_repository: SharedSubscriberRepository) -> Self {
        Self {
            subscriber_repository,
        }
    }

    /// Checks a code against the plan and returns it normalized. Never touches the store.
    pub fn validate(plan: &Plan, entered_code: &str) -> UseCaseResult<String> {
        if plan.accepts_code(entered_code) {
            info!(plan_id = %plan.id, "registration: purchase code accepted");
            Ok(normalize_purchase_code(entered_code))
        } else {
            let err = RegistrationError::InvalidPurchaseCode;
            warn!(
                plan_id = %plan.id,
                status = err.status_code().as_u16(),
                "registration: purchase code rejected"
            );
            Err(err)
        }
    }

    /// Email check, duplicate lookup, then a single insert. Callers must have validated
    /// `purchase_code` for `plan` first.
    pub async fn register(
        &self,
        plan: &Plan,
        email: &str,
        purchase_code: &str,
    ) -> UseCaseResult<RegistrationReceipt> {
        if !is_plausible_email(email) {
            let err = RegistrationError::InvalidEmail;
            warn!(
                plan_id = %plan.id,
                status = err.status_code().as_u16(),
                "registration: email failed syntactic check"
            );
            return Err(err);
        }

        let email = normalize_email(email);
        let masked = mask_email(&email);
        info!(plan_id = %plan.id, email = %masked, "registration: submission started");

        let existing = self
            .subscriber_repository
            .find_by_email(&email)
            .await
            .map_err(|err| {
                error!(
                    plan_id = %plan.id,
                    email = %masked,
                    db_error = ?err,
                    "registration: failed to check for existing subscriber"
                );
                RegistrationError::StoreFailure(err)
            })?;

        if existing.is_some() {
            let err = RegistrationError::EmailAlreadyRegistered;
            warn!(
                plan_id = %plan.id,
                email = %masked,
                status = err.status_code().as_u16(),
                "registration: email already registered"
            );
            return Err(err);
        }

        let insert_subscriber_entity =
            InsertSubscriberEntity::for_plan(plan, &email, purchase_code, Utc::now()).map_err(
                |err| {
                    error!(
                        plan_id = %plan.id,
                        error = ?err,
                        "registration: failed to build subscriber record"
                    );
                    RegistrationError::Unexpected(err)
                },
            )?;

        let stored = match self
            .subscriber_repository
            .insert(insert_subscriber_entity)
            .await
        {
            Ok(stored) => stored,
            Err(InsertSubscriberError::DuplicateEmail) => {
                let err = RegistrationError::EmailAlreadyRegistered;
                warn!(
                    plan_id = %plan.id,
                    email = %masked,
                    status = err.status_code().as_u16(),
                    "registration: store rejected duplicate email on insert"
                );
                return Err(err);
            }
            Err(InsertSubscriberError::Store(err)) => {
                error!(
                    plan_id = %plan.id,
                    email = %masked,
                    db_error = ?err,
                    "registration: failed to insert subscriber"
                );
                return Err(RegistrationError::StoreFailure(err));
            }
        };

        info!(
            plan_id = %plan.id,
            subscriber_id = %stored.id,
            email = %masked,
            ends_at = %stored.subscription_end_date,
            "registration: subscriber created"
        );

        Ok(RegistrationReceipt::from(stored))
    }
}

/// Wraps a task failure (panic or cancellation) of a detached registration.
pub(crate) fn unexpected(err: impl std::fmt::Display) -> RegistrationError {
    RegistrationError::Unexpected(anyhow!("registration task failed: {err}"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{DateTime, Months};
    use crates::domain::{
        entities::subscribers::SubscriberEntity,
        repositories::subscribers::MockSubscriberRepository,
        value_objects::plans::{PlanId, plans},
    };
    use std::sync::Arc;
    use uuid::Uuid;

    fn stored_from(entity: InsertSubscriberEntity) -> SubscriberEntity {
        let now = Utc::now();
        SubscriberEntity {
            id: Uuid::new_v4(),
            email: entity.email,
            plan_type: entity.plan_type,
            plan_name: entity.plan_name,
            plan_price: entity.plan_price,
            plan_duration_months: entity.plan_duration_months,
            purchase_code: entity.purchase_code,
            subscription_start_date: entity.subscription_start_date,
            subscription_end_date: entity.subscription_end_date,
            status: entity.status,
            created_at: now,
            updated_at: now,
        }
    }

    fn existing_subscriber(email: &str) -> SubscriberEntity {
        let entity = InsertSubscriberEntity::for_plan(
            Plan::find(PlanId::Basic),
            email,
            "09TTUYH",
            Utc::now(),
        )
        .unwrap();
        stored_from(entity)
    }

    fn usecase(repo: MockSubscriberRepository) -> RegistrationUseCase {
        RegistrationUseCase::new(Arc::new(repo))
    }

    fn months_after(start: DateTime<Utc>, months: u32) -> DateTime<Utc> {
        start.checked_add_months(Months::new(months)).unwrap()
    }

    #[test]
    fn validate_accepts_exactly_the_normalized_plan_code() {
        let candidates = [
            "09ttuyh", " 09TTUYH ", "90HHUKO", "r6huipo", "", "WRONGCODE", "09TT UYH",
        ];

        for plan in plans() {
            for candidate in candidates {
                let expected = candidate.trim().to_uppercase() == plan.code;
                assert_eq!(
                    RegistrationUseCase::validate(plan, candidate).is_ok(),
                    expected,
                    "plan {} code {candidate:?}",
                    plan.id
                );
            }
        }
    }

    #[test]
    fn validate_returns_normalized_code() {
        let standard = Plan::find(PlanId::Standard);
        assert_eq!(
            RegistrationUseCase::validate(standard, "90hhuko").unwrap(),
            "90HHUKO"
        );
    }

    #[test]
    fn repeated_wrong_code_yields_the_same_rejection() {
        let basic = Plan::find(PlanId::Basic);

        for _ in 0..3 {
            let err = RegistrationUseCase::validate(basic, "WRONGCODE").unwrap_err();
            assert!(matches!(err, RegistrationError::InvalidPurchaseCode));
            assert_eq!(
                err.to_string(),
                "Invalid purchase code. Please contact your signal account manager."
            );
            assert_eq!(err.notice().kind, NoticeKind::Rejected);
        }
    }

    #[tokio::test]
    async fn malformed_email_never_reaches_the_store() {
        let mut repo = MockSubscriberRepository::new();
        repo.expect_find_by_email().never();
        repo.expect_insert().never();
        let usecase = usecase(repo);
        let plan = Plan::find(PlanId::Standard);

        for email in ["", "   ", "new.example.com"] {
            let err = usecase.register(plan, email, "90HHUKO").await.unwrap_err();
            assert!(matches!(err, RegistrationError::InvalidEmail));
            assert_eq!(err.to_string(), "Please enter a valid email address.");
        }
    }

    #[tokio::test]
    async fn registers_new_subscriber_for_standard_plan() {
        let mut repo = MockSubscriberRepository::new();
        repo.expect_find_by_email()
            .withf(|email| email == "new@example.com")
            .times(1)
            .returning(|_| Ok(None));
        repo.expect_insert()
            .withf(|entity| {
                entity.email == "new@example.com"
                    && entity.plan_type == "standard"
                    && entity.plan_price == 700
                    && entity.plan_duration_months == 6
                    && entity.purchase_code == "90HHUKO"
                    && entity.status == "active"
            })
            .times(1)
            .returning(|entity| Ok(stored_from(entity)));

        let plan = Plan::find(PlanId::Standard);
        let code = RegistrationUseCase::validate(plan, "90hhuko").unwrap();
        let receipt = usecase(repo)
            .register(plan, "New@Example.com", &code)
            .await
            .unwrap();

        let subscriber = &receipt.subscriber;
        assert_eq!(subscriber.email, "new@example.com");
        assert_eq!(
            subscriber.subscription_end_date,
            months_after(subscriber.subscription_start_date, 6)
        );
        assert!(!receipt.start_date.is_empty());
        assert!(receipt.end_date.ends_with(&subscriber.subscription_end_date.format("%Y").to_string()));
    }

    #[tokio::test]
    async fn end_date_tracks_each_plan_duration() {
        for plan in plans() {
            let mut repo = MockSubscriberRepository::new();
            repo.expect_find_by_email().returning(|_| Ok(None));
            repo.expect_insert()
                .times(1)
                .returning(|entity| Ok(stored_from(entity)));

            let receipt = usecase(repo)
                .register(plan, "fresh@example.com", plan.code)
                .await
                .unwrap();

            assert_eq!(
                receipt.subscriber.subscription_end_date,
                months_after(
                    receipt.subscriber.subscription_start_date,
                    plan.duration_months
                )
            );
        }
    }

    #[tokio::test]
    async fn duplicate_email_is_rejected_without_insert() {
        let mut repo = MockSubscriberRepository::new();
        repo.expect_find_by_email()
            .withf(|email| email == "taken@example.com")
            .times(1)
            .returning(|email| Ok(Some(existing_subscriber(email))));
        repo.expect_insert().never();

        let err = usecase(repo)
            .register(Plan::find(PlanId::Standard), "Taken@Example.com", "90HHUKO")
            .await
            .unwrap_err();

        assert!(matches!(err, RegistrationError::EmailAlreadyRegistered));
        assert_eq!(
            err.to_string(),
            "This email is already registered. Please use a different email or contact support."
        );
        assert_eq!(err.status_code(), StatusCode::CONFLICT);
    }

    #[tokio::test]
    async fn store_insert_failure_is_reported_generically() {
        let mut repo = MockSubscriberRepository::new();
        repo.expect_find_by_email().returning(|_| Ok(None));
        repo.expect_insert()
            .times(1)
            .returning(|_| Err(InsertSubscriberError::Store(anyhow!("connection reset"))));

        let err = usecase(repo)
            .register(Plan::find(PlanId::Premium), "new@example.com", "R6HUIPO")
            .await
            .unwrap_err();

        assert!(matches!(err, RegistrationError::StoreFailure(_)));
        assert_eq!(
            err.to_string(),
            "An error occurred while processing your registration. Please try again."
        );
        assert_eq!(err.notice().kind, NoticeKind::Failed);
        assert_eq!(err.status_code(), StatusCode::BAD_GATEWAY);
    }

    #[tokio::test]
    async fn duplicate_caught_by_store_constraint_is_a_rejection() {
        let mut repo = MockSubscriberRepository::new();
        repo.expect_find_by_email().returning(|_| Ok(None));
        repo.expect_insert()
            .times(1)
            .returning(|_| Err(InsertSubscriberError::DuplicateEmail));

        let err = usecase(repo)
            .register(Plan::find(PlanId::Basic), "race@example.com", "09TTUYH")
            .await
            .unwrap_err();

        assert!(matches!(err, RegistrationError::EmailAlreadyRegistered));
    }

    #[tokio::test]
    async fn lookup_failure_is_store_failure() {
        let mut repo = MockSubscriberRepository::new();
        repo.expect_find_by_email()
            .returning(|_| Err(anyhow!("timeout")));
        repo.expect_insert().never();

        let err = usecase(repo)
            .register(Plan::find(PlanId::Basic), "new@example.com", "09TTUYH")
            .await
            .unwrap_err();

        assert!(matches!(err, RegistrationError::StoreFailure(_)));
        assert_eq!(err.status_code(), StatusCode::BAD_GATEWAY);
        assert_eq!(
            err.to_string(),
            "An error occurred while processing your registration. Please try again."
        );
    }
}
