//! Per-visitor registration state: purchase code first, then email, then the insert.

use std::time::{Duration, Instant};

use serde::Serialize;
use thiserror::Error;
use uuid::Uuid;

use crate::domain::value_objects::{
    plans::{Plan, PlanDto, PlanId},
    subscribers::RegistrationReceipt,
};

/// How long the "shake" signal stays on after a rejected code.
pub const SHAKE_DURATION: Duration = Duration::from_millis(500);

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum NoticeKind {
    /// Bad input or a conflict; the visitor can fix it and retry.
    Rejected,
    /// Store or unexpected failure; the visitor can only resubmit.
    Failed,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Notice {
    pub kind: NoticeKind,
    pub message: String,
}

#[derive(Debug, Clone, PartialEq)]
pub enum RegistrationStep {
    EnteringCode,
    EnteringEmail { purchase_code: String },
    Submitting { purchase_code: String },
    Success(Box<RegistrationReceipt>),
}

impl RegistrationStep {
    pub fn name(&self) -> &'static str {
        match self {
            RegistrationStep::EnteringCode => "entering_code",
            RegistrationStep::EnteringEmail { .. } => "entering_email",
            RegistrationStep::Submitting { .. } => "submitting",
            RegistrationStep::Success(_) => "success",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum TransitionError {
    #[error("purchase code has already been validated")]
    CodeAlreadyValidated,
    #[error("purchase code has not been validated yet")]
    CodeNotValidated,
    #[error("a registration request is already in progress")]
    SubmissionInFlight,
    #[error("registration is already complete")]
    AlreadyCompleted,
}

#[derive(Debug, Clone)]
pub struct RegistrationSession {
    plan_id: PlanId,
    step: RegistrationStep,
    notice: Option<Notice>,
    shake_started_at: Option<Instant>,
    last_active_at: Instant,
}

impl RegistrationSession {
    pub fn new(plan_id: PlanId, now: Instant) -> Self {
        Self {
            plan_id,
            step: RegistrationStep::EnteringCode,
            notice: None,
            shake_started_at: None,
            last_active_at: now,
        }
    }

    pub fn plan(&self) -> &'static Plan {
        Plan::find(self.plan_id)
    }

    pub fn step(&self) -> &RegistrationStep {
        &self.step
    }

    pub fn notice(&self) -> Option<&Notice> {
        self.notice.as_ref()
    }

    pub fn last_active_at(&self) -> Instant {
        self.last_active_at
    }

    /// True for `SHAKE_DURATION` after the last rejected code, whatever happens meanwhile.
    pub fn is_shaking(&self, now: Instant) -> bool {
        self.shake_started_at
            .is_some_and(|started| now.saturating_duration_since(started) < SHAKE_DURATION)
    }

    /// Opens a code attempt. Any notice left from a previous attempt is cleared.
    pub fn begin_code_check(&mut self, now: Instant) -> Result<&'static Plan, TransitionError> {
        match self.step {
            RegistrationStep::EnteringCode => {
                self.notice = None;
                self.last_active_at = now;
                Ok(self.plan())
            }
            RegistrationStep::EnteringEmail { .. } | RegistrationStep::Submitting { .. } => {
                Err(TransitionError::CodeAlreadyValidated)
            }
            RegistrationStep::Success(_) => Err(TransitionError::AlreadyCompleted),
        }
    }

    pub fn accept_code(&mut self, purchase_code: String) {
        if matches!(self.step, RegistrationStep::EnteringCode) {
            self.step = RegistrationStep::EnteringEmail { purchase_code };
        }
    }

    pub fn reject_code(&mut self, notice: Notice, now: Instant) {
        self.notice = Some(notice);
        self.shake_started_at = Some(now);
    }

    /// Moves `EnteringEmail` to `Submitting` and hands back the validated code.
    /// Refuses while another submission is outstanding.
    pub fn begin_submit(&mut self, now: Instant) -> Result<String, TransitionError> {
        let purchase_code = match &self.step {
            RegistrationStep::EnteringEmail { purchase_code } => purchase_code.clone(),
            RegistrationStep::EnteringCode => return Err(TransitionError::CodeNotValidated),
            RegistrationStep::Submitting { .. } => return Err(TransitionError::SubmissionInFlight),
            RegistrationStep::Success(_) => return Err(TransitionError::AlreadyCompleted),
        };

        self.notice = None;
        self.last_active_at = now;
        self.step = RegistrationStep::Submitting {
            purchase_code: purchase_code.clone(),
        };
        Ok(purchase_code)
    }

    /// Applies the outcome of a submission. Returns false when the session was not
    /// waiting for one, in which case nothing changes.
    pub fn finish_submit(
        &mut self,
        outcome: Result<RegistrationReceipt, Notice>,
        now: Instant,
    ) -> bool {
        let purchase_code = match &self.step {
            RegistrationStep::Submitting { purchase_code } => purchase_code.clone(),
            _ => return false,
        };

        self.last_active_at = now;
        match outcome {
            Ok(receipt) => {
                self.step = RegistrationStep::Success(Box::new(receipt));
            }
            Err(notice) => {
                self.step = RegistrationStep::EnteringEmail { purchase_code };
                self.notice = Some(notice);
            }
        }
        true
    }

    pub fn view(&self, session_id: Uuid, now: Instant) -> RegistrationSessionView {
        let receipt = match &self.step {
            RegistrationStep::Success(receipt) => Some(receipt.as_ref().clone()),
            _ => None,
        };

        RegistrationSessionView {
            session_id,
            plan: PlanDto::from(self.plan()),
            step: self.step.name(),
            notice: self.notice.clone(),
            shake: self.is_shaking(now),
            receipt,
        }
    }
}

#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct RegistrationSessionView {
    pub session_id: Uuid,
    pub plan: PlanDto,
    pub step: &'static str,
    pub notice: Option<Notice>,
    pub shake: bool,
    pub receipt: Option<RegistrationReceipt>,
}
