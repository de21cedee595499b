use std::{
    collections::HashMap,
    sync::{Arc, Mutex, MutexGuard},
    time::{Duration, Instant},
};

use axum::http::StatusCode;
use crates::domain::value_objects::{
    plans::PlanId,
    registration_sessions::{
        RegistrationSession, RegistrationSessionView, RegistrationStep, TransitionError,
    },
    subscribers::RegistrationReceipt,
};
use thiserror::Error;
use tracing::{error, info, warn};
use uuid::Uuid;

use super::registration::{RegistrationError, RegistrationUseCase, UseCaseResult, unexpected};

type SessionMap = HashMap<Uuid, RegistrationSession>;

#[derive(Debug, Error)]
pub enum SessionError {
    #[error("unknown plan: {0}")]
    UnknownPlan(String),
    #[error("registration session not found")]
    NotFound,
    #[error("too many open registration sessions, try again later")]
    TooManySessions,
    #[error(transparent)]
    Transition(#[from] TransitionError),
}

impl SessionError {
    pub fn status_code(&self) -> StatusCode {
        match self {
            SessionError::UnknownPlan(_) | SessionError::NotFound => StatusCode::NOT_FOUND,
            SessionError::TooManySessions => StatusCode::SERVICE_UNAVAILABLE,
            SessionError::Transition(_) => StatusCode::CONFLICT,
        }
    }
}

/// Session state after an action, plus the visitor-facing error the action produced.
#[derive(Debug)]
pub struct SessionReply {
    pub view: RegistrationSessionView,
    pub error: Option<RegistrationError>,
}

impl SessionReply {
    pub fn status_code(&self) -> StatusCode {
        self.error
            .as_ref()
            .map(RegistrationError::status_code)
            .unwrap_or(StatusCode::OK)
    }
}

#[derive(Debug, Clone, Copy)]
pub struct SessionLimits {
    pub idle_ttl: Duration,
    pub max_open: usize,
}

/// In-memory registration sessions, one per open purchase dialog.
pub struct RegistrationSessionUseCase {
    registration: Arc<RegistrationUseCase>,
    sessions: Arc<Mutex<SessionMap>>,
    limits: SessionLimits,
}

impl RegistrationSessionUseCase {
    pub fn new(registration: Arc<RegistrationUseCase>, limits: SessionLimits) -> Self {
        Self {
            registration,
            sessions: Arc::new(Mutex::new(HashMap::new())),
            limits,
        }
    }

    pub fn open(&self, plan_id: &str) -> Result<RegistrationSessionView, SessionError> {
        let plan_id = PlanId::from_str(plan_id).ok_or_else(|| {
            let err = SessionError::UnknownPlan(plan_id.to_string());
            warn!(
                status = err.status_code().as_u16(),
                "registration_sessions: unknown plan requested"
            );
            err
        })?;

        let now = Instant::now();
        let mut sessions = self.lock_pruned(now);
        if sessions.len() >= self.limits.max_open {
            let err = SessionError::TooManySessions;
            warn!(
                open_sessions = sessions.len(),
                max_open = self.limits.max_open,
                status = err.status_code().as_u16(),
                "registration_sessions: session cap reached"
            );
            return Err(err);
        }

        let session_id = Uuid::new_v4();
        let session = RegistrationSession::new(plan_id, now);
        let view = session.view(session_id, now);
        sessions.insert(session_id, session);
        info!(
            %session_id,
            %plan_id,
            open_sessions = sessions.len(),
            "registration_sessions: session opened"
        );

        Ok(view)
    }

    pub fn view(&self, session_id: Uuid) -> Result<RegistrationSessionView, SessionError> {
        let now = Instant::now();
        let sessions = self.lock_pruned(now);
        let session = sessions.get(&session_id).ok_or(SessionError::NotFound)?;
        Ok(session.view(session_id, now))
    }

    pub fn submit_code(
        &self,
        session_id: Uuid,
        purchase_code: &str,
    ) -> Result<SessionReply, SessionError> {
        let now = Instant::now();
        let mut sessions = self.lock_pruned(now);
        let session = sessions
            .get_mut(&session_id)
            .ok_or(SessionError::NotFound)?;

        let plan = session.begin_code_check(now).map_err(|err| {
            warn!(%session_id, error = %err, "registration_sessions: code submitted out of step");
            err
        })?;

        let error = match RegistrationUseCase::validate(plan, purchase_code) {
            Ok(normalized) => {
                session.accept_code(normalized);
                None
            }
            Err(err) => {
                session.reject_code(err.notice(), now);
                Some(err)
            }
        };

        Ok(SessionReply {
            view: session.view(session_id, now),
            error,
        })
    }

    /// Runs the registration outside the session lock. The store call and the write-back of
    /// its outcome live in one detached task, so the session leaves `Submitting` even when
    /// the caller goes away. The outcome is dropped if the session was dismissed meanwhile.
    pub async fn submit_email(
        &self,
        session_id: Uuid,
        email: String,
    ) -> Result<SessionReply, SessionError> {
        let (plan, purchase_code) = {
            let now = Instant::now();
            let mut sessions = self.lock_pruned(now);
            let session = sessions
                .get_mut(&session_id)
                .ok_or(SessionError::NotFound)?;
            let purchase_code = session.begin_submit(now).map_err(|err| {
                warn!(%session_id, error = %err, "registration_sessions: submission refused");
                err
            })?;
            (session.plan(), purchase_code)
        };

        let registration = Arc::clone(&self.registration);
        let sessions = Arc::clone(&self.sessions);
        let submission = tokio::spawn(async move {
            let outcome = tokio::spawn(async move {
                registration.register(plan, &email, &purchase_code).await
            })
            .await
            .unwrap_or_else(|join_err| {
                error!(%session_id, error = %join_err, "registration_sessions: registration task failed");
                Err(unexpected(join_err))
            });

            apply_outcome(&sessions, session_id, outcome)
        });

        match submission.await {
            Ok(reply) => reply,
            Err(join_err) => {
                error!(%session_id, error = %join_err, "registration_sessions: write-back task failed");
                Ok(SessionReply {
                    view: self.view(session_id)?,
                    error: Some(unexpected(join_err)),
                })
            }
        }
    }

    /// Discards the session and everything entered in it.
    pub fn dismiss(&self, session_id: Uuid) -> Result<(), SessionError> {
        let mut sessions = self.lock();
        match sessions.remove(&session_id) {
            Some(session) => {
                info!(
                    %session_id,
                    step = session.step().name(),
                    "registration_sessions: session dismissed"
                );
                Ok(())
            }
            None => Err(SessionError::NotFound),
        }
    }

    pub fn open_sessions(&self) -> usize {
        self.lock().len()
    }

    fn lock(&self) -> MutexGuard<'_, SessionMap> {
        lock_sessions(&self.sessions)
    }

    /// Locks and drops sessions idle for longer than the TTL. In-flight sessions are kept.
    fn lock_pruned(&self, now: Instant) -> MutexGuard<'_, SessionMap> {
        let mut sessions = self.lock();
        let before = sessions.len();
        sessions.retain(|_, session| {
            matches!(session.step(), RegistrationStep::Submitting { .. })
                || now.saturating_duration_since(session.last_active_at()) < self.limits.idle_ttl
        });

        let pruned = before - sessions.len();
        if pruned > 0 {
            info!(pruned, "registration_sessions: idle sessions expired");
        }
        sessions
    }
}

fn lock_sessions(sessions: &Mutex<SessionMap>) -> MutexGuard<'_, SessionMap> {
    sessions
        .lock()
        .unwrap_or_else(|poisoned| poisoned.into_inner())
}

fn apply_outcome(
    sessions: &Mutex<SessionMap>,
    session_id: Uuid,
    outcome: UseCaseResult<RegistrationReceipt>,
) -> Result<SessionReply, SessionError> {
    let now = Instant::now();
    let mut sessions = lock_sessions(sessions);
    let Some(session) = sessions.get_mut(&session_id) else {
        warn!(
            %session_id,
            succeeded = outcome.is_ok(),
            "registration_sessions: session dismissed before registration finished; result discarded"
        );
        return Err(SessionError::NotFound);
    };

    let (applied, error) = match outcome {
        Ok(receipt) => (session.finish_submit(Ok(receipt), now), None),
        Err(err) => (session.finish_submit(Err(err.notice()), now), Some(err)),
    };
    if !applied {
        warn!(%session_id, "registration_sessions: session was not awaiting a result");
    }

    Ok(SessionReply {
        view: session.view(session_id, now),
        error,
    })
}
