use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde::Serialize;
use thiserror::Error;
use tracing::error;

use crate::usecases::registration_sessions::{SessionError, SessionReply};

#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub code: u16,
    pub message: String,
}

#[derive(Debug, Error)]
pub enum AppError {
    #[error("{0}")]
    NotFound(String),

    #[error("{0}")]
    Conflict(String),

    #[error("{0}")]
    Unavailable(String),

    #[error("Internal server error")]
    Internal(#[from] anyhow::Error),
}

impl From<SessionError> for AppError {
    fn from(err: SessionError) -> Self {
        match err {
            SessionError::UnknownPlan(_) | SessionError::NotFound => {
                AppError::NotFound(err.to_string())
            }
            SessionError::TooManySessions => AppError::Unavailable(err.to_string()),
            SessionError::Transition(transition) => AppError::Conflict(transition.to_string()),
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, message) = match self {
            AppError::NotFound(msg) => (StatusCode::NOT_FOUND, msg),
            AppError::Conflict(msg) => (StatusCode::CONFLICT, msg),
            AppError::Unavailable(msg) => (StatusCode::SERVICE_UNAVAILABLE, msg),
            AppError::Internal(err) => {
                error!(error = ?err, "http: internal error");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "Internal server error".to_string(),
                )
            }
        };

        let body = Json(ErrorResponse {
            code: status.as_u16(),
            message,
        });

        (status, body).into_response()
    }
}

/// The session view always goes back to the client; the status carries the outcome.
impl IntoResponse for SessionReply {
    fn into_response(self) -> Response {
        (self.status_code(), Json(self.view)).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crates::domain::value_objects::registration_sessions::TransitionError;

    #[test]
    fn session_errors_map_to_http_statuses() {
        let not_found = AppError::from(SessionError::NotFound).into_response();
        assert_eq!(not_found.status(), StatusCode::NOT_FOUND);

        let unknown_plan =
            AppError::from(SessionError::UnknownPlan("gold".to_string())).into_response();
        assert_eq!(unknown_plan.status(), StatusCode::NOT_FOUND);

        let in_flight =
            AppError::from(SessionError::Transition(TransitionError::SubmissionInFlight))
                .into_response();
        assert_eq!(in_flight.status(), StatusCode::CONFLICT);

        let capped = AppError::from(SessionError::TooManySessions).into_response();
        assert_eq!(capped.status(), StatusCode::SERVICE_UNAVAILABLE);
    }

    #[tokio::test]
    async fn error_body_carries_code_and_message() {
        let resp = AppError::from(SessionError::NotFound).into_response();
        let bytes = axum::body::to_bytes(resp.into_body(), usize::MAX)
            .await
            .unwrap();
        let body: serde_json::Value = serde_json::from_slice(&bytes).unwrap();

        assert_eq!(body["code"], 404);
        assert_eq!(body["message"], "registration session not found");
    }

    #[test]
    fn internal_errors_hide_details() {
        let err = AppError::from(anyhow::anyhow!("connection refused to 10.0.0.3"));
        assert_eq!(err.to_string(), "Internal server error");
        assert_eq!(
            err.into_response().status(),
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }
}
