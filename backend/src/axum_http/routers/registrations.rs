use std::sync::Arc;

use axum::{
    Json, Router,
    extract::{Path, State},
    http::StatusCode,
    response::IntoResponse,
    routing::{get, post},
};
use serde::Deserialize;
use tracing::info;
use uuid::Uuid;

use crate::{
    axum_http::error_responses::AppError,
    usecases::registration_sessions::RegistrationSessionUseCase,
};

#[derive(Debug, Deserialize)]
pub struct OpenRegistrationRequest {
    pub plan_id: String,
}

#[derive(Debug, Deserialize)]
pub struct SubmitCodeRequest {
    pub purchase_code: String,
}

#[derive(Debug, Deserialize)]
pub struct SubmitEmailRequest {
    pub email: String,
}

pub fn routes(usecase: Arc<RegistrationSessionUseCase>) -> Router {
    Router::new()
        .route("/", post(open_registration))
        .route("/:session_id", get(get_registration).delete(dismiss_registration))
        .route("/:session_id/code", post(submit_code))
        .route("/:session_id/email", post(submit_email))
        .with_state(usecase)
}

pub async fn open_registration(
    State(usecase): State<Arc<RegistrationSessionUseCase>>,
    Json(request): Json<OpenRegistrationRequest>,
) -> impl IntoResponse {
    match usecase.open(&request.plan_id) {
        Ok(view) => (StatusCode::CREATED, Json(view)).into_response(),
        Err(err) => AppError::from(err).into_response(),
    }
}

pub async fn get_registration(
    State(usecase): State<Arc<RegistrationSessionUseCase>>,
    Path(session_id): Path<Uuid>,
) -> impl IntoResponse {
    match usecase.view(session_id) {
        Ok(view) => (StatusCode::OK, Json(view)).into_response(),
        Err(err) => AppError::from(err).into_response(),
    }
}

pub async fn submit_code(
    State(usecase): State<Arc<RegistrationSessionUseCase>>,
    Path(session_id): Path<Uuid>,
    Json(request): Json<SubmitCodeRequest>,
) -> impl IntoResponse {
    info!(%session_id, "registrations: purchase code submitted");
    match usecase.submit_code(session_id, &request.purchase_code) {
        Ok(reply) => reply.into_response(),
        Err(err) => AppError::from(err).into_response(),
    }
}

pub async fn submit_email(
    State(usecase): State<Arc<RegistrationSessionUseCase>>,
    Path(session_id): Path<Uuid>,
    Json(request): Json<SubmitEmailRequest>,
) -> impl IntoResponse {
    info!(%session_id, "registrations: email submitted");
    match usecase.submit_email(session_id, request.email).await {
        Ok(reply) => reply.into_response(),
        Err(err) => AppError::from(err).into_response(),
    }
}

pub async fn dismiss_registration(
    State(usecase): State<Arc<RegistrationSessionUseCase>>,
    Path(session_id): Path<Uuid>,
) -> impl IntoResponse {
    match usecase.dismiss(session_id) {
        Ok(()) => StatusCode::NO_CONTENT.into_response(),
        Err(err) => AppError::from(err).into_response(),
    }
}
