use axum::{
    Json, Router,
    extract::Path,
    http::StatusCode,
    response::IntoResponse,
    routing::get,
};
use crates::domain::value_objects::plans::{self, Plan, PlanDto, PlanId};
use tracing::{info, warn};

use crate::axum_http::error_responses::AppError;

pub fn routes() -> Router {
    Router::new()
        .route("/", get(list_plans))
        .route("/:plan_id", get(get_plan))
}

pub async fn list_plans() -> impl IntoResponse {
    let plans: Vec<PlanDto> = plans::plans().iter().map(PlanDto::from).collect();
    (StatusCode::OK, Json(plans)).into_response()
}

pub async fn get_plan(Path(plan_id): Path<String>) -> impl IntoResponse {
    match PlanId::from_str(&plan_id) {
        Some(id) => {
            info!(plan_id = %id, "plans: plan requested");
            (StatusCode::OK, Json(PlanDto::from(Plan::find(id)))).into_response()
        }
        None => {
            warn!(plan_id = %plan_id, "plans: unknown plan requested");
            AppError::NotFound(format!("unknown plan: {plan_id}")).into_response()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn unknown_plan_is_404() {
        let resp = get_plan(Path("gold".to_string())).await.into_response();
        assert_eq!(resp.status(), StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn known_plan_is_200() {
        let resp = get_plan(Path("Premium".to_string())).await.into_response();
        assert_eq!(resp.status(), StatusCode::OK);
    }
}
