use axum::{Json, Router, http::StatusCode, response::IntoResponse, routing::get};
use crates::domain::value_objects::site_content::SITE_CONTENT;

pub fn routes() -> Router {
    Router::new().route("/", get(site_content))
}

pub async fn site_content() -> impl IntoResponse {
    (StatusCode::OK, Json(&SITE_CONTENT)).into_response()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn site_payload_includes_testimonials_and_steps() {
        let resp = site_content().await.into_response();
        assert_eq!(resp.status(), StatusCode::OK);

        let bytes = axum::body::to_bytes(resp.into_body(), usize::MAX)
            .await
            .unwrap();
        let body: serde_json::Value = serde_json::from_slice(&bytes).unwrap();

        assert_eq!(body["testimonials"].as_array().map(Vec::len), Some(4));
        assert_eq!(body["testimonials"][0]["name"], "Michael Chen");
        assert_eq!(body["how_it_works"]["steps"][3]["title"], "Profit");
        assert_eq!(body["brand"], "David Anderson Trade");
    }
}
