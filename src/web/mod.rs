pub mod journal;
pub mod predict;
pub mod questionnaire;

#[cfg(test)]
pub(crate) mod testing;

use crate::state::SharedState;
use axum::{
    http::StatusCode,
    response::IntoResponse,
    routing::{get, post},
    Json, Router,
};
use serde_json::json;

async fn health() -> &'static str {
    "OK"
}

async fn not_found() -> impl IntoResponse {
    (
        StatusCode::NOT_FOUND,
        Json(json!({ "message": "Route not found" })),
    )
}

pub fn routes(state: SharedState) -> Router {
    Router::new()
        .route("/health", get(health))
        .nest("/journal", journal::router(state.clone()))
        .nest("/questionnaire", questionnaire::router(state.clone()))
        .route("/predict-ml", post(predict::predict_ml).with_state(state))
        .fallback(not_found)
}

#[cfg(test)]
mod tests {
    use super::testing::{app, read_json, StubPredictor};
    use axum::body::Body;
    use axum::http::{Request, StatusCode};
    use tower::ServiceExt;

    #[tokio::test]
    async fn test_health() {
        let (app, _, _) = app(StubPredictor::default());
        let resp = app
            .oneshot(Request::get("/health").body(Body::empty()).unwrap())
            .await
            .unwrap();
        assert_eq!(resp.status(), StatusCode::OK);
    }

    #[tokio::test]
    async fn test_unknown_route_is_json_404() {
        let (app, _, _) = app(StubPredictor::default());
        let resp = app
            .oneshot(Request::get("/nope").body(Body::empty()).unwrap())
            .await
            .unwrap();
        assert_eq!(resp.status(), StatusCode::NOT_FOUND);
        let body = read_json(resp).await;
        assert_eq!(body["message"], "Route not found");
    }
}
