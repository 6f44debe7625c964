use std::sync::Arc;

use shuttle_axum::axum::{
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::get,
    Json, Router,
};
use tower_http::cors::CorsLayer;

use crate::aggregate::Aggregator;

#[derive(Clone)]
pub struct AppState {
    pub aggregator: Arc<Aggregator>,
}

pub fn create_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(|| async { "OK" }))
        .route("/api/interruptions", get(interruptions))
        .layer(CorsLayer::very_permissive())
        .with_state(state)
}

/// One aggregation cycle per request. An empty array is a normal answer:
/// clients cannot tell "all feeds down" from "nothing reported right now",
/// and that is intentional.
async fn interruptions(State(state): State<AppState>) -> Response {
    match state.aggregator.run().await {
        Ok(interruptions) => (StatusCode::OK, Json(interruptions)).into_response(),
        Err(e) => {
            tracing::error!(error = %e, "aggregation cycle failed");
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(serde_json::json!({ "error": "Interne serverfout" })),
            )
                .into_response()
        }
    }
}
