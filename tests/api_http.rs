// tests/api_http.rs
//
// HTTP-level tests for the public API Router without opening sockets.
// We exercise the router directly via tower::ServiceExt::oneshot.
//
// Covered:
// - GET /health
// - GET /api/interruptions with every feed unreachable
// - CORS headers for cross-origin map UIs

use std::sync::Arc;

use anyhow::{anyhow, Result};
use async_trait::async_trait;
use serde_json::Value as Json;
use shuttle_axum::axum::{
    body::{self, Body},
    http::{Request, StatusCode},
    Router,
};
use tower::ServiceExt as _; // for `oneshot`

use verkeershinder_aggregator::aggregate::Aggregator;
use verkeershinder_aggregator::api::{self, AppState};
use verkeershinder_aggregator::fetch::SourceFetcher;
use verkeershinder_aggregator::sources;
use verkeershinder_aggregator::transport::PayloadTransport;

const BODY_LIMIT: usize = 1024 * 1024; // 1MB, safe for tests

/// Transport double that refuses every connection.
struct AllFeedsDown;

#[async_trait]
impl PayloadTransport for AllFeedsDown {
    async fn fetch_text(&self, _location: &str) -> Result<String> {
        Err(anyhow!("connection refused"))
    }
}

/// Build the same Router the binary uses, with the real registry.
fn router_with(transport: impl PayloadTransport + 'static) -> Router {
    let fetcher = SourceFetcher::new(Arc::new(transport));
    let aggregator = Arc::new(Aggregator::new(sources::registry(), fetcher));
    api::create_router(AppState { aggregator })
}

#[tokio::test]
async fn api_health_returns_200_and_ok_body() {
    let app = router_with(AllFeedsDown);

    let req = Request::builder()
        .method("GET")
        .uri("/health")
        .body(Body::empty())
        .expect("build GET /health");

    let resp = app.oneshot(req).await.expect("oneshot /health");
    assert_eq!(resp.status(), StatusCode::OK, "health should be 200");

    let bytes = body::to_bytes(resp.into_body(), BODY_LIMIT)
        .await
        .expect("read body")
        .to_vec();
    let body = String::from_utf8(bytes).expect("utf8");
    assert_eq!(body.trim(), "OK", "health body should be 'OK'");
}

#[tokio::test]
async fn all_sources_down_is_still_200_with_empty_array() {
    let app = router_with(AllFeedsDown);

    let req = Request::builder()
        .method("GET")
        .uri("/api/interruptions")
        .body(Body::empty())
        .expect("build GET /api/interruptions");

    let resp = app.oneshot(req).await.expect("oneshot /api/interruptions");
    assert_eq!(
        resp.status(),
        StatusCode::OK,
        "dead feeds are not a server error"
    );

    let bytes = body::to_bytes(resp.into_body(), BODY_LIMIT)
        .await
        .expect("read json")
        .to_vec();
    let v: Json = serde_json::from_slice(&bytes).expect("parse json");
    assert_eq!(v, serde_json::json!([]), "empty array, indistinguishable from 'nothing reported'");
}

#[tokio::test]
async fn cross_origin_requests_are_allowed() {
    let app = router_with(AllFeedsDown);

    let req = Request::builder()
        .method("GET")
        .uri("/api/interruptions")
        .header("origin", "https://kaart.example")
        .body(Body::empty())
        .expect("build request with Origin");

    let resp = app.oneshot(req).await.expect("oneshot with origin");
    assert_eq!(resp.status(), StatusCode::OK);

    let allowed = resp
        .headers()
        .get("access-control-allow-origin")
        .and_then(|h| h.to_str().ok())
        .unwrap_or("");
    assert_eq!(allowed, "https://kaart.example");
}
