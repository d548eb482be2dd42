use axum::body::Body;
use axum::http::{Request, StatusCode};
use tower::ServiceExt;

use super::{GatewayState, router};

fn make_router() -> axum::Router {
    router(GatewayState::new("development"))
}

async fn get_json(app: axum::Router, uri: &str) -> (StatusCode, serde_json::Value) {
    let req = Request::builder()
        .method("GET")
        .uri(uri)
        .body(Body::empty())
        .unwrap();
    let resp = app.oneshot(req).await.unwrap();
    let status = resp.status();
    let body = axum::body::to_bytes(resp.into_body(), 4096).await.unwrap();
    let json = serde_json::from_slice(&body).unwrap_or(serde_json::Value::Null);
    (status, json)
}

#[tokio::test]
async fn health_reports_status_and_version() {
    let (status, json) = get_json(make_router(), "/health").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["status"], "ok");
    assert_eq!(json["version"], crate::VERSION);
    assert_eq!(json["environment"], "development");
    assert!(json["uptime_seconds"].is_u64());
}

#[tokio::test]
async fn ping_returns_ok() {
    let (status, json) = get_json(make_router(), "/ping").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["status"], "ok");
}

#[tokio::test]
async fn ready_returns_true() {
    let (status, json) = get_json(make_router(), "/ready").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["ready"], true);
}

#[tokio::test]
async fn unknown_path_is_404() {
    let (status, _) = get_json(make_router(), "/nope").await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}
