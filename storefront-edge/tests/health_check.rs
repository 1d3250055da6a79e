mod common;

use axum::http::{header, StatusCode};
use common::{body_string, get, TestEdge};
use tower::util::ServiceExt;

#[tokio::test]
async fn health_check_works() {
    let edge = TestEdge::spawn().await;
    edge.forbid_lookups().await;

    let response = edge
        .router()
        .oneshot(get("store.test", "/health", None))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    assert!(response.headers().get(header::SET_COOKIE).is_none());

    let body: serde_json::Value = serde_json::from_str(&body_string(response).await).unwrap();
    assert_eq!(body["status"], "ok");
    assert_eq!(body["service"], "storefront-edge");
}

#[tokio::test]
async fn metrics_endpoint_is_served_locally() {
    let edge = TestEdge::spawn().await;
    edge.forbid_lookups().await;

    let response = edge
        .router()
        .oneshot(get("store.test", "/metrics", None))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    assert!(response.headers()[header::CONTENT_TYPE]
        .to_str()
        .unwrap()
        .starts_with("text/plain"));
}
