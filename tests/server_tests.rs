mod common;

use std::sync::Arc;

use axum::body::{to_bytes, Body};
use axum::http::{header, Request, StatusCode as HttpStatus};
use axum::Router;
use common::*;
use reqwest::StatusCode;
use serde_json::{json, Value};
use tower::ServiceExt;

use scanfit::server::router;

fn app(transport: MockTransport) -> Router {
    router(Arc::new(analyzer(transport)))
}

fn analyze_request(body: Value) -> Request<Body> {
    Request::builder()
        .method("POST")
        .uri("/api/analyze-body")
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(body.to_string()))
        .unwrap()
}

fn full_payload() -> Value {
    json!({
        "photos": serde_json::to_value(sample_photos()).unwrap(),
        "userData": {
            "gender": "female",
            "age": 28,
            "weight": 60,
            "height": 165,
            "goal": "fat_loss"
        }
    })
}

async fn read_json(response: axum::response::Response) -> Value {
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    serde_json::from_slice(&bytes).unwrap()
}

#[tokio::test]
async fn test_analyze_success() {
    let transport = MockTransport::with_content(SAMPLE_REPLY);
    let response = app(transport.clone())
        .oneshot(analyze_request(full_payload()))
        .await
        .unwrap();

    assert_eq!(response.status(), HttpStatus::OK);
    let body = read_json(response).await;
    assert_eq!(body["bmi"], 22.0);
    assert_eq!(body["bodyType"], "mesomorph");
    assert_eq!(body["recommendations"], json!(["a", "b", "c"]));
    assert_eq!(transport.call_count(), 1);
}

#[tokio::test]
async fn test_missing_user_data_is_bad_request() {
    let transport = MockTransport::with_content(SAMPLE_REPLY);
    let payload = json!({ "photos": serde_json::to_value(sample_photos()).unwrap() });

    let response = app(transport.clone())
        .oneshot(analyze_request(payload))
        .await
        .unwrap();

    assert_eq!(response.status(), HttpStatus::BAD_REQUEST);
    let body = read_json(response).await;
    assert!(body["error"].as_str().unwrap().contains("userData"));
    assert_eq!(transport.call_count(), 0);
}

#[tokio::test]
async fn test_malformed_user_data_is_bad_request() {
    let transport = MockTransport::with_content(SAMPLE_REPLY);
    let mut payload = full_payload();
    payload["userData"]["gender"] = json!("robot");

    let response = app(transport.clone())
        .oneshot(analyze_request(payload))
        .await
        .unwrap();

    assert_eq!(response.status(), HttpStatus::BAD_REQUEST);
    assert_eq!(transport.call_count(), 0);
}

#[tokio::test]
async fn test_missing_credential_is_server_error() {
    let transport = MockTransport::with_content(SAMPLE_REPLY);
    let analyzer = analyzer_with_key(None, transport.clone());

    let response = router(Arc::new(analyzer))
        .oneshot(analyze_request(full_payload()))
        .await
        .unwrap();

    assert_eq!(response.status(), HttpStatus::INTERNAL_SERVER_ERROR);
    let body = read_json(response).await;
    assert!(body["error"].as_str().unwrap().contains("OPENAI_API_KEY"));
    assert_eq!(transport.call_count(), 0);
}

#[tokio::test]
async fn test_rate_limit_status_is_forwarded() {
    let transport = MockTransport::replying(StatusCode::TOO_MANY_REQUESTS, "");

    let response = app(transport)
        .oneshot(analyze_request(full_payload()))
        .await
        .unwrap();

    assert_eq!(response.status(), HttpStatus::TOO_MANY_REQUESTS);
    let body = read_json(response).await;
    assert!(body["error"].as_str().unwrap().contains("try again"));
}

#[tokio::test]
async fn test_bad_credential_is_unauthorized() {
    let transport = MockTransport::replying(StatusCode::UNAUTHORIZED, "");

    let response = app(transport)
        .oneshot(analyze_request(full_payload()))
        .await
        .unwrap();

    assert_eq!(response.status(), HttpStatus::UNAUTHORIZED);
}

#[tokio::test]
async fn test_health_reports_credential() {
    let response = app(MockTransport::default())
        .oneshot(Request::builder().uri("/health").body(Body::empty()).unwrap())
        .await
        .unwrap();

    assert_eq!(response.status(), HttpStatus::OK);
    let body = read_json(response).await;
    assert_eq!(body, json!({ "status": "ok", "credentialConfigured": true }));
}
