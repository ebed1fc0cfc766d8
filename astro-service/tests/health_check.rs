mod common;

use common::TestApp;
use serde_json::Value;

#[tokio::test]
async fn health_check_lists_priced_services() {
    let app = TestApp::spawn().await;

    let response = app.get("/api/health").await;
    assert!(response.status().is_success());

    let body: Value = response.json().await.expect("Failed to parse JSON");
    assert_eq!(body["status"], "ok");
    assert_eq!(body["generator"], "fallback");
    assert_eq!(body["bot_configured"], false);
    assert!(body["timestamp"].is_string());
    assert_eq!(
        body["services"],
        serde_json::json!(["weekly_horoscope", "compatibility", "tarot", "natal_chart"])
    );
}

#[tokio::test]
async fn root_describes_the_api() {
    let app = TestApp::spawn().await;

    let body: Value = app.get("/").await.json().await.unwrap();
    assert_eq!(body["message"], "Astrology Bot Backend is running!");
    let endpoints = body["endpoints"].as_array().unwrap();
    assert!(endpoints.iter().any(|e| e == "/api/create-invoice"));
}

#[tokio::test]
async fn responses_carry_a_request_id() {
    let app = TestApp::spawn().await;

    let response = app.get("/api/health").await;
    assert!(response.headers().contains_key("x-request-id"));
}

#[tokio::test]
async fn metrics_endpoint_serves_prometheus_text() {
    let app = TestApp::spawn().await;
    app.get("/api/health").await;

    let response = app.get("/metrics").await;
    assert_eq!(response.status().as_u16(), 200);
    let content_type = response.headers()["content-type"].to_str().unwrap().to_string();
    assert!(content_type.starts_with("text/plain"));
}
