//! HTTP tool against a local mock server.

use agentry_core::{ExecutionContext, ToolExt, ToolInput};
use agentry_tools::HttpRequestTool;
use serde_json::json;
use std::time::Duration;
use wiremock::matchers::{body_json, body_string, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn request(url: String) -> ToolInput {
    ToolInput::new("http_request").param("url", url)
}

#[tokio::test]
async fn get_returns_response_body() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/status"))
        .respond_with(ResponseTemplate::new(200).set_body_string("all good"))
        .expect(1)
        .mount(&server)
        .await;

    let result = HttpRequestTool::new()
        .execute(&request(format!("{}/status", server.uri())), &ExecutionContext::new())
        .await;

    assert!(result.is_success(), "{:?}", result.error_message());
    assert_eq!(result.data(), Some(&json!("all good")));
}

#[tokio::test]
async fn post_sends_string_body_verbatim() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/echo"))
        .and(body_string("raw payload"))
        .respond_with(ResponseTemplate::new(201).set_body_string("created"))
        .mount(&server)
        .await;

    let input = request(format!("{}/echo", server.uri()))
        .param("method", "POST")
        .param("body", "raw payload");
    let result = HttpRequestTool::new()
        .execute(&input, &ExecutionContext::new())
        .await;

    assert_eq!(result.data(), Some(&json!("created")));
}

#[tokio::test]
async fn put_sends_json_body() {
    let server = MockServer::start().await;
    Mock::given(method("PUT"))
        .and(path("/items/1"))
        .and(body_json(json!({"name": "widget"})))
        .respond_with(ResponseTemplate::new(200).set_body_string("updated"))
        .mount(&server)
        .await;

    let input = request(format!("{}/items/1", server.uri()))
        .param("method", "put")
        .param("body", json!({"name": "widget"}));
    let result = HttpRequestTool::new()
        .execute(&input, &ExecutionContext::new())
        .await;

    assert_eq!(result.data(), Some(&json!("updated")));
}

#[tokio::test]
async fn error_status_is_a_failure() {
    let server = MockServer::start().await;
    Mock::given(method("DELETE"))
        .respond_with(ResponseTemplate::new(404))
        .mount(&server)
        .await;

    let input = request(format!("{}/gone", server.uri())).param("method", "DELETE");
    let result = HttpRequestTool::new()
        .execute(&input, &ExecutionContext::new())
        .await;

    assert_eq!(result.error_code(), Some("HTTP_REQUEST_FAILED"));
    assert!(result.error_message().unwrap().starts_with("HTTP request failed: 404"));
}

#[tokio::test]
async fn slow_server_hits_the_timeout() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(200).set_delay(Duration::from_secs(3)))
        .mount(&server)
        .await;

    let input = request(server.uri()).param("timeout", 1);
    let result = HttpRequestTool::new()
        .execute(&input, &ExecutionContext::new())
        .await;

    assert_eq!(result.error_code(), Some("TIMEOUT"));
    assert!(result.execution_time_ms >= 1000);
    assert!(result.execution_time_ms < 3000);
}

#[tokio::test]
async fn missing_url_fails_without_network() {
    let result = HttpRequestTool::new()
        .execute(&ToolInput::new("http_request"), &ExecutionContext::new())
        .await;

    assert_eq!(
        result.error_message(),
        Some("HTTP request failed: Invalid input: url is required")
    );
}
