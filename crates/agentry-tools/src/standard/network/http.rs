//! # HTTP Request Tool
//!
//! Sends a single HTTP request and returns the response body. Parameters:
//!
//! - `url` - absolute `http://` or `https://` URL
//! - `method` - `GET` (default), `POST`, `PUT` or `DELETE`
//! - `body` - request body for `POST`/`PUT`; strings are sent verbatim,
//!   other JSON values are sent as `application/json`
//! - `timeout` - whole-request timeout in seconds (default 10)

use agentry_core::{ExecutionContext, FailureReason, Tool, ToolInput};
use async_trait::async_trait;
use reqwest::{Client, Method};
use serde_json::Value;
use std::time::Duration;
use tracing::debug;

pub const HTTP_REQUEST: &str = "http_request";
pub const DEFAULT_TIMEOUT_SECS: u64 = 10;
const FAILURE_CODE: &str = "HTTP_REQUEST_FAILED";

/// Resolved request settings for one call.
#[derive(Debug, Clone, PartialEq)]
pub struct HttpConfig {
    pub url: String,
    pub method: Method,
    pub body: Option<Value>,
    pub timeout_secs: u64,
}

impl HttpConfig {
    pub fn new(url: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            method: Method::GET,
            body: None,
            timeout_secs: DEFAULT_TIMEOUT_SECS,
        }
    }

    /// Read the request settings out of tool parameters.
    pub fn from_input(input: &ToolInput) -> Result<Self, FailureReason> {
        let url = input.require_str("url")?;
        if !url.starts_with("http://") && !url.starts_with("https://") {
            return Err(FailureReason::invalid_input(format!("Invalid URL format: {url}")));
        }

        let method = match input.get_str("method") {
            None => Method::GET,
            Some(name) => parse_method(name).ok_or_else(|| {
                FailureReason::invalid_input(format!("Unsupported HTTP method: {name}"))
            })?,
        };

        let timeout_secs = match input.get("timeout") {
            None | Some(Value::Null) => DEFAULT_TIMEOUT_SECS,
            Some(value) => timeout_from(value).ok_or_else(|| {
                FailureReason::invalid_input(format!("timeout must be a positive number of seconds, got {value}"))
            })?,
        };

        Ok(Self {
            url: url.to_string(),
            method,
            body: input.get("body").filter(|body| !body.is_null()).cloned(),
            timeout_secs,
        })
    }
}

fn parse_method(name: &str) -> Option<Method> {
    match name.trim().to_uppercase().as_str() {
        "GET" => Some(Method::GET),
        "POST" => Some(Method::POST),
        "PUT" => Some(Method::PUT),
        "DELETE" => Some(Method::DELETE),
        _ => None,
    }
}

fn timeout_from(value: &Value) -> Option<u64> {
    let secs = match value {
        Value::Number(n) => n.as_u64(),
        Value::String(s) => s.trim().parse::<u64>().ok(),
        _ => None,
    }?;
    (secs > 0).then_some(secs)
}

fn failure(message: impl std::fmt::Display) -> FailureReason {
    FailureReason::Custom {
        category: FAILURE_CODE.to_string(),
        message: format!("HTTP request failed: {message}"),
    }
}

/// Sends HTTP requests to external services.
#[derive(Debug, Clone, Default)]
pub struct HttpRequestTool {
    client: Client,
}

impl HttpRequestTool {
    pub fn new() -> Self {
        Self {
            client: Client::new(),
        }
    }

    /// Use a preconfigured client, e.g. with proxies or default headers.
    pub fn with_client(client: Client) -> Self {
        Self { client }
    }

    async fn send(&self, config: HttpConfig) -> Result<Value, FailureReason> {
        let timeout = Duration::from_secs(config.timeout_secs);
        let mut request = self
            .client
            .request(config.method.clone(), &config.url)
            .timeout(timeout);

        if matches!(config.method, Method::POST | Method::PUT) {
            request = match config.body {
                Some(Value::String(text)) => request.body(text),
                Some(other) => request.json(&other),
                None => request.body(String::new()),
            };
        }

        let response = request.send().await.map_err(|e| {
            if e.is_timeout() {
                FailureReason::Timeout {
                    operation: format!("{} {} after {}s", config.method, config.url, config.timeout_secs),
                }
            } else {
                failure(e)
            }
        })?;

        let status = response.status();
        let body = response
            .text()
            .await
            .map_err(|e| failure(format!("failed to read response body: {e}")))?;

        if !status.is_success() {
            return Err(failure(format!("{} from {}", status, config.url)));
        }
        Ok(Value::String(body))
    }
}

#[async_trait]
impl Tool for HttpRequestTool {
    fn name(&self) -> &str {
        HTTP_REQUEST
    }

    fn description(&self) -> &str {
        "Send HTTP requests to external services"
    }

    fn check_input(&self, input: &ToolInput) -> Result<(), FailureReason> {
        HttpConfig::from_input(input).map(|_| ())
    }

    async fn call(
        &self,
        input: &ToolInput,
        _context: &ExecutionContext,
    ) -> Result<Value, FailureReason> {
        let config = HttpConfig::from_input(input).map_err(|reason| failure(reason.message()))?;
        debug!(tool = HTTP_REQUEST, method = %config.method, url = %config.url, "Executing HTTP request");
        self.send(config).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;
    use serde_json::json;

    #[test]
    fn defaults_to_get_with_ten_second_timeout() {
        let config =
            HttpConfig::from_input(&ToolInput::new(HTTP_REQUEST).param("url", "https://example.com"))
                .unwrap();

        assert_eq!(config.method, Method::GET);
        assert_eq!(config.timeout_secs, 10);
        assert_eq!(config.body, None);
    }

    #[test]
    fn timeout_accepts_numeric_strings() {
        let input = ToolInput::new(HTTP_REQUEST)
            .param("url", "http://localhost")
            .param("method", "post")
            .param("timeout", "3")
            .param("body", json!({"a": 1}));
        let config = HttpConfig::from_input(&input).unwrap();

        assert_eq!(config.method, Method::POST);
        assert_eq!(config.timeout_secs, 3);
        assert_eq!(config.body, Some(json!({"a": 1})));
    }

    #[rstest]
    #[case::missing_url(ToolInput::new(HTTP_REQUEST), false)]
    #[case::ftp(ToolInput::new(HTTP_REQUEST).param("url", "ftp://host/file"), false)]
    #[case::bad_method(ToolInput::new(HTTP_REQUEST).param("url", "http://h").param("method", "PATCH"), false)]
    #[case::zero_timeout(ToolInput::new(HTTP_REQUEST).param("url", "http://h").param("timeout", 0), false)]
    #[case::https(ToolInput::new(HTTP_REQUEST).param("url", "https://h/path"), true)]
    #[case::delete(ToolInput::new(HTTP_REQUEST).param("url", "http://h").param("method", "delete"), true)]
    fn validation(#[case] input: ToolInput, #[case] valid: bool) {
        assert_eq!(HttpRequestTool::new().validate(&input), valid);
    }
}
