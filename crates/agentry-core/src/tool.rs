//! # Tool Execution Contract
//!
//! Tools are named capabilities invoked with a parameter map. Callers are
//! expected to [`Tool::validate`] first; [`ToolExt::execute`] then runs the
//! tool and always returns a [`ToolResult`] stamped with the elapsed time.
//! Failures, including panics inside the tool, come back as a `failure`
//! outcome and are never raised to the caller.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use futures::FutureExt;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::future::Future;
use std::panic::AssertUnwindSafe;
use std::time::Instant;
use tracing::{debug, warn};

use crate::context::ExecutionContext;
use crate::unwind::panic_message;

/// Categorized failure reasons for tool execution.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum FailureReason {
    /// A required parameter is missing or malformed.
    InvalidInput { message: String },
    /// The target resource does not exist.
    NotFound { resource: String },
    NetworkError { message: String },
    IoError { message: String },
    Timeout { operation: String },
    /// The tool panicked or reached an unexpected state.
    InternalError { message: String },
    /// Tool-specific failure with its own code.
    Custom { category: String, message: String },
}

impl FailureReason {
    pub fn invalid_input(message: impl Into<String>) -> Self {
        FailureReason::InvalidInput {
            message: message.into(),
        }
    }

    /// Machine-readable code carried in a failed [`ToolResult`].
    pub fn code(&self) -> &str {
        match self {
            FailureReason::InvalidInput { .. } => "INVALID_INPUT",
            FailureReason::NotFound { .. } => "NOT_FOUND",
            FailureReason::NetworkError { .. } => "NETWORK_ERROR",
            FailureReason::IoError { .. } => "IO_ERROR",
            FailureReason::Timeout { .. } => "TIMEOUT",
            FailureReason::InternalError { .. } => "INTERNAL_ERROR",
            FailureReason::Custom { category, .. } => category,
        }
    }

    /// Get a human-readable error message
    pub fn message(&self) -> String {
        match self {
            FailureReason::InvalidInput { message } => format!("Invalid input: {}", message),
            FailureReason::NotFound { resource } => format!("Not found: {}", resource),
            FailureReason::NetworkError { message } => format!("Network error: {}", message),
            FailureReason::IoError { message } => format!("I/O error: {}", message),
            FailureReason::Timeout { operation } => format!("Timeout: {}", operation),
            FailureReason::InternalError { message } => format!("Internal error: {}", message),
            FailureReason::Custom { message, .. } => message.clone(),
        }
    }
}

impl std::fmt::Display for FailureReason {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.message())
    }
}

/// A request to run one tool.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ToolInput {
    pub tool_name: String,
    #[serde(default)]
    pub parameters: HashMap<String, serde_json::Value>,
}

impl ToolInput {
    pub fn new(tool_name: impl Into<String>) -> Self {
        Self {
            tool_name: tool_name.into(),
            parameters: HashMap::new(),
        }
    }

    pub fn with_parameters(
        tool_name: impl Into<String>,
        parameters: HashMap<String, serde_json::Value>,
    ) -> Self {
        Self {
            tool_name: tool_name.into(),
            parameters,
        }
    }

    /// Builder-style parameter insertion.
    pub fn param(mut self, key: impl Into<String>, value: impl Into<serde_json::Value>) -> Self {
        self.parameters.insert(key.into(), value.into());
        self
    }

    pub fn get(&self, key: &str) -> Option<&serde_json::Value> {
        self.parameters.get(key)
    }

    /// String parameter. Non-string values read as `None`.
    pub fn get_str(&self, key: &str) -> Option<&str> {
        self.parameters.get(key).and_then(|value| value.as_str())
    }

    /// Parameter deserialized as `T`; `None` on absence or type mismatch.
    pub fn get_as<T: DeserializeOwned>(&self, key: &str) -> Option<T> {
        self.parameters
            .get(key)
            .and_then(|value| serde_json::from_value(value.clone()).ok())
    }

    pub fn get_or<T: DeserializeOwned>(&self, key: &str, default: T) -> T {
        self.get_as(key).unwrap_or(default)
    }

    pub fn has(&self, key: &str) -> bool {
        self.parameters.contains_key(key)
    }

    /// Required string parameter, as a typed failure when missing or blank.
    pub fn require_str(&self, key: &str) -> Result<&str, FailureReason> {
        match self.get_str(key) {
            Some(value) if !value.trim().is_empty() => Ok(value),
            _ => Err(FailureReason::invalid_input(format!("{key} is required"))),
        }
    }
}

/// Tagged outcome of a tool run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "outcome", rename_all = "snake_case")]
pub enum ToolOutcome {
    Success { data: serde_json::Value },
    Failure { code: String, message: String },
}

/// The result of executing a tool.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ToolResult {
    #[serde(flatten)]
    pub outcome: ToolOutcome,
    pub timestamp: DateTime<Utc>,
    pub execution_time_ms: u64,
    #[serde(default, skip_serializing_if = "HashMap::is_empty")]
    pub metadata: HashMap<String, serde_json::Value>,
}

impl ToolResult {
    pub fn success(data: serde_json::Value) -> Self {
        Self::from_outcome(ToolOutcome::Success { data })
    }

    pub fn failure(reason: &FailureReason) -> Self {
        Self::from_outcome(ToolOutcome::Failure {
            code: reason.code().to_string(),
            message: reason.message(),
        })
    }

    fn from_outcome(outcome: ToolOutcome) -> Self {
        Self {
            outcome,
            timestamp: Utc::now(),
            execution_time_ms: 0,
            metadata: HashMap::new(),
        }
    }

    pub fn with_execution_time(mut self, millis: u64) -> Self {
        self.execution_time_ms = millis;
        self
    }

    pub fn with_metadata(mut self, key: impl Into<String>, value: impl Into<serde_json::Value>) -> Self {
        self.metadata.insert(key.into(), value.into());
        self
    }

    pub fn is_success(&self) -> bool {
        matches!(self.outcome, ToolOutcome::Success { .. })
    }

    pub fn data(&self) -> Option<&serde_json::Value> {
        match &self.outcome {
            ToolOutcome::Success { data } => Some(data),
            ToolOutcome::Failure { .. } => None,
        }
    }

    pub fn error_code(&self) -> Option<&str> {
        match &self.outcome {
            ToolOutcome::Failure { code, .. } => Some(code),
            ToolOutcome::Success { .. } => None,
        }
    }

    pub fn error_message(&self) -> Option<&str> {
        match &self.outcome {
            ToolOutcome::Failure { message, .. } => Some(message),
            ToolOutcome::Success { .. } => None,
        }
    }
}

/// A named capability that agents and callers can invoke.
#[async_trait]
pub trait Tool: Send + Sync {
    /// Unique name used for catalog lookup.
    fn name(&self) -> &str;

    fn description(&self) -> &str;

    fn version(&self) -> &str {
        "1.0.0"
    }

    fn is_available(&self) -> bool {
        true
    }

    /// Check the input and explain what is wrong with it.
    fn check_input(&self, input: &ToolInput) -> Result<(), FailureReason>;

    /// Whether `input` is acceptable. Side-effect free.
    fn validate(&self, input: &ToolInput) -> bool {
        self.check_input(input).is_ok()
    }

    /// Run the tool. Use [`ToolExt::execute`] to get a timed [`ToolResult`].
    async fn call(
        &self,
        input: &ToolInput,
        context: &ExecutionContext,
    ) -> Result<serde_json::Value, FailureReason>;
}

/// Timed, panic-safe execution for every [`Tool`].
#[async_trait]
pub trait ToolExt {
    async fn execute(&self, input: &ToolInput, context: &ExecutionContext) -> ToolResult;
}

#[async_trait]
impl<T> ToolExt for T
where
    T: Tool + ?Sized,
{
    async fn execute(&self, input: &ToolInput, context: &ExecutionContext) -> ToolResult {
        debug!(tool = %self.name(), "Executing tool");
        let result = run_timed(self.call(input, context)).await;
        if let Some(message) = result.error_message() {
            warn!(
                tool = %self.name(),
                code = result.error_code().unwrap_or_default(),
                elapsed_ms = result.execution_time_ms,
                error = %message,
                "Tool execution failed"
            );
        }
        result
    }
}

/// Drive a tool future, measuring wall time and containing panics.
pub async fn run_timed<F>(future: F) -> ToolResult
where
    F: Future<Output = Result<serde_json::Value, FailureReason>>,
{
    let started = Instant::now();
    let outcome = AssertUnwindSafe(future).catch_unwind().await;
    let elapsed = started.elapsed().as_millis() as u64;

    let result = match outcome {
        Ok(Ok(data)) => ToolResult::success(data),
        Ok(Err(reason)) => ToolResult::failure(&reason),
        Err(payload) => ToolResult::failure(&FailureReason::InternalError {
            message: panic_message(payload),
        }),
    };
    result.with_execution_time(elapsed)
}
