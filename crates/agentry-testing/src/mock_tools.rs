//! # Mock Tools for Testing
//!
//! Tool doubles with scripted outcomes and call recording.

use agentry_core::{ExecutionContext, FailureReason, Tool, ToolInput};
use async_trait::async_trait;
use serde_json::Value;
use std::collections::HashMap;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::{Arc, Mutex, MutexGuard};
use std::time::Duration;

/// Scripted outcome of a mock call.
#[derive(Debug, Clone)]
pub enum MockOutcome {
    Success(Value),
    Failure(FailureReason),
    Panic(String),
}

/// A mock tool that returns predefined responses based on its `input` parameter
#[derive(Debug, Clone)]
pub struct MockTool {
    name: String,
    description: String,
    version: String,
    available: Arc<AtomicBool>,
    required: Vec<String>,
    responses: HashMap<String, MockOutcome>,
    default_outcome: Option<MockOutcome>,
    delay: Option<Duration>,
    call_count: Arc<AtomicUsize>,
    call_history: Arc<Mutex<Vec<HashMap<String, Value>>>>,
}

impl MockTool {
    /// Create a new mock tool with the given name
    pub fn new(name: impl Into<String>) -> Self {
        let name = name.into();
        Self {
            description: format!("Mock tool {name}"),
            name,
            version: "1.0.0".to_string(),
            available: Arc::new(AtomicBool::new(true)),
            required: Vec::new(),
            responses: HashMap::new(),
            default_outcome: None,
            delay: None,
            call_count: Arc::new(AtomicUsize::new(0)),
            call_history: Arc::new(Mutex::new(Vec::new())),
        }
    }

    pub fn with_version(mut self, version: impl Into<String>) -> Self {
        self.version = version.into();
        self
    }

    /// Parameter that validation insists on.
    pub fn requiring(mut self, parameter: impl Into<String>) -> Self {
        self.required.push(parameter.into());
        self
    }

    /// Add a response for a specific `input` parameter value
    pub fn with_response(mut self, input: impl Into<String>, response: Value) -> Self {
        self.responses
            .insert(input.into(), MockOutcome::Success(response));
        self
    }

    /// Add a failure response for a specific `input` parameter value
    pub fn with_failure(mut self, input: impl Into<String>, error: impl Into<String>) -> Self {
        self.responses.insert(
            input.into(),
            MockOutcome::Failure(FailureReason::InternalError {
                message: error.into(),
            }),
        );
        self
    }

    /// Set the outcome for any unmatched input
    pub fn with_default(mut self, outcome: MockOutcome) -> Self {
        self.default_outcome = Some(outcome);
        self
    }

    /// Sleep before answering, to make timing observable.
    pub fn with_delay(mut self, delay: Duration) -> Self {
        self.delay = Some(delay);
        self
    }

    pub fn unavailable(self) -> Self {
        self.set_available(false);
        self
    }

    pub fn set_available(&self, available: bool) {
        self.available.store(available, Ordering::SeqCst);
    }

    /// Get the number of times this tool has been called
    pub fn call_count(&self) -> usize {
        self.call_count.load(Ordering::SeqCst)
    }

    /// Parameter maps of every call, oldest first
    pub fn call_history(&self) -> Vec<HashMap<String, Value>> {
        self.history().clone()
    }

    /// Reset call count and history
    pub fn reset(&self) {
        self.call_count.store(0, Ordering::SeqCst);
        self.history().clear();
    }

    fn history(&self) -> MutexGuard<'_, Vec<HashMap<String, Value>>> {
        self.call_history
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
    }
}

#[async_trait]
impl Tool for MockTool {
    fn name(&self) -> &str {
        &self.name
    }

    fn description(&self) -> &str {
        &self.description
    }

    fn version(&self) -> &str {
        &self.version
    }

    fn is_available(&self) -> bool {
        self.available.load(Ordering::SeqCst)
    }

    fn check_input(&self, input: &ToolInput) -> Result<(), FailureReason> {
        match self.required.iter().find(|key| !input.has(key)) {
            Some(missing) => Err(FailureReason::invalid_input(format!("{missing} is required"))),
            None => Ok(()),
        }
    }

    async fn call(
        &self,
        input: &ToolInput,
        _context: &ExecutionContext,
    ) -> Result<Value, FailureReason> {
        self.call_count.fetch_add(1, Ordering::SeqCst);
        self.history().push(input.parameters.clone());

        if let Some(delay) = self.delay {
            tokio::time::sleep(delay).await;
        }

        let key = input.get_str("input").unwrap_or_default();
        let outcome = self
            .responses
            .get(key)
            .or(self.default_outcome.as_ref())
            .cloned()
            .unwrap_or_else(|| MockOutcome::Success(Value::String(format!("Mock response for: {key}"))));

        match outcome {
            MockOutcome::Success(value) => Ok(value),
            MockOutcome::Failure(reason) => Err(reason),
            MockOutcome::Panic(message) => panic!("{message}"),
        }
    }
}
