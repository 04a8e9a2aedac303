//! Failures raised by agent implementations.
//!
//! These never reach the dispatcher's caller as `Err`: the agent boundary
//! converts them into `error` messages. Lifecycle hook failures are the
//! exception and are reported to the registry.

use thiserror::Error;

use crate::agent::LifecycleState;

/// Errors an agent may raise from its handler or lifecycle hooks.
#[derive(Debug, Clone, Error)]
pub enum AgentError {
    /// Message handling failed.
    #[error("{0}")]
    Processing(String),

    /// The agent received a message it cannot act on.
    #[error("Invalid request: {0}")]
    InvalidRequest(String),

    /// The initialization hook failed.
    #[error("Initialization failed: {0}")]
    Initialization(String),

    /// The destroy hook failed.
    #[error("Destroy failed: {0}")]
    Destruction(String),

    /// A lifecycle operation was attempted from a state that forbids it.
    #[error("Cannot {operation} agent in state '{current}'")]
    InvalidState {
        current: LifecycleState,
        operation: String,
    },

    /// Agent code panicked; the payload is the panic message when available.
    #[error("Agent panicked: {0}")]
    Panicked(String),

    #[error("Internal error: {0}")]
    Internal(String),
}

impl AgentError {
    /// Get the error code suitable for logging or reporting.
    pub fn error_code(&self) -> &'static str {
        match self {
            AgentError::Processing(_) => "PROCESSING_FAILED",
            AgentError::InvalidRequest(_) => "INVALID_REQUEST",
            AgentError::Initialization(_) => "INITIALIZATION_FAILED",
            AgentError::Destruction(_) => "DESTROY_FAILED",
            AgentError::InvalidState { .. } => "INVALID_STATE",
            AgentError::Panicked(_) => "AGENT_PANICKED",
            AgentError::Internal(_) => "INTERNAL_ERROR",
        }
    }
}

/// Result type for agent operations.
pub type AgentResult<T> = Result<T, AgentError>;

impl From<std::io::Error> for AgentError {
    fn from(err: std::io::Error) -> Self {
        AgentError::Internal(format!("IO error: {}", err))
    }
}

impl From<serde_json::Error> for AgentError {
    fn from(err: serde_json::Error) -> Self {
        AgentError::InvalidRequest(format!("Malformed JSON: {}", err))
    }
}
