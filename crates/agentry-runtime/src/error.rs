//! Error types for the registry, dispatch and session layers.

use agentry_core::AgentError;
use thiserror::Error;

/// Precondition and lifecycle failures from [`AgentRegistry`](crate::AgentRegistry).
#[derive(Debug, Clone, Error)]
pub enum RegistryError {
    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    #[error("Registry is full: maximum of {max} agents reached")]
    CapacityExceeded { max: usize },

    #[error("Agent already registered: {0}")]
    DuplicateId(String),

    /// The agent was rolled back and is not registered.
    #[error("Failed to initialize agent {id}: {source}")]
    InitializationFailed {
        id: String,
        #[source]
        source: AgentError,
    },

    /// The registry was stopped while the agent was initializing; the agent
    /// was destroyed instead of published.
    #[error("Registry stopped while agent {0} was initializing")]
    Stopped(String),
}

impl RegistryError {
    /// Get the error code suitable for logging or reporting.
    pub fn error_code(&self) -> &'static str {
        match self {
            RegistryError::InvalidArgument(_) => "INVALID_ARGUMENT",
            RegistryError::CapacityExceeded { .. } => "CAPACITY_EXCEEDED",
            RegistryError::DuplicateId(_) => "DUPLICATE_AGENT_ID",
            RegistryError::InitializationFailed { .. } => "INITIALIZATION_FAILED",
            RegistryError::Stopped(_) => "REGISTRY_STOPPED",
        }
    }
}

pub type RegistryResult<T> = Result<T, RegistryError>;

/// Reasons a message could not be handed to an agent.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DispatchError {
    #[error("Agent not found: {0}")]
    NotFound(String),

    #[error("Agent is not available: {0}")]
    Unavailable(String),
}

impl DispatchError {
    /// Get the error code suitable for logging or reporting.
    pub fn error_code(&self) -> &'static str {
        match self {
            DispatchError::NotFound(_) => "AGENT_NOT_FOUND",
            DispatchError::Unavailable(_) => "AGENT_UNAVAILABLE",
        }
    }
}

pub type DispatchResult<T> = Result<T, DispatchError>;

/// Failures from a [`SessionStore`](crate::session::SessionStore).
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SessionError {
    #[error("Session not found: {0}")]
    SessionNotFound(String),

    #[error("Invalid session data: {0}")]
    Invalid(String),

    #[error("Session backend error: {0}")]
    Backend(String),
}

impl SessionError {
    pub fn error_code(&self) -> &'static str {
        match self {
            SessionError::SessionNotFound(_) => "SESSION_NOT_FOUND",
            SessionError::Invalid(_) => "INVALID_SESSION_DATA",
            SessionError::Backend(_) => "SESSION_BACKEND_ERROR",
        }
    }
}

pub type SessionResult<T> = Result<T, SessionError>;
