//! # Agentry
//!
//! Agentry is an embeddable runtime for message-driven agents. Agents receive
//! typed [`Message`]s, reply with new ones and may call pluggable [`Tool`]s.
//!
//! ## Core Components
//!
//! - **[Agent]**: behavior hooks; lifecycle and fault containment come from
//!   [`AgentLifecycle`]
//! - **[AgentRegistry]**: concurrency-safe store with capacity and id
//!   uniqueness guarantees
//! - **[DispatchService]**: routes a message to a registered agent
//! - **[ToolCatalog]**: name-indexed tools with timed, panic-safe execution
//! - **[SessionStore]**: persistence boundary for conversation history
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use std::sync::Arc;
//! use agentry::{AgentRegistry, DispatchService, ExecutionContext, Message, MessageType};
//! use agentry::{Agent, SimpleAiAgent};
//!
//! # async fn run() -> Result<(), Box<dyn std::error::Error>> {
//! let registry = Arc::new(AgentRegistry::default());
//! registry.start();
//!
//! let agent = Arc::new(SimpleAiAgent::new());
//! let agent_id = agent.id().to_string();
//! registry.register(agent).await?;
//!
//! let dispatch = DispatchService::new(registry.clone());
//! let request = Message::builder(MessageType::Text, "hello").sender("user-1").build();
//! let reply = dispatch
//!     .process(&agent_id, &request, &mut ExecutionContext::new())
//!     .await?;
//! println!("{}", reply.content());
//!
//! registry.stop().await;
//! # Ok(())
//! # }
//! ```

// ============================================================================
// Module aliases for namespaced access
// ============================================================================

pub use agentry_core as core;
pub use agentry_runtime as runtime;
pub use agentry_tools as tools;

#[cfg(feature = "testing")]
pub use agentry_testing as testing;

// ============================================================================
// Messages and context
// ============================================================================

pub use agentry_core::{
    ExecutionContext, Message, MessageBuilder, MessageStatus, MessageType, Priority,
};

// ============================================================================
// Agents
// ============================================================================

pub use agentry_core::{Agent, AgentCore, AgentLifecycle, LifecycleState};
pub use agentry_runtime::{AgentInfo, AgentRegistry, AgentStatistics, DispatchService};
pub use agentry_runtime::{SIMPLE_AI_AGENT_NAME, SimpleAiAgent};

// ============================================================================
// Tools
// ============================================================================

pub use agentry_core::{FailureReason, Tool, ToolExt, ToolInput, ToolOutcome, ToolResult};
pub use agentry_tools::{ToolCatalog, ToolInfo};

// ============================================================================
// Sessions
// ============================================================================

pub use agentry_runtime::{
    ChatMessage, ChatSession, InMemorySessionStore, MessageRole, SessionStatus, SessionStore,
};

// ============================================================================
// Configuration and errors
// ============================================================================

pub use agentry_core::{ConfigError, RuntimeConfig, ToolsConfig};
pub use agentry_core::{AgentError, MessageError, ToolError};
pub use agentry_runtime::{DispatchError, RegistryError, SessionError};
