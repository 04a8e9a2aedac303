//! # Agentry Core
//!
//! Core traits and types for the Agentry agent runtime: messages, the
//! per-request execution context, the agent lifecycle and the tool
//! execution contract.

pub mod agent;
pub mod config;
pub mod context;
pub mod error;
pub mod message;
pub mod tool;

mod unwind;

pub use agent::{Agent, AgentCore, AgentLifecycle, LifecycleState};
pub use config::{ConfigError, RuntimeConfig, RuntimeConfigBuilder, ToolsConfig};
pub use context::ExecutionContext;
pub use error::{AgentError, AgentResult, MessageError, MessageResult, ToolError};
pub use message::{Message, MessageBuilder, MessageStatus, MessageType, Priority};
pub use tool::{FailureReason, Tool, ToolExt, ToolInput, ToolOutcome, ToolResult, run_timed};
