//! Error Types
//!
//! Domain-specific failures for the agentry core. The types are grouped by
//! concern:
//! - `agent`: failures raised inside an agent while it handles a message or
//!   runs a lifecycle hook
//! - `tool`: precondition failures when resolving or invoking a tool
//! - `message`: invalid message state changes

mod agent;
mod message;
mod tool;

pub use agent::{AgentError, AgentResult};
pub use message::{MessageError, MessageResult};
pub use tool::ToolError;
