//! # Agentry Runtime
//!
//! Agent registry, message dispatch and the pieces a composition root wires
//! around them.
//!
//! ## Components
//!
//! - **Registry** ([`AgentRegistry`]): lifecycle-aware store with capacity and
//!   id uniqueness guarantees
//! - **Dispatch** ([`DispatchService`]): routes messages to registered agents
//! - **Statistics**: availability snapshots
//! - **Sessions**: the [`SessionStore`](session::SessionStore) boundary and an
//!   in-memory implementation
//! - **Built-in agents**: [`SimpleAiAgent`](agents::SimpleAiAgent)

pub mod agents;
pub mod dispatch;
pub mod error;
pub mod registry;
pub mod session;
pub mod statistics;

pub use agents::{SIMPLE_AI_AGENT_NAME, SimpleAiAgent};
pub use dispatch::DispatchService;
pub use error::{
    DispatchError, DispatchResult, RegistryError, RegistryResult, SessionError, SessionResult,
};
pub use registry::AgentRegistry;
pub use session::{
    ChatMessage, ChatSession, DeliveryStatus, InMemorySessionStore, MessageRole, SessionStatus,
    SessionStore,
};
pub use statistics::{AgentInfo, AgentStatistics};
