//! Built-in agents.

mod simple;

pub use simple::{SIMPLE_AI_AGENT_NAME, SimpleAiAgent};
