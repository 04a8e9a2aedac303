//! # Agentry Testing
//!
//! Test doubles for Agentry agents and tools.
//!
//! - [`MockAgent`]: scripted replies, failing or panicking hooks, hook counters
//! - [`MockTool`]: scripted outcomes keyed by the `input` parameter, call history

pub mod mock_agents;
pub mod mock_tools;

pub use mock_agents::{MockAgent, MockReply};
pub use mock_tools::{MockOutcome, MockTool};
