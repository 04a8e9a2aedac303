//! Agent identity and lifecycle state.
//!
//! Every agent embeds an [`AgentCore`]. The core owns the generated id and
//! the lifecycle state machine:
//!
//! ```text
//! Constructed -> Initializing -> Available <-> Unavailable -> Destroying -> Destroyed
//!                      |                                                      ^
//!                      +------------------ (init failure) -------------------+
//! ```
//!
//! `Destroyed` is terminal. The state lives in an atomic so availability can
//! be read from any thread without locking.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::sync::atomic::{AtomicU8, Ordering};
use uuid::Uuid;

/// Lifecycle position of an agent instance.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LifecycleState {
    Constructed,
    Initializing,
    Available,
    Unavailable,
    Destroying,
    Destroyed,
}

impl LifecycleState {
    fn to_u8(self) -> u8 {
        match self {
            LifecycleState::Constructed => 0,
            LifecycleState::Initializing => 1,
            LifecycleState::Available => 2,
            LifecycleState::Unavailable => 3,
            LifecycleState::Destroying => 4,
            LifecycleState::Destroyed => 5,
        }
    }

    fn from_u8(value: u8) -> Self {
        match value {
            0 => LifecycleState::Constructed,
            1 => LifecycleState::Initializing,
            2 => LifecycleState::Available,
            3 => LifecycleState::Unavailable,
            4 => LifecycleState::Destroying,
            _ => LifecycleState::Destroyed,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            LifecycleState::Constructed => "constructed",
            LifecycleState::Initializing => "initializing",
            LifecycleState::Available => "available",
            LifecycleState::Unavailable => "unavailable",
            LifecycleState::Destroying => "destroying",
            LifecycleState::Destroyed => "destroyed",
        }
    }

    /// Whether the state is `Destroyed`.
    pub fn is_terminal(&self) -> bool {
        matches!(self, LifecycleState::Destroyed)
    }
}

impl fmt::Display for LifecycleState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Identity plus lifecycle state shared by every agent implementation.
#[derive(Debug)]
pub struct AgentCore {
    id: String,
    name: String,
    description: String,
    state: AtomicU8,
}

impl AgentCore {
    /// Create a core with a freshly generated UUID id.
    pub fn new(name: impl Into<String>, description: impl Into<String>) -> Self {
        Self::with_id(Uuid::new_v4().to_string(), name, description)
    }

    /// Create a core with a caller-chosen id.
    pub fn with_id(
        id: impl Into<String>,
        name: impl Into<String>,
        description: impl Into<String>,
    ) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            description: description.into(),
            state: AtomicU8::new(LifecycleState::Constructed.to_u8()),
        }
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn description(&self) -> &str {
        &self.description
    }

    pub fn state(&self) -> LifecycleState {
        LifecycleState::from_u8(self.state.load(Ordering::Acquire))
    }

    pub fn is_available(&self) -> bool {
        self.state() == LifecycleState::Available
    }

    /// Take the agent out of service while it stays registered.
    ///
    /// Returns `false` unless the agent was `Available`.
    pub fn mark_unavailable(&self) -> bool {
        self.transition(LifecycleState::Available, LifecycleState::Unavailable)
    }

    /// Put a previously unavailable agent back in service.
    ///
    /// Returns `false` unless the agent was `Unavailable`.
    pub fn mark_available(&self) -> bool {
        self.transition(LifecycleState::Unavailable, LifecycleState::Available)
    }

    pub(crate) fn begin_initialize(&self) -> bool {
        self.transition(LifecycleState::Constructed, LifecycleState::Initializing)
    }

    pub(crate) fn finish_initialize(&self, succeeded: bool) {
        let next = if succeeded {
            LifecycleState::Available
        } else {
            LifecycleState::Destroyed
        };
        self.transition(LifecycleState::Initializing, next);
    }

    pub(crate) fn begin_destroy(&self) -> bool {
        self.transition(LifecycleState::Available, LifecycleState::Destroying)
            || self.transition(LifecycleState::Unavailable, LifecycleState::Destroying)
    }

    pub(crate) fn finish_destroy(&self) {
        self.state
            .store(LifecycleState::Destroyed.to_u8(), Ordering::Release);
    }

    fn transition(&self, from: LifecycleState, to: LifecycleState) -> bool {
        self.state
            .compare_exchange(from.to_u8(), to.to_u8(), Ordering::AcqRel, Ordering::Acquire)
            .is_ok()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_core_is_constructed_and_unavailable() {
        let core = AgentCore::new("n", "d");
        assert_eq!(core.state(), LifecycleState::Constructed);
        assert!(!core.is_available());
        assert!(Uuid::parse_str(core.id()).is_ok());
    }

    #[test]
    fn ids_are_generated_per_instance() {
        assert_ne!(AgentCore::new("a", "").id(), AgentCore::new("a", "").id());
    }

    #[test]
    fn availability_toggles_only_between_live_states() {
        let core = AgentCore::new("n", "d");
        assert!(!core.mark_unavailable());

        assert!(core.begin_initialize());
        core.finish_initialize(true);
        assert!(core.is_available());

        assert!(core.mark_unavailable());
        assert_eq!(core.state(), LifecycleState::Unavailable);
        assert!(!core.mark_unavailable());
        assert!(core.mark_available());
        assert!(core.is_available());
    }

    #[test]
    fn failed_initialization_is_terminal() {
        let core = AgentCore::new("n", "d");
        assert!(core.begin_initialize());
        core.finish_initialize(false);

        assert_eq!(core.state(), LifecycleState::Destroyed);
        assert!(!core.begin_initialize());
        assert!(!core.begin_destroy());
    }

    #[test]
    fn destroy_works_from_unavailable() {
        let core = AgentCore::new("n", "d");
        core.begin_initialize();
        core.finish_initialize(true);
        core.mark_unavailable();

        assert!(core.begin_destroy());
        assert_eq!(core.state(), LifecycleState::Destroying);
        core.finish_destroy();
        assert!(core.state().is_terminal());
        assert!(!core.mark_available());
    }
}
