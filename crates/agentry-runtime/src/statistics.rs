//! Registry snapshots for reporting.

use agentry_core::{Agent, LifecycleState};
use serde::{Deserialize, Serialize};

/// Point-in-time agent counts.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AgentStatistics {
    pub total: usize,
    pub available: usize,
    pub unavailable: usize,
}

impl AgentStatistics {
    pub fn new(total: usize, available: usize) -> Self {
        Self {
            total,
            available,
            unavailable: total.saturating_sub(available),
        }
    }

    /// Share of available agents in percent; 0 for an empty registry.
    pub fn availability_percentage(&self) -> f64 {
        if self.total == 0 {
            return 0.0;
        }
        self.available as f64 / self.total as f64 * 100.0
    }
}

/// Serializable description of one registered agent.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AgentInfo {
    pub id: String,
    pub name: String,
    pub description: String,
    pub available: bool,
    pub state: LifecycleState,
}

impl AgentInfo {
    pub fn of(agent: &dyn Agent) -> Self {
        Self {
            id: agent.id().to_string(),
            name: agent.name().to_string(),
            description: agent.description().to_string(),
            available: agent.is_available(),
            state: agent.core().state(),
        }
    }
}
