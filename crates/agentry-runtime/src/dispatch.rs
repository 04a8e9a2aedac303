//! # Message Dispatch
//!
//! Thin orchestration over the [`AgentRegistry`]: resolve the target agent,
//! check that it is available, then hand the message over. Everything the
//! agent itself does wrong comes back as an `error` message, so the only
//! `Err` values here are the two routing preconditions.

use agentry_core::{Agent, AgentLifecycle, ExecutionContext, Message};
use std::sync::Arc;
use tracing::{debug, warn};

use crate::error::{DispatchError, DispatchResult};
use crate::registry::AgentRegistry;
use crate::statistics::{AgentInfo, AgentStatistics};

#[derive(Debug, Clone)]
pub struct DispatchService {
    registry: Arc<AgentRegistry>,
}

impl DispatchService {
    pub fn new(registry: Arc<AgentRegistry>) -> Self {
        Self { registry }
    }

    pub fn registry(&self) -> &Arc<AgentRegistry> {
        &self.registry
    }

    /// Route `message` to the agent registered under `agent_id`.
    ///
    /// # Errors
    ///
    /// `NotFound` when no such agent is registered, `Unavailable` when it is
    /// registered but out of service.
    pub async fn process(
        &self,
        agent_id: &str,
        message: &Message,
        context: &mut ExecutionContext,
    ) -> DispatchResult<Message> {
        debug!(agent_id = %agent_id, message_id = %message.id(), "Dispatching message");

        let agent = self.registry.lookup(agent_id).ok_or_else(|| {
            warn!(agent_id = %agent_id, "Agent not found");
            DispatchError::NotFound(agent_id.to_string())
        })?;

        if !agent.is_available() {
            warn!(agent_id = %agent_id, "Agent is not available");
            return Err(DispatchError::Unavailable(agent_id.to_string()));
        }

        Ok(agent.process(message, context).await)
    }

    /// Find an agent by id, falling back to an exact name match.
    pub fn resolve(&self, id_or_name: &str) -> Option<Arc<dyn Agent>> {
        self.registry.lookup(id_or_name).or_else(|| {
            self.registry
                .find_by_name(id_or_name)
                .into_iter()
                .find(|agent| agent.name() == id_or_name)
        })
    }

    pub fn available_agents(&self) -> Vec<Arc<dyn Agent>> {
        self.registry.list_available()
    }

    pub fn find_agents_by_name(&self, name: &str) -> Vec<Arc<dyn Agent>> {
        self.registry.find_by_name(name)
    }

    pub fn agent_info(&self, agent_id: &str) -> DispatchResult<AgentInfo> {
        self.registry
            .lookup(agent_id)
            .map(|agent| AgentInfo::of(agent.as_ref()))
            .ok_or_else(|| DispatchError::NotFound(agent_id.to_string()))
    }

    pub fn statistics(&self) -> AgentStatistics {
        let all = self.registry.list_all();
        let available = all.iter().filter(|agent| agent.is_available()).count();
        AgentStatistics::new(all.len(), available)
    }
}
