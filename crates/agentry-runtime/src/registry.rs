//! # Agent Registry
//!
//! Authoritative store of live agents, one per id.
//!
//! Published agents live in a [`DashMap`] so lookups never block. Every
//! mutation of that map, together with the table of ids whose
//! initialization is still running, happens under one administrative mutex.
//! The mutex is only held for short bookkeeping sections and never across an
//! `.await`, so agent `initialize`/`destroy` hooks run without any registry
//! lock held.
//!
//! Registration is two-phase: the id is reserved in the pending table, the
//! agent is initialized, and only then is it published. Pending ids count
//! toward capacity and duplicate checks but are invisible to lookups, so no
//! caller can observe an agent whose initialization later fails. The
//! reservation is released on drop, so a `register` future cancelled
//! mid-initialization leaves nothing behind.
//!
//! Every `stop` starts a new epoch. A registration only publishes if the
//! epoch it reserved in is still current, so nothing appears in the store
//! after `stop` returns.

use agentry_core::{Agent, AgentLifecycle, RuntimeConfig, config::DEFAULT_MAX_AGENTS};
use dashmap::DashMap;
use std::collections::HashSet;
use std::sync::{Arc, Mutex, MutexGuard};
use tracing::{debug, error, info, warn};

use crate::error::{RegistryError, RegistryResult};

#[derive(Debug, Default)]
struct AdminState {
    pending: HashSet<String>,
    started: bool,
    epoch: u64,
}

/// A pending-table entry, released when dropped unless disarmed.
struct Reservation<'a> {
    registry: &'a AgentRegistry,
    id: String,
    armed: bool,
}

impl Reservation<'_> {
    /// Caller already removed the entry under the admin lock.
    fn disarm(&mut self) {
        self.armed = false;
    }
}

impl Drop for Reservation<'_> {
    fn drop(&mut self) {
        if self.armed {
            debug!(agent_id = %self.id, "Releasing abandoned registration");
            self.registry.admin().pending.remove(&self.id);
        }
    }
}

pub struct AgentRegistry {
    agents: DashMap<String, Arc<dyn Agent>>,
    admin: Mutex<AdminState>,
    max_agents: usize,
}

impl std::fmt::Debug for AgentRegistry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AgentRegistry")
            .field("count", &self.agents.len())
            .field("max_agents", &self.max_agents)
            .field("started", &self.is_started())
            .finish()
    }
}

impl Default for AgentRegistry {
    fn default() -> Self {
        Self::new(DEFAULT_MAX_AGENTS)
    }
}

impl AgentRegistry {
    /// Create an empty, not yet started registry.
    pub fn new(max_agents: usize) -> Self {
        Self {
            agents: DashMap::new(),
            admin: Mutex::new(AdminState::default()),
            max_agents,
        }
    }

    pub fn from_config(config: &RuntimeConfig) -> Self {
        Self::new(config.max_agents)
    }

    pub fn max_agents(&self) -> usize {
        self.max_agents
    }

    fn admin(&self) -> MutexGuard<'_, AdminState> {
        // Bookkeeping stays consistent even if a holder panicked.
        self.admin
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    /// Initialize `agent` and publish it under its id.
    ///
    /// # Errors
    ///
    /// - `InvalidArgument` for a blank id
    /// - `DuplicateId` if the id is registered or being registered; the
    ///   existing agent is left untouched
    /// - `CapacityExceeded` when registered plus pending agents reach the limit
    /// - `InitializationFailed` if the agent's initialization fails; nothing
    ///   is published
    /// - `Stopped` if `stop` ran while the agent was initializing; the agent
    ///   is destroyed and not published
    pub async fn register(&self, agent: Arc<dyn Agent>) -> RegistryResult<()> {
        let id = agent.id().to_string();
        if id.trim().is_empty() {
            return Err(RegistryError::InvalidArgument(
                "agent id must not be blank".to_string(),
            ));
        }

        let epoch = {
            let mut admin = self.admin();
            if self.agents.contains_key(&id) || admin.pending.contains(&id) {
                warn!(agent_id = %id, "Rejecting duplicate agent registration");
                return Err(RegistryError::DuplicateId(id));
            }
            if self.agents.len() + admin.pending.len() >= self.max_agents {
                warn!(agent_id = %id, max = self.max_agents, "Agent registry is full");
                return Err(RegistryError::CapacityExceeded {
                    max: self.max_agents,
                });
            }
            admin.pending.insert(id.clone());
            admin.epoch
        };
        let mut reservation = Reservation {
            registry: self,
            id: id.clone(),
            armed: true,
        };

        info!(agent_id = %id, name = %agent.name(), "Registering agent");
        let outcome = agent.initialize().await;

        let current = {
            let mut admin = self.admin();
            admin.pending.remove(&id);
            reservation.disarm();
            let current = admin.epoch == epoch;
            if outcome.is_ok() && current {
                self.agents.insert(id.clone(), agent.clone());
            }
            current
        };

        match outcome {
            Ok(()) if current => {
                info!(agent_id = %id, name = %agent.name(), "Agent registered");
                Ok(())
            }
            Ok(()) => {
                warn!(agent_id = %id, "Registry stopped during initialization, destroying agent");
                if let Err(err) = agent.destroy().await {
                    error!(agent_id = %id, error = %err, "Failed to destroy agent after stop");
                }
                Err(RegistryError::Stopped(id))
            }
            Err(source) => {
                error!(agent_id = %id, error = %source, "Agent initialization failed, registration rolled back");
                Err(RegistryError::InitializationFailed { id, source })
            }
        }
    }

    /// Remove and destroy an agent.
    ///
    /// Returns `false` for blank or unknown ids, and when the agent's destroy
    /// hook fails (the agent is removed either way).
    pub async fn unregister(&self, id: &str) -> bool {
        if id.trim().is_empty() {
            return false;
        }

        let removed = {
            let _admin = self.admin();
            self.agents.remove(id)
        };
        let Some((_, agent)) = removed else {
            debug!(agent_id = %id, "Unregister requested for unknown agent");
            return false;
        };

        match agent.destroy().await {
            Ok(()) => {
                info!(agent_id = %id, name = %agent.name(), "Agent unregistered");
                true
            }
            Err(err) => {
                error!(agent_id = %id, error = %err, "Failed to destroy agent during unregister");
                false
            }
        }
    }

    pub fn lookup(&self, id: &str) -> Option<Arc<dyn Agent>> {
        self.agents.get(id).map(|entry| entry.value().clone())
    }

    pub fn is_registered(&self, id: &str) -> bool {
        self.agents.contains_key(id)
    }

    /// Agents whose name equals or contains `name` (case-sensitive).
    /// A blank `name` matches every agent.
    pub fn find_by_name(&self, name: &str) -> Vec<Arc<dyn Agent>> {
        if name.trim().is_empty() {
            return self.list_all();
        }
        self.collect(|agent| agent.name().contains(name))
    }

    /// Every registered agent, ordered by name then id.
    pub fn list_all(&self) -> Vec<Arc<dyn Agent>> {
        self.collect(|_| true)
    }

    /// Agents available at the time of the call.
    pub fn list_available(&self) -> Vec<Arc<dyn Agent>> {
        self.collect(|agent| agent.is_available())
    }

    fn collect<F>(&self, keep: F) -> Vec<Arc<dyn Agent>>
    where
        F: Fn(&dyn Agent) -> bool,
    {
        let mut agents: Vec<Arc<dyn Agent>> = self
            .agents
            .iter()
            .filter(|entry| keep(entry.value().as_ref()))
            .map(|entry| entry.value().clone())
            .collect();
        agents.sort_by(|a, b| a.name().cmp(b.name()).then_with(|| a.id().cmp(b.id())));
        agents
    }

    /// Number of published agents.
    pub fn count(&self) -> usize {
        self.agents.len()
    }

    pub fn is_started(&self) -> bool {
        self.admin().started
    }

    /// Mark the registry operational. Calling it twice only logs a warning.
    pub fn start(&self) {
        let mut admin = self.admin();
        if admin.started {
            warn!("Agent registry already started");
            return;
        }
        admin.started = true;
        info!(max_agents = self.max_agents, "Agent registry started");
    }

    /// Destroy every agent and empty the store.
    ///
    /// Destroy failures are logged and do not stop the sweep. Agents still
    /// initializing when `stop` runs are never published; their `register`
    /// call fails with `Stopped`.
    pub async fn stop(&self) {
        let drained: Vec<Arc<dyn Agent>> = {
            let mut admin = self.admin();
            if !admin.started {
                warn!("Agent registry is not running");
            }
            admin.started = false;
            admin.epoch += 1;

            let ids: Vec<String> = self.agents.iter().map(|entry| entry.key().clone()).collect();
            ids.iter()
                .filter_map(|id| self.agents.remove(id).map(|(_, agent)| agent))
                .collect()
        };

        info!(count = drained.len(), "Stopping agent registry");
        let mut failures = 0usize;
        for agent in drained {
            if let Err(err) = agent.destroy().await {
                failures += 1;
                error!(agent_id = %agent.id(), error = %err, "Failed to destroy agent during stop");
            }
        }
        info!(failures, "Agent registry stopped");
    }

    /// `stop` followed by `start`.
    pub async fn clear(&self) {
        self.stop().await;
        self.start();
    }
}
