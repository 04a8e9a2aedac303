//! Per-interaction execution context.
//!
//! An [`ExecutionContext`] is created for each inbound request, passed by
//! mutable reference down the dispatch path and dropped once the response is
//! produced. Values are stored as [`serde_json::Value`]; typed reads are a
//! caller-asserted contract and yield `None` when the stored value does not
//! deserialize into the requested type.

use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Mutable bag of identifiers and free-form maps for one interaction.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ExecutionContext {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub session_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub user_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub agent_id: Option<String>,
    /// Transient interaction state.
    #[serde(default)]
    pub attributes: HashMap<String, serde_json::Value>,
    /// Caller-managed conversation history.
    #[serde(default)]
    pub session_history: HashMap<String, serde_json::Value>,
    /// Effective settings for this interaction.
    #[serde(default)]
    pub configuration: HashMap<String, serde_json::Value>,
}

impl ExecutionContext {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_session(mut self, session_id: impl Into<String>) -> Self {
        self.session_id = Some(session_id.into());
        self
    }

    pub fn with_user(mut self, user_id: impl Into<String>) -> Self {
        self.user_id = Some(user_id.into());
        self
    }

    pub fn with_agent(mut self, agent_id: impl Into<String>) -> Self {
        self.agent_id = Some(agent_id.into());
        self
    }

    /// Read an attribute as `T`.
    pub fn attribute<T: DeserializeOwned>(&self, key: &str) -> Option<T> {
        typed(&self.attributes, key)
    }

    /// Raw attribute value.
    pub fn attribute_value(&self, key: &str) -> Option<&serde_json::Value> {
        self.attributes.get(key)
    }

    pub fn set_attribute(&mut self, key: impl Into<String>, value: impl Into<serde_json::Value>) {
        self.attributes.insert(key.into(), value.into());
    }

    pub fn remove_attribute(&mut self, key: &str) -> Option<serde_json::Value> {
        self.attributes.remove(key)
    }

    pub fn has_attribute(&self, key: &str) -> bool {
        self.attributes.contains_key(key)
    }

    /// Read a configuration entry as `T`.
    pub fn config<T: DeserializeOwned>(&self, key: &str) -> Option<T> {
        typed(&self.configuration, key)
    }

    pub fn set_config(&mut self, key: impl Into<String>, value: impl Into<serde_json::Value>) {
        self.configuration.insert(key.into(), value.into());
    }

    /// Empty all three maps. Identifiers are kept.
    pub fn clear(&mut self) {
        self.attributes.clear();
        self.session_history.clear();
        self.configuration.clear();
    }
}

fn typed<T: DeserializeOwned>(map: &HashMap<String, serde_json::Value>, key: &str) -> Option<T> {
    map.get(key)
        .and_then(|value| serde_json::from_value(value.clone()).ok())
}
