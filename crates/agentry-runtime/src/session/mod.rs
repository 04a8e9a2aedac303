//! # Conversation Sessions
//!
//! Persistence boundary for chat sessions and their message history. The
//! runtime itself never depends on a store; composition layers pick an
//! implementation of [`SessionStore`]. [`InMemorySessionStore`] is the
//! reference implementation.

mod memory;

pub use memory::InMemorySessionStore;

use agentry_core::Message;
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use uuid::Uuid;

use crate::error::SessionResult;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SessionStatus {
    #[default]
    Active,
    Inactive,
    Archived,
}

/// A conversation between one user and one agent.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChatSession {
    pub id: String,
    pub title: String,
    pub user_id: String,
    pub agent_id: String,
    pub status: SessionStatus,
    #[serde(default)]
    pub configuration: HashMap<String, serde_json::Value>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    pub last_active_at: Option<DateTime<Utc>>,
}

impl ChatSession {
    pub fn new(
        title: impl Into<String>,
        user_id: impl Into<String>,
        agent_id: impl Into<String>,
    ) -> Self {
        let now = Utc::now();
        Self {
            id: Uuid::new_v4().to_string(),
            title: title.into(),
            user_id: user_id.into(),
            agent_id: agent_id.into(),
            status: SessionStatus::Active,
            configuration: HashMap::new(),
            created_at: now,
            updated_at: now,
            last_active_at: None,
        }
    }

    pub fn with_status(mut self, status: SessionStatus) -> Self {
        self.status = status;
        self
    }

    pub fn with_configuration(
        mut self,
        key: impl Into<String>,
        value: impl Into<serde_json::Value>,
    ) -> Self {
        self.configuration.insert(key.into(), value.into());
        self
    }
}

/// Who authored a stored message.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MessageRole {
    User,
    Agent,
    System,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DeliveryStatus {
    #[default]
    Sent,
    Delivered,
    Read,
    Failed,
}

/// One stored line of a conversation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChatMessage {
    pub id: String,
    pub session_id: String,
    pub role: MessageRole,
    pub content: String,
    pub sender_id: Option<String>,
    pub sender_name: Option<String>,
    pub status: DeliveryStatus,
    #[serde(default)]
    pub metadata: HashMap<String, serde_json::Value>,
    pub created_at: DateTime<Utc>,
}

impl ChatMessage {
    pub fn new(session_id: impl Into<String>, role: MessageRole, content: impl Into<String>) -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            session_id: session_id.into(),
            role,
            content: content.into(),
            sender_id: None,
            sender_name: None,
            status: DeliveryStatus::Sent,
            metadata: HashMap::new(),
            created_at: Utc::now(),
        }
    }

    /// Record a runtime [`Message`] in a session, keeping its id and metadata.
    pub fn from_message(session_id: impl Into<String>, role: MessageRole, message: &Message) -> Self {
        let mut metadata = message.metadata().clone();
        metadata.insert("type".to_string(), message.kind().as_str().into());
        Self {
            id: message.id().to_string(),
            session_id: session_id.into(),
            role,
            content: message.content().to_string(),
            sender_id: Some(message.sender().to_string()).filter(|s| !s.is_empty()),
            sender_name: None,
            status: DeliveryStatus::Sent,
            metadata,
            created_at: message.timestamp(),
        }
    }

    pub fn with_sender(mut self, id: impl Into<String>, name: impl Into<String>) -> Self {
        self.sender_id = Some(id.into());
        self.sender_name = Some(name.into());
        self
    }
}

/// Storage for sessions and their messages.
#[async_trait]
pub trait SessionStore: Send + Sync {
    /// Store a new session.
    ///
    /// # Errors
    ///
    /// `Invalid` when title, user or agent id is blank or the id is taken.
    async fn create_session(&self, session: ChatSession) -> SessionResult<ChatSession>;

    async fn get_session(&self, session_id: &str) -> SessionResult<Option<ChatSession>>;

    /// Active sessions of a user, most recently updated first.
    async fn active_sessions_for_user(&self, user_id: &str) -> SessionResult<Vec<ChatSession>>;

    /// Sessions of any status for an agent, most recently updated first.
    async fn sessions_for_agent(&self, agent_id: &str) -> SessionResult<Vec<ChatSession>>;

    /// Append to a session's history and bump its `updated_at`.
    ///
    /// # Errors
    ///
    /// `SessionNotFound` for unknown sessions, `Invalid` for blank content.
    async fn append_message(&self, message: ChatMessage) -> SessionResult<ChatMessage>;

    /// Up to `limit` messages, oldest first.
    async fn messages(&self, session_id: &str, limit: usize) -> SessionResult<Vec<ChatMessage>>;

    /// The last `count` messages, newest first.
    async fn latest_messages(&self, session_id: &str, count: usize)
    -> SessionResult<Vec<ChatMessage>>;

    async fn count_messages(&self, session_id: &str) -> SessionResult<usize>;

    /// Set `last_active_at` to now.
    async fn touch(&self, session_id: &str) -> SessionResult<()>;
}
