use async_trait::async_trait;
use chrono::Utc;
use std::cmp::Ordering;
use std::collections::HashMap;
use tokio::sync::RwLock;
use tracing::debug;

use super::{ChatMessage, ChatSession, SessionStatus, SessionStore};
use crate::error::{SessionError, SessionResult};

#[derive(Debug, Default)]
struct Inner {
    sessions: HashMap<String, ChatSession>,
    messages: HashMap<String, Vec<ChatMessage>>,
}

/// Process-local [`SessionStore`]. Contents are lost on drop.
#[derive(Debug, Default)]
pub struct InMemorySessionStore {
    inner: RwLock<Inner>,
}

impl InMemorySessionStore {
    pub fn new() -> Self {
        Self::default()
    }

    async fn sessions_where<F>(&self, keep: F) -> Vec<ChatSession>
    where
        F: Fn(&ChatSession) -> bool,
    {
        let inner = self.inner.read().await;
        let mut sessions: Vec<ChatSession> =
            inner.sessions.values().filter(|s| keep(*s)).cloned().collect();
        sessions.sort_by(newest_update_first);
        sessions
    }
}

fn newest_update_first(a: &ChatSession, b: &ChatSession) -> Ordering {
    b.updated_at.cmp(&a.updated_at).then_with(|| a.id.cmp(&b.id))
}

fn require(field: &str, value: &str) -> SessionResult<()> {
    if value.trim().is_empty() {
        return Err(SessionError::Invalid(format!("{field} must not be blank")));
    }
    Ok(())
}

#[async_trait]
impl SessionStore for InMemorySessionStore {
    async fn create_session(&self, session: ChatSession) -> SessionResult<ChatSession> {
        require("title", &session.title)?;
        require("user_id", &session.user_id)?;
        require("agent_id", &session.agent_id)?;

        let mut inner = self.inner.write().await;
        if inner.sessions.contains_key(&session.id) {
            return Err(SessionError::Invalid(format!(
                "session id already exists: {}",
                session.id
            )));
        }
        debug!(session_id = %session.id, user_id = %session.user_id, "Session created");
        inner.sessions.insert(session.id.clone(), session.clone());
        Ok(session)
    }

    async fn get_session(&self, session_id: &str) -> SessionResult<Option<ChatSession>> {
        Ok(self.inner.read().await.sessions.get(session_id).cloned())
    }

    async fn active_sessions_for_user(&self, user_id: &str) -> SessionResult<Vec<ChatSession>> {
        Ok(self
            .sessions_where(|s| s.user_id == user_id && s.status == SessionStatus::Active)
            .await)
    }

    async fn sessions_for_agent(&self, agent_id: &str) -> SessionResult<Vec<ChatSession>> {
        Ok(self.sessions_where(|s| s.agent_id == agent_id).await)
    }

    async fn append_message(&self, message: ChatMessage) -> SessionResult<ChatMessage> {
        require("content", &message.content)?;

        let mut inner = self.inner.write().await;
        let session = inner
            .sessions
            .get_mut(&message.session_id)
            .ok_or_else(|| SessionError::SessionNotFound(message.session_id.clone()))?;
        session.updated_at = Utc::now();

        inner
            .messages
            .entry(message.session_id.clone())
            .or_default()
            .push(message.clone());
        Ok(message)
    }

    async fn messages(&self, session_id: &str, limit: usize) -> SessionResult<Vec<ChatMessage>> {
        let inner = self.inner.read().await;
        Ok(inner
            .messages
            .get(session_id)
            .map(|history| history.iter().take(limit).cloned().collect())
            .unwrap_or_default())
    }

    async fn latest_messages(
        &self,
        session_id: &str,
        count: usize,
    ) -> SessionResult<Vec<ChatMessage>> {
        let inner = self.inner.read().await;
        Ok(inner
            .messages
            .get(session_id)
            .map(|history| history.iter().rev().take(count).cloned().collect())
            .unwrap_or_default())
    }

    async fn count_messages(&self, session_id: &str) -> SessionResult<usize> {
        Ok(self
            .inner
            .read()
            .await
            .messages
            .get(session_id)
            .map_or(0, Vec::len))
    }

    async fn touch(&self, session_id: &str) -> SessionResult<()> {
        let mut inner = self.inner.write().await;
        let session = inner
            .sessions
            .get_mut(session_id)
            .ok_or_else(|| SessionError::SessionNotFound(session_id.to_string()))?;
        session.last_active_at = Some(Utc::now());
        Ok(())
    }
}
