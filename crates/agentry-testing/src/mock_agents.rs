//! # Mock Agents for Testing
//!
//! An [`Agent`] double whose lifecycle hooks and handler follow a script,
//! with counters for every hook so registry behavior can be asserted.

use agentry_core::{
    Agent, AgentCore, AgentError, AgentResult, ExecutionContext, Message,
};
use async_trait::async_trait;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Mutex, MutexGuard};
use std::time::Duration;

/// How a [`MockAgent`] answers messages.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MockReply {
    /// Reply with the request content.
    Echo,
    /// Reply with fixed content.
    Text(String),
    /// Return `AgentError::Processing`.
    Fail(String),
    Panic(String),
}

#[derive(Debug)]
pub struct MockAgent {
    core: AgentCore,
    reply: MockReply,
    init_failure: Option<String>,
    destroy_failure: Option<String>,
    delay: Option<Duration>,
    init_calls: AtomicUsize,
    destroy_calls: AtomicUsize,
    handled: Mutex<Vec<String>>,
}

impl MockAgent {
    /// Echoing agent with a generated id.
    pub fn new(name: impl Into<String>) -> Self {
        Self::from_core(AgentCore::new(name, "Mock agent"))
    }

    /// Echoing agent with a fixed id.
    pub fn with_id(id: impl Into<String>, name: impl Into<String>) -> Self {
        Self::from_core(AgentCore::with_id(id, name, "Mock agent"))
    }

    fn from_core(core: AgentCore) -> Self {
        Self {
            core,
            reply: MockReply::Echo,
            init_failure: None,
            destroy_failure: None,
            delay: None,
            init_calls: AtomicUsize::new(0),
            destroy_calls: AtomicUsize::new(0),
            handled: Mutex::new(Vec::new()),
        }
    }

    pub fn replying(mut self, reply: MockReply) -> Self {
        self.reply = reply;
        self
    }

    pub fn failing_init(mut self, reason: impl Into<String>) -> Self {
        self.init_failure = Some(reason.into());
        self
    }

    pub fn failing_destroy(mut self, reason: impl Into<String>) -> Self {
        self.destroy_failure = Some(reason.into());
        self
    }

    /// Sleep inside `on_initialize` and `handle`.
    pub fn with_delay(mut self, delay: Duration) -> Self {
        self.delay = Some(delay);
        self
    }

    pub fn init_calls(&self) -> usize {
        self.init_calls.load(Ordering::SeqCst)
    }

    pub fn destroy_calls(&self) -> usize {
        self.destroy_calls.load(Ordering::SeqCst)
    }

    /// Contents of every message that reached the handler.
    pub fn handled(&self) -> Vec<String> {
        self.handled_log().clone()
    }

    fn handled_log(&self) -> MutexGuard<'_, Vec<String>> {
        self.handled
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    async fn pause(&self) {
        if let Some(delay) = self.delay {
            tokio::time::sleep(delay).await;
        }
    }
}

#[async_trait]
impl Agent for MockAgent {
    fn core(&self) -> &AgentCore {
        &self.core
    }

    async fn on_initialize(&self) -> AgentResult<()> {
        self.init_calls.fetch_add(1, Ordering::SeqCst);
        self.pause().await;
        match &self.init_failure {
            Some(reason) => Err(AgentError::Initialization(reason.clone())),
            None => Ok(()),
        }
    }

    async fn on_destroy(&self) -> AgentResult<()> {
        self.destroy_calls.fetch_add(1, Ordering::SeqCst);
        match &self.destroy_failure {
            Some(reason) => Err(AgentError::Destruction(reason.clone())),
            None => Ok(()),
        }
    }

    async fn handle(
        &self,
        message: &Message,
        _context: &mut ExecutionContext,
    ) -> AgentResult<Message> {
        self.handled_log().push(message.content().to_string());
        self.pause().await;
        match &self.reply {
            MockReply::Echo => Ok(Message::reply_to(message, self.id(), message.content())),
            MockReply::Text(text) => Ok(Message::reply_to(message, self.id(), text.clone())),
            MockReply::Fail(reason) => Err(AgentError::Processing(reason.clone())),
            MockReply::Panic(reason) => panic!("{reason}"),
        }
    }
}
