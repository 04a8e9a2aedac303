//! # Agents
//!
//! An agent is anything that turns an inbound [`Message`] into a response
//! [`Message`]. Implementations provide the [`Agent`] hooks; the lifecycle
//! entry points (`initialize`, `process`, `destroy`) live on the blanket
//! [`AgentLifecycle`] extension so every agent gets the same availability
//! gate and failure containment.

mod state;

pub use state::{AgentCore, LifecycleState};

use async_trait::async_trait;
use futures::FutureExt;
use std::panic::AssertUnwindSafe;
use tracing::{debug, error, info, warn};

use crate::context::ExecutionContext;
use crate::error::{AgentError, AgentResult};
use crate::message::Message;
use crate::unwind::panic_message;

/// Capability implemented by every agent variant.
///
/// Identity and availability come from the embedded [`AgentCore`]. Only
/// [`Agent::handle`] is mandatory.
#[async_trait]
pub trait Agent: Send + Sync {
    /// Shared identity and lifecycle state.
    fn core(&self) -> &AgentCore;

    fn id(&self) -> &str {
        self.core().id()
    }

    fn name(&self) -> &str {
        self.core().name()
    }

    fn description(&self) -> &str {
        self.core().description()
    }

    /// Availability as of this call. Never cached by callers.
    fn is_available(&self) -> bool {
        self.core().is_available()
    }

    /// Variant-specific setup, run once while the agent is `Initializing`.
    async fn on_initialize(&self) -> AgentResult<()> {
        Ok(())
    }

    /// Variant-specific teardown, run once while the agent is `Destroying`.
    async fn on_destroy(&self) -> AgentResult<()> {
        Ok(())
    }

    /// Produce a response for `message`.
    ///
    /// Errors and panics are turned into `error` messages by
    /// [`AgentLifecycle::process`]; implementations do not need to catch them.
    async fn handle(
        &self,
        message: &Message,
        context: &mut ExecutionContext,
    ) -> AgentResult<Message>;
}

/// Lifecycle driver available on every [`Agent`].
#[async_trait]
pub trait AgentLifecycle {
    /// Move a freshly constructed agent to `Available`.
    ///
    /// A failing or panicking `on_initialize` leaves the agent `Destroyed`.
    ///
    /// # Errors
    ///
    /// [`AgentError::InvalidState`] when the agent is not `Constructed`,
    /// otherwise whatever the hook reported.
    async fn initialize(&self) -> AgentResult<()>;

    /// Tear the agent down. The agent ends `Destroyed` even if the hook fails.
    ///
    /// # Errors
    ///
    /// [`AgentError::InvalidState`] when the agent is not live, otherwise
    /// whatever the hook reported.
    async fn destroy(&self) -> AgentResult<()>;

    /// Handle one message. Never fails: unavailability, handler errors and
    /// panics all come back as an `error` message to the original sender.
    async fn process(&self, message: &Message, context: &mut ExecutionContext) -> Message;
}

#[async_trait]
impl<A> AgentLifecycle for A
where
    A: Agent + ?Sized,
{
    async fn initialize(&self) -> AgentResult<()> {
        let core = self.core();
        if !core.begin_initialize() {
            return Err(AgentError::InvalidState {
                current: core.state(),
                operation: "initialize".to_string(),
            });
        }

        info!(agent_id = %core.id(), name = %core.name(), "Initializing agent");
        let outcome = AssertUnwindSafe(self.on_initialize())
            .catch_unwind()
            .await
            .unwrap_or_else(|payload| Err(AgentError::Panicked(panic_message(payload))));

        match outcome {
            Ok(()) => {
                core.finish_initialize(true);
                info!(agent_id = %core.id(), "Agent initialized");
                Ok(())
            }
            Err(err) => {
                core.finish_initialize(false);
                error!(
                    agent_id = %core.id(),
                    error = %err,
                    code = err.error_code(),
                    "Agent initialization failed"
                );
                Err(err)
            }
        }
    }

    async fn destroy(&self) -> AgentResult<()> {
        let core = self.core();
        if !core.begin_destroy() {
            return Err(AgentError::InvalidState {
                current: core.state(),
                operation: "destroy".to_string(),
            });
        }

        info!(agent_id = %core.id(), name = %core.name(), "Destroying agent");
        let outcome = AssertUnwindSafe(self.on_destroy())
            .catch_unwind()
            .await
            .unwrap_or_else(|payload| Err(AgentError::Panicked(panic_message(payload))));
        core.finish_destroy();

        if let Err(err) = &outcome {
            error!(agent_id = %core.id(), error = %err, "Agent destroy hook failed");
        }
        outcome
    }

    async fn process(&self, message: &Message, context: &mut ExecutionContext) -> Message {
        let agent_id = self.id();
        if !self.is_available() {
            warn!(agent_id = %agent_id, message_id = %message.id(), "Agent is not available");
            return Message::error_reply(message, agent_id, "Agent is not available");
        }

        debug!(
            agent_id = %agent_id,
            message_id = %message.id(),
            kind = %message.kind(),
            "Processing message"
        );

        let outcome = AssertUnwindSafe(self.handle(message, context))
            .catch_unwind()
            .await
            .unwrap_or_else(|payload| Err(AgentError::Panicked(panic_message(payload))));

        match outcome {
            Ok(reply) => reply,
            Err(err) => {
                error!(
                    agent_id = %agent_id,
                    message_id = %message.id(),
                    code = err.error_code(),
                    error = %err,
                    "Error processing message"
                );
                Message::error_reply(message, agent_id, format!("Error processing message: {err}"))
            }
        }
    }
}
