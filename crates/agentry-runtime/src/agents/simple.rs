//! Keyword-driven conversational agent with no model behind it.

use agentry_core::{
    Agent, AgentCore, AgentResult, ExecutionContext, Message, MessageType,
};
use async_trait::async_trait;
use chrono::Utc;
use tracing::info;

pub const SIMPLE_AI_AGENT_NAME: &str = "Simple AI Agent";

/// Replies to text, query and command messages from fixed templates.
#[derive(Debug)]
pub struct SimpleAiAgent {
    core: AgentCore,
}

impl Default for SimpleAiAgent {
    fn default() -> Self {
        Self::new()
    }
}

impl SimpleAiAgent {
    pub fn new() -> Self {
        Self {
            core: AgentCore::new(SIMPLE_AI_AGENT_NAME, "A basic AI agent for demonstration"),
        }
    }

    fn reply_text(content: &str) -> String {
        let lower = content.to_lowercase();
        if lower.contains("hello") || lower.contains("hi") {
            "Hello! I'm your AI assistant. How can I help you today?".to_string()
        } else if lower.contains("help") {
            "I can help you with various tasks. You can ask me questions, give me commands, or just have a conversation.".to_string()
        } else if lower.contains("weather") {
            "I don't have access to real-time weather data, but you can check your local weather service for accurate information.".to_string()
        } else {
            format!(
                "Thank you for your message: \"{content}\". I'm a simple AI agent and I'm here to help!"
            )
        }
    }

    fn reply_query(content: &str) -> String {
        format!(
            "I received your query: \"{content}\". While I'm a simple agent, I'll do my best to provide helpful information."
        )
    }

    fn reply_command(content: &str) -> String {
        let lower = content.to_lowercase();
        if lower.contains("status") {
            "Agent Status: Online and ready to help!".to_string()
        } else if lower.contains("time") {
            format!("Current time: {}", Utc::now().to_rfc3339())
        } else {
            format!(
                "Command received: \"{content}\". This is a simple agent with limited command capabilities."
            )
        }
    }
}

#[async_trait]
impl Agent for SimpleAiAgent {
    fn core(&self) -> &AgentCore {
        &self.core
    }

    async fn on_initialize(&self) -> AgentResult<()> {
        info!(agent_id = %self.id(), "SimpleAiAgent initialized");
        Ok(())
    }

    async fn on_destroy(&self) -> AgentResult<()> {
        info!(agent_id = %self.id(), "SimpleAiAgent destroyed");
        Ok(())
    }

    async fn handle(
        &self,
        message: &Message,
        _context: &mut ExecutionContext,
    ) -> AgentResult<Message> {
        let content = message.content();
        let response = match message.kind() {
            MessageType::Text => Self::reply_text(content),
            MessageType::Query => Self::reply_query(content),
            MessageType::Command => Self::reply_command(content),
            _ => "I can only process text, query, and command messages.".to_string(),
        };
        Ok(Message::reply_to(message, self.id(), response))
    }
}
