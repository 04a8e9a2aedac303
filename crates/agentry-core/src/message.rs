//! # Messages
//!
//! Typed value objects exchanged between callers and agents. A [`Message`]
//! is immutable once built: its id, routing endpoints and content never
//! change. Only the delivery status may move forward, and only through
//! [`Message::advance_status`], which consumes the message and hands back a
//! new value carrying the same id.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use uuid::Uuid;

use crate::error::{MessageError, MessageResult};

/// Kind of payload a message carries.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MessageType {
    Text,
    Command,
    Query,
    Response,
    Notification,
    Error,
    System,
    ToolCall,
    ToolResponse,
    Media,
}

impl MessageType {
    /// Stable lowercase name used in logs and on the wire.
    pub fn as_str(&self) -> &'static str {
        match self {
            MessageType::Text => "text",
            MessageType::Command => "command",
            MessageType::Query => "query",
            MessageType::Response => "response",
            MessageType::Notification => "notification",
            MessageType::Error => "error",
            MessageType::System => "system",
            MessageType::ToolCall => "tool_call",
            MessageType::ToolResponse => "tool_response",
            MessageType::Media => "media",
        }
    }

    /// Parse a type name, accepting both `tool_call` and `tool-call` spellings.
    pub fn from_name(name: &str) -> Option<Self> {
        match name.to_ascii_lowercase().replace('-', "_").as_str() {
            "text" => Some(MessageType::Text),
            "command" => Some(MessageType::Command),
            "query" => Some(MessageType::Query),
            "response" => Some(MessageType::Response),
            "notification" => Some(MessageType::Notification),
            "error" => Some(MessageType::Error),
            "system" => Some(MessageType::System),
            "tool_call" => Some(MessageType::ToolCall),
            "tool_response" => Some(MessageType::ToolResponse),
            "media" => Some(MessageType::Media),
            _ => None,
        }
    }
}

impl std::fmt::Display for MessageType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Delivery priority, ordered from lowest to highest.
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
#[serde(rename_all = "lowercase")]
pub enum Priority {
    Low,
    #[default]
    Normal,
    High,
    Urgent,
}

/// Delivery status of a message.
///
/// The happy path is `Created → Sent → Received → Processed`; `Failed` may be
/// entered from any non-terminal status.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MessageStatus {
    #[default]
    Created,
    Sent,
    Received,
    Processed,
    Failed,
}

impl MessageStatus {
    fn rank(self) -> u8 {
        match self {
            MessageStatus::Created => 0,
            MessageStatus::Sent => 1,
            MessageStatus::Received => 2,
            MessageStatus::Processed => 3,
            MessageStatus::Failed => 4,
        }
    }

    /// Whether no further transition is possible.
    pub fn is_terminal(self) -> bool {
        matches!(self, MessageStatus::Processed | MessageStatus::Failed)
    }

    /// Whether moving from `self` to `next` respects the documented order.
    pub fn can_advance_to(self, next: MessageStatus) -> bool {
        if self.is_terminal() {
            return false;
        }
        next == MessageStatus::Failed || next.rank() > self.rank()
    }
}

/// An immutable message routed through the runtime.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Message {
    id: String,
    #[serde(rename = "type")]
    kind: MessageType,
    content: String,
    sender: String,
    receiver: String,
    timestamp: DateTime<Utc>,
    #[serde(default)]
    priority: Priority,
    #[serde(default)]
    status: MessageStatus,
    #[serde(default, skip_serializing_if = "HashMap::is_empty")]
    metadata: HashMap<String, serde_json::Value>,
}

impl Message {
    /// Start building a message of the given type.
    pub fn builder(kind: MessageType, content: impl Into<String>) -> MessageBuilder {
        MessageBuilder::new(kind, content)
    }

    /// Shorthand for a plain text message with default routing.
    pub fn text(content: impl Into<String>) -> Self {
        Self::builder(MessageType::Text, content).build()
    }

    /// Build a `response` addressed back to the sender of `original`.
    ///
    /// The priority of the original message is carried over.
    pub fn reply_to(original: &Message, sender: impl Into<String>, content: impl Into<String>) -> Self {
        Self::builder(MessageType::Response, content)
            .sender(sender)
            .receiver(original.sender.clone())
            .priority(original.priority)
            .build()
    }

    /// Build an `error` message addressed back to the sender of `original`.
    ///
    /// Error replies are always `High` priority regardless of the original.
    pub fn error_reply(
        original: &Message,
        sender: impl Into<String>,
        description: impl Into<String>,
    ) -> Self {
        Self::builder(MessageType::Error, description)
            .sender(sender)
            .receiver(original.sender.clone())
            .priority(Priority::High)
            .build()
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn kind(&self) -> MessageType {
        self.kind
    }

    pub fn content(&self) -> &str {
        &self.content
    }

    pub fn sender(&self) -> &str {
        &self.sender
    }

    pub fn receiver(&self) -> &str {
        &self.receiver
    }

    pub fn timestamp(&self) -> DateTime<Utc> {
        self.timestamp
    }

    pub fn priority(&self) -> Priority {
        self.priority
    }

    pub fn status(&self) -> MessageStatus {
        self.status
    }

    pub fn metadata(&self) -> &HashMap<String, serde_json::Value> {
        &self.metadata
    }

    /// Look up a single metadata entry.
    pub fn metadata_value(&self, key: &str) -> Option<&serde_json::Value> {
        self.metadata.get(key)
    }

    /// Move the message to a later delivery status.
    ///
    /// # Errors
    ///
    /// Returns [`MessageError::InvalidStatusTransition`] when `next` would move
    /// the status backwards or out of a terminal status.
    pub fn advance_status(mut self, next: MessageStatus) -> MessageResult<Self> {
        if !self.status.can_advance_to(next) {
            return Err(MessageError::InvalidStatusTransition {
                from: self.status,
                to: next,
            });
        }
        self.status = next;
        Ok(self)
    }
}

/// Builder for [`Message`]. Every built message gets a fresh id and timestamp.
#[derive(Debug, Clone)]
pub struct MessageBuilder {
    kind: MessageType,
    content: String,
    sender: String,
    receiver: String,
    priority: Priority,
    metadata: HashMap<String, serde_json::Value>,
}

impl MessageBuilder {
    fn new(kind: MessageType, content: impl Into<String>) -> Self {
        Self {
            kind,
            content: content.into(),
            sender: String::new(),
            receiver: String::new(),
            priority: Priority::Normal,
            metadata: HashMap::new(),
        }
    }

    pub fn sender(mut self, sender: impl Into<String>) -> Self {
        self.sender = sender.into();
        self
    }

    pub fn receiver(mut self, receiver: impl Into<String>) -> Self {
        self.receiver = receiver.into();
        self
    }

    pub fn priority(mut self, priority: Priority) -> Self {
        self.priority = priority;
        self
    }

    pub fn metadata(mut self, key: impl Into<String>, value: serde_json::Value) -> Self {
        self.metadata.insert(key.into(), value);
        self
    }

    pub fn build(self) -> Message {
        Message {
            id: Uuid::new_v4().to_string(),
            kind: self.kind,
            content: self.content,
            sender: self.sender,
            receiver: self.receiver,
            timestamp: Utc::now(),
            priority: self.priority,
            status: MessageStatus::Created,
            metadata: self.metadata,
        }
    }
}
