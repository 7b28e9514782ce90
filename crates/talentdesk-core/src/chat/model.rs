//! Chat domain models.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ChatRole {
    User,
    Assistant,
}

impl ChatRole {
    /// Maps the backend's sender label. Only `user` is the user; every other
    /// label (`ai`, `assistant`, `bot`, ...) is the assistant.
    pub fn from_sender(sender: &str) -> Self {
        if sender.eq_ignore_ascii_case("user") {
            ChatRole::User
        } else {
            ChatRole::Assistant
        }
    }
}

/// One transcript entry.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChatMessage {
    pub role: ChatRole,
    pub content: String,
    #[serde(default)]
    pub timestamp: Option<String>,
    /// Structured payload kind, e.g. `leave-card`.
    #[serde(rename = "type", default, skip_serializing_if = "Option::is_none")]
    pub kind: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub data: Option<Value>,
}

impl ChatMessage {
    pub fn user(content: impl Into<String>, timestamp: impl Into<String>) -> Self {
        Self {
            role: ChatRole::User,
            content: content.into(),
            timestamp: Some(timestamp.into()),
            kind: None,
            data: None,
        }
    }

    pub fn assistant(content: impl Into<String>, timestamp: impl Into<String>) -> Self {
        Self {
            role: ChatRole::Assistant,
            content: content.into(),
            timestamp: Some(timestamp.into()),
            kind: None,
            data: None,
        }
    }
}

/// A stored message as the backend serializes it (history entries and
/// `additional_messages` items).
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct ServerChatMessage {
    #[serde(default)]
    pub id: Option<i64>,
    #[serde(default)]
    pub sender: Option<String>,
    #[serde(default)]
    pub text: Option<String>,
    #[serde(rename = "type", default)]
    pub kind: Option<String>,
    #[serde(default)]
    pub data: Option<Value>,
    #[serde(default)]
    pub timestamp: Option<String>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl ServerChatMessage {
    /// Converts a history entry, honouring its sender.
    pub fn into_message(self) -> ChatMessage {
        let role = self
            .sender
            .as_deref()
            .map(ChatRole::from_sender)
            .unwrap_or(ChatRole::Assistant);
        self.into_message_as(role)
    }

    /// Converts an entry under a fixed role, ignoring the sender label.
    pub fn into_message_as(self, role: ChatRole) -> ChatMessage {
        ChatMessage {
            role,
            content: self.text.unwrap_or_default(),
            timestamp: self.timestamp,
            kind: self.kind,
            data: self.data,
        }
    }
}

/// Response of the chat endpoint.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct ChatReply {
    #[serde(default)]
    pub response: String,
    #[serde(default)]
    pub timestamp: Option<String>,
    #[serde(default)]
    pub additional_messages: Vec<ServerChatMessage>,
}

/// Response of the history endpoint.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct ChatHistory {
    #[serde(default)]
    pub history: Vec<ServerChatMessage>,
}
