//! Append-only chat transcript.

use super::model::{ChatMessage, ChatReply, ChatRole, ServerChatMessage};

#[derive(Debug, Clone, PartialEq, Default)]
pub struct ChatTranscript {
    messages: Vec<ChatMessage>,
}

impl ChatTranscript {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn messages(&self) -> &[ChatMessage] {
        &self.messages
    }

    pub fn len(&self) -> usize {
        self.messages.len()
    }

    pub fn is_empty(&self) -> bool {
        self.messages.is_empty()
    }

    pub fn push(&mut self, message: ChatMessage) {
        self.messages.push(message);
    }

    /// Records one send/reply exchange.
    ///
    /// Appends the user entry, the primary assistant entry, then every
    /// additional server message in server order, each as an assistant
    /// entry whatever its sender label. Returns the number of entries added.
    pub fn record_exchange(&mut self, user_text: &str, sent_at: &str, reply: ChatReply) -> usize {
        let before = self.messages.len();

        self.messages.push(ChatMessage::user(user_text, sent_at));

        let replied_at = reply.timestamp.unwrap_or_else(|| sent_at.to_string());
        self.messages.push(ChatMessage::assistant(reply.response, replied_at));

        self.messages.extend(
            reply
                .additional_messages
                .into_iter()
                .map(|extra| extra.into_message_as(ChatRole::Assistant)),
        );

        self.messages.len() - before
    }

    /// Rebuilds the transcript from a history fetch.
    pub fn replace_with_history(&mut self, history: Vec<ServerChatMessage>) {
        self.messages = history.into_iter().map(ServerChatMessage::into_message).collect();
    }

    pub fn clear(&mut self) {
        self.messages.clear();
    }
}
