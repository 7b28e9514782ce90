//! HR assistant chat.

use super::{read, update};
use crate::endpoints;
use crate::pipeline::RequestPipeline;
use crate::status::StoreStatus;
use serde_json::{Value, json};
use std::sync::{Arc, RwLock};
use talentdesk_core::Result;
use talentdesk_core::chat::{ChatHistory, ChatMessage, ChatReply, ChatTranscript, ServerChatMessage};
use talentdesk_core::clock::Clock;
use talentdesk_core::http::ApiRequest;

/// Page size of a history fetch when the caller names none.
pub const DEFAULT_HISTORY_LIMIT: usize = 50;

pub struct ChatStore {
    pipeline: Arc<RequestPipeline>,
    clock: Arc<dyn Clock>,
    transcript: RwLock<ChatTranscript>,
    history: RwLock<Vec<ServerChatMessage>>,
    status: StoreStatus,
}

impl ChatStore {
    pub fn new(pipeline: Arc<RequestPipeline>, clock: Arc<dyn Clock>) -> Self {
        Self {
            pipeline,
            clock,
            transcript: RwLock::new(ChatTranscript::new()),
            history: RwLock::new(Vec::new()),
            status: StoreStatus::new(),
        }
    }

    pub fn status(&self) -> &StoreStatus {
        &self.status
    }

    pub fn messages(&self) -> Vec<ChatMessage> {
        self.transcript
            .read()
            .unwrap_or_else(|e| e.into_inner())
            .messages()
            .to_vec()
    }

    pub fn history(&self) -> Vec<ServerChatMessage> {
        read(&self.history)
    }

    /// Sends one message and appends the exchange to the transcript.
    pub async fn send_message(&self, message: &str, user_id: i64) -> Result<ChatReply> {
        self.status
            .track(async {
                let request = ApiRequest::post(endpoints::CHAT_SEND).json(&json!({
                    "message": message,
                    "user_id": user_id,
                }))?;
                let reply: ChatReply = self.pipeline.send_as(request).await?;

                let sent_at = self.clock.now_rfc3339();
                let added = update(&self.transcript, |transcript| {
                    transcript.record_exchange(message, &sent_at, reply.clone())
                });
                tracing::debug!(added, "Chat exchange recorded");
                Ok(reply)
            })
            .await
    }

    /// Rebuilds the transcript from the server history.
    pub async fn fetch_history(
        &self,
        user_id: i64,
        limit: Option<usize>,
    ) -> Result<Vec<ServerChatMessage>> {
        self.status
            .track(async {
                let request = ApiRequest::get(endpoints::CHAT_HISTORY)
                    .query("user_id", user_id)
                    .query("limit", limit.unwrap_or(DEFAULT_HISTORY_LIMIT));
                let history: ChatHistory = self.pipeline.send_as(request).await?;

                update(&self.history, |slot| *slot = history.history.clone());
                update(&self.transcript, |transcript| {
                    transcript.replace_with_history(history.history.clone())
                });
                tracing::debug!(count = history.history.len(), "Chat history loaded");
                Ok(history.history)
            })
            .await
    }

    /// Deletes the server history and empties the local transcript.
    pub async fn clear_history(&self, user_id: i64) -> Result<Value> {
        self.status
            .track(async {
                let request =
                    ApiRequest::post(endpoints::CHAT_CLEAR).json(&json!({ "user_id": user_id }))?;
                let body = self.pipeline.send_json(request).await?;
                update(&self.transcript, ChatTranscript::clear);
                update(&self.history, Vec::clear);
                Ok(body)
            })
            .await
    }

    pub fn clear_messages(&self) {
        update(&self.transcript, ChatTranscript::clear);
    }

    pub fn add_message(&self, message: ChatMessage) {
        update(&self.transcript, |transcript| transcript.push(message));
    }
}
