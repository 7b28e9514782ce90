//! HR chatbot domain module.

mod model;
mod transcript;

pub use model::{ChatHistory, ChatMessage, ChatReply, ChatRole, ServerChatMessage};
pub use transcript::ChatTranscript;
