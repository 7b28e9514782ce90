use super::current_user_id;
use anyhow::{Context, Result};
use talentdesk_application::Portal;
use talentdesk_core::chat::{ChatMessage, ChatRole};

fn print_message(message: &ChatMessage) {
    let speaker = match message.role {
        ChatRole::User => "you",
        ChatRole::Assistant => "assistant",
    };
    match &message.kind {
        Some(kind) => println!("[{}] ({}) {}", speaker, kind, message.content),
        None => println!("[{}] {}", speaker, message.content),
    }
}

pub async fn send(portal: &Portal, message: &str) -> Result<()> {
    let user_id = current_user_id(portal).await?;
    portal
        .chat
        .send_message(message, user_id)
        .await
        .context("Failed to send message")?;

    // The user's own line is already on screen.
    for entry in portal.chat.messages().iter().skip(1) {
        print_message(entry);
    }
    Ok(())
}

pub async fn history(portal: &Portal, limit: Option<usize>) -> Result<()> {
    let user_id = current_user_id(portal).await?;
    portal
        .chat
        .fetch_history(user_id, limit)
        .await
        .context("Failed to fetch chat history")?;

    let messages = portal.chat.messages();
    if messages.is_empty() {
        println!("No chat history");
    }
    for entry in &messages {
        print_message(entry);
    }
    Ok(())
}
