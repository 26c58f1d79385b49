//! Conversation types shared by the cache file and the OpenAI client.
//!
//! A conversation is stored as a plain JSON array of chat messages, the same
//! shape the chat-completions API accepts for `messages`.

use serde::{Deserialize, Serialize};

/// Author of a chat message.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    System,
    User,
    Assistant,
}

/// A single chat message.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChatMessage {
    pub role: Role,
    pub content: String,
}

impl ChatMessage {
    pub fn user(content: impl Into<String>) -> Self {
        Self {
            role: Role::User,
            content: content.into(),
        }
    }

    pub fn assistant(content: impl Into<String>) -> Self {
        Self {
            role: Role::Assistant,
            content: content.into(),
        }
    }
}

/// The turns exchanged so far, oldest first.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Conversation {
    pub messages: Vec<ChatMessage>,
}

impl Conversation {
    /// Return a copy of this conversation extended with one exchange.
    pub fn with_exchange(&self, prompt: &str, reply: &str) -> Self {
        let mut messages = self.messages.clone();
        messages.push(ChatMessage::user(prompt));
        messages.push(ChatMessage::assistant(reply));
        Self { messages }
    }
}
