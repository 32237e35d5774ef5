//! # Conversation Store
//!
//! An ordered transcript of role-tagged messages. A fresh (or reset)
//! transcript contains exactly one seeded assistant greeting; every user turn
//! and every produced reply is appended at the tail.

use crate::prompts::GREETING;
use serde::Serialize;

/// Who produced a chat message.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    User,
    Assistant,
}

/// One entry in the displayed chat log.
#[derive(Debug, Clone, Serialize)]
pub struct ChatMessage {
    pub role: Role,
    pub text: String,
}

/// The ordered chat transcript for one session.
#[derive(Debug, Clone, Serialize)]
pub struct Transcript {
    messages: Vec<ChatMessage>,
}

impl Transcript {
    /// Creates a transcript seeded with the fixed assistant greeting.
    pub fn new() -> Self {
        Self {
            messages: vec![ChatMessage {
                role: Role::Assistant,
                text: GREETING.to_string(),
            }],
        }
    }

    /// Appends a message at the tail. No deduplication, no size cap.
    pub fn append(&mut self, role: Role, text: impl Into<String>) {
        self.messages.push(ChatMessage {
            role,
            text: text.into(),
        });
    }

    /// Reinitializes to exactly the seeded greeting.
    pub fn reset(&mut self) {
        *self = Self::new();
    }

    /// The messages in insertion order.
    pub fn messages(&self) -> &[ChatMessage] {
        &self.messages
    }

    pub fn len(&self) -> usize {
        self.messages.len()
    }

    pub fn is_empty(&self) -> bool {
        self.messages.is_empty()
    }
}

impl Default for Transcript {
    fn default() -> Self {
        Self::new()
    }
}
