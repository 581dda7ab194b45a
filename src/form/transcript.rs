//! Append-only chat transcript.

use serde::{Deserialize, Serialize};

/// Who produced a transcript entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Sender {
    Bot,
    User,
}

/// One immutable chat bubble.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Message {
    pub text: String,
    pub sender: Sender,
}

impl Message {
    pub fn bot(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            sender: Sender::Bot,
        }
    }

    pub fn user(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            sender: Sender::User,
        }
    }
}

/// The ordered chat log. Append-only: insertion order is display order and
/// the length never decreases.
#[derive(Debug, Clone, Default)]
pub struct Transcript {
    messages: Vec<Message>,
    drained: usize,
}

impl Transcript {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, message: Message) {
        self.messages.push(message);
    }

    pub fn push_bot(&mut self, text: impl Into<String>) {
        self.push(Message::bot(text));
    }

    pub fn push_user(&mut self, text: impl Into<String>) {
        self.push(Message::user(text));
    }

    pub fn len(&self) -> usize {
        self.messages.len()
    }

    pub fn is_empty(&self) -> bool {
        self.messages.is_empty()
    }

    pub fn messages(&self) -> &[Message] {
        &self.messages
    }

    /// Messages appended since the last drain, for incremental rendering.
    /// Does not remove anything; the full log stays addressable.
    pub fn drain_new(&mut self) -> &[Message] {
        let from = self.drained;
        self.drained = self.messages.len();
        &self.messages[from..]
    }
}
