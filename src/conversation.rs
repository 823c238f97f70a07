//! A whole chat thread: time-ordered messages plus the participant set.

use std::collections::BTreeSet;

use serde::Serialize;

use crate::Message;

/// One conversation read from an export.
///
/// The only way to build one is [`Conversation::new`], which sorts the
/// messages by timestamp and derives the participant set from the senders,
/// so both invariants hold for every value of this type.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Conversation {
    title: Option<String>,
    messages: Vec<Message>,
    participants: BTreeSet<String>,
}

impl Conversation {
    /// Builds a conversation from messages in any order.
    ///
    /// Sorting is stable: messages sharing a timestamp keep their input order.
    pub fn new(title: Option<String>, mut messages: Vec<Message>) -> Self {
        messages.sort_by_key(|m| m.timestamp);
        let participants = messages.iter().map(|m| m.sender.clone()).collect();
        Self {
            title,
            messages,
            participants,
        }
    }

    pub fn title(&self) -> Option<&str> {
        self.title.as_deref()
    }

    pub fn messages(&self) -> &[Message] {
        &self.messages
    }

    /// Unique sender names, sorted.
    pub fn participants(&self) -> &BTreeSet<String> {
        &self.participants
    }

    pub fn len(&self) -> usize {
        self.messages.len()
    }

    pub fn is_empty(&self) -> bool {
        self.messages.is_empty()
    }
}
