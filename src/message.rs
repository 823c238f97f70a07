//! Message type for a parsed conversation.
//!
//! This module provides [`Message`], the normalized representation of one
//! record of a Messenger export, and [`MessageKind`], the tagged variant the
//! reader assigns to every record at parse time.
//!
//! # Examples
//!
//! ```
//! use chatgraph::{Message, MessageKind};
//! use chrono::{TimeZone, Utc};
//!
//! let ts = Utc.with_ymd_and_hms(2024, 1, 15, 10, 30, 0).unwrap();
//! let msg = Message::text("Alice", ts, "Hello, world!");
//! assert_eq!(msg.sender(), "Alice");
//! assert_eq!(msg.word_count(), 2);
//! assert!(matches!(msg.kind(), MessageKind::Text));
//! ```

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// What a message carries.
///
/// Every record is classified exactly once, when the export is read.
/// Unrecognized record shapes are rejected by the reader instead of being
/// coerced into one of these variants.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MessageKind {
    /// Plain text.
    Text,
    /// Photos, videos, audio, GIFs, files or a sticker.
    Media(Media),
    /// Anything that is neither text nor media (calls, shares, unsent...).
    Other(OtherKind),
}

/// Attachment carried by a media message.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Media {
    /// One or more photos.
    Photos(u32),
    /// One or more videos.
    Videos(u32),
    /// Voice clips and other audio.
    Audio(u32),
    /// Animated GIFs.
    Gifs(u32),
    /// Arbitrary file attachments.
    Files(u32),
    /// A sticker, identified by the URI of its image inside the export.
    Sticker {
        /// Relative path of the sticker image
        uri: String,
    },
}

/// Non-text, non-media records.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OtherKind {
    /// Audio or video call.
    Call {
        /// Call length in seconds (0 for missed calls)
        duration_secs: u64,
    },
    /// Link or post shared without accompanying text.
    Share,
    /// Message deleted by its sender.
    Unsent,
    /// Someone joined or left the conversation.
    MembershipChange,
    /// A record with no content at all (e.g. reaction-only placeholders).
    Empty,
}

/// A single message of a conversation.
///
/// Immutable once built by the reader. Conversations keep their messages
/// ordered by [`timestamp`](Message::timestamp).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Message {
    /// Display name of the author.
    pub sender: String,

    /// When the message was sent.
    pub timestamp: DateTime<Utc>,

    /// Text content, if the record had any.
    #[serde(skip_serializing_if = "Option::is_none")]
    #[serde(default)]
    pub text: Option<String>,

    /// Classification assigned at parse time.
    pub kind: MessageKind,
}

impl Message {
    /// Creates a message with an explicit kind and no text.
    pub fn new(sender: impl Into<String>, timestamp: DateTime<Utc>, kind: MessageKind) -> Self {
        Self {
            sender: sender.into(),
            timestamp,
            text: None,
            kind,
        }
    }

    /// Creates a text message.
    pub fn text(
        sender: impl Into<String>,
        timestamp: DateTime<Utc>,
        text: impl Into<String>,
    ) -> Self {
        Self::new(sender, timestamp, MessageKind::Text).with_text(text)
    }

    /// Creates a media message.
    pub fn media(sender: impl Into<String>, timestamp: DateTime<Utc>, media: Media) -> Self {
        Self::new(sender, timestamp, MessageKind::Media(media))
    }

    /// Creates a message of the `other` kind.
    pub fn other(sender: impl Into<String>, timestamp: DateTime<Utc>, kind: OtherKind) -> Self {
        Self::new(sender, timestamp, MessageKind::Other(kind))
    }

    /// Builder method to attach text content.
    #[must_use]
    pub fn with_text(mut self, text: impl Into<String>) -> Self {
        self.text = Some(text.into());
        self
    }

    // =========================================================================
    // Accessors
    // =========================================================================

    pub fn sender(&self) -> &str {
        &self.sender
    }

    pub fn timestamp(&self) -> DateTime<Utc> {
        self.timestamp
    }

    pub fn text_content(&self) -> Option<&str> {
        self.text.as_deref()
    }

    pub fn kind(&self) -> &MessageKind {
        &self.kind
    }

    pub fn is_text(&self) -> bool {
        matches!(self.kind, MessageKind::Text)
    }

    pub fn is_media(&self) -> bool {
        matches!(self.kind, MessageKind::Media(_))
    }

    pub fn is_other(&self) -> bool {
        matches!(self.kind, MessageKind::Other(_))
    }

    /// Number of whitespace-separated words in the text content.
    pub fn word_count(&self) -> usize {
        self.text
            .as_deref()
            .map(|t| t.split_whitespace().count())
            .unwrap_or(0)
    }

    /// Number of characters in the text content.
    pub fn char_count(&self) -> usize {
        self.text.as_deref().map(|t| t.chars().count()).unwrap_or(0)
    }

    /// Sticker URI, for sticker messages.
    pub fn sticker(&self) -> Option<&str> {
        match &self.kind {
            MessageKind::Media(Media::Sticker { uri }) => Some(uri),
            _ => None,
        }
    }

    /// Call duration in seconds, for call records.
    pub fn call_duration(&self) -> Option<u64> {
        match self.kind {
            MessageKind::Other(OtherKind::Call { duration_secs }) => Some(duration_secs),
            _ => None,
        }
    }
}
