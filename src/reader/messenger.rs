//! Messenger JSON record types and their conversion into [`Message`].
//!
//! Facebook exports each conversation as one or more `message_N.json` files
//! with the same shape as the Instagram export: a `messages` array of flat
//! records carrying `sender_name`, `timestamp_ms` and optional content or
//! attachment fields.

use chrono::{DateTime, TimeZone, Utc};
use serde::Deserialize;

use crate::error::ParseErrorKind;
use crate::message::{Media, Message, MessageKind, OtherKind};

/// Top-level structure of a `message_N.json` file.
#[derive(Debug, Deserialize)]
pub struct MessengerExport {
    #[serde(default)]
    pub title: Option<String>,
    pub messages: Vec<MessengerRawMessage>,
}

/// Raw message record.
///
/// `sender_name` and `timestamp_ms` are optional here only so that a missing
/// field can be reported with the record's position; conversion rejects
/// records without them.
#[derive(Debug, Default, Deserialize)]
pub struct MessengerRawMessage {
    pub sender_name: Option<String>,
    pub timestamp_ms: Option<i64>,
    pub content: Option<String>,
    #[serde(rename = "type")]
    pub record_type: Option<String>,
    #[serde(default)]
    pub photos: Vec<MessengerMedia>,
    #[serde(default)]
    pub videos: Vec<MessengerMedia>,
    #[serde(default)]
    pub audio_files: Vec<MessengerMedia>,
    #[serde(default)]
    pub gifs: Vec<MessengerMedia>,
    #[serde(default)]
    pub files: Vec<MessengerMedia>,
    pub sticker: Option<MessengerMedia>,
    pub share: Option<MessengerShare>,
    pub call_duration: Option<u64>,
    #[serde(default)]
    pub is_unsent: bool,
}

/// Attachment reference (photo, video, sticker...).
#[derive(Debug, Default, Deserialize)]
pub struct MessengerMedia {
    #[serde(default)]
    pub uri: String,
}

/// Shared link.
#[derive(Debug, Deserialize)]
pub struct MessengerShare {
    pub link: Option<String>,
    pub share_text: Option<String>,
}

/// Record `type` values found in Messenger exports.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum RecordType {
    Generic,
    Share,
    Call,
    Subscribe,
    Unsubscribe,
}

impl RecordType {
    fn from_raw(raw: Option<&str>) -> Option<Self> {
        match raw {
            None | Some("Generic") => Some(RecordType::Generic),
            Some("Share") => Some(RecordType::Share),
            Some("Call") => Some(RecordType::Call),
            Some("Subscribe") => Some(RecordType::Subscribe),
            Some("Unsubscribe") => Some(RecordType::Unsubscribe),
            Some(_) => None,
        }
    }
}

/// Fix Meta's broken encoding (Mojibake).
///
/// Meta exports UTF-8 text encoded as if it were ISO-8859-1: each UTF-8 byte
/// is stored as a separate code point. Example: "Привет" becomes
/// "ÐŸÑ€Ð¸Ð²ÐµÑ‚". Strings that contain code points above U+00FF were
/// not mangled and are returned unchanged, as are strings whose bytes do not
/// form valid UTF-8.
pub fn fix_mojibake_encoding(s: &str) -> String {
    if s.chars().any(|c| u32::from(c) > 0xFF) {
        return s.to_string();
    }
    let bytes: Vec<u8> = s.chars().map(|c| c as u8).collect();
    String::from_utf8(bytes).unwrap_or_else(|_| s.to_string())
}

/// Parses a millisecond timestamp to DateTime.
pub fn parse_ms_timestamp(timestamp_ms: i64) -> Option<DateTime<Utc>> {
    Utc.timestamp_millis_opt(timestamp_ms).single()
}

/// Converts a raw record into a [`Message`].
///
/// `index` is the record's position in its file and only used for error
/// reporting.
pub fn parse_messenger_message(
    index: usize,
    raw: &MessengerRawMessage,
    fix_encoding: bool,
) -> Result<Message, ParseErrorKind> {
    let fix = |s: &str| {
        if fix_encoding {
            fix_mojibake_encoding(s)
        } else {
            s.to_string()
        }
    };

    let sender = raw
        .sender_name
        .as_deref()
        .ok_or(ParseErrorKind::MissingField {
            index,
            field: "sender_name",
        })?;
    let timestamp_ms = raw.timestamp_ms.ok_or(ParseErrorKind::MissingField {
        index,
        field: "timestamp_ms",
    })?;
    let timestamp = parse_ms_timestamp(timestamp_ms).ok_or(ParseErrorKind::InvalidTimestamp {
        index,
        timestamp_ms,
    })?;
    let record_type = RecordType::from_raw(raw.record_type.as_deref()).ok_or_else(|| {
        ParseErrorKind::UnknownRecord {
            index,
            kind: raw.record_type.clone().unwrap_or_default(),
        }
    })?;

    let text = raw
        .content
        .as_deref()
        .filter(|c| !c.trim().is_empty())
        .map(fix);

    let kind = classify(raw, record_type, text.is_some());
    let mut message = Message::new(fix(sender), timestamp, kind);
    message.text = text;
    Ok(message)
}

fn classify(raw: &MessengerRawMessage, record_type: RecordType, has_text: bool) -> MessageKind {
    if raw.is_unsent {
        return MessageKind::Other(OtherKind::Unsent);
    }

    match record_type {
        RecordType::Call => {
            return MessageKind::Other(OtherKind::Call {
                duration_secs: raw.call_duration.unwrap_or(0),
            });
        }
        RecordType::Subscribe | RecordType::Unsubscribe => {
            return MessageKind::Other(OtherKind::MembershipChange);
        }
        RecordType::Generic | RecordType::Share => {}
    }

    if let Some(sticker) = &raw.sticker {
        return MessageKind::Media(Media::Sticker {
            uri: sticker.uri.clone(),
        });
    }

    let attachments: [(&Vec<MessengerMedia>, fn(u32) -> Media); 5] = [
        (&raw.photos, Media::Photos),
        (&raw.videos, Media::Videos),
        (&raw.audio_files, Media::Audio),
        (&raw.gifs, Media::Gifs),
        (&raw.files, Media::Files),
    ];
    let media = attachments
        .into_iter()
        .find(|(items, _)| !items.is_empty())
        .map(|(items, make)| make(u32::try_from(items.len()).unwrap_or(u32::MAX)));

    if let Some(media) = media {
        return MessageKind::Media(media);
    }

    if has_text {
        MessageKind::Text
    } else if record_type == RecordType::Share || raw.share.is_some() {
        MessageKind::Other(OtherKind::Share)
    } else {
        MessageKind::Other(OtherKind::Empty)
    }
}
