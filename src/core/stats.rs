//! Aggregated statistics of a conversation.
//!
//! [`StatsBundle`] is built once by [`aggregate`](super::aggregate), rendered
//! into charts and persisted verbatim as `stats.json`. Every series is ordered
//! deterministically so that serializing the same conversation twice yields
//! identical bytes.

use std::collections::BTreeMap;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Weekday labels, Monday first.
pub const WEEKDAYS: [&str; 7] = [
    "Monday",
    "Tuesday",
    "Wednesday",
    "Thursday",
    "Friday",
    "Saturday",
    "Sunday",
];

/// All statistics derived from one conversation.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct StatsBundle {
    /// Conversation title, if the export had one
    pub title: Option<String>,

    /// Number of messages in the conversation
    pub total_messages: u64,

    /// Per-participant totals, sorted by name
    pub participants: Vec<ParticipantStats>,

    /// Messages per calendar day, ascending; days without messages are absent
    pub daily: Vec<DailyCount>,

    /// Messages per weekday (Monday..Sunday) split by sender
    pub weekday: Vec<Bucket>,

    /// Messages per hour of day (0..23) split by sender
    pub hourly: Vec<Bucket>,

    /// Busiest days, busiest first
    pub top_days: Vec<Bucket>,

    /// Messages per 4-month term, chronological
    pub terms: Vec<Bucket>,

    /// Most used stickers (labelled by URI), most used first
    pub top_stickers: Vec<Bucket>,

    /// Most used emojis, most used first
    pub top_emojis: Vec<Bucket>,

    /// How often each participant's first name is written, by sender
    pub name_mentions: Vec<Bucket>,

    /// Longest calls, longest first
    pub longest_calls: Vec<CallRecord>,

    /// Highest tf-idf words of each participant, by participant name
    pub distinguishing_words: Vec<DistinguishingWords>,

    /// Longest run of consecutive days with at least one message
    pub longest_streak: Option<Streak>,
}

impl StatsBundle {
    /// Participant names in bundle order.
    pub fn participant_names(&self) -> Vec<&str> {
        self.participants.iter().map(|p| p.name.as_str()).collect()
    }

    /// Returns `true` if the bundle was built from an empty conversation.
    pub fn is_empty(&self) -> bool {
        self.total_messages == 0
    }
}

/// Totals for one participant.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ParticipantStats {
    pub name: String,
    pub messages: u64,
    pub words: u64,
    pub media: u64,
    pub other: u64,
    pub characters: u64,
}

impl ParticipantStats {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Self::default()
        }
    }
}

/// Message count for one calendar day.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DailyCount {
    pub date: NaiveDate,
    pub messages: u64,
}

/// One labelled slice of a series, broken down by sender.
///
/// `by_sender` always holds an entry for every participant, zero included.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Bucket {
    pub label: String,
    pub total: u64,
    pub by_sender: BTreeMap<String, u64>,
}

impl Bucket {
    /// Creates an empty bucket with a zero entry for each participant.
    pub fn new<'a>(label: impl Into<String>, participants: impl IntoIterator<Item = &'a str>) -> Self {
        Self {
            label: label.into(),
            total: 0,
            by_sender: participants
                .into_iter()
                .map(|p| (p.to_string(), 0))
                .collect(),
        }
    }

    /// Adds `n` occurrences for `sender`.
    pub fn add(&mut self, sender: &str, n: u64) {
        *self.by_sender.entry(sender.to_string()).or_insert(0) += n;
        self.total += n;
    }

    /// Count for one sender (0 if absent).
    pub fn count(&self, sender: &str) -> u64 {
        self.by_sender.get(sender).copied().unwrap_or(0)
    }
}

/// A single call.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CallRecord {
    pub date: NaiveDate,
    pub caller: String,
    pub duration_secs: u64,
}

/// Words one participant uses that the others mostly don't.
///
/// Each participant's text is one document: a word scores
/// `count / words_of_sender * ln(participants / participants_using_word)`.
/// Words every participant uses score zero and are left out.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DistinguishingWords {
    pub sender: String,
    /// Highest score first, ties by word
    pub words: Vec<WordScore>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WordScore {
    pub word: String,
    pub count: u64,
    /// tf-idf, rounded to six decimal places
    pub score: f64,
}

/// A run of consecutive active days.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Streak {
    pub start: NaiveDate,
    pub end: NaiveDate,
    pub days: u64,
}
