//! Configuration types for the pipeline.
//!
//! Everything the pipeline needs is passed in explicitly through these
//! structs; there are no process-wide defaults.
//!
//! - [`PipelineConfig`] - where to read from, where to write, which conversation
//! - [`ReaderConfig`] - export parsing settings
//! - [`AggregateConfig`] - statistics settings
//!
//! # Example
//!
//! ```rust
//! use chatgraph::config::{AggregateConfig, PipelineConfig};
//!
//! let config = PipelineConfig::new("https://www.facebook.com/messages/t/alice_1234")
//!     .with_export_root("facebook-export")
//!     .with_output_root("charts")
//!     .with_aggregate(AggregateConfig::new().with_top_days(3));
//!
//! assert_eq!(config.conversation_id(), "alice_1234");
//! assert!(config.output_dir().ends_with("charts/alice_1234"));
//! ```

use std::path::PathBuf;

use chrono::{FixedOffset, Offset, Utc};
use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};

use crate::error::{ChatgraphError, Result};

/// Top-level configuration handed to [`run`](crate::pipeline::run).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PipelineConfig {
    /// Root of the unzipped export (default: current directory)
    pub export_root: PathBuf,

    /// Directory under which per-conversation output folders are created
    /// (default: `output`)
    pub output_root: PathBuf,

    /// Conversation URL or path, as given by the user
    pub conversation_ref: String,

    /// Export parsing settings
    pub reader: ReaderConfig,

    /// Statistics settings
    pub aggregate: AggregateConfig,
}

impl PipelineConfig {
    /// Creates a configuration for one conversation with default roots.
    pub fn new(conversation_ref: impl Into<String>) -> Self {
        Self {
            export_root: PathBuf::from("."),
            output_root: PathBuf::from("output"),
            conversation_ref: conversation_ref.into(),
            reader: ReaderConfig::default(),
            aggregate: AggregateConfig::default(),
        }
    }

    /// Sets the export root.
    #[must_use]
    pub fn with_export_root(mut self, root: impl Into<PathBuf>) -> Self {
        self.export_root = root.into();
        self
    }

    /// Sets the output root.
    #[must_use]
    pub fn with_output_root(mut self, root: impl Into<PathBuf>) -> Self {
        self.output_root = root.into();
        self
    }

    /// Sets the reader configuration.
    #[must_use]
    pub fn with_reader(mut self, reader: ReaderConfig) -> Self {
        self.reader = reader;
        self
    }

    /// Sets the aggregation configuration.
    #[must_use]
    pub fn with_aggregate(mut self, aggregate: AggregateConfig) -> Self {
        self.aggregate = aggregate;
        self
    }

    /// Identifier of the conversation, derived from the reference.
    pub fn conversation_id(&self) -> String {
        conversation_id(&self.conversation_ref)
    }

    /// Output directory for this conversation: `<output_root>/<sanitized id>`.
    pub fn output_dir(&self) -> PathBuf {
        self.output_root.join(sanitize_dir_name(&self.conversation_id()))
    }
}

/// Configuration for reading Messenger exports.
///
/// # Example
///
/// ```rust
/// use chatgraph::config::ReaderConfig;
///
/// let config = ReaderConfig::new().with_fix_encoding(false);
/// assert!(!config.fix_encoding);
/// ```
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReaderConfig {
    /// Fix Meta's Mojibake encoding (default: true)
    pub fix_encoding: bool,
}

impl Default for ReaderConfig {
    fn default() -> Self {
        Self { fix_encoding: true }
    }
}

impl ReaderConfig {
    /// Creates a new configuration with default values.
    pub fn new() -> Self {
        Self::default()
    }

    /// Enables or disables encoding fix.
    #[must_use]
    pub fn with_fix_encoding(mut self, fix: bool) -> Self {
        self.fix_encoding = fix;
        self
    }
}

/// Configuration for the aggregator.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AggregateConfig {
    /// Offset from UTC used to bucket messages into days and hours,
    /// in minutes (default: 0)
    pub utc_offset_minutes: i32,

    /// Number of busiest days to keep (default: 5)
    pub top_days: usize,

    /// Number of stickers to keep (default: 10)
    pub top_stickers: usize,

    /// Number of longest calls to keep (default: 10)
    pub top_calls: usize,

    /// Number of emojis to keep (default: 10)
    pub top_emojis: usize,

    /// Number of distinguishing words kept per participant (default: 10)
    pub top_words: usize,
}

impl Default for AggregateConfig {
    fn default() -> Self {
        Self {
            utc_offset_minutes: 0,
            top_days: 5,
            top_stickers: 10,
            top_calls: 10,
            top_emojis: 10,
            top_words: 10,
        }
    }
}

impl AggregateConfig {
    /// Creates a new configuration with default values.
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the UTC offset from a `+HH:MM` string.
    pub fn with_utc_offset(mut self, offset: &str) -> Result<Self> {
        self.utc_offset_minutes = parse_utc_offset(offset)?;
        Ok(self)
    }

    /// Sets how many busiest days are kept.
    #[must_use]
    pub fn with_top_days(mut self, n: usize) -> Self {
        self.top_days = n;
        self
    }

    /// Sets how many stickers are kept.
    #[must_use]
    pub fn with_top_stickers(mut self, n: usize) -> Self {
        self.top_stickers = n;
        self
    }

    /// Sets how many calls are kept.
    #[must_use]
    pub fn with_top_calls(mut self, n: usize) -> Self {
        self.top_calls = n;
        self
    }

    /// Sets how many emojis are kept.
    #[must_use]
    pub fn with_top_emojis(mut self, n: usize) -> Self {
        self.top_emojis = n;
        self
    }

    /// Sets how many distinguishing words are kept per participant.
    #[must_use]
    pub fn with_top_words(mut self, n: usize) -> Self {
        self.top_words = n;
        self
    }

    /// The configured offset as a chrono timezone.
    pub fn utc_offset(&self) -> FixedOffset {
        FixedOffset::east_opt(self.utc_offset_minutes * 60).unwrap_or(Utc.fix())
    }
}

/// Parses `+HH:MM`, `-HH:MM`, `+HH` or `Z` into minutes east of UTC.
///
/// ```rust
/// use chatgraph::config::parse_utc_offset;
///
/// assert_eq!(parse_utc_offset("+05:30").unwrap(), 330);
/// assert_eq!(parse_utc_offset("-08").unwrap(), -480);
/// assert!(parse_utc_offset("+25:00").is_err());
/// ```
pub fn parse_utc_offset(input: &str) -> Result<i32> {
    let trimmed = input.trim();
    if trimmed.eq_ignore_ascii_case("z") || trimmed == "0" {
        return Ok(0);
    }

    let (sign, rest) = match trimmed.chars().next() {
        Some('+') => (1, &trimmed[1..]),
        Some('-') => (-1, &trimmed[1..]),
        _ => return Err(ChatgraphError::invalid_offset(input)),
    };

    let (hours, minutes) = match rest.split_once(':') {
        Some((h, m)) => (h, m),
        None => (rest, "0"),
    };

    let hours: i32 = hours
        .parse()
        .map_err(|_| ChatgraphError::invalid_offset(input))?;
    let minutes: i32 = minutes
        .parse()
        .map_err(|_| ChatgraphError::invalid_offset(input))?;

    if !(0..=23).contains(&hours) || !(0..=59).contains(&minutes) {
        return Err(ChatgraphError::invalid_offset(input));
    }

    Ok(sign * (hours * 60 + minutes))
}

/// Reduces a conversation URL or path to its identifier.
///
/// The identifier is the last non-empty segment, with query strings and
/// fragments removed. A trailing `message_N.json` file name is skipped so
/// that a path to a single message file names its folder.
///
/// ```rust
/// use chatgraph::config::conversation_id;
///
/// assert_eq!(conversation_id("https://www.facebook.com/messages/t/bob_42?ref=x"), "bob_42");
/// assert_eq!(conversation_id("messages/inbox/bob_42/message_1.json"), "bob_42");
/// assert_eq!(conversation_id("bob_42/"), "bob_42");
/// ```
pub fn conversation_id(reference: &str) -> String {
    let without_query = reference
        .split(['?', '#'])
        .next()
        .unwrap_or_default();

    let mut segments = without_query
        .split(['/', '\\'])
        .filter(|s| !s.is_empty())
        .rev();

    match segments.next() {
        Some(last) if is_message_file_name(last) => segments
            .next()
            .unwrap_or(last.trim_end_matches(".json"))
            .to_string(),
        Some(last) => last.to_string(),
        None => String::new(),
    }
}

/// Turns an identifier into a safe single directory name.
///
/// Characters outside `[A-Za-z0-9_.-]` become `_`; an empty or dot-only
/// result falls back to `conversation`. When anything was replaced, the first
/// eight hex digits of the identifier's SHA-256 are appended so that ids
/// differing only in replaced characters get different directories.
///
/// ```rust
/// use chatgraph::config::sanitize_dir_name;
///
/// assert_eq!(sanitize_dir_name("bob_42"), "bob_42");
/// assert_eq!(sanitize_dir_name("Иван"), "____-cc078195");
/// ```
pub fn sanitize_dir_name(id: &str) -> String {
    let mut replaced = false;
    let cleaned: String = id
        .chars()
        .map(|c| {
            if c.is_ascii_alphanumeric() || matches!(c, '_' | '-' | '.') {
                c
            } else {
                replaced = true;
                '_'
            }
        })
        .collect();

    if cleaned.is_empty() || cleaned.chars().all(|c| c == '.') {
        "conversation".to_string()
    } else if replaced {
        format!("{cleaned}-{}", short_hash(id))
    } else {
        cleaned
    }
}

fn short_hash(id: &str) -> String {
    let mut hasher = Sha256::new();
    hasher.update(id.as_bytes());
    let mut hex = format!("{:x}", hasher.finalize());
    hex.truncate(8);
    hex
}

pub(crate) fn is_message_file_name(name: &str) -> bool {
    name.starts_with("message") && name.ends_with(".json")
}
