//! Core processing logic for chatgraph.
//!
//! This module contains:
//! - [`stats`] - The [`StatsBundle`] data model
//! - [`aggregator`] - Conversation aggregation into a [`StatsBundle`]
//! - [`tokens`] - Word and emoji extraction
//! - [`output`] - Data file writers (JSON, CSV)
//!
//! # Quick Start
//!
//! ```rust
//! use chatgraph::core::{aggregate, StatsBundle, write_stats_json};
//! ```

pub mod aggregator;
pub mod output;
pub mod stats;
pub mod tokens;

pub use aggregator::{aggregate, term_label};
pub use output::{
    read_stats_json, to_daily_csv, to_stats_json, write_daily_csv, write_participants_csv,
    write_stats_json,
};
pub use stats::{
    Bucket, CallRecord, DailyCount, DistinguishingWords, ParticipantStats, StatsBundle, Streak,
    WEEKDAYS, WordScore,
};
