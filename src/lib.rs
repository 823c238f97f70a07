//! # Chatgraph
//!
//! A Rust library for turning a Facebook Messenger conversation export into
//! activity statistics and SVG charts.
//!
//! ## Overview
//!
//! A run is a linear pipeline with three stages:
//! - **Read** — locate the conversation inside the unzipped export and parse
//!   every `message_N.json` file into a time-ordered [`Conversation`]
//! - **Aggregate** — compute a [`StatsBundle`](core::StatsBundle) of
//!   per-sender, per-day, per-hour and ranked series
//! - **Render** — write the bundle as data files and draw one SVG per chart
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use chatgraph::prelude::*;
//!
//! fn main() -> std::result::Result<(), PipelineError> {
//!     let config = PipelineConfig::new("https://www.facebook.com/messages/t/alice_1234")
//!         .with_export_root("facebook-export")
//!         .with_output_root("charts");
//!
//!     let report = run(&config)?;
//!     println!("{} messages", report.stats.total_messages);
//!     Ok(())
//! }
//! ```
//!
//! ## Using the stages directly
//!
//! ```rust,no_run
//! use std::path::Path;
//! use chatgraph::prelude::*;
//!
//! let conversation = ExportReader::new().read(Path::new("facebook-export"), "alice_1234")?;
//! let stats = aggregate(&conversation, &AggregateConfig::new());
//! render(&stats, Path::new("charts/alice_1234"))?;
//! # Ok::<(), chatgraph::ChatgraphError>(())
//! ```
//!
//! ## Module Structure
//!
//! - [`reader`] — export location and Messenger JSON parsing
//! - [`core`] — aggregation, stats types and data-file writers
//! - [`render`] — chart descriptions and SVG drawing
//! - [`pipeline`] — the three stages wired together
//! - [`config`] — [`PipelineConfig`](config::PipelineConfig) and friends
//! - [`error`] — [`ChatgraphError`], [`Result`]
//! - [`cli`] — clap arguments (feature `cli`)

#[cfg(feature = "cli")]
pub mod cli;
pub mod config;
pub mod conversation;
pub mod core;
pub mod error;
#[cfg(feature = "cli")]
pub mod logging;
pub mod message;
pub mod pipeline;
pub mod reader;
pub mod render;

// Re-export the main types at the crate root for convenience
pub use conversation::Conversation;
pub use error::{ChatgraphError, Result};
pub use message::{Media, Message, MessageKind, OtherKind};

/// Convenient re-exports for common usage.
///
/// ```rust
/// use chatgraph::prelude::*;
/// ```
pub mod prelude {
    pub use crate::{Conversation, Media, Message, MessageKind, OtherKind};

    // Error types
    pub use crate::error::{ChatgraphError, Result};

    // Configuration
    pub use crate::config::{AggregateConfig, PipelineConfig, ReaderConfig};

    // Stages
    pub use crate::core::{StatsBundle, aggregate};
    pub use crate::pipeline::{PipelineError, Report, run};
    pub use crate::reader::ExportReader;
    pub use crate::render::{RenderReport, read_stats, render};
}
