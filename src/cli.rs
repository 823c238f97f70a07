//! Command-line interface definition using clap.
//!
//! [`Args`] maps one-to-one onto [`PipelineConfig`]:
//!
//! ```rust
//! use chatgraph::cli::Args;
//! use clap::Parser;
//!
//! let args = Args::parse_from(["chatgraph", "alice_1234", "--utc-offset", "+02:00"]);
//! let config = args.to_config().unwrap();
//! assert_eq!(config.aggregate.utc_offset_minutes, 120);
//! ```

use std::path::PathBuf;

use clap::Parser;

use crate::config::{AggregateConfig, PipelineConfig, ReaderConfig};
use crate::error::Result;

/// Turn a Facebook Messenger conversation export into charts and
/// statistics.
#[derive(Parser, Debug, Clone)]
#[command(name = "chatgraph")]
#[command(version, about, long_about = None)]
#[command(after_help = "EXAMPLES:
    chatgraph https://www.facebook.com/messages/t/alice_1234
    chatgraph alice_1234 --export-root ~/facebook-export
    chatgraph ./inbox/alice_1234 --output-root charts --utc-offset +02:00")]
pub struct Args {
    /// Conversation URL, id, folder or message file
    pub conversation: String,

    /// Root of the unzipped export
    #[arg(short, long, value_name = "DIR", default_value = ".")]
    pub export_root: PathBuf,

    /// Directory receiving one folder per conversation
    #[arg(short, long, value_name = "DIR", default_value = "output")]
    pub output_root: PathBuf,

    /// Fixed UTC offset for day and hour bucketing (e.g. +02:00)
    #[arg(long, value_name = "OFFSET", default_value = "+00:00", allow_hyphen_values = true)]
    pub utc_offset: String,

    /// Keep text exactly as exported (skip the Latin-1 mojibake fix)
    #[arg(long)]
    pub no_fix_encoding: bool,

    /// Print debug logs to stderr
    #[arg(short, long)]
    pub verbose: bool,
}

impl Args {
    /// Builds the pipeline configuration.
    ///
    /// Fails with [`ChatgraphError::InvalidOffset`](crate::ChatgraphError::InvalidOffset)
    /// on a malformed `--utc-offset`.
    pub fn to_config(&self) -> Result<PipelineConfig> {
        let aggregate = AggregateConfig::new().with_utc_offset(&self.utc_offset)?;
        let reader = ReaderConfig::new().with_fix_encoding(!self.no_fix_encoding);

        Ok(PipelineConfig::new(self.conversation.clone())
            .with_export_root(self.export_root.clone())
            .with_output_root(self.output_root.clone())
            .with_reader(reader)
            .with_aggregate(aggregate))
    }
}
