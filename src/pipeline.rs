//! End-to-end run: read the export, aggregate, render.
//!
//! ```rust,no_run
//! use chatgraph::config::PipelineConfig;
//! use chatgraph::pipeline::run;
//!
//! let config = PipelineConfig::new("https://www.facebook.com/messages/t/alice_bob")
//!     .with_export_root("facebook-export");
//! let report = run(&config)?;
//! println!("{} charts in {}", report.render.charts.len(), report.output_dir.display());
//! # Ok::<(), chatgraph::pipeline::PipelineError>(())
//! ```

use std::fmt;
use std::path::PathBuf;

use thiserror::Error;
use tracing::info;

use crate::config::PipelineConfig;
use crate::core::{StatsBundle, aggregate};
use crate::error::ChatgraphError;
use crate::reader::ExportReader;
use crate::render::{RenderReport, render};

/// Pipeline step that failed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Stage {
    Read,
    /// Aggregation cannot fail; the stage is named for logs and callers
    /// that report progress.
    Aggregate,
    Render,
}

impl fmt::Display for Stage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Stage::Read => write!(f, "reading export"),
            Stage::Aggregate => write!(f, "aggregating"),
            Stage::Render => write!(f, "rendering charts"),
        }
    }
}

/// An error tagged with the stage it came from.
#[derive(Debug, Error)]
#[error("Error while {stage}: {source}")]
pub struct PipelineError {
    pub stage: Stage,
    #[source]
    pub source: ChatgraphError,
}

impl PipelineError {
    pub fn new(stage: Stage, source: ChatgraphError) -> Self {
        Self { stage, source }
    }
}

/// Outcome of a successful run.
#[derive(Debug, Clone)]
pub struct Report {
    pub conversation_id: String,
    pub output_dir: PathBuf,
    pub stats: StatsBundle,
    pub render: RenderReport,
}

/// Runs the three stages in order, stopping at the first failure.
///
/// Nothing is written until the export has been read successfully, so a
/// missing conversation leaves no output directory behind. Rerunning over an
/// existing output directory overwrites its files.
pub fn run(config: &PipelineConfig) -> Result<Report, PipelineError> {
    let reader = ExportReader::with_config(config.reader.clone());
    let conversation = reader
        .read(&config.export_root, &config.conversation_ref)
        .map_err(|e| PipelineError::new(Stage::Read, e))?;
    info!(
        messages = conversation.len(),
        participants = conversation.participants().len(),
        "export read"
    );

    let stats = aggregate(&conversation, &config.aggregate);
    info!(days = stats.daily.len(), "aggregated");

    let output_dir = config.output_dir();
    let render = render(&stats, &output_dir).map_err(|e| PipelineError::new(Stage::Render, e))?;
    info!(dir = %output_dir.display(), charts = render.charts.len(), "charts rendered");

    Ok(Report {
        conversation_id: config.conversation_id(),
        output_dir,
        stats,
        render,
    })
}
