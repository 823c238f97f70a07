//! Chart rendering and data-file persistence.
//!
//! [`render`] writes everything a run produces into one directory:
//!
//! | File | Content |
//! |------|---------|
//! | `stats.json` | The whole [`StatsBundle`] |
//! | `daily_messages.csv` | `Date;Messages` |
//! | `participants.csv` | Per-sender totals |
//! | `<chart>.svg` | One image per chart in [`charts::charts`] |
//!
//! Data files go first, so a plotting failure still leaves the numbers on
//! disk.

pub mod charts;
mod svg;

use std::fs;
use std::path::{Path, PathBuf};

use tracing::debug;

use crate::core::output::{read_stats_json, write_daily_csv, write_participants_csv, write_stats_json};
use crate::core::stats::StatsBundle;
use crate::error::{ChatgraphError, Result};

pub use charts::{BarChart, Chart, ChartData, LineChart, Panel, Series};

pub const STATS_FILE: &str = "stats.json";
pub const DAILY_FILE: &str = "daily_messages.csv";
pub const PARTICIPANTS_FILE: &str = "participants.csv";

/// Files produced by a [`render`] call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenderReport {
    pub output_dir: PathBuf,
    pub data_files: Vec<PathBuf>,
    pub charts: Vec<PathBuf>,
}

impl RenderReport {
    /// Every written file, data files first.
    pub fn files(&self) -> impl Iterator<Item = &PathBuf> {
        self.data_files.iter().chain(&self.charts)
    }
}

/// Writes the data files and all charts for `stats` into `output_dir`.
///
/// The directory is created if needed. Existing files with the same names
/// are overwritten.
///
/// # Errors
///
/// [`ChatgraphError::Io`] if the directory or a file cannot be written,
/// [`ChatgraphError::Render`] if a chart cannot be drawn.
pub fn render(stats: &StatsBundle, output_dir: &Path) -> Result<RenderReport> {
    fs::create_dir_all(output_dir)?;

    let data_files = write_data_files(stats, output_dir)?;

    let mut written = Vec::new();
    for chart in charts::charts(stats) {
        let path = output_dir.join(format!("{}.svg", chart.name));
        svg::draw(&chart, &path).map_err(|e| ChatgraphError::render(chart.name, e))?;
        debug!(chart = chart.name, path = %path.display(), "chart written");
        written.push(path);
    }

    Ok(RenderReport {
        output_dir: output_dir.to_path_buf(),
        data_files,
        charts: written,
    })
}

/// Writes `stats.json`, `daily_messages.csv` and `participants.csv`.
pub fn write_data_files(stats: &StatsBundle, output_dir: &Path) -> Result<Vec<PathBuf>> {
    let stats_path = output_dir.join(STATS_FILE);
    write_stats_json(stats, &stats_path)?;

    let daily_path = output_dir.join(DAILY_FILE);
    write_daily_csv(&stats.daily, &daily_path)?;

    let participants_path = output_dir.join(PARTICIPANTS_FILE);
    write_participants_csv(&stats.participants, &participants_path)?;

    debug!(dir = %output_dir.display(), "data files written");
    Ok(vec![stats_path, daily_path, participants_path])
}

/// Reads back the bundle persisted by [`render`].
pub fn read_stats(output_dir: &Path) -> Result<StatsBundle> {
    let path = output_dir.join(STATS_FILE);
    if !path.is_file() {
        return Err(ChatgraphError::not_found(path));
    }
    read_stats_json(&path)
}
