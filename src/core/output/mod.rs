//! Data file writers for a [`StatsBundle`](crate::core::StatsBundle).
//!
//! - [`write_stats_json`] / [`to_stats_json`] / [`read_stats_json`] - the whole bundle as
//!   pretty JSON; reading it back yields an equal bundle
//! - [`write_daily_csv`] - `Date;Messages` rows for spreadsheets
//! - [`write_participants_csv`] - per-participant totals
//!
//! # Example
//!
//! ```rust,no_run
//! # fn main() -> chatgraph::Result<()> {
//! use chatgraph::core::StatsBundle;
//! use chatgraph::core::output::{read_stats_json, write_stats_json};
//!
//! let stats = StatsBundle::default();
//! write_stats_json(&stats, "stats.json".as_ref())?;
//! assert_eq!(read_stats_json("stats.json".as_ref())?, stats);
//! # Ok(())
//! # }
//! ```

mod csv_writer;
mod json_writer;

pub use csv_writer::{to_daily_csv, write_daily_csv, write_participants_csv};
pub use json_writer::{read_stats_json, to_stats_json, write_stats_json};
