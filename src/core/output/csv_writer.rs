//! CSV data files.
//!
//! Same dialect throughout: semicolon delimiter, header row, UTF-8.

use std::fs::File;
use std::io::Write;
use std::path::Path;

use crate::core::stats::{DailyCount, ParticipantStats};
use crate::error::Result;

/// Writes per-day message counts.
///
/// # Format
/// - Delimiter: `;`
/// - Columns: `Date`, `Messages`
pub fn write_daily_csv(daily: &[DailyCount], output_path: &Path) -> Result<()> {
    let file = File::create(output_path)?;
    write_daily(daily, file)
}

/// Converts per-day message counts to a CSV string.
pub fn to_daily_csv(daily: &[DailyCount]) -> Result<String> {
    let mut buffer = Vec::new();
    write_daily(daily, &mut buffer)?;
    Ok(String::from_utf8(buffer).unwrap_or_default())
}

fn write_daily<W: Write>(daily: &[DailyCount], out: W) -> Result<()> {
    let mut writer = csv::WriterBuilder::new().delimiter(b';').from_writer(out);

    writer.write_record(["Date", "Messages"])?;
    for day in daily {
        writer.write_record([day.date.format("%Y-%m-%d").to_string(), day.messages.to_string()])?;
    }

    writer.flush()?;
    Ok(())
}

/// Writes per-participant totals.
///
/// # Format
/// - Delimiter: `;`
/// - Columns: `Sender`, `Messages`, `Words`, `Media`, `Other`, `Characters`
pub fn write_participants_csv(participants: &[ParticipantStats], output_path: &Path) -> Result<()> {
    let file = File::create(output_path)?;
    let mut writer = csv::WriterBuilder::new().delimiter(b';').from_writer(file);

    writer.write_record(["Sender", "Messages", "Words", "Media", "Other", "Characters"])?;
    for p in participants {
        writer.write_record([
            p.name.clone(),
            p.messages.to_string(),
            p.words.to_string(),
            p.media.to_string(),
            p.other.to_string(),
            p.characters.to_string(),
        ])?;
    }

    writer.flush()?;
    Ok(())
}
