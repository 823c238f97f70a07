//! JSON data file for the stats bundle.

use std::fs::{self, File};
use std::io::Write;
use std::path::Path;

use crate::core::stats::StatsBundle;
use crate::error::Result;

/// Writes the bundle to a pretty-printed JSON file.
///
/// The output ends with a newline and contains no timestamps of its own, so
/// the same bundle always produces the same bytes.
pub fn write_stats_json(stats: &StatsBundle, output_path: &Path) -> Result<()> {
    let json = to_stats_json(stats)?;
    let mut file = File::create(output_path)?;
    file.write_all(json.as_bytes())?;
    Ok(())
}

/// Converts the bundle to a pretty-printed JSON string.
pub fn to_stats_json(stats: &StatsBundle) -> Result<String> {
    let mut json = serde_json::to_string_pretty(stats)?;
    json.push('\n');
    Ok(json)
}

/// Reads a bundle previously written by [`write_stats_json`].
pub fn read_stats_json(path: &Path) -> Result<StatsBundle> {
    let content = fs::read_to_string(path)?;
    Ok(serde_json::from_str(&content)?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::stats::{Bucket, ParticipantStats};
    use tempfile::NamedTempFile;

    fn sample() -> StatsBundle {
        let mut monday = Bucket::new("Monday", ["Alice", "Bob"]);
        monday.add("Alice", 3);
        StatsBundle {
            title: Some("Alice and Bob".into()),
            total_messages: 3,
            participants: vec![
                ParticipantStats {
                    name: "Alice".into(),
                    messages: 3,
                    words: 7,
                    ..ParticipantStats::default()
                },
                ParticipantStats::new("Bob"),
            ],
            weekday: vec![monday],
            ..StatsBundle::default()
        }
    }

    #[test]
    fn test_to_stats_json_basic() {
        let json = to_stats_json(&sample()).unwrap();
        assert!(json.contains(r#""name": "Alice""#));
        assert!(json.contains(r#""total_messages": 3"#));
        assert!(json.ends_with('\n'));
    }

    #[test]
    fn test_write_and_read_back() {
        let temp_file = NamedTempFile::new().unwrap();
        let stats = sample();

        write_stats_json(&stats, temp_file.path()).unwrap();
        let parsed = read_stats_json(temp_file.path()).unwrap();

        assert_eq!(parsed, stats);
    }

    #[test]
    fn test_serialization_is_stable() {
        assert_eq!(to_stats_json(&sample()).unwrap(), to_stats_json(&sample()).unwrap());
    }

    #[test]
    fn test_read_invalid_json() {
        let temp_file = NamedTempFile::new().unwrap();
        fs::write(temp_file.path(), "{ not json").unwrap();
        let err = read_stats_json(temp_file.path()).unwrap_err();
        assert!(matches!(err, crate::ChatgraphError::Json(_)));
    }
}
