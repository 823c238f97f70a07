//! Unified error types for chatgraph.
//!
//! This module provides a single [`ChatgraphError`] enum covering every stage
//! of the pipeline: reading the export, writing data files and rendering
//! charts.
//!
//! # Error Handling Philosophy
//!
//! - **Library users** get typed errors they can match on
//! - **Application users** get clear, actionable error messages
//! - **Developers** get source error chains for debugging

use std::io;
use std::path::PathBuf;

use thiserror::Error;

/// A specialized [`Result`] type for chatgraph operations.
///
/// # Example
///
/// ```rust
/// use chatgraph::error::Result;
/// use chatgraph::Message;
///
/// fn my_function() -> Result<Vec<Message>> {
///     Ok(vec![])
/// }
/// ```
pub type Result<T> = std::result::Result<T, ChatgraphError>;

/// The error type for all chatgraph operations.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum ChatgraphError {
    /// The referenced conversation does not exist in the export.
    ///
    /// Raised before anything is written, so no output directory is created.
    #[error("Conversation not found: {}", path.display())]
    NotFound {
        /// The path that was looked up (or the last candidate tried)
        path: PathBuf,
    },

    /// A message file is malformed.
    ///
    /// Contains the underlying cause and, when known, the offending file.
    #[error("Failed to parse Messenger export{}: {source}", path.as_ref().map(|p| format!(" (file: {})", p.display())).unwrap_or_default())]
    Parse {
        /// What exactly was wrong with the record
        #[source]
        source: ParseErrorKind,
        /// The file path, if available
        path: Option<PathBuf>,
    },

    /// An I/O error occurred.
    ///
    /// This typically happens when:
    /// - The output directory cannot be created
    /// - Permission denied
    /// - Disk is full (when writing output)
    #[error("IO error: {0}")]
    Io(#[from] io::Error),

    /// CSV writing error.
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    /// JSON serialization error while writing or reading the stats data file.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// The plotting backend failed to produce a chart.
    #[error("Failed to render chart '{chart}': {message}")]
    Render {
        /// Chart file stem (e.g. "sender_messages")
        chart: String,
        /// Backend error message
        message: String,
    },

    /// Invalid UTC offset in configuration.
    #[error("Invalid UTC offset '{input}'. Expected format: {expected}")]
    InvalidOffset {
        /// The invalid offset string that was provided
        input: String,
        /// Expected format description
        expected: &'static str,
    },
}

/// Kinds of parse errors that can occur while reading message files.
#[derive(Debug, Error)]
pub enum ParseErrorKind {
    /// The file is not valid JSON or lacks the expected structure
    #[error("{0}")]
    Json(#[from] serde_json::Error),
    /// A record lacks a required field
    #[error("message #{index} is missing required field '{field}'")]
    MissingField {
        /// Position of the record in its file
        index: usize,
        /// Name of the missing field
        field: &'static str,
    },
    /// A record has a `type` this reader does not know how to classify
    #[error("message #{index} has unrecognized type '{kind}'")]
    UnknownRecord {
        /// Position of the record in its file
        index: usize,
        /// The unrecognized type string
        kind: String,
    },
    /// The millisecond timestamp cannot be represented
    #[error("message #{index} has out-of-range timestamp {timestamp_ms}")]
    InvalidTimestamp {
        /// Position of the record in its file
        index: usize,
        /// The raw timestamp value
        timestamp_ms: i64,
    },
}

// ============================================================================
// Convenience constructors
// ============================================================================

impl ChatgraphError {
    /// Creates a not-found error for a conversation path.
    pub fn not_found(path: impl Into<PathBuf>) -> Self {
        ChatgraphError::NotFound { path: path.into() }
    }

    /// Creates a parse error, optionally attributed to a file.
    pub fn parse(source: impl Into<ParseErrorKind>, path: Option<PathBuf>) -> Self {
        ChatgraphError::Parse {
            source: source.into(),
            path,
        }
    }

    /// Creates a render error for the named chart.
    pub fn render(chart: impl Into<String>, message: impl ToString) -> Self {
        ChatgraphError::Render {
            chart: chart.into(),
            message: message.to_string(),
        }
    }

    /// Creates an invalid UTC offset error.
    pub fn invalid_offset(input: impl Into<String>) -> Self {
        ChatgraphError::InvalidOffset {
            input: input.into(),
            expected: "+HH:MM or -HH:MM",
        }
    }

    /// Returns `true` if the conversation could not be found.
    pub fn is_not_found(&self) -> bool {
        matches!(self, ChatgraphError::NotFound { .. })
    }

    /// Returns `true` if this is a parse error.
    pub fn is_parse(&self) -> bool {
        matches!(self, ChatgraphError::Parse { .. })
    }

    /// Returns `true` if this is an IO error.
    pub fn is_io(&self) -> bool {
        matches!(self, ChatgraphError::Io(_))
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_io_error_display() {
        let io_err = io::Error::new(io::ErrorKind::PermissionDenied, "access denied");
        let err = ChatgraphError::from(io_err);
        let display = err.to_string();
        assert!(display.contains("IO error"));
        assert!(display.contains("access denied"));
    }

    #[test]
    fn test_not_found_display() {
        let err = ChatgraphError::not_found("/exports/messages/inbox/alice_123");
        let display = err.to_string();
        assert!(display.contains("not found"));
        assert!(display.contains("alice_123"));
    }

    #[test]
    fn test_parse_error_with_path() {
        let json_err = serde_json::from_str::<serde_json::Value>("invalid").unwrap_err();
        let err = ChatgraphError::parse(json_err, Some(PathBuf::from("/inbox/x/message_1.json")));
        let display = err.to_string();
        assert!(display.contains("Messenger export"));
        assert!(display.contains("message_1.json"));
    }

    #[test]
    fn test_parse_error_without_path() {
        let err = ChatgraphError::parse(
            ParseErrorKind::MissingField {
                index: 3,
                field: "sender_name",
            },
            None,
        );
        let display = err.to_string();
        assert!(display.contains("sender_name"));
        assert!(display.contains("#3"));
        assert!(!display.contains("file:"));
    }

    #[test]
    fn test_unknown_record_display() {
        let err = ChatgraphError::parse(
            ParseErrorKind::UnknownRecord {
                index: 0,
                kind: "Hologram".into(),
            },
            None,
        );
        assert!(err.to_string().contains("Hologram"));
    }

    #[test]
    fn test_render_display() {
        let err = ChatgraphError::render("names", "backend exploded");
        let display = err.to_string();
        assert!(display.contains("names"));
        assert!(display.contains("backend exploded"));
    }

    #[test]
    fn test_invalid_offset_display() {
        let err = ChatgraphError::invalid_offset("+25");
        let display = err.to_string();
        assert!(display.contains("+25"));
        assert!(display.contains("+HH:MM"));
    }

    #[test]
    fn test_error_source_chain() {
        use std::error::Error;
        let json_err = serde_json::from_str::<serde_json::Value>("{").unwrap_err();
        let err = ChatgraphError::parse(json_err, None);
        assert!(err.source().is_some());
    }

    #[test]
    fn test_is_methods() {
        let io_err = ChatgraphError::Io(io::Error::new(io::ErrorKind::NotFound, ""));
        assert!(io_err.is_io());
        assert!(!io_err.is_parse());
        assert!(!io_err.is_not_found());

        let nf = ChatgraphError::not_found("x");
        assert!(nf.is_not_found());
        assert!(!nf.is_io());

        let parse = ChatgraphError::parse(
            ParseErrorKind::InvalidTimestamp {
                index: 0,
                timestamp_ms: i64::MAX,
            },
            None,
        );
        assert!(parse.is_parse());
        assert!(!parse.is_not_found());
    }
}
