//! Export reader: finds a conversation inside an unzipped Messenger export and
//! parses its message files.
//!
//! A conversation folder normally lives at
//! `<export>/messages/inbox/<conversation_id>/` and holds `message_1.json`,
//! `message_2.json`, ... where `message_1.json` contains the newest messages.
//!
//! # Example
//!
//! ```rust,no_run
//! use chatgraph::reader::ExportReader;
//!
//! let reader = ExportReader::new();
//! let conversation = reader.read("facebook-export".as_ref(), "alice_1234")?;
//! println!("{} messages", conversation.len());
//! # Ok::<(), chatgraph::ChatgraphError>(())
//! ```

pub mod messenger;

use std::fs;
use std::path::{Path, PathBuf};

use tracing::{debug, warn};

use crate::Message;
use crate::config::{ReaderConfig, conversation_id, is_message_file_name};
use crate::conversation::Conversation;
use crate::error::{ChatgraphError, Result};

pub use messenger::{
    MessengerExport, MessengerRawMessage, fix_mojibake_encoding, parse_messenger_message,
};

/// Folders, relative to the export root, that may contain conversation folders.
const THREAD_FOLDERS: &[&str] = &[
    "messages/inbox",
    "messages/archived_threads",
    "messages/filtered_threads",
    "messages/message_requests",
    "inbox",
    "",
];

/// Reader for Messenger conversation exports.
#[derive(Debug, Clone, Default)]
pub struct ExportReader {
    config: ReaderConfig,
}

impl ExportReader {
    /// Creates a reader with default configuration.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a reader with custom configuration.
    pub fn with_config(config: ReaderConfig) -> Self {
        Self { config }
    }

    /// Returns the current configuration.
    pub fn config(&self) -> &ReaderConfig {
        &self.config
    }

    /// Locates and parses a conversation.
    ///
    /// `reference` may be a Messenger URL, a conversation id, a path to the
    /// conversation folder or a path to a single message file.
    pub fn read(&self, export_root: &Path, reference: &str) -> Result<Conversation> {
        let files = self.locate(export_root, reference)?;
        self.read_files(&files)
    }

    /// Resolves a reference to the list of message files to read, in
    /// ascending file-number order.
    ///
    /// Fails with [`ChatgraphError::NotFound`] when nothing matches.
    pub fn locate(&self, export_root: &Path, reference: &str) -> Result<Vec<PathBuf>> {
        if !reference.contains("://") {
            for candidate in [PathBuf::from(reference), export_root.join(reference)] {
                if candidate.is_file() {
                    debug!(path = %candidate.display(), "conversation reference is a file");
                    return Ok(vec![candidate]);
                }
                if candidate.is_dir() && has_message_files(&candidate) {
                    return message_files(&candidate);
                }
            }
        }

        let id = conversation_id(reference);
        if id.is_empty() {
            return Err(ChatgraphError::not_found(reference));
        }

        let mut last_tried = export_root.join(&id);
        for folder in THREAD_FOLDERS {
            let candidate = export_root.join(folder).join(&id);
            if candidate.is_dir() {
                debug!(path = %candidate.display(), "found conversation folder");
                return message_files(&candidate);
            }
            last_tried = candidate;
        }

        Err(ChatgraphError::not_found(last_tried))
    }

    /// Parses the given message files into one conversation.
    pub fn read_files(&self, files: &[PathBuf]) -> Result<Conversation> {
        let mut title = None;
        let mut messages = Vec::new();

        // Higher-numbered files hold older messages.
        for path in files.iter().rev() {
            let content = fs::read_to_string(path)?;
            let (file_title, mut parsed) = self
                .parse_content(&content)
                .map_err(|e| attach_path(e, path))?;
            debug!(path = %path.display(), messages = parsed.len(), "read message file");
            if title.is_none() {
                title = file_title;
            }
            messages.append(&mut parsed);
        }

        if messages.is_empty() {
            warn!("conversation contains no messages");
        }

        Ok(Conversation::new(title, messages))
    }

    /// Parses one message file's content.
    ///
    /// Useful when the export is not on disk.
    pub fn parse_str(&self, content: &str) -> Result<Conversation> {
        let (title, messages) = self.parse_content(content)?;
        Ok(Conversation::new(title, messages))
    }

    fn parse_content(&self, content: &str) -> Result<(Option<String>, Vec<Message>)> {
        let export: MessengerExport =
            serde_json::from_str(content).map_err(|e| ChatgraphError::parse(e, None))?;

        let fix = self.config.fix_encoding;
        let mut messages = export
            .messages
            .iter()
            .enumerate()
            .map(|(i, raw)| parse_messenger_message(i, raw, fix))
            .collect::<std::result::Result<Vec<_>, _>>()
            .map_err(|e| ChatgraphError::parse(e, None))?;

        // Messenger stores messages newest-first, reverse for chronological order
        messages.reverse();

        let title = export.title.map(|t| {
            if fix {
                fix_mojibake_encoding(&t)
            } else {
                t
            }
        });

        Ok((title, messages))
    }
}

fn attach_path(err: ChatgraphError, path: &Path) -> ChatgraphError {
    match err {
        ChatgraphError::Parse { source, path: None } => ChatgraphError::Parse {
            source,
            path: Some(path.to_path_buf()),
        },
        other => other,
    }
}

fn has_message_files(folder: &Path) -> bool {
    fs::read_dir(folder)
        .map(|entries| {
            entries
                .filter_map(|e| e.ok())
                .any(|e| is_message_file_name(&e.file_name().to_string_lossy()))
        })
        .unwrap_or(false)
}

/// Lists `message*.json` files in natural numeric order.
fn message_files(folder: &Path) -> Result<Vec<PathBuf>> {
    let mut files: Vec<(u64, PathBuf)> = fs::read_dir(folder)?
        .filter_map(|e| e.ok())
        .filter_map(|e| {
            let name = e.file_name().to_string_lossy().into_owned();
            is_message_file_name(&name).then(|| (file_number(&name), e.path()))
        })
        .collect();

    if files.is_empty() {
        return Err(ChatgraphError::not_found(folder));
    }

    files.sort();
    Ok(files.into_iter().map(|(_, path)| path).collect())
}

/// `message_12.json` -> 12, `message.json` -> 0.
fn file_number(name: &str) -> u64 {
    name.trim_start_matches("message")
        .trim_start_matches('_')
        .trim_end_matches(".json")
        .parse()
        .unwrap_or(0)
}
