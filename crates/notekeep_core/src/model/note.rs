//! Note domain model.
//!
//! # Responsibility
//! - Define the value record exchanged between store and presentation layer.
//! - Own the wire field naming (`lastModified`) of persisted snapshots.
//!
//! # Invariants
//! - `id` is assigned once at creation and never changes.
//! - `last_modified` is Unix epoch milliseconds.
//! - `folder` is a flat label; there is no folder hierarchy.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Stable identifier for one note.
pub type NoteId = Uuid;

/// Title assigned to freshly created notes.
pub const DEFAULT_NOTE_TITLE: &str = "New Note";
/// Folder label assigned to freshly created notes.
pub const DEFAULT_NOTE_FOLDER: &str = "Notes";

/// One user note.
///
/// Consumers always hold copies; changes go back through
/// `NoteStore::update` as a full-value replace.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Note {
    /// Serialized as a hyphenated lowercase UUID string.
    pub id: NoteId,
    pub title: String,
    /// Plain text body. Drawing data lives outside this record.
    pub content: String,
    /// Unix epoch milliseconds, serialized as `lastModified`.
    pub last_modified: i64,
    pub folder: String,
}

impl Note {
    /// Creates an empty note with a generated id.
    pub fn new(
        title: impl Into<String>,
        folder: impl Into<String>,
        last_modified: i64,
    ) -> Self {
        Self::with_id(Uuid::new_v4(), title, folder, last_modified)
    }

    /// Creates an empty note with a caller-provided id.
    ///
    /// Used by import paths and tests where identity already exists.
    pub fn with_id(
        id: NoteId,
        title: impl Into<String>,
        folder: impl Into<String>,
        last_modified: i64,
    ) -> Self {
        Self {
            id,
            title: title.into(),
            content: String::new(),
            last_modified,
            folder: folder.into(),
        }
    }

    /// Returns whether title or content contains `needle_lower`.
    ///
    /// `needle_lower` must already be lowercased by the caller.
    pub fn matches_lowercase(&self, needle_lower: &str) -> bool {
        self.title.to_lowercase().contains(needle_lower)
            || self.content.to_lowercase().contains(needle_lower)
    }
}
