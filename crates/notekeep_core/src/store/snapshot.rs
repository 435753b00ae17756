//! Snapshot codec for the persisted note collection.
//!
//! # Responsibility
//! - Encode the full ordered collection as one JSON array blob.
//! - Decode blobs back, rejecting anything that is not a valid collection.
//!
//! # Invariants
//! - Element order is preserved in both directions.
//! - A decoded collection never contains two notes with the same id.

use crate::model::note::{Note, NoteId};
use std::collections::HashSet;
use std::error::Error;
use std::fmt::{Display, Formatter};

pub type CodecResult<T> = Result<T, CodecError>;

/// Snapshot encode/decode failure.
#[derive(Debug)]
pub enum CodecError {
    /// Bytes are not a JSON array of note records (or could not be written).
    Json(serde_json::Error),
    /// Blob parsed but repeats one note id.
    DuplicateId(NoteId),
}

impl Display for CodecError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Json(err) => write!(f, "invalid note snapshot: {err}"),
            Self::DuplicateId(id) => write!(f, "note snapshot repeats id {id}"),
        }
    }
}

impl Error for CodecError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Json(err) => Some(err),
            Self::DuplicateId(_) => None,
        }
    }
}

impl From<serde_json::Error> for CodecError {
    fn from(value: serde_json::Error) -> Self {
        Self::Json(value)
    }
}

/// Serializes `notes` into one snapshot blob.
pub fn encode_snapshot(notes: &[Note]) -> CodecResult<Vec<u8>> {
    Ok(serde_json::to_vec(notes)?)
}

/// Parses a snapshot blob produced by `encode_snapshot`.
///
/// # Errors
/// - `Json` when bytes are not a JSON array of complete note records.
/// - `DuplicateId` when two records share an id.
pub fn decode_snapshot(bytes: &[u8]) -> CodecResult<Vec<Note>> {
    let notes: Vec<Note> = serde_json::from_slice(bytes)?;
    let mut seen = HashSet::with_capacity(notes.len());
    for note in &notes {
        if !seen.insert(note.id) {
            return Err(CodecError::DuplicateId(note.id));
        }
    }
    Ok(notes)
}
