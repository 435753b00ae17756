//! Free-text filter used by `NoteStore::list`.

use crate::model::note::Note;

/// Normalizes user filter input.
///
/// Returns `None` when the filter is absent or empty, meaning "match all".
/// Otherwise returns the lowercased needle. Whitespace is part of the needle.
pub fn normalize_filter(filter: Option<&str>) -> Option<String> {
    match filter? {
        "" => None,
        needle => Some(needle.to_lowercase()),
    }
}

/// Returns clones of the notes matching `filter`, in collection order.
pub fn filter_notes(notes: &[Note], filter: Option<&str>) -> Vec<Note> {
    match normalize_filter(filter) {
        None => notes.to_vec(),
        Some(needle) => notes
            .iter()
            .filter(|note| note.matches_lowercase(&needle))
            .cloned()
            .collect(),
    }
}
