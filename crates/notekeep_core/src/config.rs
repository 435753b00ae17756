//! Store configuration.
//!
//! # Invariants
//! - `storage_key` is trimmed and never empty once validated.

use crate::model::note::{DEFAULT_NOTE_FOLDER, DEFAULT_NOTE_TITLE};
use serde::{Deserialize, Serialize};

/// Backing-store key used when none is configured.
pub const DEFAULT_STORAGE_KEY: &str = "notes";

/// Settings for one `NoteStore` instance.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct StoreConfig {
    /// Single key the whole snapshot is written under.
    pub storage_key: String,
    /// Title given to notes by `create`.
    pub default_title: String,
    /// Folder label given to notes by `create`.
    pub default_folder: String,
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self {
            storage_key: DEFAULT_STORAGE_KEY.to_string(),
            default_title: DEFAULT_NOTE_TITLE.to_string(),
            default_folder: DEFAULT_NOTE_FOLDER.to_string(),
        }
    }
}

impl StoreConfig {
    /// Default config with a custom storage key.
    pub fn with_storage_key(storage_key: impl Into<String>) -> Self {
        Self {
            storage_key: storage_key.into(),
            ..Self::default()
        }
    }

    /// Returns a normalized copy, or a message describing the invalid field.
    pub fn normalized(&self) -> Result<Self, String> {
        let storage_key = self.storage_key.trim();
        if storage_key.is_empty() {
            return Err("storage_key cannot be empty".to_string());
        }
        Ok(Self {
            storage_key: storage_key.to_string(),
            ..self.clone()
        })
    }
}
