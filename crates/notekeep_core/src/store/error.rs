//! Error taxonomy for note store operations.

use crate::kv::KvError;
use crate::model::note::NoteId;
use crate::store::snapshot::CodecError;
use std::error::Error;
use std::fmt::{Display, Formatter};

pub type StoreResult<T> = Result<T, StoreError>;

/// Failure returned by `NoteStore` operations.
#[derive(Debug)]
pub enum StoreError {
    /// Configuration cannot be used to open a store.
    InvalidConfig(String),
    /// `update`/`delete` referenced an id that is not in the collection.
    NotFound(NoteId),
    /// Stored blob is present but not a valid note collection.
    Decode(CodecError),
    /// Collection could not be serialized.
    Encode(CodecError),
    /// Backing store failed while reading the snapshot.
    StorageRead(KvError),
    /// Backing store rejected the snapshot write.
    StorageWrite(KvError),
}

impl Display for StoreError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::InvalidConfig(message) => write!(f, "invalid store config: {message}"),
            Self::NotFound(id) => write!(f, "note not found: {id}"),
            Self::Decode(err) => write!(f, "failed to decode stored notes: {err}"),
            Self::Encode(err) => write!(f, "failed to encode notes: {err}"),
            Self::StorageRead(err) => write!(f, "failed to read stored notes: {err}"),
            Self::StorageWrite(err) => write!(f, "failed to write notes: {err}"),
        }
    }
}

impl Error for StoreError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::InvalidConfig(_) | Self::NotFound(_) => None,
            Self::Decode(err) | Self::Encode(err) => Some(err),
            Self::StorageRead(err) | Self::StorageWrite(err) => Some(err),
        }
    }
}

impl StoreError {
    /// Stable machine-readable code used in log events.
    pub fn code(&self) -> &'static str {
        match self {
            Self::InvalidConfig(_) => "invalid_config",
            Self::NotFound(_) => "not_found",
            Self::Decode(_) => "decode_failed",
            Self::Encode(_) => "encode_failed",
            Self::StorageRead(_) => "storage_read_failed",
            Self::StorageWrite(_) => "storage_write_failed",
        }
    }
}
