//! Core note persistence for notekeep.
//! This crate is the single source of truth for note invariants.

pub mod config;
pub mod db;
pub mod kv;
pub mod logging;
pub mod model;
pub mod search;
pub mod store;

pub use config::StoreConfig;
pub use kv::{KvError, KvResult, KvStore, MemoryKvStore, SqliteKvStore};
pub use logging::{default_log_level, init_logging, logging_status, LoggingError};
pub use model::note::{Note, NoteId};
pub use store::clock::{Clock, SystemClock};
pub use store::error::{StoreError, StoreResult};
pub use store::events::{StoreEvent, SubscriptionId};
pub use store::note_store::{LoadReport, LoadStatus, NoteStore};
pub use store::snapshot::CodecError;

/// Returns the core crate version.
pub fn core_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}
