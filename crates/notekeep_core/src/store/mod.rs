//! Note store: the single authority over the note collection.
//!
//! # Responsibility
//! - Expose create/read/update/delete/search over notes.
//! - Persist full snapshots synchronously through a `KvStore`.
//! - Publish change events to subscribers.
//!
//! # See also
//! - `crate::kv` for backing-store implementations.

pub mod clock;
pub mod error;
pub mod events;
pub mod note_store;
pub mod snapshot;
