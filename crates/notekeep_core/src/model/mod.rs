//! Domain model for persisted notes.
//!
//! # Responsibility
//! - Define the canonical note record owned by `NoteStore`.
//! - Fix the external serialization shape consumers may depend on.
//!
//! # Invariants
//! - Every note is identified by a stable `NoteId`.
//! - Deletion is a hard delete; there are no tombstones.

pub mod note;
