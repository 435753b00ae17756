//! In-memory note filtering.
//!
//! # Invariants
//! - Matching is case-insensitive substring search over title and content.
//! - Results keep collection order; there is no ranking.

pub mod filter;
