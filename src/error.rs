//! Error types for `pincache`.
//!
//! A single error enum covers every fallible path through the cache facade.
//! Variants map directly onto the error kinds named in the design: invalid
//! construction arguments, missing keys, lock-state conflicts, and the
//! (practically unreachable, but retained for parity) out-of-memory path.

use thiserror::Error;

/// Result type alias used throughout the crate.
pub type Result<T> = std::result::Result<T, CacheError>;

/// Errors produced by [`crate::Cache`] operations.
#[derive(Error, Debug, PartialEq, Eq)]
pub enum CacheError {
    /// A construction parameter or call argument was invalid.
    #[error("invalid argument: {0}")]
    InvalidArgument(&'static str),

    /// The requested key (or payload pointer) does not resolve to a live entry.
    #[error("entry not found")]
    NotFound,

    /// The target entry is pinned and cannot be mutated or evicted.
    #[error("entry is locked")]
    Locked,

    /// `unlock_entry` was called on an entry with a zero pin count.
    #[error("entry is already unlocked")]
    AlreadyUnlocked,

    /// An internal allocation failed.
    ///
    /// Unreachable once construction succeeds, since every pool backing the
    /// cache is pre-sized to capacity; retained for parity with the
    /// allocation-failure path of the system this crate reimplements.
    #[error("out of memory")]
    OutOfMemory,
}
