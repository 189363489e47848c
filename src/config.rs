//! Construction-time configuration for [`crate::Cache`].
//!
//! The cache is an embedded data structure, not a standalone service, so
//! there is no external config file or environment layer here — just a
//! small builder that separates argument validation from `Cache::new`
//! itself so it can be exercised without constructing a full cache.

use crate::error::{CacheError, Result};

/// Upper bound on `max_entry_number`, matching the original's 31-bit
/// capacity ceiling (bucket counts and back-reference words stay `u32`).
pub const MAX_CAPACITY: u32 = 1 << 31;

/// Validated construction parameters for a [`crate::Cache`].
#[derive(Clone, Copy, Debug)]
pub struct CacheConfig {
    pub max_entry_number: u32,
    pub entry_size: usize,
    pub key_size: usize,
}

impl CacheConfig {
    pub fn new(max_entry_number: u32, entry_size: usize, key_size: usize) -> Result<Self> {
        if max_entry_number == 0 {
            return Err(CacheError::InvalidArgument("max_entry_number must be positive"));
        }
        if max_entry_number > MAX_CAPACITY {
            return Err(CacheError::InvalidArgument("max_entry_number exceeds the supported ceiling"));
        }
        if entry_size == 0 {
            return Err(CacheError::InvalidArgument("entry_size must be positive"));
        }
        if key_size == 0 {
            return Err(CacheError::InvalidArgument("key_size must be positive"));
        }
        Ok(Self { max_entry_number, entry_size, key_size })
    }
}
