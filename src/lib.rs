//! An in-process, bounded, key-addressed object cache with LRU replacement
//! and per-entry pinning.
//!
//! Entries live in a fixed-capacity slab (`arena`); a three-way index
//! composed of that arena, an LRU recency order (`recency`), and a chained
//! hash index (`hash`) resolves caller keys to entries in O(1) amortized
//! time. Callers either copy an entry out via [`Cache::lookup_into`] or pin
//! it in place via [`Cache::lookup`]/[`Cache::add`] and receive a stable
//! pointer into the arena, valid until the matching
//! [`Cache::unlock_entry`].
//!
//! The cache performs no internal synchronization; see [`Cache`]'s
//! documentation for the operations a caller must serialize when sharing an
//! instance across threads.
//!
//! ```
//! use pincache::{Cache, IdentityKeyHasher, ByteKeyComparator};
//!
//! let mut cache: Cache<IdentityKeyHasher, ByteKeyComparator> =
//!     Cache::new(4, 4, 4, IdentityKeyHasher, ByteKeyComparator, None).unwrap();
//!
//! cache.add(&1u32.to_ne_bytes(), Some(&42u32.to_ne_bytes())).unwrap();
//! let mut out = [0u8; 4];
//! assert!(cache.lookup_into(&1u32.to_ne_bytes(), &mut out).unwrap());
//! assert_eq!(u32::from_ne_bytes(out), 42);
//! ```

mod arena;
mod cache;
mod config;
mod error;
mod hash;
mod list;
mod recency;

pub use arena::EntryPtr;
pub use cache::{Cache, FreeEntryFn};
pub use config::{CacheConfig, MAX_CAPACITY};
pub use error::{CacheError, Result};
pub use hash::{ByteKeyComparator, IdentityKeyHasher, KeyComparator, KeyHasher};
