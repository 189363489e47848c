//! Confirms the cache's facade operations run cleanly under an installed
//! `tracing` subscriber, exercising the construction/eviction/clean log
//! sites without requiring a particular subscriber implementation.

use pincache::{ByteKeyComparator, Cache, IdentityKeyHasher};
use tracing_subscriber::fmt;

#[test]
fn facade_operations_emit_tracing_events() {
    let subscriber = fmt().with_test_writer().finish();
    let _guard = tracing::subscriber::set_default(subscriber);

    let mut cache: Cache<IdentityKeyHasher, ByteKeyComparator> =
        Cache::new(2, 4, 4, IdentityKeyHasher, ByteKeyComparator, None).unwrap();

    cache.add(&1u32.to_ne_bytes(), Some(&1u32.to_ne_bytes())).unwrap();
    cache.add(&2u32.to_ne_bytes(), Some(&2u32.to_ne_bytes())).unwrap();
    // Forces an eviction, exercising the trace-level eviction log site.
    cache.add(&3u32.to_ne_bytes(), Some(&3u32.to_ne_bytes())).unwrap();
    cache.clean();
}
