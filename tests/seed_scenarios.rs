//! End-to-end exercises of the cache's seed scenarios through the public
//! API: capacity 4, 4-byte keys, 4-byte entries, identity key-to-number.

use pincache::{ByteKeyComparator, Cache, CacheError, IdentityKeyHasher};

fn new_cache() -> Cache<IdentityKeyHasher, ByteKeyComparator> {
    Cache::new(4, 4, 4, IdentityKeyHasher, ByteKeyComparator, None).unwrap()
}

fn k(v: u32) -> [u8; 4] {
    v.to_ne_bytes()
}

#[test]
fn fill_and_overflow() {
    let mut cache = new_cache();
    for i in 1..=4u32 {
        cache.add(&k(i), Some(&k(i))).unwrap().unwrap();
    }
    cache.add(&k(5), Some(&k(5))).unwrap().unwrap();

    let mut dst = [0u8; 4];
    assert!(!cache.lookup_into(&k(1), &mut dst).unwrap());
    assert!(cache.lookup_into(&k(5), &mut dst).unwrap());
    assert_eq!(dst, k(5));
}

#[test]
fn pin_prevents_eviction() {
    let mut cache = new_cache();
    for i in 1..=4u32 {
        cache.add(&k(i), Some(&k(i))).unwrap().unwrap();
    }
    let pinned = cache.lookup(&k(1)).unwrap().unwrap();
    cache.add(&k(5), Some(&k(5))).unwrap().unwrap();

    let mut dst = [0u8; 4];
    assert!(!cache.lookup_into(&k(2), &mut dst).unwrap());
    assert_eq!(unsafe { pinned.as_slice(4) }, &k(1));
}

#[test]
fn all_pinned_add_fails_and_state_is_unchanged() {
    let mut cache = new_cache();
    for i in 1..=4u32 {
        cache.add(&k(i), Some(&k(i))).unwrap().unwrap();
    }
    for i in 1..=4u32 {
        cache.lookup(&k(i)).unwrap().unwrap();
    }
    assert!(cache.add(&k(5), Some(&k(5))).unwrap().is_none());
    assert_eq!(cache.entry_number(), 4);
    for i in 1..=4u32 {
        let mut dst = [0u8; 4];
        assert!(cache.lookup_into(&k(i), &mut dst).is_ok());
    }
}

#[test]
fn delete_unpinned_then_locked_then_unlocked() {
    let mut cache = new_cache();
    cache.add(&k(1), Some(&k(1))).unwrap().unwrap();
    cache.delete_by_key(&k(1)).unwrap();

    cache.add(&k(1), Some(&k(1))).unwrap().unwrap();
    let ptr = cache.lookup(&k(1)).unwrap().unwrap();
    assert_eq!(cache.delete_by_key(&k(1)), Err(CacheError::Locked));
    cache.unlock_entry(ptr).unwrap();
    cache.delete_by_key(&k(1)).unwrap();
}

#[test]
fn unpaired_unlock() {
    let mut cache = new_cache();
    let ptr = cache.add(&k(1), Some(&k(1))).unwrap().unwrap();
    assert_eq!(cache.unlock_entry(ptr), Err(CacheError::AlreadyUnlocked));
}

#[test]
fn duplicate_add() {
    let mut cache = new_cache();
    let src_a = [1, 2, 3, 4];
    let src_b = [9, 9, 9, 9];
    cache.add(&k(1), Some(&src_a)).unwrap().unwrap();
    assert!(cache.add(&k(1), Some(&src_b)).unwrap().is_none());

    let mut dst = [0u8; 4];
    cache.lookup_into(&k(1), &mut dst).unwrap();
    assert_eq!(dst, src_a);
}
