//! The cache facade: composes the arena, hash index, and recency order into
//! a bounded, key-addressed store with LRU replacement and per-entry
//! pinning.

use tracing::{debug, trace};

use crate::arena::{Arena, EntryPtr};
use crate::config::CacheConfig;
use crate::error::{CacheError, Result};
use crate::hash::{HashIndex, KeyComparator, KeyHasher};
use crate::recency::RecencyPool;

/// Invoked with `(key, payload)` on every path that removes a live entry:
/// eviction during [`Cache::add`], [`Cache::delete_by_key`],
/// [`Cache::delete_entry`], [`Cache::clean`], and drop.
pub type FreeEntryFn = Box<dyn FnMut(&[u8], &[u8]) + Send>;

/// A bounded, key-addressed cache with LRU replacement and pinning.
///
/// `H` resolves a key to the `u32` fed into the bucket hash; `C` compares
/// two keys of equal length for equality. Neither the cache itself nor its
/// operations perform any internal synchronization — see the crate's module
/// documentation for the critical sections a caller must serialize when
/// sharing an instance across threads.
pub struct Cache<H, C> {
    arena: Arena,
    hash: HashIndex<H, C>,
    recency: RecencyPool,
    entry_size: usize,
    key_size: usize,
    free_entry: Option<FreeEntryFn>,
}

impl<H: KeyHasher, C: KeyComparator> Cache<H, C> {
    pub fn new(
        max_entry_number: u32,
        entry_size: usize,
        key_size: usize,
        hasher: H,
        comparator: C,
        free_entry: Option<FreeEntryFn>,
    ) -> Result<Self> {
        let cfg = CacheConfig::new(max_entry_number, entry_size, key_size)?;
        let arena = Arena::new(cfg.max_entry_number, cfg.entry_size)?;
        let hash = HashIndex::new(cfg.max_entry_number, cfg.key_size, hasher, comparator);
        let recency = RecencyPool::new(cfg.max_entry_number, cfg.key_size);
        debug!(
            capacity = cfg.max_entry_number,
            buckets = hash.bucket_count(),
            entry_size = cfg.entry_size,
            key_size = cfg.key_size,
            "cache constructed"
        );
        Ok(Self {
            arena,
            hash,
            recency,
            entry_size: cfg.entry_size,
            key_size: cfg.key_size,
            free_entry,
        })
    }

    fn check_key_len(&self, key: &[u8]) -> Result<()> {
        if key.len() != self.key_size {
            return Err(CacheError::InvalidArgument("key length does not match key_size"));
        }
        Ok(())
    }

    fn check_entry_len(&self, buf: &[u8]) -> Result<()> {
        if buf.len() != self.entry_size {
            return Err(CacheError::InvalidArgument("buffer length does not match entry_size"));
        }
        Ok(())
    }

    /// Look up `key`, pinning the resulting entry and returning a stable
    /// pointer into its payload. Promotes the entry to most-recently-used.
    /// Callers must release the pin with [`Cache::unlock_entry`].
    pub fn lookup(&mut self, key: &[u8]) -> Result<Option<EntryPtr>> {
        self.check_key_len(key)?;
        let Some(idx) = self.hash.find(key) else {
            return Ok(None);
        };
        self.recency.node_mut(idx).pin_count += 1;
        self.recency.remove(idx);
        self.recency.push_front(idx);
        let slot = self.recency.node(idx).slot;
        Ok(Some(self.arena.entry_ptr(slot)))
    }

    /// Look up `key`, copying its payload into `dst` without pinning.
    /// Promotes the entry to most-recently-used. Returns `false` on a miss.
    pub fn lookup_into(&mut self, key: &[u8], dst: &mut [u8]) -> Result<bool> {
        self.check_key_len(key)?;
        self.check_entry_len(dst)?;
        let Some(idx) = self.hash.find(key) else {
            return Ok(false);
        };
        let slot = self.recency.node(idx).slot;
        dst.copy_from_slice(self.arena.payload(slot));
        self.recency.remove(idx);
        self.recency.push_front(idx);
        Ok(true)
    }

    /// Insert `key` with payload `src`, or reserve a pinned, uninitialized
    /// slot for the caller to write into when `src` is `None`. Returns
    /// `Ok(None)` if `key` already exists, or if the cache is full and
    /// every live entry is pinned.
    pub fn add(&mut self, key: &[u8], src: Option<&[u8]>) -> Result<Option<EntryPtr>> {
        self.check_key_len(key)?;
        if let Some(s) = src {
            self.check_entry_len(s)?;
        }
        if self.hash.find(key).is_some() {
            trace!("add: key already present, rejecting");
            return Ok(None);
        }

        let (idx, is_new) = if !self.recency.is_full() {
            let slot = self.arena.acquire()?;
            (self.recency.alloc(slot, key), true)
        } else {
            let Some(victim) = self.recency.find_unpinned_victim() else {
                debug!("add: cache full and every entry is pinned");
                return Ok(None);
            };
            let victim_key = self.recency.key(victim).to_vec();
            trace!(victim_key_len = victim_key.len(), "evicting LRU victim");
            self.recency.remove(victim);
            self.hash.remove(&victim_key, victim);
            let slot = self.recency.node(victim).slot;
            if let Some(cb) = &mut self.free_entry {
                cb(&victim_key, self.arena.payload(slot));
            }
            self.recency.rebind(victim, key);
            (victim, false)
        };

        let slot = self.recency.node(idx).slot;
        if let Some(s) = src {
            self.arena.payload_mut(slot).copy_from_slice(s);
        }
        self.recency.push_front(idx);
        if is_new {
            self.arena.set_back_ref(slot, idx);
        }
        self.hash.insert(key, idx);
        if src.is_none() {
            self.recency.node_mut(idx).pin_count = 1;
        }
        Ok(Some(self.arena.entry_ptr(slot)))
    }

    fn evict_live(&mut self, idx: u32, key: &[u8]) {
        let slot = self.recency.node(idx).slot;
        if let Some(cb) = &mut self.free_entry {
            cb(key, self.arena.payload(slot));
        }
        self.hash.remove(key, idx);
        self.arena.release(slot);
        self.recency.remove(idx);
        self.recency.free_index(idx);
    }

    /// Remove the live entry addressed by `key`. Fails with
    /// [`CacheError::NotFound`] on a miss, [`CacheError::Locked`] if pinned.
    pub fn delete_by_key(&mut self, key: &[u8]) -> Result<()> {
        self.check_key_len(key)?;
        let idx = self.hash.find(key).ok_or(CacheError::NotFound)?;
        if self.recency.node(idx).pin_count > 0 {
            return Err(CacheError::Locked);
        }
        self.evict_live(idx, key);
        Ok(())
    }

    /// Remove the live entry addressed by a payload pointer previously
    /// returned by [`Cache::lookup`] or [`Cache::add`].
    pub fn delete_entry(&mut self, ptr: EntryPtr) -> Result<()> {
        let idx = self.arena.get_back_ref(ptr)?;
        if self.recency.node(idx).pin_count > 0 {
            return Err(CacheError::Locked);
        }
        let key = self.recency.key(idx).to_vec();
        self.evict_live(idx, &key);
        Ok(())
    }

    /// Release one pin previously taken by [`Cache::lookup`] or an
    /// unwritten [`Cache::add`]. Fails with
    /// [`CacheError::AlreadyUnlocked`] on an unpaired call.
    pub fn unlock_entry(&mut self, ptr: EntryPtr) -> Result<()> {
        let idx = self.arena.get_back_ref(ptr)?;
        let node = self.recency.node_mut(idx);
        if node.pin_count == 0 {
            return Err(CacheError::AlreadyUnlocked);
        }
        node.pin_count -= 1;
        Ok(())
    }

    /// Forcefully evict every entry regardless of pin state. Callers must
    /// ensure no pinned pointers are outstanding across this call.
    pub fn clean(&mut self) {
        let mut evicted = 0u32;
        while let Some(idx) = self.recency.pop_front() {
            let slot = self.recency.node(idx).slot;
            let key = self.recency.key(idx).to_vec();
            if let Some(cb) = &mut self.free_entry {
                cb(&key, self.arena.payload(slot));
            }
            self.hash.remove(&key, idx);
            self.arena.release(slot);
            self.recency.free_index(idx);
            evicted += 1;
        }
        if evicted > 0 {
            debug!(evicted, "cache cleaned");
        }
    }

    pub fn max_entry_number(&self) -> u32 {
        self.recency.capacity()
    }

    pub fn entry_number(&self) -> u32 {
        self.recency.len()
    }
}

impl<H, C> Drop for Cache<H, C> {
    fn drop(&mut self) {
        // Re-implemented inline: `clean` requires `H: KeyHasher, C:
        // KeyComparator` bounds that Drop's impl block cannot repeat
        // without changing the struct's declared bounds, so Drop walks the
        // recency order directly.
        let mut evicted = 0u32;
        while let Some(idx) = self.recency.pop_front() {
            let slot = self.recency.node(idx).slot;
            let key = self.recency.key(idx).to_vec();
            if let Some(cb) = &mut self.free_entry {
                cb(&key, self.arena.payload(slot));
            }
            self.arena.release(slot);
            self.recency.free_index(idx);
            evicted += 1;
        }
        if evicted > 0 {
            debug!(evicted, "cache dropped");
        }
    }
}
