//! Sharded concurrent accumulator
//!
//! Replaces a single `Mutex<BTreeMap>` with N independently locked shards.
//! Worker threads only contend when they touch keys living in the same shard.
//!
//! # Design
//!
//! - Shards: `Vec<Mutex<BTreeMap<K, V>>>`, fixed at construction
//! - Every key lives in exactly one shard
//! - Existing keys are found by probing the shards in order
//! - New keys go to shard `next_insertion % shard_count`, where
//!   `next_insertion` is a global atomic counter, so concurrent first
//!   inserts of distinct keys spread across shards
//! - First inserts are serialized by an insertion lock and re-probe after
//!   acquiring it, so two threads can never place the same key in two shards
//!
//! # Deadlock
//!
//! A [`ShardAccess`] holds its shard's lock until it is dropped. A thread
//! must not hold two `ShardAccess` handles from the same map at once, and
//! must not call [`ShardedMap::erase`] or [`ShardedMap::flatten`] while it
//! holds one.

use parking_lot::{MappedMutexGuard, Mutex, MutexGuard};
use std::collections::BTreeMap;
use std::fmt;
use std::ops::{Deref, DerefMut};
use std::sync::atomic::{AtomicU64, Ordering};

mod sealed {
    pub trait Sealed {}
}

/// Key types accepted by [`ShardedMap`]
///
/// Restricted to the primitive integer types. Sealed.
pub trait ShardKey: sealed::Sealed + Copy + Ord + fmt::Debug + Send + Sync + 'static {}

macro_rules! impl_shard_key {
    ($($t:ty),* $(,)?) => {
        $(
            impl sealed::Sealed for $t {}
            impl ShardKey for $t {}
        )*
    };
}

impl_shard_key!(i8, i16, i32, i64, i128, isize, u8, u16, u32, u64, u128, usize);

// ============================================================================
// ShardAccess
// ============================================================================

/// Scoped mutable access to one value of a [`ShardedMap`]
///
/// Holds exactly one shard lock, released when the handle is dropped.
/// The borrow of the map prevents the handle from outliving it.
pub struct ShardAccess<'a, V> {
    guard: MappedMutexGuard<'a, V>,
}

impl<V> Deref for ShardAccess<'_, V> {
    type Target = V;

    fn deref(&self) -> &V {
        &self.guard
    }
}

impl<V> DerefMut for ShardAccess<'_, V> {
    fn deref_mut(&mut self) -> &mut V {
        &mut self.guard
    }
}

impl<V: fmt::Debug> fmt::Debug for ShardAccess<'_, V> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("ShardAccess").field(&*self.guard).finish()
    }
}

// ============================================================================
// ShardedMap
// ============================================================================

/// Integer-keyed map partitioned into independently locked shards
///
/// Observably equivalent to a plain map for any serializable sequence of
/// single-key operations; only the placement of keys differs.
pub struct ShardedMap<K: ShardKey, V> {
    shards: Vec<Mutex<BTreeMap<K, V>>>,
    /// Insertion counter choosing the shard of a new key
    next_insertion: AtomicU64,
    /// Serializes first inserts (see module docs)
    insert_lock: Mutex<()>,
}

impl<K: ShardKey, V> ShardedMap<K, V> {
    /// Create a map with `shard_count` shards
    ///
    /// A shard count of zero is raised to one.
    pub fn new(shard_count: usize) -> Self {
        let shard_count = shard_count.max(1);
        ShardedMap {
            shards: (0..shard_count)
                .map(|_| Mutex::new(BTreeMap::new()))
                .collect(),
            next_insertion: AtomicU64::new(0),
            insert_lock: Mutex::new(()),
        }
    }

    /// Number of shards
    pub fn shard_count(&self) -> usize {
        self.shards.len()
    }

    /// Total number of entries across all shards
    ///
    /// Locks shards one at a time; concurrent writers may make the
    /// answer stale by the time it is returned.
    pub fn len(&self) -> usize {
        self.shards.iter().map(|shard| shard.lock().len()).sum()
    }

    /// Check whether every shard is empty
    pub fn is_empty(&self) -> bool {
        self.shards.iter().all(|shard| shard.lock().is_empty())
    }

    /// Number of entries held by each shard, in shard order
    pub fn shard_sizes(&self) -> Vec<usize> {
        self.shards.iter().map(|shard| shard.lock().len()).collect()
    }

    /// Probe every shard for `key`, keeping the lock of the one holding it
    fn find(&self, key: K) -> Option<ShardAccess<'_, V>> {
        for shard in &self.shards {
            if let Ok(guard) = MutexGuard::try_map(shard.lock(), |map| map.get_mut(&key)) {
                return Some(ShardAccess { guard });
            }
        }
        None
    }

    /// Remove `key` from whichever shard holds it
    ///
    /// Returns the removed value, or `None` if no shard held the key.
    pub fn erase(&self, key: K) -> Option<V> {
        self.shards
            .iter()
            .find_map(|shard| shard.lock().remove(&key))
    }

    /// Drain every shard into one ordinary map
    ///
    /// Shards are locked in turn. The sharded map is left empty and can
    /// be reused.
    pub fn flatten(&self) -> BTreeMap<K, V> {
        let mut merged = BTreeMap::new();
        for shard in &self.shards {
            let mut guard = shard.lock();
            merged.append(&mut guard);
        }
        merged
    }

    /// Consume the map, merging every shard
    pub fn into_inner(self) -> BTreeMap<K, V> {
        let mut merged = BTreeMap::new();
        for shard in self.shards {
            merged.append(&mut shard.into_inner());
        }
        merged
    }
}

impl<K: ShardKey, V: Clone> ShardedMap<K, V> {
    /// Copy of the value stored under `key`
    pub fn get(&self, key: K) -> Option<V> {
        self.find(key).map(|access| (*access).clone())
    }
}

impl<K: ShardKey, V: Default> ShardedMap<K, V> {
    /// Lookup-or-insert `key` and lock its shard
    ///
    /// A missing key is inserted with `V::default()` into shard
    /// `next_insertion % shard_count`. The returned handle keeps that
    /// shard locked until it is dropped.
    pub fn access(&self, key: K) -> ShardAccess<'_, V> {
        if let Some(access) = self.find(key) {
            return access;
        }

        let _insert = self.insert_lock.lock();
        // Double-check: another thread may have inserted while we waited
        if let Some(access) = self.find(key) {
            return access;
        }

        let slot = self.next_insertion.fetch_add(1, Ordering::Relaxed) % self.shards.len() as u64;
        let guard = MutexGuard::map(self.shards[slot as usize].lock(), |map| {
            map.entry(key).or_default()
        });
        ShardAccess { guard }
    }
}

impl<K: ShardKey, V> Default for ShardedMap<K, V> {
    fn default() -> Self {
        Self::new(1)
    }
}

impl<K: ShardKey, V> fmt::Debug for ShardedMap<K, V> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ShardedMap")
            .field("shard_count", &self.shards.len())
            .field("next_insertion", &self.next_insertion.load(Ordering::Relaxed))
            .finish()
    }
}
