//! LruCache: fixed-capacity cache over a `KeyedList` recency order.
//!
//! The list runs from least- to most-recently used. A hash index maps each
//! key to its list handle, so hits, refreshes and evictions are all O(1).

use crate::keyed_list::KeyedList;
use crate::linked_list::NodeHandle;
use core::borrow::Borrow;
use core::fmt;
use core::hash::Hash;
use hashbrown::HashMap;

/// Snapshot of cache counters.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CacheStats {
    pub hits: u64,
    pub misses: u64,
    pub capacity: usize,
    pub len: usize,
}

impl fmt::Display for CacheStats {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "CacheInfo(hits={}, misses={}, capacity={}, current size={})",
            self.hits, self.misses, self.capacity, self.len
        )
    }
}

pub struct LruCache<K, V> {
    capacity: usize,
    order: KeyedList<K, V>,
    index: HashMap<K, NodeHandle>,
    hits: u64,
    misses: u64,
}

impl<K, V> LruCache<K, V>
where
    K: Eq + Hash + Clone,
{
    pub fn new(capacity: usize) -> Self {
        Self {
            capacity,
            order: KeyedList::new(),
            index: HashMap::with_capacity(capacity),
            hits: 0,
            misses: 0,
        }
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    pub fn len(&self) -> usize {
        self.index.len()
    }

    pub fn is_empty(&self) -> bool {
        self.index.is_empty()
    }

    pub fn contains<Q>(&self, key: &Q) -> bool
    where
        K: Borrow<Q>,
        Q: ?Sized + Hash + Eq,
    {
        self.index.contains_key(key)
    }

    /// Look up `key`, marking it most recently used. Counts a hit or miss.
    pub fn get<Q>(&mut self, key: &Q) -> Option<&V>
    where
        K: Borrow<Q>,
        Q: ?Sized + Hash + Eq,
    {
        let Some(&h) = self.index.get(key) else {
            self.misses += 1;
            return None;
        };
        self.hits += 1;
        self.order.move_to_back(h);
        self.order.entry(h).map(|(_, v)| v)
    }

    /// Look up `key` without touching recency or counters.
    pub fn peek<Q>(&self, key: &Q) -> Option<&V>
    where
        K: Borrow<Q>,
        Q: ?Sized + Hash + Eq,
    {
        let &h = self.index.get(key)?;
        self.order.entry(h).map(|(_, v)| v)
    }

    /// Insert or refresh `key`. Returns the entry pushed out to make room,
    /// if any. With zero capacity the new entry itself is returned.
    pub fn put(&mut self, key: K, value: V) -> Option<(K, V)> {
        if let Some(&h) = self.index.get(&key) {
            if let Some(slot) = self.order.value_mut(h) {
                *slot = value;
            }
            self.order.move_to_back(h);
            return None;
        }
        if self.capacity == 0 {
            return Some((key, value));
        }
        let evicted = if self.index.len() >= self.capacity {
            self.evict_oldest()
        } else {
            None
        };
        let h = self.order.append(key.clone(), value);
        self.index.insert(key, h);
        evicted
    }

    fn evict_oldest(&mut self) -> Option<(K, V)> {
        let h = self.order.first_handle()?;
        let (k, v) = self.order.remove_node(h)?;
        self.index.remove(&k);
        Some((k, v))
    }

    pub fn remove<Q>(&mut self, key: &Q) -> Option<V>
    where
        K: Borrow<Q>,
        Q: ?Sized + Hash + Eq,
    {
        let h = self.index.remove(key)?;
        self.order.remove_node(h).map(|(_, v)| v)
    }

    /// Keys from least to most recently used.
    pub fn keys(&self) -> impl Iterator<Item = &K> {
        self.order.iter().map(|(k, _)| k)
    }

    pub fn stats(&self) -> CacheStats {
        CacheStats {
            hits: self.hits,
            misses: self.misses,
            capacity: self.capacity,
            len: self.len(),
        }
    }

    #[doc(hidden)]
    pub fn check_invariants(&self) {
        self.order.check_invariants();
        assert_eq!(self.index.len(), self.order.len(), "index and order disagree");
        assert!(self.len() <= self.capacity, "cache over capacity");
        for (k, &h) in &self.index {
            let (stored, _) = self.order.entry(h).expect("indexed handle must be live");
            assert!(stored == k, "index points at the wrong node");
        }
    }
}

impl<K, V> fmt::Debug for LruCache<K, V>
where
    K: Eq + Hash + Clone,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.stats())
    }
}
