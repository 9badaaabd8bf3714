//! ChainedHashSet: separate chaining with load-factor driven doubling.
//!
//! Keys live in a vector of buckets; a key's bucket is its hash modulo the
//! current bucket count. Each entry remembers the `u64` hash computed on
//! insert, so `K: Hash` never runs again for that entry. Resizing doubles
//! the bucket vector and redistributes every stored hash by the new
//! modulus. Buckets are never shrunk.

use crate::reentrancy::DebugReentrancy;
use core::borrow::Borrow;
use core::fmt;
use core::hash::{BuildHasher, Hash};
use hashbrown::hash_map::DefaultHashBuilder;

/// Resize when `len / bucket_count` reaches this ratio.
pub const LOAD_FACTOR: f64 = 0.75;

/// Bucket count of a set built with `new()`.
pub const INITIAL_BUCKETS: usize = 8;

#[derive(Debug, Clone)]
struct Entry<K> {
    key: K,
    hash: u64,
}

pub struct ChainedHashSet<K, S = DefaultHashBuilder> {
    hasher: S,
    buckets: Vec<Vec<Entry<K>>>,
    count: usize,
    reentrancy: DebugReentrancy,
}

fn empty_buckets<K>(n: usize) -> Vec<Vec<Entry<K>>> {
    (0..n).map(|_| Vec::new()).collect()
}

// Double the bucket vector and redistribute by the new modulus. Only
// stored hashes are consulted, so no user code runs here.
fn grow<K>(buckets: &mut Vec<Vec<Entry<K>>>) {
    let new_len = buckets.len() * 2;
    let old = core::mem::replace(buckets, empty_buckets(new_len));
    for entry in old.into_iter().flatten() {
        let idx = (entry.hash % new_len as u64) as usize;
        buckets[idx].push(entry);
    }
}

impl<K> ChainedHashSet<K>
where
    K: Eq + Hash,
{
    pub fn new() -> Self {
        Self::with_buckets(INITIAL_BUCKETS)
    }

    /// Start with `n` buckets (at least one).
    pub fn with_buckets(n: usize) -> Self {
        Self::with_buckets_and_hasher(n, DefaultHashBuilder::default())
    }
}

impl<K> Default for ChainedHashSet<K>
where
    K: Eq + Hash,
{
    fn default() -> Self {
        Self::new()
    }
}

impl<K, S> ChainedHashSet<K, S>
where
    K: Eq + Hash,
    S: BuildHasher,
{
    pub fn with_hasher(hasher: S) -> Self {
        Self::with_buckets_and_hasher(INITIAL_BUCKETS, hasher)
    }

    pub fn with_buckets_and_hasher(n: usize, hasher: S) -> Self {
        Self {
            hasher,
            buckets: empty_buckets(n.max(1)),
            count: 0,
            reentrancy: DebugReentrancy::new(),
        }
    }

    pub fn len(&self) -> usize {
        self.count
    }

    pub fn is_empty(&self) -> bool {
        self.count == 0
    }

    pub fn bucket_count(&self) -> usize {
        self.buckets.len()
    }

    #[inline]
    fn bucket_index(&self, hash: u64) -> usize {
        (hash % self.buckets.len() as u64) as usize
    }

    fn needs_resizing(&self) -> bool {
        self.count as f64 / self.buckets.len() as f64 >= LOAD_FACTOR
    }

    /// Insert `key`. Returns `false` and leaves the set untouched when an
    /// equal key is already present.
    pub fn insert(&mut self, key: K) -> bool {
        let _g = self.reentrancy.enter();
        let hash = self.hasher.hash_one(&key);
        let idx = self.bucket_index(hash);
        let bucket = &mut self.buckets[idx];
        if bucket.iter().any(|e| e.hash == hash && e.key == key) {
            return false;
        }
        bucket.push(Entry { key, hash });
        self.count += 1;
        if self.needs_resizing() {
            grow(&mut self.buckets);
        }
        true
    }

    pub fn contains<Q>(&self, q: &Q) -> bool
    where
        K: Borrow<Q>,
        Q: ?Sized + Hash + Eq,
    {
        self.get(q).is_some()
    }

    /// The stored key equal to `q`, if any.
    pub fn get<Q>(&self, q: &Q) -> Option<&K>
    where
        K: Borrow<Q>,
        Q: ?Sized + Hash + Eq,
    {
        let _g = self.reentrancy.enter();
        let hash = self.hasher.hash_one(q);
        self.buckets[self.bucket_index(hash)]
            .iter()
            .find(|e| e.hash == hash && e.key.borrow() == q)
            .map(|e| &e.key)
    }

    /// Remove and return the key equal to `q`. The bucket count is kept.
    pub fn remove<Q>(&mut self, q: &Q) -> Option<K>
    where
        K: Borrow<Q>,
        Q: ?Sized + Hash + Eq,
    {
        let _g = self.reentrancy.enter();
        let hash = self.hasher.hash_one(q);
        let idx = self.bucket_index(hash);
        let bucket = &mut self.buckets[idx];
        let pos = bucket
            .iter()
            .position(|e| e.hash == hash && e.key.borrow() == q)?;
        self.count -= 1;
        Some(bucket.remove(pos).key)
    }

    /// Drop every key; the bucket count stays where resizing left it.
    pub fn clear(&mut self) {
        for bucket in &mut self.buckets {
            bucket.clear();
        }
        self.count = 0;
    }

    pub fn iter(&self) -> Iter<'_, K> {
        Iter {
            buckets: self.buckets.iter(),
            current: None,
            remaining: self.count,
        }
    }

    /// Every key of `self` is in `other`.
    pub fn is_subset<S2>(&self, other: &ChainedHashSet<K, S2>) -> bool
    where
        S2: BuildHasher,
    {
        self.len() <= other.len() && self.iter().all(|k| other.contains(k))
    }

    #[cfg(feature = "bench_internal")]
    pub fn bucket_lens(&self) -> Vec<usize> {
        self.buckets.iter().map(Vec::len).collect()
    }

    /// Assert the structural invariants. Used by tests after each step.
    #[doc(hidden)]
    pub fn check_invariants(&self) {
        let total: usize = self.buckets.iter().map(Vec::len).sum();
        assert_eq!(total, self.count, "count must equal the sum of bucket lengths");
        assert!(
            (self.count as f64 / self.buckets.len() as f64) < LOAD_FACTOR,
            "load factor must stay below the resize threshold"
        );
        for (idx, bucket) in self.buckets.iter().enumerate() {
            for (i, e) in bucket.iter().enumerate() {
                assert_eq!(self.bucket_index(e.hash), idx, "entry in wrong bucket");
                assert!(
                    bucket[i + 1..].iter().all(|o| o.key != e.key),
                    "key stored twice"
                );
            }
        }
    }
}

impl<K, S> ChainedHashSet<K, S>
where
    K: Eq + Hash + Clone,
    S: BuildHasher + Clone,
{
    fn empty_like(&self) -> Self {
        Self::with_hasher(self.hasher.clone())
    }

    /// Keys present in either set.
    pub fn union<S2: BuildHasher>(&self, other: &ChainedHashSet<K, S2>) -> Self {
        let mut out = self.empty_like();
        out.extend(self.iter().cloned());
        out.extend(other.iter().cloned());
        out
    }

    /// Keys present in both sets.
    pub fn intersection<S2: BuildHasher>(&self, other: &ChainedHashSet<K, S2>) -> Self {
        let mut out = self.empty_like();
        out.extend(self.iter().filter(|k| other.contains(*k)).cloned());
        out
    }

    /// Keys of `self` that are absent from `other`.
    pub fn difference<S2: BuildHasher>(&self, other: &ChainedHashSet<K, S2>) -> Self {
        let mut out = self.empty_like();
        out.extend(self.iter().filter(|k| !other.contains(*k)).cloned());
        out
    }
}

impl<K, S> Extend<K> for ChainedHashSet<K, S>
where
    K: Eq + Hash,
    S: BuildHasher,
{
    fn extend<I: IntoIterator<Item = K>>(&mut self, iter: I) {
        for key in iter {
            self.insert(key);
        }
    }
}

impl<K, S> FromIterator<K> for ChainedHashSet<K, S>
where
    K: Eq + Hash,
    S: BuildHasher + Default,
{
    fn from_iter<I: IntoIterator<Item = K>>(iter: I) -> Self {
        let mut set = Self::with_hasher(S::default());
        set.extend(iter);
        set
    }
}

// Membership equality; bucket layout and hasher state are irrelevant.
impl<K, S> PartialEq for ChainedHashSet<K, S>
where
    K: Eq + Hash,
    S: BuildHasher,
{
    fn eq(&self, other: &Self) -> bool {
        self.len() == other.len() && self.iter().all(|k| other.contains(k))
    }
}

impl<K, S> Eq for ChainedHashSet<K, S>
where
    K: Eq + Hash,
    S: BuildHasher,
{
}

impl<K: fmt::Debug, S> fmt::Debug for ChainedHashSet<K, S> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_set()
            .entries(self.buckets.iter().flatten().map(|e| &e.key))
            .finish()
    }
}

/// Iterator over the keys of a `ChainedHashSet`, bucket by bucket.
pub struct Iter<'a, K> {
    buckets: core::slice::Iter<'a, Vec<Entry<K>>>,
    current: Option<core::slice::Iter<'a, Entry<K>>>,
    remaining: usize,
}

impl<'a, K> Iterator for Iter<'a, K> {
    type Item = &'a K;

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            if let Some(e) = self.current.as_mut().and_then(Iterator::next) {
                self.remaining -= 1;
                return Some(&e.key);
            }
            self.current = Some(self.buckets.next()?.iter());
        }
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.remaining, Some(self.remaining))
    }
}

impl<K> ExactSizeIterator for Iter<'_, K> {}

impl<'a, K, S> IntoIterator for &'a ChainedHashSet<K, S>
where
    K: Eq + Hash,
    S: BuildHasher,
{
    type Item = &'a K;
    type IntoIter = Iter<'a, K>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}
