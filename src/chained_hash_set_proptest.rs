#![cfg(test)]

// Property tests for ChainedHashSet kept inside the crate so they can call
// the hidden invariant checker without extra feature gates.

use crate::chained_hash_set::{ChainedHashSet, LOAD_FACTOR};
use core::hash::BuildHasher;
use proptest::prelude::*;
use std::collections::{BTreeSet, HashSet};
use std::fmt;
use std::hash::Hasher;

// Key newtype with Borrow<str> to exercise borrowed lookup.
#[derive(Clone, Eq, PartialEq, Ord, PartialOrd, Hash)]
struct Key(String);
impl fmt::Debug for Key {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}
impl std::borrow::Borrow<str> for Key {
    fn borrow(&self) -> &str {
        &self.0
    }
}

// Pool-indexed operations: indices shrink to earlier keys, the pool shrinks,
// and op lists shrink in length.
#[derive(Clone, Debug)]
enum OpI {
    Insert(usize),
    Remove(usize),
    Contains(String),
    Clear,
    Iterate,
}

fn key_from(pool: &[String], i: usize) -> Key {
    Key(pool[i].clone())
}

fn arb_scenario() -> impl Strategy<Value = (Vec<String>, Vec<OpI>)> {
    proptest::collection::vec("[a-z]{0,5}", 1..=24).prop_flat_map(|pool| {
        let idxs: Vec<usize> = (0..pool.len()).collect();
        let idx = proptest::sample::select(idxs);
        let contains_pool = proptest::sample::select(pool.clone());
        let op = prop_oneof![
            6 => idx.clone().prop_map(OpI::Insert),
            3 => idx.clone().prop_map(OpI::Remove),
            2 => prop_oneof![contains_pool, "[a-z]{0,5}"].prop_map(OpI::Contains),
            1 => Just(OpI::Clear),
            1 => Just(OpI::Iterate),
        ];
        proptest::collection::vec(op, 1..80).prop_map(move |ops| (pool.clone(), ops))
    })
}

fn run_state_machine<S: BuildHasher>(
    mut sut: ChainedHashSet<Key, S>,
    pool: &[String],
    ops: Vec<OpI>,
) -> Result<(), TestCaseError> {
    let mut model: HashSet<Key> = HashSet::new();
    for op in ops {
        match op {
            OpI::Insert(i) => {
                let k = key_from(pool, i);
                let fresh = !model.contains(&k);
                let buckets = sut.bucket_count();
                let crosses = (model.len() + 1) as f64 / buckets as f64 >= LOAD_FACTOR;
                prop_assert_eq!(sut.insert(k.clone()), fresh);
                model.insert(k);
                if fresh && crosses {
                    prop_assert_eq!(sut.bucket_count(), buckets * 2, "triggering insert must double");
                    for mk in &model {
                        prop_assert!(sut.contains(mk), "key lost across resize");
                    }
                } else {
                    prop_assert_eq!(sut.bucket_count(), buckets);
                }
            }
            OpI::Remove(i) => {
                let k = key_from(pool, i);
                let buckets = sut.bucket_count();
                let removed = sut.remove(&k);
                prop_assert_eq!(removed.is_some(), model.remove(&k));
                if let Some(r) = removed {
                    prop_assert!(r == k);
                }
                prop_assert_eq!(sut.bucket_count(), buckets, "remove never shrinks");
            }
            OpI::Contains(s) => {
                let has_model = model.iter().any(|k| k.0 == s);
                prop_assert_eq!(sut.contains(s.as_str()), has_model);
            }
            OpI::Clear => {
                sut.clear();
                model.clear();
            }
            OpI::Iterate => {
                let s_keys: BTreeSet<_> = sut.iter().cloned().collect();
                let m_keys: BTreeSet<_> = model.iter().cloned().collect();
                prop_assert_eq!(sut.iter().count(), model.len());
                prop_assert_eq!(s_keys, m_keys);
            }
        }

        // Post-conditions after each op
        sut.check_invariants();
        prop_assert_eq!(sut.len(), model.len());
        prop_assert_eq!(sut.is_empty(), model.is_empty());
    }
    Ok(())
}

// Property: State-machine equivalence against std::collections::HashSet.
// Invariants exercised across random operation sequences:
// - insert reports `true` exactly for keys not yet present.
// - The insert that reaches the load factor doubles buckets; all keys survive.
// - remove returns the stored key once and never shrinks the bucket vector.
// - `contains`, `iter` and `len` agree with the model after each op.
proptest! {
    #![proptest_config(ProptestConfig { cases: 64, .. ProptestConfig::default() })]
    #[test]
    fn prop_state_machine((pool, ops) in arb_scenario()) {
        run_state_machine(ChainedHashSet::new(), &pool, ops)?;
    }
}

// Collision variant using a constant hasher to stress equality resolution.
#[derive(Clone, Default)]
struct ConstBuildHasher;
struct ConstHasher;
impl BuildHasher for ConstBuildHasher {
    type Hasher = ConstHasher;
    fn build_hasher(&self) -> Self::Hasher {
        ConstHasher
    }
}
impl Hasher for ConstHasher {
    fn write(&mut self, _bytes: &[u8]) {}
    fn finish(&self) -> u64 {
        0
    }
}

// Property: Same state machine under worst-case collisions (every key in
// bucket 0). Resizing must still double and keep every key reachable.
proptest! {
    #![proptest_config(ProptestConfig { cases: 64, .. ProptestConfig::default() })]
    #[test]
    fn prop_state_machine_with_collisions((pool, ops) in arb_scenario()) {
        run_state_machine(ChainedHashSet::with_hasher(ConstBuildHasher), &pool, ops)?;
    }
}

// Property: starting bucket count does not change membership semantics.
proptest! {
    #[test]
    fn prop_initial_buckets_irrelevant(start in 0usize..20, keys in proptest::collection::vec(any::<u16>(), 0..200)) {
        let mut small: ChainedHashSet<u16> = ChainedHashSet::with_buckets(start);
        let mut big: ChainedHashSet<u16> = ChainedHashSet::with_buckets(1024);
        for &k in &keys {
            prop_assert_eq!(small.insert(k), big.insert(k));
        }
        small.check_invariants();
        prop_assert!(small == big);
        let distinct: HashSet<u16> = keys.iter().copied().collect();
        prop_assert_eq!(small.len(), distinct.len());
    }
}
