//! handle-collections: small single-threaded containers whose linked
//! structure lives in arenas addressed by handles instead of pointers.
//!
//! Internal Design:
//!
//! Summary
//! - Four independent containers, each guarding one structural invariant:
//!   - ChainedHashSet<K, S>: separate chaining; doubles its bucket count
//!     when `len / buckets` reaches 0.75 and redistributes every key by
//!     the new modulus.
//!   - DoublyLinkedList<T>: two permanent sentinels bracket the interior;
//!     every link's `next.prev` and `prev.next` point back at it.
//!     KeyedList<K, V> is its key/value flavour and LruCache<K, V> is
//!     built on top.
//!   - BinarySearchTree<T>: owned children, `left <= node < right`,
//!     four-shape deletion with in-order predecessor replacement.
//!   - PolyTree<T>: n-ary nodes where `parent == p` iff `p.children`
//!     holds the node exactly once; `set_parent` is the only edit.
//! - Searchable: BFS/DFS provided for any node view exposing `value()` and
//!   `children()`; implemented for `&BstNode<T>` and `NodeRef<'_, T>`.
//!
//! Constraints
//! - Single-threaded: collections that call user code carry a
//!   `DebugReentrancy` marker and are `!Send`/`!Sync`.
//! - Linked structures use `slotmap` generational keys wrapped in small
//!   `Copy` handles (`NodeHandle`, `NodeId`). A handle to a removed node
//!   never resolves and never aliases a later node. Handles also carry a
//!   process-unique tag of the container that minted them, so a handle
//!   from another container never resolves either.
//! - Lookups that find nothing return `None`/`false`; only caller misuse
//!   of the tree APIs surfaces as a `TreeError`.
//!
//! Reentrancy policy
//! - `ChainedHashSet` and `DoublyLinkedList` run `K: Hash`/`T: PartialEq`
//!   while scanning. A debug-only guard at each such entry point panics if
//!   that code reaches back into the same collection. Release builds pay
//!   nothing.
//!
//! Hashing
//! - `ChainedHashSet` stores each key's `u64` hash next to it. Resizing
//!   only reads stored hashes, so `K: Hash` runs once per insert.
//!
//! Notes and non-goals
//! - No shrinking on removal; no load-factor tuning beyond the constant.
//! - The BST is unbalanced and keeps duplicates (routed left).
//! - No comparator injection: ordering is `Ord`, equality is `Eq`.

pub mod bst;
pub mod chained_hash_set;
mod chained_hash_set_proptest;
pub mod error;
pub mod keyed_list;
pub mod linked_list;
mod linked_list_proptest;
pub mod lru_cache;
mod owner;
pub mod poly_tree;
mod poly_tree_proptest;
pub mod reentrancy;
pub mod searchable;

// Public surface
pub use bst::{BinarySearchTree, BstNode};
pub use chained_hash_set::ChainedHashSet;
pub use error::TreeError;
pub use keyed_list::KeyedList;
pub use linked_list::{DoublyLinkedList, NodeHandle};
pub use lru_cache::{CacheStats, LruCache};
pub use poly_tree::{NodeId, NodeRef, PolyTree};
pub use reentrancy::DebugReentrancy;
pub use searchable::Searchable;
