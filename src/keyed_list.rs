//! KeyedList: the key/value flavour of `DoublyLinkedList`.
//!
//! Entries are `(key, value)` pairs compared by key. Lookups are linear
//! scans; handles give O(1) access once a node is known.

use crate::linked_list::{DoublyLinkedList, NodeHandle};
use core::borrow::Borrow;
use core::fmt;

pub struct KeyedList<K, V> {
    list: DoublyLinkedList<(K, V)>,
}

impl<K, V> Default for KeyedList<K, V> {
    fn default() -> Self {
        Self::new()
    }
}

impl<K, V> KeyedList<K, V> {
    pub fn new() -> Self {
        Self {
            list: DoublyLinkedList::new(),
        }
    }

    pub fn len(&self) -> usize {
        self.list.len()
    }

    pub fn is_empty(&self) -> bool {
        self.list.is_empty()
    }

    pub fn append(&mut self, key: K, value: V) -> NodeHandle {
        self.list.append((key, value))
    }

    pub fn prepend(&mut self, key: K, value: V) -> NodeHandle {
        self.list.prepend((key, value))
    }

    pub fn find<Q>(&self, key: &Q) -> Option<NodeHandle>
    where
        K: Borrow<Q>,
        Q: ?Sized + PartialEq,
    {
        self.list.find_by(|(k, _)| k.borrow() == key)
    }

    pub fn contains_key<Q>(&self, key: &Q) -> bool
    where
        K: Borrow<Q>,
        Q: ?Sized + PartialEq,
    {
        self.find(key).is_some()
    }

    /// Value stored under the first node with `key`.
    pub fn get<Q>(&self, key: &Q) -> Option<&V>
    where
        K: Borrow<Q>,
        Q: ?Sized + PartialEq,
    {
        let h = self.find(key)?;
        self.list.get(h).map(|(_, v)| v)
    }

    /// Overwrite the value of the first node with `key` in place. Returns
    /// its handle, or `None` (and stores nothing) when the key is absent.
    pub fn update<Q>(&mut self, key: &Q, value: V) -> Option<NodeHandle>
    where
        K: Borrow<Q>,
        Q: ?Sized + PartialEq,
    {
        let h = self.find(key)?;
        let (_, slot) = self.list.get_mut(h)?;
        *slot = value;
        Some(h)
    }

    /// Unlink the first node with `key`, returning its value.
    pub fn remove<Q>(&mut self, key: &Q) -> Option<V>
    where
        K: Borrow<Q>,
        Q: ?Sized + PartialEq,
    {
        let h = self.find(key)?;
        self.list.remove_node(h).map(|(_, v)| v)
    }

    pub fn entry(&self, h: NodeHandle) -> Option<(&K, &V)> {
        self.list.get(h).map(|(k, v)| (k, v))
    }

    pub fn value_mut(&mut self, h: NodeHandle) -> Option<&mut V> {
        self.list.get_mut(h).map(|(_, v)| v)
    }

    pub fn remove_node(&mut self, h: NodeHandle) -> Option<(K, V)> {
        self.list.remove_node(h)
    }

    pub fn move_to_back(&mut self, h: NodeHandle) -> bool {
        self.list.move_to_back(h)
    }

    pub fn first(&self) -> Option<(&K, &V)> {
        self.list.first().map(|(k, v)| (k, v))
    }

    pub fn last(&self) -> Option<(&K, &V)> {
        self.list.last().map(|(k, v)| (k, v))
    }

    pub fn first_handle(&self) -> Option<NodeHandle> {
        self.list.first_handle()
    }

    pub fn nth(&self, index: usize) -> Option<(&K, &V)> {
        self.list.nth(index).map(|(k, v)| (k, v))
    }

    pub fn iter(&self) -> impl Iterator<Item = (&K, &V)> {
        self.list.iter().map(|(k, v)| (k, v))
    }

    #[doc(hidden)]
    pub fn check_invariants(&self) {
        self.list.check_invariants();
    }
}

impl<K: fmt::Debug, V: fmt::Debug> fmt::Debug for KeyedList<K, V> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list().entries(self.iter()).finish()
    }
}
