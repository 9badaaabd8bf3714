//! DoublyLinkedList: sentinel-bounded list stored in a slot arena.
//!
//! Two permanent sentinel links (`head`, `tail`) bracket the interior, so
//! append, prepend and unlink never special-case the ends. Links refer to
//! their neighbours by generational slot keys rather than pointers; an
//! unlink is two key writes plus freeing the slot. Handles returned to
//! callers never name a sentinel, and a handle to a removed node never
//! resolves again, even if its slot is reused. Handles are also tagged
//! with the list that created them; another list's handle never resolves.

use crate::owner::OwnerTag;
use crate::reentrancy::DebugReentrancy;
use core::fmt;
use slotmap::{DefaultKey, SlotMap};

/// Stable reference to one interior node of a list.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash)]
pub struct NodeHandle {
    owner: OwnerTag,
    key: DefaultKey,
}

impl NodeHandle {
    pub fn value<'a, T>(&self, list: &'a DoublyLinkedList<T>) -> Option<&'a T> {
        list.get(*self)
    }

    pub fn value_mut<'a, T>(&self, list: &'a mut DoublyLinkedList<T>) -> Option<&'a mut T> {
        list.get_mut(*self)
    }
}

#[derive(Debug)]
struct Link<T> {
    // `None` only on the two sentinels.
    value: Option<T>,
    prev: DefaultKey,
    next: DefaultKey,
}

pub struct DoublyLinkedList<T> {
    links: SlotMap<DefaultKey, Link<T>>,
    head: DefaultKey,
    tail: DefaultKey,
    len: usize,
    owner: OwnerTag,
    reentrancy: DebugReentrancy,
}

impl<T> Default for DoublyLinkedList<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> DoublyLinkedList<T> {
    pub fn new() -> Self {
        let mut links = SlotMap::with_key();
        let head = links.insert_with_key(|k| Link {
            value: None,
            prev: k,
            next: k,
        });
        let tail = links.insert_with_key(|k| Link {
            value: None,
            prev: head,
            next: k,
        });
        links[head].next = tail;
        Self {
            links,
            head,
            tail,
            len: 0,
            owner: OwnerTag::fresh(),
            reentrancy: DebugReentrancy::new(),
        }
    }

    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.links[self.head].next == self.tail
    }

    fn is_interior(&self, k: DefaultKey) -> bool {
        k != self.head && k != self.tail && self.links.contains_key(k)
    }

    fn handle(&self, key: DefaultKey) -> NodeHandle {
        NodeHandle {
            owner: self.owner,
            key,
        }
    }

    // Slot key behind `h`, if `h` was minted here and is still live.
    fn local(&self, h: NodeHandle) -> Option<DefaultKey> {
        (h.owner == self.owner && self.is_interior(h.key)).then_some(h.key)
    }

    // Wire a new link between two adjacent links: two keys on the new link,
    // one on each neighbour.
    fn link_between(&mut self, prev: DefaultKey, next: DefaultKey, value: T) -> NodeHandle {
        debug_assert_eq!(self.links[prev].next, next);
        let k = self.links.insert(Link {
            value: Some(value),
            prev,
            next,
        });
        self.links[prev].next = k;
        self.links[next].prev = k;
        self.len += 1;
        self.handle(k)
    }

    // Splice an interior link out of the chain without freeing its slot.
    fn detach(&mut self, k: DefaultKey) {
        let (prev, next) = {
            let link = &self.links[k];
            (link.prev, link.next)
        };
        self.links[prev].next = next;
        self.links[next].prev = prev;
    }

    fn unlink(&mut self, k: DefaultKey) -> Option<T> {
        self.detach(k);
        let link = self.links.remove(k)?;
        self.len -= 1;
        link.value
    }

    /// Insert at the back in O(1).
    pub fn append(&mut self, value: T) -> NodeHandle {
        let last = self.links[self.tail].prev;
        self.link_between(last, self.tail, value)
    }

    /// Insert at the front in O(1).
    pub fn prepend(&mut self, value: T) -> NodeHandle {
        let first = self.links[self.head].next;
        self.link_between(self.head, first, value)
    }

    /// Unlink the node behind `h` in O(1). Stale or foreign handles
    /// yield `None`.
    pub fn remove_node(&mut self, h: NodeHandle) -> Option<T> {
        let k = self.local(h)?;
        self.unlink(k)
    }

    /// Move an interior node to the back, keeping its handle. Returns
    /// `false` for a stale or foreign handle.
    pub fn move_to_back(&mut self, h: NodeHandle) -> bool {
        let Some(k) = self.local(h) else {
            return false;
        };
        self.detach(k);
        let last = self.links[self.tail].prev;
        let tail = self.tail;
        let link = &mut self.links[k];
        link.prev = last;
        link.next = tail;
        self.links[last].next = k;
        self.links[tail].prev = k;
        true
    }

    pub fn get(&self, h: NodeHandle) -> Option<&T> {
        let k = self.local(h)?;
        self.links.get(k).and_then(|l| l.value.as_ref())
    }

    pub fn get_mut(&mut self, h: NodeHandle) -> Option<&mut T> {
        let k = self.local(h)?;
        self.links.get_mut(k).and_then(|l| l.value.as_mut())
    }

    pub fn first(&self) -> Option<&T> {
        self.links[self.links[self.head].next].value.as_ref()
    }

    pub fn last(&self) -> Option<&T> {
        self.links[self.links[self.tail].prev].value.as_ref()
    }

    pub fn first_handle(&self) -> Option<NodeHandle> {
        let k = self.links[self.head].next;
        (k != self.tail).then(|| self.handle(k))
    }

    pub fn last_handle(&self) -> Option<NodeHandle> {
        let k = self.links[self.tail].prev;
        (k != self.head).then(|| self.handle(k))
    }

    /// Value at `index`, walking from the front. Past the end is `None`.
    pub fn nth(&self, index: usize) -> Option<&T> {
        self.iter().nth(index)
    }

    pub fn handle_at(&self, index: usize) -> Option<NodeHandle> {
        self.nodes().nth(index).map(|(h, _)| h)
    }

    /// First node whose value satisfies `pred`, scanning front to back.
    pub fn find_by<F>(&self, mut pred: F) -> Option<NodeHandle>
    where
        F: FnMut(&T) -> bool,
    {
        let _g = self.reentrancy.enter();
        self.nodes().find(|(_, v)| pred(v)).map(|(h, _)| h)
    }

    pub fn find(&self, value: &T) -> Option<NodeHandle>
    where
        T: PartialEq,
    {
        self.find_by(|v| v == value)
    }

    pub fn contains(&self, value: &T) -> bool
    where
        T: PartialEq,
    {
        self.find(value).is_some()
    }

    /// Unlink the first node equal to `value`. Absent values leave the list
    /// untouched and return `None`.
    pub fn remove(&mut self, value: &T) -> Option<T>
    where
        T: PartialEq,
    {
        let h = self.find(value)?;
        self.unlink(h.key)
    }

    /// Forward iterator over values; sentinels are never yielded.
    pub fn iter(&self) -> Iter<'_, T> {
        Iter { nodes: self.nodes() }
    }

    /// Forward iterator over `(handle, value)` pairs.
    pub fn nodes(&self) -> Nodes<'_, T> {
        Nodes {
            links: &self.links,
            owner: self.owner,
            cursor: self.links[self.head].next,
            tail: self.tail,
            remaining: self.len,
        }
    }

    /// Assert link symmetry and the length count.
    #[doc(hidden)]
    pub fn check_invariants(&self) {
        assert!(self.links[self.head].value.is_none(), "head sentinel carries a value");
        assert!(self.links[self.tail].value.is_none(), "tail sentinel carries a value");
        assert_eq!(self.links.len(), self.len + 2, "arena holds stray links");
        let mut seen = 0;
        let mut k = self.head;
        while k != self.tail {
            let next = self.links[k].next;
            assert_eq!(self.links[next].prev, k, "next.prev must point back");
            if k != self.head {
                assert!(self.links[k].value.is_some(), "interior link without value");
                seen += 1;
            }
            k = next;
        }
        assert_eq!(seen, self.len, "walk length differs from len");
        assert_eq!(self.is_empty(), self.len == 0);
    }
}

impl<T> Extend<T> for DoublyLinkedList<T> {
    fn extend<I: IntoIterator<Item = T>>(&mut self, iter: I) {
        for v in iter {
            self.append(v);
        }
    }
}

impl<T> FromIterator<T> for DoublyLinkedList<T> {
    fn from_iter<I: IntoIterator<Item = T>>(iter: I) -> Self {
        let mut list = Self::new();
        list.extend(iter);
        list
    }
}

impl<T: fmt::Debug> fmt::Debug for DoublyLinkedList<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list().entries(self.iter()).finish()
    }
}

impl<'a, T> IntoIterator for &'a DoublyLinkedList<T> {
    type Item = &'a T;
    type IntoIter = Iter<'a, T>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

/// Iterator over `(handle, value)` pairs in list order.
pub struct Nodes<'a, T> {
    links: &'a SlotMap<DefaultKey, Link<T>>,
    owner: OwnerTag,
    cursor: DefaultKey,
    tail: DefaultKey,
    remaining: usize,
}

impl<'a, T> Iterator for Nodes<'a, T> {
    type Item = (NodeHandle, &'a T);

    fn next(&mut self) -> Option<Self::Item> {
        if self.cursor == self.tail {
            return None;
        }
        let k = self.cursor;
        let link = self.links.get(k)?;
        self.cursor = link.next;
        self.remaining -= 1;
        let h = NodeHandle {
            owner: self.owner,
            key: k,
        };
        link.value.as_ref().map(|v| (h, v))
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.remaining, Some(self.remaining))
    }
}

impl<T> ExactSizeIterator for Nodes<'_, T> {}

/// Iterator over values in list order.
pub struct Iter<'a, T> {
    nodes: Nodes<'a, T>,
}

impl<'a, T> Iterator for Iter<'a, T> {
    type Item = &'a T;

    #[inline]
    fn next(&mut self) -> Option<Self::Item> {
        self.nodes.next().map(|(_, v)| v)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.nodes.size_hint()
    }
}

impl<T> ExactSizeIterator for Iter<'_, T> {}
