//! PolyTree: an arena of n-ary nodes linked by parent ids and child lists.
//!
//! A node's `children` list is the owning relationship; `parent` is only a
//! lookup key back up the tree. `set_parent` is the single structural edit
//! and keeps the two sides in step: `node.parent == Some(p)` exactly when
//! `p`'s children contain `node` once. Adding, removing and moving a child
//! are all `set_parent` with different arguments.

use crate::error::TreeError;
use crate::owner::OwnerTag;
use crate::searchable::Searchable;
use core::fmt;
use slotmap::{DefaultKey, SlotMap};

/// Identity of a node inside one `PolyTree`. Ids from another tree, or of
/// removed nodes, are rejected with `StaleNode`.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash)]
pub struct NodeId {
    owner: OwnerTag,
    key: DefaultKey,
}

#[derive(Debug)]
struct PolyNode<T> {
    value: T,
    parent: Option<DefaultKey>,
    children: Vec<DefaultKey>,
}

pub struct PolyTree<T> {
    nodes: SlotMap<DefaultKey, PolyNode<T>>,
    owner: OwnerTag,
}

impl<T> Default for PolyTree<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> PolyTree<T> {
    pub fn new() -> Self {
        Self {
            nodes: SlotMap::with_key(),
            owner: OwnerTag::fresh(),
        }
    }

    /// Number of live nodes across every tree in the arena.
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Create a detached node with no parent and no children.
    pub fn add_node(&mut self, value: T) -> NodeId {
        let key = self.nodes.insert(PolyNode {
            value,
            parent: None,
            children: Vec::new(),
        });
        self.id_of(key)
    }

    fn id_of(&self, key: DefaultKey) -> NodeId {
        NodeId {
            owner: self.owner,
            key,
        }
    }

    pub fn contains(&self, id: NodeId) -> bool {
        id.owner == self.owner && self.nodes.contains_key(id.key)
    }

    fn live(&self, id: NodeId) -> Result<&PolyNode<T>, TreeError> {
        if id.owner != self.owner {
            return Err(TreeError::StaleNode);
        }
        self.nodes.get(id.key).ok_or(TreeError::StaleNode)
    }

    pub fn value(&self, id: NodeId) -> Result<&T, TreeError> {
        Ok(&self.live(id)?.value)
    }

    pub fn value_mut(&mut self, id: NodeId) -> Result<&mut T, TreeError> {
        if id.owner != self.owner {
            return Err(TreeError::StaleNode);
        }
        self.nodes
            .get_mut(id.key)
            .map(|n| &mut n.value)
            .ok_or(TreeError::StaleNode)
    }

    pub fn parent(&self, id: NodeId) -> Result<Option<NodeId>, TreeError> {
        Ok(self.live(id)?.parent.map(|k| self.id_of(k)))
    }

    /// A copy of the child list; editing it does not touch the tree.
    pub fn children(&self, id: NodeId) -> Result<Vec<NodeId>, TreeError> {
        Ok(self.live(id)?.children.iter().map(|&k| self.id_of(k)).collect())
    }

    /// Nodes without a parent, in arena order.
    pub fn roots(&self) -> impl Iterator<Item = NodeId> + '_ {
        self.nodes
            .iter()
            .filter(|(_, n)| n.parent.is_none())
            .map(move |(k, _)| self.id_of(k))
    }

    // Whether `ancestor` is `node` or lies on the parent chain above it.
    fn is_ancestor_or_self(&self, ancestor: DefaultKey, node: DefaultKey) -> bool {
        let mut cur = Some(node);
        while let Some(k) = cur {
            if k == ancestor {
                return true;
            }
            cur = self.nodes.get(k).and_then(|n| n.parent);
        }
        false
    }

    /// Move `child` under `new_parent`, or detach it with `None`.
    ///
    /// Re-setting the current parent is a no-op. Otherwise the child leaves
    /// its old parent's list and is appended to the new one. Placing a node
    /// under itself or one of its descendants fails with `WouldCycle` and
    /// changes nothing.
    pub fn set_parent(
        &mut self,
        child: NodeId,
        new_parent: Option<NodeId>,
    ) -> Result<NodeId, TreeError> {
        let current = self.live(child)?.parent;
        if let Some(p) = new_parent {
            self.live(p)?;
        }
        let new_key = new_parent.map(|p| p.key);
        if current == new_key {
            return Ok(child);
        }
        if let Some(p) = new_key {
            if self.is_ancestor_or_self(child.key, p) {
                return Err(TreeError::WouldCycle);
            }
        }

        if let Some(old) = current {
            let siblings = &mut self.nodes[old].children;
            if let Some(pos) = siblings.iter().position(|&k| k == child.key) {
                siblings.remove(pos);
            }
        }
        self.nodes[child.key].parent = new_key;
        if let Some(p) = new_key {
            self.nodes[p].children.push(child.key);
        }
        Ok(child)
    }

    pub fn add_child(&mut self, parent: NodeId, child: NodeId) -> Result<(), TreeError> {
        self.set_parent(child, Some(parent)).map(|_| ())
    }

    /// Detach `child` from `parent`. Fails with `NotAChild` when `child` is
    /// not currently one of `parent`'s children (compared by identity).
    pub fn remove_child(&mut self, parent: NodeId, child: NodeId) -> Result<(), TreeError> {
        let is_child = self.live(parent)?.children.contains(&child.key);
        self.live(child)?;
        if !is_child {
            return Err(TreeError::NotAChild);
        }
        self.set_parent(child, None).map(|_| ())
    }

    /// Size of the subtree rooted at `id`: itself plus all descendants.
    pub fn count(&self, id: NodeId) -> Result<usize, TreeError> {
        Ok(self.node(id)?.count())
    }

    /// Detach `id` from its parent and free it with all its descendants.
    /// Returns how many nodes were freed.
    pub fn remove_subtree(&mut self, id: NodeId) -> Result<usize, TreeError> {
        self.set_parent(id, None)?;
        let mut pending = vec![id.key];
        let mut freed = 0;
        while let Some(k) = pending.pop() {
            if let Some(n) = self.nodes.remove(k) {
                pending.extend(n.children);
                freed += 1;
            }
        }
        Ok(freed)
    }

    /// Borrowing view of `id`, used for navigation and search.
    pub fn node(&self, id: NodeId) -> Result<NodeRef<'_, T>, TreeError> {
        self.live(id)?;
        Ok(NodeRef { tree: self, id })
    }

    /// Assert parent/child symmetry and acyclicity.
    #[doc(hidden)]
    pub fn check_invariants(&self) {
        for (k, n) in &self.nodes {
            if let Some(p) = n.parent {
                let parent = self.nodes.get(p).expect("parent must be live");
                let hits = parent.children.iter().filter(|&&c| c == k).count();
                assert_eq!(hits, 1, "child must appear exactly once in its parent");
            }
            for &c in &n.children {
                let child = self.nodes.get(c).expect("child must be live");
                assert_eq!(child.parent, Some(k), "child's parent must point back");
            }
            let mut steps = 0;
            let mut cur = n.parent;
            while let Some(p) = cur {
                steps += 1;
                assert!(steps <= self.nodes.len(), "parent chain has a cycle");
                cur = self.nodes[p].parent;
            }
        }
    }
}

/// A node of a `PolyTree`, borrowed together with the tree it lives in.
/// Two refs are equal when they name the same node of the same tree.
pub struct NodeRef<'a, T> {
    tree: &'a PolyTree<T>,
    id: NodeId,
}

impl<T> Clone for NodeRef<'_, T> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<T> Copy for NodeRef<'_, T> {}

impl<T> PartialEq for NodeRef<'_, T> {
    fn eq(&self, other: &Self) -> bool {
        core::ptr::eq(self.tree, other.tree) && self.id == other.id
    }
}

impl<T> Eq for NodeRef<'_, T> {}

impl<'a, T> NodeRef<'a, T> {
    fn raw(&self) -> &'a PolyNode<T> {
        // A NodeRef is only built for a live id, and the shared borrow of
        // the tree keeps it live.
        let tree: &'a PolyTree<T> = self.tree;
        &tree.nodes[self.id.key]
    }

    pub fn id(&self) -> NodeId {
        self.id
    }

    pub fn value(&self) -> &'a T {
        &self.raw().value
    }

    pub fn parent(&self) -> Option<NodeRef<'a, T>> {
        let tree = self.tree;
        self.raw().parent.map(|k| NodeRef {
            tree,
            id: tree.id_of(k),
        })
    }

    pub fn children(&self) -> Vec<NodeRef<'a, T>> {
        let tree = self.tree;
        self.raw()
            .children
            .iter()
            .map(|&k| NodeRef {
                tree,
                id: tree.id_of(k),
            })
            .collect()
    }

    /// 1 for this node plus the counts of all its children.
    pub fn count(&self) -> usize {
        1 + self.children().iter().map(NodeRef::count).sum::<usize>()
    }
}

impl<T: fmt::Debug> fmt::Debug for NodeRef<'_, T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("NodeRef")
            .field("id", &self.id)
            .field("value", self.value())
            .finish()
    }
}

impl<'a, T> Searchable for NodeRef<'a, T> {
    type Value = T;

    fn value(&self) -> &T {
        NodeRef::value(self)
    }

    fn children(&self) -> Vec<Self> {
        NodeRef::children(self)
    }
}
