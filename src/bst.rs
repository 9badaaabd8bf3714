//! BinarySearchTree: unbalanced BST with owned children.
//!
//! Ordering rule: every value in a node's left subtree is `<=` the node's
//! value and every value in its right subtree is `>`. Equal values are
//! routed left on insert, so duplicates pile up in left subtrees and each
//! one counts as its own node.
//!
//! `insert` and `delete` rebuild the path they walk: each recursive step
//! takes a subtree by value and hands back its replacement. Deletion picks
//! one of four shapes for the matched node:
//!
//! 1. leaf: the slot becomes empty;
//! 2. left child only: the left child takes the slot;
//! 3. right child only: the right child takes the slot;
//! 4. two children: the in-order predecessor (rightmost node of the left
//!    subtree) is detached, its own left subtree is promoted into the gap
//!    it leaves, and it then takes the slot, adopting both subtrees.
//!
//! The tree is unbalanced, so sorted input degenerates into a list. Insert,
//! delete and the counting helpers recurse once per level and are bounded
//! by the thread's stack on such trees. Dropping a tree uses an explicit
//! stack and has no depth limit.

use crate::searchable::Searchable;
use std::cmp::Ordering;
use std::collections::VecDeque;

type Link<T> = Option<Box<BstNode<T>>>;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BstNode<T> {
    value: T,
    left: Link<T>,
    right: Link<T>,
}

impl<T> BstNode<T> {
    pub fn new(value: T) -> Self {
        Self {
            value,
            left: None,
            right: None,
        }
    }

    pub fn value(&self) -> &T {
        &self.value
    }

    pub fn left(&self) -> Option<&BstNode<T>> {
        self.left.as_deref()
    }

    pub fn right(&self) -> Option<&BstNode<T>> {
        self.right.as_deref()
    }

    pub fn is_leaf(&self) -> bool {
        self.left.is_none() && self.right.is_none()
    }

    /// Nodes in this subtree, including `self`. Recomputed on every call.
    pub fn count(&self) -> usize {
        1 + count(self.left()) + count(self.right())
    }
}

/// Node count of an optional subtree; an empty subtree counts as 0.
pub fn count<T>(node: Option<&BstNode<T>>) -> usize {
    node.map_or(0, BstNode::count)
}

/// Descend from `node` towards `value`. Returns the first node equal to
/// `value`, or `None` once the walk leaves the tree (including when `node`
/// is itself `None`).
pub fn find<'a, T: Ord>(node: Option<&'a BstNode<T>>, value: &T) -> Option<&'a BstNode<T>> {
    let n = node?;
    match value.cmp(&n.value) {
        Ordering::Equal => Some(n),
        Ordering::Less => find(n.left(), value),
        Ordering::Greater => find(n.right(), value),
    }
}

/// Range check over a subtree: every value must lie within `[min, max]`
/// as the walk narrows the bounds. Stops at the first violation.
pub fn valid_bst<T: Ord>(node: Option<&BstNode<T>>, min: Option<&T>, max: Option<&T>) -> bool {
    let Some(n) = node else {
        return true;
    };
    if min.is_some_and(|m| *m > n.value) || max.is_some_and(|m| *m < n.value) {
        return false;
    }
    valid_bst(n.left(), min, Some(&n.value)) && valid_bst(n.right(), Some(&n.value), max)
}

fn insert_node<T: Ord>(node: Link<T>, value: T) -> Box<BstNode<T>> {
    match node {
        None => Box::new(BstNode::new(value)),
        Some(mut n) => {
            if value <= n.value {
                n.left = Some(insert_node(n.left.take(), value));
            } else {
                n.right = Some(insert_node(n.right.take(), value));
            }
            n
        }
    }
}

fn delete_from<T: Ord>(node: Link<T>, value: &T) -> (Link<T>, Option<T>) {
    let Some(mut n) = node else {
        return (None, None);
    };
    match value.cmp(&n.value) {
        Ordering::Equal => {
            let (replacement, removed) = remove(n);
            (replacement, Some(removed))
        }
        Ordering::Less => {
            let (left, removed) = delete_from(n.left.take(), value);
            n.left = left;
            (Some(n), removed)
        }
        Ordering::Greater => {
            let (right, removed) = delete_from(n.right.take(), value);
            n.right = right;
            (Some(n), removed)
        }
    }
}

// Unhook `node` and return what fills its slot plus the removed value.
fn remove<T>(node: Box<BstNode<T>>) -> (Link<T>, T) {
    let BstNode { value, left, right } = *node;
    match (left, right) {
        (None, None) => (None, value),
        (Some(l), None) => (Some(l), value),
        (None, Some(r)) => (Some(r), value),
        (Some(l), Some(r)) => {
            let (rest, mut pred) = detach_max(l);
            pred.left = rest;
            pred.right = Some(r);
            (Some(pred), value)
        }
    }
}

// Split off the rightmost node of a subtree. Returns the remaining subtree
// and the detached node, which has no children left attached.
fn detach_max<T>(mut node: Box<BstNode<T>>) -> (Link<T>, Box<BstNode<T>>) {
    match node.right.take() {
        Some(r) => {
            let (rest, max) = detach_max(r);
            node.right = rest;
            (Some(node), max)
        }
        None => {
            // The maximum's left subtree is promoted into its old slot.
            let promoted = node.left.take();
            (promoted, node)
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BinarySearchTree<T> {
    root: Link<T>,
}

impl<T> Drop for BinarySearchTree<T> {
    fn drop(&mut self) {
        let mut pending: Vec<Box<BstNode<T>>> = self.root.take().into_iter().collect();
        while let Some(mut n) = pending.pop() {
            pending.extend(n.left.take());
            pending.extend(n.right.take());
        }
    }
}

impl<T> Default for BinarySearchTree<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> BinarySearchTree<T> {
    pub fn new() -> Self {
        Self { root: None }
    }

    pub fn root(&self) -> Option<&BstNode<T>> {
        self.root.as_deref()
    }

    pub fn is_empty(&self) -> bool {
        self.root.is_none()
    }

    /// Total node count, duplicates included. O(n).
    pub fn len(&self) -> usize {
        count(self.root())
    }

    /// Edges on the longest root-to-leaf path; `None` when empty.
    pub fn height(&self) -> Option<usize> {
        fn go<T>(n: &BstNode<T>) -> usize {
            let l = n.left().map_or(0, |c| 1 + go(c));
            let r = n.right().map_or(0, |c| 1 + go(c));
            l.max(r)
        }
        self.root().map(go)
    }

    pub fn min(&self) -> Option<&T> {
        let mut n = self.root()?;
        while let Some(l) = n.left() {
            n = l;
        }
        Some(&n.value)
    }

    pub fn max(&self) -> Option<&T> {
        let mut n = self.root()?;
        while let Some(r) = n.right() {
            n = r;
        }
        Some(&n.value)
    }

    /// Sorted traversal (left, node, right).
    pub fn in_order(&self) -> InOrder<'_, T> {
        let mut it = InOrder { stack: Vec::new() };
        it.push_left_spine(self.root());
        it
    }

    /// Node before its children, left before right.
    pub fn pre_order(&self) -> PreOrder<'_, T> {
        PreOrder {
            stack: self.root().into_iter().collect(),
        }
    }

    /// Children before their node, left before right.
    pub fn post_order(&self) -> Vec<&T> {
        let mut out = Vec::new();
        let mut stack: Vec<&BstNode<T>> = self.root().into_iter().collect();
        while let Some(n) = stack.pop() {
            out.push(&n.value);
            stack.extend(n.left());
            stack.extend(n.right());
        }
        out.reverse();
        out
    }

    /// Breadth-first, left to right within each level.
    pub fn level_order(&self) -> Vec<&T> {
        let mut out = Vec::new();
        let mut queue: VecDeque<&BstNode<T>> = self.root().into_iter().collect();
        while let Some(n) = queue.pop_front() {
            out.push(&n.value);
            queue.extend(n.left());
            queue.extend(n.right());
        }
        out
    }
}

impl<T: Ord> BinarySearchTree<T> {
    pub fn insert(&mut self, value: T) {
        self.root = Some(insert_node(self.root.take(), value));
    }

    pub fn find(&self, value: &T) -> Option<&BstNode<T>> {
        find(self.root(), value)
    }

    pub fn contains(&self, value: &T) -> bool {
        self.find(value).is_some()
    }

    /// Remove one node equal to `value` and return its value. A missing
    /// value leaves the tree untouched.
    pub fn delete(&mut self, value: &T) -> Option<T> {
        let (root, removed) = delete_from(self.root.take(), value);
        self.root = root;
        removed
    }

    /// Whole-tree form of [`valid_bst`].
    pub fn is_valid(&self) -> bool {
        valid_bst(self.root(), None, None)
    }

    /// Assert the strict ordering rule (`left <= node < right`).
    #[doc(hidden)]
    pub fn check_invariants(&self) {
        fn go<'a, T: Ord>(n: &'a BstNode<T>, lo: Option<&'a T>, hi: Option<&'a T>) {
            if let Some(lo) = lo {
                assert!(n.value > *lo, "right-subtree value not greater than ancestor");
            }
            if let Some(hi) = hi {
                assert!(n.value <= *hi, "left-subtree value greater than ancestor");
            }
            if let Some(l) = n.left() {
                go(l, lo, Some(&n.value));
            }
            if let Some(r) = n.right() {
                go(r, Some(&n.value), hi);
            }
        }
        if let Some(root) = self.root() {
            go(root, None, None);
        }
    }
}

impl<T: Ord> Extend<T> for BinarySearchTree<T> {
    fn extend<I: IntoIterator<Item = T>>(&mut self, iter: I) {
        for v in iter {
            self.insert(v);
        }
    }
}

impl<T: Ord> FromIterator<T> for BinarySearchTree<T> {
    fn from_iter<I: IntoIterator<Item = T>>(iter: I) -> Self {
        let mut tree = Self::new();
        tree.extend(iter);
        tree
    }
}

/// In-order iterator driven by an explicit stack of pending ancestors.
pub struct InOrder<'a, T> {
    stack: Vec<&'a BstNode<T>>,
}

impl<'a, T> InOrder<'a, T> {
    fn push_left_spine(&mut self, mut node: Option<&'a BstNode<T>>) {
        while let Some(n) = node {
            self.stack.push(n);
            node = n.left();
        }
    }
}

impl<'a, T> Iterator for InOrder<'a, T> {
    type Item = &'a T;

    fn next(&mut self) -> Option<Self::Item> {
        let n = self.stack.pop()?;
        self.push_left_spine(n.right());
        Some(&n.value)
    }
}

/// Pre-order iterator; right children wait on the stack under left ones.
pub struct PreOrder<'a, T> {
    stack: Vec<&'a BstNode<T>>,
}

impl<'a, T> Iterator for PreOrder<'a, T> {
    type Item = &'a T;

    fn next(&mut self) -> Option<Self::Item> {
        let n = self.stack.pop()?;
        self.stack.extend(n.right());
        self.stack.extend(n.left());
        Some(&n.value)
    }
}

// BST nodes expose left then right as their children, so BFS/DFS apply.
impl<'a, T> Searchable for &'a BstNode<T> {
    type Value = T;

    fn value(&self) -> &T {
        &self.value
    }

    fn children(&self) -> Vec<Self> {
        let node: &'a BstNode<T> = *self;
        node.left().into_iter().chain(node.right()).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    //         5
    //       /   \
    //      2      7
    //     / \    /  \
    //    1   3  6    9
    //              /  \
    //             8    10
    //                   \
    //                   13
    fn sample() -> BinarySearchTree<i32> {
        [5, 2, 7, 9, 1, 8, 3, 10, 13, 6].into_iter().collect()
    }

    /// Invariant: insertion order fixes the shape; `find` reports children.
    #[test]
    fn find_reports_children() {
        let tree = sample();
        let seven = tree.find(&7).expect("7 present");
        assert_eq!(seven.left().map(BstNode::value), Some(&6));
        assert_eq!(seven.right().map(BstNode::value), Some(&9));
        let ten = tree.find(&10).expect("10 present");
        assert!(ten.left().is_none());
        assert_eq!(ten.right().map(BstNode::value), Some(&13));
        assert!(tree.find(&4).is_none());
        assert!(tree.is_valid());
        tree.check_invariants();
    }

    /// Invariant: `find` on an empty tree is `None`, not a panic.
    #[test]
    fn find_on_empty_tree() {
        let tree: BinarySearchTree<i32> = BinarySearchTree::new();
        assert!(tree.find(&1).is_none());
        assert!(find::<i32>(None, &1).is_none());
        assert_eq!(tree.len(), 0);
        assert_eq!(count::<i32>(None), 0);
        assert_eq!(tree.height(), None);
    }

    /// Invariant: deleting a node with one child splices the child in.
    #[test]
    fn delete_single_child_node() {
        let mut tree = sample();
        assert_eq!(tree.delete(&10), Some(10));
        assert!(tree.find(&10).is_none());
        assert_eq!(tree.find(&9).and_then(BstNode::right).map(BstNode::value), Some(&13));
        assert_eq!(tree.root().map(BstNode::count), Some(9));
        tree.insert(6);
        assert_eq!(tree.len(), 10);
        tree.check_invariants();
    }

    /// Invariant: deleting a leaf clears its parent's slot.
    #[test]
    fn delete_leaf() {
        let mut tree = sample();
        assert_eq!(tree.delete(&13), Some(13));
        assert!(tree.find(&10).map(BstNode::is_leaf).unwrap_or(false));
        assert_eq!(tree.len(), 9);
        tree.check_invariants();
    }

    /// Invariant: a two-child node is replaced by the maximum of its left
    /// subtree, which adopts both subtrees.
    #[test]
    fn delete_two_children_uses_predecessor() {
        let mut tree = sample();
        assert_eq!(tree.delete(&7), Some(7));
        let six = tree.find(&6).expect("predecessor moved up");
        assert!(six.left().is_none());
        assert_eq!(six.right().map(BstNode::value), Some(&9));
        assert_eq!(tree.find(&5).and_then(BstNode::right).map(BstNode::value), Some(&6));

        assert_eq!(tree.delete(&5), Some(5));
        let root = tree.root().expect("tree not empty");
        assert_eq!(root.value(), &3);
        assert_eq!(root.left().map(BstNode::value), Some(&2));
        assert_eq!(root.right().map(BstNode::value), Some(&6));
        assert!(tree.is_valid());
        tree.check_invariants();
    }

    /// Invariant: when the predecessor has a left subtree, that subtree is
    /// promoted into the predecessor's old position.
    #[test]
    fn delete_two_children_promotes_predecessor_left() {
        //        10
        //       /  \
        //      4    12
        //       \
        //        8
        //       /
        //      6
        let mut tree: BinarySearchTree<i32> = [10, 4, 12, 8, 6].into_iter().collect();
        tree.delete(&10);
        let root = tree.root().expect("root");
        assert_eq!(root.value(), &8);
        let four = root.left().expect("left");
        assert_eq!(four.value(), &4);
        assert_eq!(four.right().map(BstNode::value), Some(&6));
        assert_eq!(root.right().map(BstNode::value), Some(&12));
        assert_eq!(tree.len(), 4);
        tree.check_invariants();
    }

    /// Invariant: when the left child itself is the predecessor it moves up
    /// and keeps its own left subtree.
    #[test]
    fn delete_two_children_left_child_is_predecessor() {
        let mut tree: BinarySearchTree<i32> = [10, 5, 15, 3].into_iter().collect();
        tree.delete(&10);
        let root = tree.root().expect("root");
        assert_eq!(root.value(), &5);
        assert_eq!(root.left().map(BstNode::value), Some(&3));
        assert_eq!(root.right().map(BstNode::value), Some(&15));
        assert_eq!(tree.len(), 3);
    }

    /// Invariant: duplicates go left and are deleted one at a time.
    #[test]
    fn duplicates_route_left() {
        let mut tree: BinarySearchTree<i32> = [5, 5, 5].into_iter().collect();
        assert_eq!(tree.len(), 3);
        let root = tree.root().expect("root");
        assert_eq!(root.left().map(BstNode::value), Some(&5));
        assert!(root.right().is_none());
        assert_eq!(tree.delete(&5), Some(5));
        assert_eq!(tree.len(), 2);
        assert!(tree.contains(&5));
        tree.check_invariants();
    }

    /// Invariant: deleting a missing value leaves the tree unchanged.
    #[test]
    fn delete_missing_is_noop() {
        let mut tree = sample();
        let before = tree.clone();
        assert_eq!(tree.delete(&42), None);
        assert_eq!(tree, before);
        let mut empty: BinarySearchTree<i32> = BinarySearchTree::new();
        assert_eq!(empty.delete(&1), None);
        assert!(empty.is_empty());
    }

    /// Invariant: the range oracle rejects a hand-built out-of-order tree.
    #[test]
    fn valid_bst_rejects_violation() {
        let mut bad = BstNode::new(5);
        let mut left = BstNode::new(2);
        left.right = Some(Box::new(BstNode::new(9)));
        bad.left = Some(Box::new(left));
        assert!(!valid_bst(Some(&bad), None, None));
        assert!(valid_bst(sample().root(), None, None));
    }

    /// Invariant: traversals follow their textbook orders.
    #[test]
    fn traversal_orders() {
        let tree = sample();
        let in_order: Vec<i32> = tree.in_order().copied().collect();
        assert_eq!(in_order, vec![1, 2, 3, 5, 6, 7, 8, 9, 10, 13]);
        let pre: Vec<i32> = tree.pre_order().copied().collect();
        assert_eq!(pre, vec![5, 2, 1, 3, 7, 6, 9, 8, 10, 13]);
        let post: Vec<i32> = tree.post_order().into_iter().copied().collect();
        assert_eq!(post, vec![1, 3, 2, 6, 8, 13, 10, 9, 7, 5]);
        let level: Vec<i32> = tree.level_order().into_iter().copied().collect();
        assert_eq!(level, vec![5, 2, 7, 1, 3, 6, 9, 8, 10, 13]);
    }

    /// Invariant: min, max and height follow the tree shape.
    #[test]
    fn extremes_and_height() {
        let tree = sample();
        assert_eq!(tree.min(), Some(&1));
        assert_eq!(tree.max(), Some(&13));
        assert_eq!(tree.height(), Some(4));
        let single: BinarySearchTree<i32> = [1].into_iter().collect();
        assert_eq!(single.height(), Some(0));
    }

    /// Invariant: BST nodes are searchable; BFS and DFS return the same node.
    #[test]
    fn bst_nodes_are_searchable() {
        let tree = sample();
        let root = tree.root().expect("root");
        let by_bfs = root.bfs(&8).expect("8 present");
        let by_dfs = root.dfs(&8).expect("8 present");
        assert!(std::ptr::eq(by_bfs, by_dfs));
        assert!(root.bfs(&4).is_none());
        let first_even_dfs = root.dfs_by(|n| n.value % 2 == 0).expect("evens exist");
        assert_eq!(first_even_dfs.value, 2);
    }

    /// Invariant: dropping a fully degenerate tree does not recurse per
    /// level.
    #[test]
    fn deep_spine_drops_without_recursion() {
        let n = 200_000u32;
        let mut link: Link<u32> = None;
        for v in (0..n).rev() {
            let mut node = Box::new(BstNode::new(v));
            node.right = link;
            link = Some(node);
        }
        let tree = BinarySearchTree { root: link };
        assert_eq!(tree.min(), Some(&0));
        assert_eq!(tree.max(), Some(&(n - 1)));
        assert_eq!(tree.in_order().count(), n as usize);
        drop(tree);
    }
}
