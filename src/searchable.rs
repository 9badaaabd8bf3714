//! Breadth- and depth-first search over anything that exposes a value and
//! an ordered list of children.
//!
//! Implementors supply [`Searchable::value`] and [`Searchable::children`];
//! the search methods come for free. `Self` is usually a cheap, copyable
//! view such as `&BstNode<T>` or a `NodeRef` into a `PolyTree`, so a search
//! hands back the matching node itself rather than a copy of its value.

use crate::error::TreeError;
use std::collections::VecDeque;

pub trait Searchable: Sized + Clone {
    type Value;

    fn value(&self) -> &Self::Value;

    /// Children in their stored order. Callers get their own `Vec`.
    fn children(&self) -> Vec<Self>;

    /// Depth-first, pre-order search. Nodes are matched by `predicate` when
    /// one is given, otherwise by value equality with `target`. Passing
    /// neither is a caller error.
    fn dfs_with(
        &self,
        target: Option<&Self::Value>,
        predicate: Option<&mut dyn FnMut(&Self) -> bool>,
    ) -> Result<Option<Self>, TreeError>
    where
        Self::Value: PartialEq,
    {
        match (predicate, target) {
            (Some(p), _) => Ok(self.dfs_by(p)),
            (None, Some(t)) => Ok(self.dfs(t)),
            (None, None) => Err(TreeError::MissingSearchCriterion),
        }
    }

    /// Breadth-first counterpart of [`Searchable::dfs_with`].
    fn bfs_with(
        &self,
        target: Option<&Self::Value>,
        predicate: Option<&mut dyn FnMut(&Self) -> bool>,
    ) -> Result<Option<Self>, TreeError>
    where
        Self::Value: PartialEq,
    {
        match (predicate, target) {
            (Some(p), _) => Ok(self.bfs_by(p)),
            (None, Some(t)) => Ok(self.bfs(t)),
            (None, None) => Err(TreeError::MissingSearchCriterion),
        }
    }

    /// Depth-first search for a node whose value equals `target`.
    fn dfs(&self, target: &Self::Value) -> Option<Self>
    where
        Self::Value: PartialEq,
    {
        self.dfs_by(|n: &Self| n.value() == target)
    }

    /// Breadth-first search for a node whose value equals `target`.
    fn bfs(&self, target: &Self::Value) -> Option<Self>
    where
        Self::Value: PartialEq,
    {
        self.bfs_by(|n: &Self| n.value() == target)
    }

    /// Pre-order: a node is tested before its children, and children are
    /// explored in order.
    fn dfs_by<F>(&self, mut predicate: F) -> Option<Self>
    where
        F: FnMut(&Self) -> bool,
    {
        dfs_walk(self, &mut predicate)
    }

    /// Level order, using a FIFO queue seeded with `self`.
    fn bfs_by<F>(&self, mut predicate: F) -> Option<Self>
    where
        F: FnMut(&Self) -> bool,
    {
        let mut queue = VecDeque::from([self.clone()]);
        while let Some(node) = queue.pop_front() {
            if predicate(&node) {
                return Some(node);
            }
            queue.extend(node.children());
        }
        None
    }
}

fn dfs_walk<N, F>(node: &N, predicate: &mut F) -> Option<N>
where
    N: Searchable,
    F: FnMut(&N) -> bool,
{
    if predicate(node) {
        return Some(node.clone());
    }
    node.children()
        .iter()
        .find_map(|child| dfs_walk(child, predicate))
}
