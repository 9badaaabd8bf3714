//! Precondition failures for the tree types.
//!
//! Lookups that come up empty are not errors; they return `None` or
//! `false`. These variants cover caller misuse only.

use thiserror::Error;

#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum TreeError {
    #[error("tried to remove a node that isn't a child")]
    NotAChild,
    #[error("search needs a target value or a predicate")]
    MissingSearchCriterion,
    #[error("node id does not refer to a live node in this tree")]
    StaleNode,
    #[error("reparenting would make a node its own ancestor")]
    WouldCycle,
}
