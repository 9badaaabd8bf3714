//! Process-unique tags binding handles to the container that minted them.
//!
//! Slot keys alone only identify a slot within one arena: two arenas hand
//! out identical keys for their first insert. Handles therefore carry the
//! tag of their container, and every lookup checks it before touching the
//! arena, so a handle from another container never resolves.

use core::sync::atomic::{AtomicU64, Ordering};

#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash)]
pub(crate) struct OwnerTag(u64);

impl OwnerTag {
    /// A tag no other container in this process has been given.
    pub(crate) fn fresh() -> Self {
        static NEXT: AtomicU64 = AtomicU64::new(0);
        Self(NEXT.fetch_add(1, Ordering::Relaxed))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Invariant: fresh tags never repeat.
    #[test]
    fn fresh_tags_are_distinct() {
        let a = OwnerTag::fresh();
        let b = OwnerTag::fresh();
        assert_ne!(a, b);
        assert_eq!(a, a);
    }
}
