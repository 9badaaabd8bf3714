//! Debug-only reentrancy guard for collections that call user code.
//!
//! `ChainedHashSet` and `DoublyLinkedList` run `K: Hash`/`T: PartialEq`
//! while walking buckets or links. If that code reaches back into the same
//! collection, it observes a structure that may be halfway through an
//! edit. In debug builds the guard turns that into a panic; in release
//! builds it compiles away.

use core::cell::Cell;
use core::marker::PhantomData;

/// Per-collection entry tracker. Public entry points take
/// `let _g = self.reentrancy.enter();` before touching storage.
#[derive(Debug)]
pub struct DebugReentrancy {
    #[cfg(debug_assertions)]
    depth: Cell<u32>,
    // Collections here are single-threaded; keep them !Send + !Sync.
    _nosend: PhantomData<*mut ()>,
}

impl DebugReentrancy {
    pub const fn new() -> Self {
        Self {
            #[cfg(debug_assertions)]
            depth: Cell::new(0),
            _nosend: PhantomData,
        }
    }

    /// Mark the collection as busy until the returned guard drops.
    ///
    /// Panics in debug builds if the collection is already busy.
    #[inline]
    pub fn enter(&self) -> ReentrancyGuard<'_> {
        #[cfg(debug_assertions)]
        {
            let d = self.depth.get();
            assert!(d == 0, "reentrancy detected: collection entered while busy");
            self.depth.set(d + 1);
            ReentrancyGuard { owner: self }
        }

        #[cfg(not(debug_assertions))]
        {
            ReentrancyGuard { _z: PhantomData }
        }
    }

    /// Whether a guard is currently held. Always `false` in release builds.
    #[inline]
    pub fn is_busy(&self) -> bool {
        #[cfg(debug_assertions)]
        {
            self.depth.get() > 0
        }

        #[cfg(not(debug_assertions))]
        {
            false
        }
    }
}

impl Default for DebugReentrancy {
    fn default() -> Self {
        Self::new()
    }
}

/// RAII guard returned by [`DebugReentrancy::enter`].
pub struct ReentrancyGuard<'a> {
    #[cfg(debug_assertions)]
    owner: &'a DebugReentrancy,
    #[cfg(not(debug_assertions))]
    _z: PhantomData<&'a ()>,
}

impl Drop for ReentrancyGuard<'_> {
    fn drop(&mut self) {
        #[cfg(debug_assertions)]
        {
            let d = self.owner.depth.get();
            debug_assert!(d > 0);
            self.owner.depth.set(d - 1);
        }
    }
}
