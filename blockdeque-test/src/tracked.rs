//! An element tracking its live instances.

use std::sync::atomic::{AtomicIsize, AtomicUsize, Ordering};

static LIVE: AtomicUsize = AtomicUsize::new(0);

//  Number of clones allowed before panicking, or negative if unlimited.
static CLONE_BUDGET: AtomicIsize = AtomicIsize::new(-1);

/// Tracked is an element type which counts its live instances globally.
///
/// Dropping an instance twice, or leaking one, is detected by checking `Tracked::live()` once all deques are gone.
///
/// #   Warning
///
/// The counters are global: tests using `Tracked` must not run concurrently with one another.
#[derive(Debug, PartialEq, Eq, PartialOrd, Ord)]
pub struct Tracked(i64);

impl Tracked {
    /// Creates an instance.
    pub fn new(value: i64) -> Self {
        LIVE.fetch_add(1, Ordering::Relaxed);
        Self(value)
    }

    /// Returns the value.
    pub fn value(&self) -> i64 { self.0 }

    /// Returns the number of live instances.
    pub fn live() -> usize { LIVE.load(Ordering::Relaxed) }

    /// Panics on clone once `clones` further clones were performed.
    pub fn panic_after_clones(clones: usize) {
        let budget = isize::try_from(clones).unwrap_or(isize::MAX);
        CLONE_BUDGET.store(budget, Ordering::Relaxed);
    }

    /// Never panics on clone.
    pub fn never_panic() { CLONE_BUDGET.store(-1, Ordering::Relaxed); }

    /// Resets all global state, for the start of a test.
    pub fn reset() {
        LIVE.store(0, Ordering::Relaxed);
        Self::never_panic();
    }
}

impl Clone for Tracked {
    fn clone(&self) -> Self {
        let budget = CLONE_BUDGET.load(Ordering::Relaxed);

        if budget == 0 {
            panic!("Tracked({}): clone budget exhausted", self.0);
        }

        if budget > 0 {
            CLONE_BUDGET.store(budget - 1, Ordering::Relaxed);
        }

        Self::new(self.0)
    }
}

impl Drop for Tracked {
    fn drop(&mut self) {
        let previous = LIVE.fetch_sub(1, Ordering::Relaxed);
        assert!(previous > 0, "Tracked({}) dropped more often than created", self.0);
    }
}
