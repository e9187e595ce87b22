//! A Platform for fault injection.

use std::{
    alloc::{self, Layout},
    cell::Cell,
    ptr::NonNull,
};

use blockdeque_core::Platform;

/// FailingPlatform is a Platform backed by the global allocator, which:
///
/// -   Tracks the number of allocations, and outstanding allocations, to detect leaks and double-frees.
/// -   Can be instructed to fail after a given number of successful allocations.
///
/// Deques are meant to borrow it, as `&FailingPlatform` is itself a Platform, so that the test can observe and
/// control it while the deque is alive.
#[derive(Debug, Default)]
pub struct FailingPlatform {
    allocations: Cell<usize>,
    outstanding: Cell<usize>,
    budget: Cell<Option<usize>>,
}

impl FailingPlatform {
    /// Creates an instance, which never fails.
    pub fn new() -> Self { Self::default() }

    /// Returns the number of successful allocations, overall.
    pub fn allocations(&self) -> usize { self.allocations.get() }

    /// Returns the number of allocations not yet deallocated.
    pub fn outstanding(&self) -> usize { self.outstanding.get() }

    /// Fails all allocations after the next `successes` ones.
    pub fn fail_after(&self, successes: usize) { self.budget.set(Some(successes)); }

    /// Fails all allocations from now on.
    pub fn fail_always(&self) { self.fail_after(0); }

    /// Stops failing allocations.
    pub fn fail_never(&self) { self.budget.set(None); }

    /// Allocates from the global allocator, unless the budget is exhausted.
    ///
    /// #   Safety
    ///
    /// -   Assumes that `layout.size()` is non-zero.
    pub unsafe fn allocate(&self, layout: Layout) -> Option<NonNull<u8>> {
        if let Some(budget) = self.budget.get() {
            if budget == 0 {
                return None;
            }

            self.budget.set(Some(budget - 1));
        }

        //  Safety:
        //  -   `layout.size()` is non-zero, as per pre-conditions.
        let pointer = NonNull::new(alloc::alloc(layout))?;

        self.allocations.set(self.allocations.get() + 1);
        self.outstanding.set(self.outstanding.get() + 1);

        Some(pointer)
    }

    /// Deallocates to the global allocator.
    ///
    /// #   Safety
    ///
    /// -   Assumes that `pointer` was allocated by `allocate`, with `layout`.
    pub unsafe fn deallocate(&self, pointer: NonNull<u8>, layout: Layout) {
        let outstanding = self.outstanding.get();
        assert!(outstanding > 0, "Deallocating {:x} without any outstanding allocation", pointer.as_ptr() as usize);

        self.outstanding.set(outstanding - 1);

        //  Safety:
        //  -   `pointer` was allocated by `allocate`, with `layout`, as per pre-conditions.
        alloc::dealloc(pointer.as_ptr(), layout);
    }
}

impl Platform for FailingPlatform {
    unsafe fn allocate(&self, layout: Layout) -> Option<NonNull<u8>> { FailingPlatform::allocate(self, layout) }

    unsafe fn deallocate(&self, pointer: NonNull<u8>, layout: Layout) {
        FailingPlatform::deallocate(self, pointer, layout)
    }
}
