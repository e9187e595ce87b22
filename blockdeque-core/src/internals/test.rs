//! Test utilities.

use core::{
    alloc::Layout,
    cell::Cell,
    ptr::NonNull,
};

use std::rc::Rc;

use blockdeque_test::FailingPlatform;

use crate::{BlockDeque, Configuration, Platform, PowerOf2};

/// Configuration with tiny blocks, to cross block boundaries with a handful of elements.
pub(crate) struct TestConfiguration;

impl Configuration for TestConfiguration {
    const BLOCK_CAPACITY: PowerOf2 = unsafe { PowerOf2::new_unchecked(4) };
}

/// Deque using the test configuration and platform.
pub(crate) type TestDeque<'a, T> = BlockDeque<T, TestConfiguration, &'a FailingPlatform>;

//  `blockdeque-test` implements the `Platform` of the regular build of this crate, a distinct trait from this one.
impl Platform for FailingPlatform {
    unsafe fn allocate(&self, layout: Layout) -> Option<NonNull<u8>> { FailingPlatform::allocate(self, layout) }

    unsafe fn deallocate(&self, pointer: NonNull<u8>, layout: Layout) {
        FailingPlatform::deallocate(self, pointer, layout)
    }
}

/// Element counting its drops, and optionally panicking when cloned.
#[derive(Debug)]
pub(crate) struct Counted {
    value: i32,
    drops: Rc<Cell<usize>>,
    clones: Rc<Cell<Option<usize>>>,
}

impl Counted {
    /// Creates an instance, which never panics on clone.
    pub(crate) fn new(value: i32, drops: &Rc<Cell<usize>>) -> Self {
        Self { value, drops: drops.clone(), clones: Rc::new(Cell::new(None)) }
    }

    /// Creates an instance, panicking on clone once `clones` clones were performed, among itself and its clones.
    pub(crate) fn panicking(value: i32, drops: &Rc<Cell<usize>>, clones: usize) -> Self {
        Self { value, drops: drops.clone(), clones: Rc::new(Cell::new(Some(clones))) }
    }

    /// Returns the value.
    pub(crate) fn value(&self) -> i32 { self.value }
}

impl Clone for Counted {
    fn clone(&self) -> Self {
        if let Some(remaining) = self.clones.get() {
            assert!(remaining > 0, "Clone budget exhausted");
            self.clones.set(Some(remaining - 1));
        }

        Self { value: self.value, drops: self.drops.clone(), clones: self.clones.clone() }
    }
}

impl Drop for Counted {
    fn drop(&mut self) { self.drops.set(self.drops.get() + 1); }
}

impl PartialEq for Counted {
    fn eq(&self, other: &Self) -> bool { self.value == other.value }
}
