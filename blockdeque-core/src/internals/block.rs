//! Storage Block
//!
//! A Block is a region of raw, uninitialized, memory with room for a fixed number of elements.
//!
//! Note: Blocks never construct nor destruct elements; whoever owns the block is in charge of tracking which slots
//! hold live elements.

use core::{
    alloc::Layout,
    ptr::NonNull,
};

use crate::{Error, Platform};

/// Block.
///
/// A Block points to the first slot of a region of memory obtained from a Platform.
#[repr(transparent)]
pub(crate) struct Block<T>(NonNull<T>);

impl<T> Block<T> {
    /// Creates a block from a pointer previously obtained from `allocate`.
    ///
    /// #   Safety
    ///
    /// -   Assumes that `pointer` was obtained from `Block::allocate`, and is not owned by another Block.
    pub(crate) unsafe fn from_raw(pointer: NonNull<T>) -> Self { Self(pointer) }

    /// Allocates a block as per `layout`, from `platform`.
    ///
    /// Zero-sized layouts do not reach the platform, and are satisfied with a dangling, well-aligned, pointer.
    pub(crate) fn allocate<P: Platform>(platform: &P, layout: Layout) -> Result<Self, Error> {
        if layout.size() == 0 {
            return Ok(Self(NonNull::dangling()));
        }

        //  Safety:
        //  -   `layout.size()` is non-zero.
        match unsafe { platform.allocate(layout) } {
            Some(pointer) => Ok(Self(pointer.cast())),
            None => {
                log::warn!("platform refused to allocate {} bytes", layout.size());
                Err(Error::AllocationFailure { layout })
            },
        }
    }

    /// Deallocates the block.
    ///
    /// #   Safety
    ///
    /// -   Assumes that the block was allocated from `platform`, with `layout`.
    /// -   Assumes that no slot of the block holds a live element any longer.
    pub(crate) unsafe fn deallocate<P: Platform>(self, platform: &P, layout: Layout) {
        if layout.size() == 0 {
            return;
        }

        platform.deallocate(self.0.cast(), layout);
    }

    /// Returns a pointer to the slot at `offset`.
    ///
    /// #   Safety
    ///
    /// -   Assumes that `offset` is less than the capacity of the block.
    pub(crate) unsafe fn slot(&self, offset: usize) -> NonNull<T> {
        //  Safety:
        //  -   `offset` is within the block, hence the result is within the same allocation.
        NonNull::new_unchecked(self.0.as_ptr().add(offset))
    }
}

impl<T> Clone for Block<T> {
    fn clone(&self) -> Self { *self }
}

impl<T> Copy for Block<T> {}
