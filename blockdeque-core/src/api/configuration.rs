//! The configuration of blockdeque-core.
//!
//! The Configuration selects the capacity of the storage blocks of a deque. Larger blocks mean fewer growth events
//! and a smaller block table, at the cost of a larger minimum footprint.

use core::{
    alloc::Layout,
    ptr::NonNull,
};

use super::PowerOf2;

/// Configuration
///
/// The Configuration instance allows adjusting the capacity of storage blocks.
pub trait Configuration {
    /// The number of elements each storage block can hold.
    const BLOCK_CAPACITY: PowerOf2;
}

/// Properties
///
/// Properties of a given Configuration.
///
/// Work-around for the inability to implement static methods directly on a trait.
pub struct Properties<C>(C);

impl<C> Properties<C>
    where
        C: Configuration
{
    /// Returns the number of elements a storage block can hold.
    pub fn block_capacity() -> usize { C::BLOCK_CAPACITY.value() }

    /// Returns the layout of a storage block of `T`, if it does not overflow.
    ///
    /// The layout of a storage block of a zero-sized `T` is zero-sized.
    pub fn block_layout<T>() -> Option<Layout> { Layout::array::<T>(C::BLOCK_CAPACITY.value()).ok() }

    /// Returns the layout of a block table of `blocks` entries, if it does not overflow.
    pub fn table_layout<T>(blocks: usize) -> Option<Layout> { Layout::array::<NonNull<T>>(blocks).ok() }

    /// Returns the number of blocks to allocate upfront for `capacity` elements.
    ///
    /// There is always at least one block, and always room for `capacity` elements plus one, so that a deque
    /// constructed with a given capacity can be filled without growing.
    pub fn initial_blocks(capacity: usize) -> usize { capacity / C::BLOCK_CAPACITY + 1 }
}
