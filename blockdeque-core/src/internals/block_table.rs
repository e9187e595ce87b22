//! Block Table
//!
//! The Block Table is the indirection layer of a deque: an array of exclusively owned Blocks, itself allocated from
//! the Platform.
//!
//! Growing the table only ever relocates the Block pointers into a larger array; the Blocks, and the elements they
//! contain, are left where they are.

use core::{
    alloc::Layout,
    ptr::{self, NonNull},
};

use crate::{Configuration, Error, Platform, Position, Properties};

use super::block::Block;

/// Side of the table to grow toward.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) enum Side {
    Front,
    Back,
}

/// BlockTable.
///
/// The table does not release its blocks on drop, as it does not own the Platform they were allocated from: its owner
/// must call `release` instead.
pub(crate) struct BlockTable<T> {
    blocks: NonNull<Block<T>>,
    len: usize,
}

impl<T> BlockTable<T> {
    /// Allocates a table of `len` fresh blocks.
    ///
    /// On failure, any memory allocated in the process is released prior to returning.
    pub(crate) fn allocate<C, P>(platform: &P, len: usize) -> Result<Self, Error>
        where
            C: Configuration,
            P: Platform,
    {
        debug_assert!(len > 0);

        let blocks = Self::allocate_table::<C, P>(platform, len)?;

        //  Safety:
        //  -   `blocks` has room for `len` entries.
        if let Err(error) = unsafe { Self::fill::<C, P>(platform, blocks, 0..len) } {
            //  Safety:
            //  -   `blocks` was allocated with this very layout, and all its blocks were released by `fill`.
            unsafe { Self::deallocate_table::<C, P>(platform, blocks, len) };
            return Err(error);
        }

        Ok(Self { blocks, len })
    }

    /// Releases all the blocks, and the table itself.
    ///
    /// The table is left empty, and subsequent calls are no-ops.
    ///
    /// #   Safety
    ///
    /// -   Assumes that the table was allocated from `platform`, with the same configuration `C`.
    /// -   Assumes that no slot of any block holds a live element any longer.
    pub(crate) unsafe fn release<C, P>(&mut self, platform: &P)
        where
            C: Configuration,
            P: Platform,
    {
        if self.len == 0 {
            return;
        }

        let layout = Self::block_layout::<C>();

        for index in 0..self.len {
            self.block(index).deallocate(platform, layout);
        }

        Self::deallocate_table::<C, P>(platform, self.blocks, self.len);

        log::trace!("released block table of {} blocks", self.len);

        self.blocks = NonNull::dangling();
        self.len = 0;
    }

    /// Returns the number of blocks.
    pub(crate) fn len(&self) -> usize { self.len }

    /// Returns a pointer to the slot at `position`.
    ///
    /// #   Safety
    ///
    /// -   Assumes that `position.block()` is less than `self.len()`.
    /// -   Assumes that `position.offset()` is less than the block capacity.
    pub(crate) unsafe fn slot(&self, position: Position) -> NonNull<T> {
        debug_assert!(position.block() < self.len, "{:?} not within {} blocks", position, self.len);

        self.block(position.block()).slot(position.offset())
    }

    /// Doubles the number of blocks, adding the fresh blocks on `side`.
    ///
    /// Returns the number of blocks every existing block was shifted by, that is the number of blocks added at the
    /// front.
    ///
    /// On failure, any memory allocated in the process is released prior to returning, and the table is unchanged.
    pub(crate) fn grow<C, P>(&mut self, platform: &P, side: Side) -> Result<usize, Error>
        where
            C: Configuration,
            P: Platform,
    {
        let old_len = self.len;
        let new_len = old_len.checked_mul(2).ok_or(Error::CapacityOverflow)?;

        let blocks = Self::allocate_table::<C, P>(platform, new_len)?;

        let (fresh, kept) = match side {
            Side::Front => (0..old_len, old_len),
            Side::Back => (old_len..new_len, 0),
        };

        //  Safety:
        //  -   `blocks` has room for `new_len` entries, and `fresh` is within `0..new_len`.
        if let Err(error) = unsafe { Self::fill::<C, P>(platform, blocks, fresh) } {
            //  Safety:
            //  -   `blocks` was allocated with this very layout, and all its blocks were released by `fill`.
            unsafe { Self::deallocate_table::<C, P>(platform, blocks, new_len) };
            return Err(error);
        }

        //  Safety:
        //  -   `self.blocks` contains `old_len` entries.
        //  -   `blocks` has room for `new_len` entries, and `kept + old_len <= new_len`.
        //  -   Both tables are distinct allocations.
        unsafe {
            ptr::copy_nonoverlapping(self.blocks.as_ptr(), blocks.as_ptr().add(kept), old_len);
            Self::deallocate_table::<C, P>(platform, self.blocks, old_len);
        }

        self.blocks = blocks;
        self.len = new_len;

        log::debug!("grew block table toward the {:?}: {} -> {} blocks", side, old_len, new_len);

        Ok(kept)
    }

    //  Returns the block at `index`.
    //
    //  Safety:
    //  -   Assumes that `index` is less than `self.len`.
    unsafe fn block(&self, index: usize) -> Block<T> { *self.blocks.as_ptr().add(index) }

    fn block_layout<C: Configuration>() -> Layout {
        //  A table cannot be allocated unless the block layout is valid, see `allocate_table`.
        Properties::<C>::block_layout::<T>().unwrap_or_else(Layout::new::<()>)
    }

    fn allocate_table<C, P>(platform: &P, len: usize) -> Result<NonNull<Block<T>>, Error>
        where
            C: Configuration,
            P: Platform,
    {
        Properties::<C>::block_layout::<T>().ok_or(Error::CapacityOverflow)?;

        let layout = Properties::<C>::table_layout::<T>(len).ok_or(Error::CapacityOverflow)?;

        Block::<Block<T>>::allocate(platform, layout).map(|table| {
            //  Safety:
            //  -   0 is within any table.
            unsafe { table.slot(0) }
        })
    }

    //  Safety:
    //  -   Assumes that `blocks` was allocated by `allocate_table`, from `platform`, with `len` entries.
    //  -   Assumes that the blocks it references are either released, or owned elsewhere.
    unsafe fn deallocate_table<C, P>(platform: &P, blocks: NonNull<Block<T>>, len: usize)
        where
            C: Configuration,
            P: Platform,
    {
        //  The layout was computed successfully at allocation time.
        if let Some(layout) = Properties::<C>::table_layout::<T>(len) {
            Block::<Block<T>>::from_raw(blocks).deallocate(platform, layout);
        }
    }

    //  Allocates a fresh block into each entry of `range`.
    //
    //  On failure, the blocks allocated so far are released.
    //
    //  Safety:
    //  -   Assumes that `range` is within the table pointed to by `blocks`.
    unsafe fn fill<C, P>(platform: &P, blocks: NonNull<Block<T>>, range: core::ops::Range<usize>) -> Result<(), Error>
        where
            C: Configuration,
            P: Platform,
    {
        let layout = Self::block_layout::<C>();

        for index in range.clone() {
            match Block::allocate(platform, layout) {
                Ok(block) => ptr::write(blocks.as_ptr().add(index), block),
                Err(error) => {
                    for allocated in range.start..index {
                        ptr::read(blocks.as_ptr().add(allocated)).deallocate(platform, layout);
                    }
                    return Err(error);
                },
            }
        }

        Ok(())
    }
}
