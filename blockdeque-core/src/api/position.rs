//! Position of a slot within a block table.

use super::PowerOf2;

/// Position
///
/// The address of a slot: the index of its block within the block table, and its offset within the block.
///
/// Positions are ordered lexicographically on `(block, offset)`, which matches the logical order of slots as long as
/// `offset` is less than the block capacity.
///
/// All arithmetic is performed relative to a block capacity, which must be the one of the deque the position belongs
/// to. A Position is _detached_: it does not borrow its deque, and it is invalidated by any operation which grows the
/// deque at the front, as such operations shift blocks within the table.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Position {
    block: usize,
    offset: usize,
}

impl Position {
    /// Creates an instance.
    pub const fn new(block: usize, offset: usize) -> Self { Self { block, offset } }

    /// Returns the index of the block, within the table.
    pub const fn block(&self) -> usize { self.block }

    /// Returns the offset of the slot, within the block.
    pub const fn offset(&self) -> usize { self.offset }

    /// Returns the position `n` slots after this one.
    ///
    /// Crosses as many block boundaries as necessary, in O(1).
    pub fn advance(self, n: usize, capacity: PowerOf2) -> Self {
        debug_assert!(self.offset < capacity.value());

        if self.offset + n < capacity.value() {
            return Self::new(self.block, self.offset + n);
        }

        //  Steps remaining once the current block is exhausted, at least 1.
        let remaining = n - (capacity.last() - self.offset);

        Self::new(self.block + (remaining - 1) / capacity + 1, (remaining - 1) % capacity)
    }

    /// Returns the position `n` slots before this one.
    ///
    /// Crosses as many block boundaries as necessary, in O(1).
    ///
    /// #   Panics
    ///
    /// If the resulting position would precede the first slot of the table.
    pub fn retreat(self, n: usize, capacity: PowerOf2) -> Self {
        debug_assert!(self.offset < capacity.value());

        if self.offset >= n {
            return Self::new(self.block, self.offset - n);
        }

        //  Steps remaining once the start of the current block is reached, at least 1.
        let remaining = n - self.offset;
        let blocks = (remaining - 1) / capacity + 1;

        assert!(blocks <= self.block, "Cannot retreat {} slots from {:?}", n, self);

        Self::new(self.block - blocks, capacity.last() - (remaining - 1) % capacity)
    }

    /// Returns the position `n` slots away from this one, after it if `n` is positive and before if negative.
    pub fn offset_by(self, n: isize, capacity: PowerOf2) -> Self {
        if n < 0 {
            self.retreat(n.unsigned_abs(), capacity)
        } else {
            self.advance(n as usize, capacity)
        }
    }

    /// Returns the signed number of slots from `other` to `self`.
    ///
    /// The result is positive if `self` is after `other`, and is exactly the number of single-slot steps required to
    /// move from the lesser of the two to the greater.
    pub fn distance(self, other: Position, capacity: PowerOf2) -> isize {
        if self < other {
            return -other.distance(self, capacity);
        }

        if self.block == other.block {
            return (self.offset - other.offset) as isize;
        }

        let full_blocks = (self.block - other.block - 1) * capacity;

        (full_blocks + (capacity.value() - other.offset) + self.offset) as isize
    }

    //  Returns the position shifted by `blocks` blocks toward the back of the table.
    pub(crate) fn shifted(self, blocks: usize) -> Self { Self::new(self.block + blocks, self.offset) }
}
