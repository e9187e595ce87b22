//! BlockDeque
//!
//! A random-access double-ended queue, storing its elements in fixed-capacity blocks referenced from a block table.
//!
//! The occupied range `[begin, end)` spans one or more consecutive blocks of the table. Pushing at either end only
//! ever writes into the neighbouring slot; once the table is exhausted on that side, the table doubles, adding the
//! fresh blocks on the exhausted side. Elements are never moved by growth, and blocks are never released until the
//! deque is dropped.
//!
//! #   Guarantees
//!
//! -   `push_back`, `push_front` and their `_with` variants leave the deque unchanged on failure.
//! -   `assign_from` builds a complete copy before swapping it in, leaving the deque unchanged on failure.
//! -   `insert` and `erase` move elements bitwise, hence no user code runs while the elements are being shifted.

use core::{
    fmt,
    marker::PhantomData,
    mem,
    ops::{Index, IndexMut},
    ptr,
};

use crate::internals::block_table::{BlockTable, Side};

use super::{Configuration, Cursor, Error, IntoIter, Iter, IterMut, Platform, Position, Properties};

/// BlockDeque.
///
/// A double-ended queue of `T`, with blocks sized as per `C`, and memory obtained from `P`.
pub struct BlockDeque<T, C, P>
    where
        C: Configuration,
        P: Platform,
{
    platform: P,
    table: BlockTable<T>,
    begin: Position,
    end: Position,
    len: usize,
    _configuration: PhantomData<fn() -> C>,
}

impl<T, C, P> BlockDeque<T, C, P>
    where
        C: Configuration,
        P: Platform,
{
    /// Creates an empty deque, allocating a single block from `platform`.
    pub fn new_in(platform: P) -> Result<Self, Error> { Self::with_capacity_in(0, platform) }

    /// Creates an empty deque, with room for at least `capacity` elements pushed at the back.
    pub fn with_capacity_in(capacity: usize, platform: P) -> Result<Self, Error> {
        let blocks = Properties::<C>::initial_blocks(capacity);
        let table = BlockTable::allocate::<C, P>(&platform, blocks)?;

        log::trace!("allocated deque with {} blocks of {} elements", blocks, C::BLOCK_CAPACITY.value());

        let (begin, end) = (Position::default(), Position::default());

        Ok(Self { platform, table, begin, end, len: 0, _configuration: PhantomData })
    }

    /// Creates a deque of `len` clones of `value`.
    ///
    /// If cloning panics, the clones created so far are dropped and the storage released.
    pub fn from_elem_in(len: usize, value: T, platform: P) -> Result<Self, Error>
        where
            T: Clone,
    {
        let mut result = Self::with_capacity_in(len, platform)?;

        if len > 0 {
            for _ in 1..len {
                result.push_back(value.clone())?;
            }

            result.push_back(value)?;
        }

        Ok(result)
    }

    /// Creates a deque of `len` default values.
    pub fn with_len_in(len: usize, platform: P) -> Result<Self, Error>
        where
            T: Default,
    {
        let mut result = Self::with_capacity_in(len, platform)?;

        for _ in 0..len {
            result.push_back_with(T::default)?;
        }

        Ok(result)
    }

    /// Creates a fully independent copy of the deque, allocated from `platform`.
    pub fn try_clone_in<Q>(&self, platform: Q) -> Result<BlockDeque<T, C, Q>, Error>
        where
            T: Clone,
            Q: Platform,
    {
        let mut result = BlockDeque::with_capacity_in(self.len, platform)?;

        for element in self {
            result.push_back(element.clone())?;
        }

        Ok(result)
    }

    /// Creates a fully independent copy of the deque, allocated from a clone of its platform.
    pub fn try_clone(&self) -> Result<Self, Error>
        where
            T: Clone,
            P: Clone,
    {
        self.try_clone_in(self.platform.clone())
    }

    /// Replaces the content of `self` with a copy of the content of `other`.
    ///
    /// The copy is fully built prior to replacing anything, hence on failure `self` is left untouched.
    pub fn assign_from(&mut self, other: &Self) -> Result<(), Error>
        where
            T: Clone,
            P: Clone,
    {
        let mut copy = other.try_clone_in(self.platform.clone())?;

        self.swap(&mut copy);

        Ok(())
    }

    /// Swaps the content of `self` and `other`, in O(1).
    pub fn swap(&mut self, other: &mut Self) { mem::swap(self, other); }

    /// Returns a reference to the platform.
    pub fn platform(&self) -> &P { &self.platform }

    /// Returns the number of elements.
    pub fn len(&self) -> usize { self.len }

    /// Returns whether the deque is empty, or not.
    pub fn is_empty(&self) -> bool { self.len == 0 }

    /// Returns the number of slots of the currently allocated blocks.
    ///
    /// Not all of those slots are usable for pushing at a given end, as the occupied range may be anywhere within.
    pub fn capacity(&self) -> usize { self.table.len() * C::BLOCK_CAPACITY }

    /// Returns the number of blocks currently allocated.
    pub fn blocks(&self) -> usize { self.table.len() }

    /// Returns a cursor on the first element, or equal to `end()` if the deque is empty.
    pub fn begin(&self) -> Cursor<'_, T, C, P> { Cursor::new(self, self.begin) }

    /// Returns a cursor one past the last element.
    pub fn end(&self) -> Cursor<'_, T, C, P> { Cursor::new(self, self.end) }

    /// Returns a cursor at `position`, rebinding a detached position to this deque.
    pub fn cursor(&self, position: Position) -> Cursor<'_, T, C, P> { Cursor::new(self, position) }

    /// Returns the position of the element at `index`, or of `end()` if `index == len()`.
    pub fn position(&self, index: usize) -> Option<Position> {
        if index > self.len {
            return None;
        }

        Some(self.begin.advance(index, C::BLOCK_CAPACITY))
    }

    /// Returns the position of the first element.
    pub fn begin_position(&self) -> Position { self.begin }

    /// Returns the position one past the last element.
    pub fn end_position(&self) -> Position { self.end }

    /// Returns a reference to the element at `index`, if any.
    pub fn get(&self, index: usize) -> Option<&T> {
        if index >= self.len {
            return None;
        }

        //  Safety:
        //  -   `index` is within bounds.
        Some(unsafe { self.get_unchecked(index) })
    }

    /// Returns a mutable reference to the element at `index`, if any.
    pub fn get_mut(&mut self, index: usize) -> Option<&mut T> {
        if index >= self.len {
            return None;
        }

        //  Safety:
        //  -   `index` is within bounds.
        Some(unsafe { self.get_unchecked_mut(index) })
    }

    /// Returns a reference to the element at `index`, without bounds checking.
    ///
    /// #   Safety
    ///
    /// -   Assumes that `index` is less than `self.len()`.
    pub unsafe fn get_unchecked(&self, index: usize) -> &T {
        debug_assert!(index < self.len);

        &*self.slot(self.begin.advance(index, C::BLOCK_CAPACITY))
    }

    /// Returns a mutable reference to the element at `index`, without bounds checking.
    ///
    /// #   Safety
    ///
    /// -   Assumes that `index` is less than `self.len()`.
    pub unsafe fn get_unchecked_mut(&mut self, index: usize) -> &mut T {
        debug_assert!(index < self.len);

        &mut *self.slot(self.begin.advance(index, C::BLOCK_CAPACITY))
    }

    /// Returns a reference to the element at `index`, or `IndexOutOfRange`.
    pub fn at(&self, index: usize) -> Result<&T, Error> {
        let len = self.len;

        self.get(index).ok_or(Error::IndexOutOfRange { index, len })
    }

    /// Returns a mutable reference to the element at `index`, or `IndexOutOfRange`.
    pub fn at_mut(&mut self, index: usize) -> Result<&mut T, Error> {
        let len = self.len;

        self.get_mut(index).ok_or(Error::IndexOutOfRange { index, len })
    }

    /// Returns a reference to the first element, if any.
    pub fn front(&self) -> Option<&T> { self.get(0) }

    /// Returns a mutable reference to the first element, if any.
    pub fn front_mut(&mut self) -> Option<&mut T> { self.get_mut(0) }

    /// Returns a reference to the last element, if any.
    pub fn back(&self) -> Option<&T> {
        let index = self.len.checked_sub(1)?;
        self.get(index)
    }

    /// Returns a mutable reference to the last element, if any.
    pub fn back_mut(&mut self) -> Option<&mut T> {
        let index = self.len.checked_sub(1)?;
        self.get_mut(index)
    }

    /// Appends `value` at the back.
    ///
    /// On failure, the deque is unchanged.
    pub fn push_back(&mut self, value: T) -> Result<(), Error> { self.push_back_with(|| value) }

    /// Appends the value produced by `producer` at the back.
    ///
    /// Storage is reserved prior to invoking `producer`; should it panic, the elements of the deque are unchanged.
    pub fn push_back_with<F>(&mut self, producer: F) -> Result<(), Error>
        where
            F: FnOnce() -> T,
    {
        if self.end.block() == self.table.len() {
            self.grow(Side::Back)?;
        }

        //  Safety:
        //  -   `self.end` is within the table, as ensured above.
        //  -   The slot at `self.end` is uninitialized, being outside `[begin, end)`.
        unsafe { ptr::write(self.slot(self.end), producer()) };

        self.end = self.end.advance(1, C::BLOCK_CAPACITY);
        self.len += 1;

        Ok(())
    }

    /// Prepends `value` at the front.
    ///
    /// On failure, the deque is unchanged.
    pub fn push_front(&mut self, value: T) -> Result<(), Error> { self.push_front_with(|| value) }

    /// Prepends the value produced by `producer` at the front.
    ///
    /// Storage is reserved prior to invoking `producer`; should it panic, the elements of the deque are unchanged.
    pub fn push_front_with<F>(&mut self, producer: F) -> Result<(), Error>
        where
            F: FnOnce() -> T,
    {
        if self.begin == Position::default() {
            self.grow(Side::Front)?;
        }

        let begin = self.begin.retreat(1, C::BLOCK_CAPACITY);

        //  Safety:
        //  -   `begin` is within the table, as it precedes `self.begin`.
        //  -   The slot at `begin` is uninitialized, being outside `[begin, end)`.
        unsafe { ptr::write(self.slot(begin), producer()) };

        self.begin = begin;
        self.len += 1;

        Ok(())
    }

    /// Removes the last element, and returns it, if any.
    ///
    /// The storage of the element is kept for future use.
    pub fn pop_back(&mut self) -> Option<T> {
        if self.len == 0 {
            return None;
        }

        self.end = self.end.retreat(1, C::BLOCK_CAPACITY);
        self.len -= 1;

        //  Safety:
        //  -   The slot at `self.end` was the last live element, and is no longer considered part of the range.
        Some(unsafe { ptr::read(self.slot(self.end)) })
    }

    /// Removes the first element, and returns it, if any.
    ///
    /// The storage of the element is kept for future use.
    pub fn pop_front(&mut self) -> Option<T> {
        if self.len == 0 {
            return None;
        }

        let begin = self.begin;

        self.begin = self.begin.advance(1, C::BLOCK_CAPACITY);
        self.len -= 1;

        //  Safety:
        //  -   The slot at `begin` was the first live element, and is no longer considered part of the range.
        Some(unsafe { ptr::read(self.slot(begin)) })
    }

    /// Inserts `value` at `position`, shifting the elements from `position` to the end by one slot toward the back.
    ///
    /// `position` may be anywhere within `[begin, end]`; inserting at `end` is equivalent to `push_back`.
    ///
    /// On failure, the deque is unchanged.
    pub fn insert(&mut self, position: Position, value: T) -> Result<(), Error> {
        if !self.is_within_block(position) || position < self.begin || position > self.end {
            return Err(self.position_out_of_range(position));
        }

        //  Growing at the back never shifts existing positions, hence `position` remains valid.
        if self.end.block() == self.table.len() {
            self.grow(Side::Back)?;
        }

        let mut hole = self.end;

        while hole > position {
            let previous = hole.retreat(1, C::BLOCK_CAPACITY);

            //  Safety:
            //  -   Both slots are within the table.
            //  -   `previous` holds a live element, and `hole` is logically uninitialized.
            unsafe { ptr::copy_nonoverlapping(self.slot(previous), self.slot(hole), 1) };

            hole = previous;
        }

        //  Safety:
        //  -   The slot at `position` is logically uninitialized, its element having been moved one slot back.
        unsafe { ptr::write(self.slot(position), value) };

        self.end = self.end.advance(1, C::BLOCK_CAPACITY);
        self.len += 1;

        Ok(())
    }

    /// Removes the element at `position`, shifting the elements from `position` to the end by one slot toward the
    /// front, and returns it.
    ///
    /// `position` must be within `[begin, end)`.
    pub fn erase(&mut self, position: Position) -> Result<T, Error> {
        if !self.is_occupied(position) {
            return Err(self.position_out_of_range(position));
        }

        //  Safety:
        //  -   `position` is within `[begin, end)`, hence holds a live element.
        let result = unsafe { ptr::read(self.slot(position)) };

        let last = self.end.retreat(1, C::BLOCK_CAPACITY);
        let mut hole = position;

        while hole < last {
            let next = hole.advance(1, C::BLOCK_CAPACITY);

            //  Safety:
            //  -   Both slots are within `[begin, end)`.
            //  -   `next` holds a live element, and `hole` is logically uninitialized.
            unsafe { ptr::copy_nonoverlapping(self.slot(next), self.slot(hole), 1) };

            hole = next;
        }

        self.end = last;
        self.len -= 1;

        Ok(result)
    }

    /// Drops all elements, keeping the allocated blocks.
    pub fn clear(&mut self) {
        while let Some(element) = self.pop_back() {
            mem::drop(element);
        }
    }

    /// Returns an iterator over the elements, front to back.
    pub fn iter(&self) -> Iter<'_, T> {
        //  Safety:
        //  -   `[begin, end)` holds `len` live elements, borrowed for the lifetime of the iterator.
        unsafe { Iter::new(&self.table, self.begin, self.end, self.len, C::BLOCK_CAPACITY) }
    }

    /// Returns an iterator over mutable references to the elements, front to back.
    pub fn iter_mut(&mut self) -> IterMut<'_, T> {
        //  Safety:
        //  -   `[begin, end)` holds `len` live elements, exclusively borrowed for the lifetime of the iterator.
        unsafe { IterMut::new(&self.table, self.begin, self.end, self.len, C::BLOCK_CAPACITY) }
    }

    //  Returns a pointer to the slot at `position`.
    //
    //  Safety:
    //  -   Assumes that `position` is within the table.
    pub(crate) unsafe fn slot(&self, position: Position) -> *mut T { self.table.slot(position).as_ptr() }

    //  Returns whether `position` points to a live element.
    pub(crate) fn is_occupied(&self, position: Position) -> bool {
        self.is_within_block(position) && self.begin <= position && position < self.end
    }

    //  Positions built by hand may carry an offset past the end of their block, yet still sort within `[begin, end)`.
    fn is_within_block(&self, position: Position) -> bool { position.offset() < C::BLOCK_CAPACITY.value() }

    fn position_out_of_range(&self, position: Position) -> Error {
        Error::PositionOutOfRange { position, begin: self.begin, end: self.end }
    }

    #[cold]
    #[inline(never)]
    fn grow(&mut self, side: Side) -> Result<(), Error> {
        let shift = self.table.grow::<C, P>(&self.platform, side)?;

        self.begin = self.begin.shifted(shift);
        self.end = self.end.shifted(shift);

        Ok(())
    }
}

impl<T, C, P> Drop for BlockDeque<T, C, P>
    where
        C: Configuration,
        P: Platform,
{
    fn drop(&mut self) {
        //  Releases the storage even if dropping an element panics.
        struct Release<'a, U, D: Configuration, Q: Platform>(&'a mut BlockDeque<U, D, Q>);

        impl<'a, U, D: Configuration, Q: Platform> Drop for Release<'a, U, D, Q> {
            fn drop(&mut self) {
                let deque = &mut *self.0;

                //  Safety:
                //  -   The table was allocated from this platform, with this configuration.
                //  -   No element is live any longer; or their destructor panicked, and they are leaked.
                unsafe { deque.table.release::<D, Q>(&deque.platform) };
            }
        }

        let release = Release(self);
        release.0.clear();
    }
}

//  Safety:
//  -   The deque exclusively owns its elements and storage, just like a `Vec`.
unsafe impl<T: Send, C: Configuration, P: Platform + Send> Send for BlockDeque<T, C, P> {}

//  Safety:
//  -   Shared access only hands out shared references to the elements and platform.
unsafe impl<T: Sync, C: Configuration, P: Platform + Sync> Sync for BlockDeque<T, C, P> {}

impl<T, C, P> Clone for BlockDeque<T, C, P>
    where
        T: Clone,
        C: Configuration,
        P: Platform + Clone,
{
    /// #   Panics
    ///
    /// If the platform fails to allocate; use `try_clone` to handle the failure.
    fn clone(&self) -> Self {
        match self.try_clone() {
            Ok(result) => result,
            Err(error) => panic!("Could not clone deque: {}", error),
        }
    }

    fn clone_from(&mut self, source: &Self) {
        if let Err(error) = self.assign_from(source) {
            panic!("Could not clone deque: {}", error);
        }
    }
}

impl<T, C, P> Default for BlockDeque<T, C, P>
    where
        C: Configuration,
        P: Platform + Default,
{
    /// #   Panics
    ///
    /// If the platform fails to allocate the initial block.
    fn default() -> Self {
        match Self::new_in(P::default()) {
            Ok(result) => result,
            Err(error) => panic!("Could not create deque: {}", error),
        }
    }
}

impl<T, C, P> fmt::Debug for BlockDeque<T, C, P>
    where
        T: fmt::Debug,
        C: Configuration,
        P: Platform,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result { f.debug_list().entries(self.iter()).finish() }
}

impl<T, C, P> PartialEq for BlockDeque<T, C, P>
    where
        T: PartialEq,
        C: Configuration,
        P: Platform,
{
    fn eq(&self, other: &Self) -> bool { self.len == other.len && self.iter().eq(other.iter()) }
}

impl<T, C, P> Eq for BlockDeque<T, C, P>
    where
        T: Eq,
        C: Configuration,
        P: Platform,
{}

impl<T, C, P> Index<usize> for BlockDeque<T, C, P>
    where
        C: Configuration,
        P: Platform,
{
    type Output = T;

    fn index(&self, index: usize) -> &T {
        match self.get(index) {
            Some(element) => element,
            None => panic!("index out of bounds: the len is {} but the index is {}", self.len, index),
        }
    }
}

impl<T, C, P> IndexMut<usize> for BlockDeque<T, C, P>
    where
        C: Configuration,
        P: Platform,
{
    fn index_mut(&mut self, index: usize) -> &mut T {
        let len = self.len;

        match self.get_mut(index) {
            Some(element) => element,
            None => panic!("index out of bounds: the len is {} but the index is {}", len, index),
        }
    }
}

impl<T, C, P> Extend<T> for BlockDeque<T, C, P>
    where
        C: Configuration,
        P: Platform,
{
    /// #   Panics
    ///
    /// If the platform fails to allocate; the elements pushed so far are kept.
    fn extend<I: IntoIterator<Item = T>>(&mut self, iter: I) {
        for element in iter {
            if let Err(error) = self.push_back(element) {
                panic!("Could not extend deque: {}", error);
            }
        }
    }
}

impl<T, C, P> FromIterator<T> for BlockDeque<T, C, P>
    where
        C: Configuration,
        P: Platform + Default,
{
    fn from_iter<I: IntoIterator<Item = T>>(iter: I) -> Self {
        let mut result = Self::default();
        result.extend(iter);
        result
    }
}

impl<T, C, P> IntoIterator for BlockDeque<T, C, P>
    where
        C: Configuration,
        P: Platform,
{
    type Item = T;
    type IntoIter = IntoIter<T, C, P>;

    fn into_iter(self) -> IntoIter<T, C, P> { IntoIter::new(self) }
}

impl<'a, T, C, P> IntoIterator for &'a BlockDeque<T, C, P>
    where
        C: Configuration,
        P: Platform,
{
    type Item = &'a T;
    type IntoIter = Iter<'a, T>;

    fn into_iter(self) -> Iter<'a, T> { self.iter() }
}

impl<'a, T, C, P> IntoIterator for &'a mut BlockDeque<T, C, P>
    where
        C: Configuration,
        P: Platform,
{
    type Item = &'a mut T;
    type IntoIter = IterMut<'a, T>;

    fn into_iter(self) -> IterMut<'a, T> { self.iter_mut() }
}
