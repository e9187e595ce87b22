//! Iterators over a deque.
//!
//! All iterators are double-ended; `.rev()` yields the reverse iterators.

use core::{
    fmt,
    iter::FusedIterator,
    marker::PhantomData,
    ptr::NonNull,
};

use crate::internals::block_table::BlockTable;

use super::{BlockDeque, Configuration, Platform, Position, PowerOf2};

/// Iterator over references to the elements of a deque.
pub struct Iter<'a, T> {
    range: RawRange<'a, T>,
    _marker: PhantomData<&'a T>,
}

impl<'a, T> Iter<'a, T> {
    //  Safety:
    //  -   Assumes that `[front, back)` holds `len` live elements, borrowed for `'a`.
    pub(crate) unsafe fn new(
        table: &'a BlockTable<T>,
        front: Position,
        back: Position,
        len: usize,
        capacity: PowerOf2,
    )
        -> Self
    {
        Self { range: RawRange { table, front, back, len, capacity }, _marker: PhantomData }
    }
}

impl<'a, T> Clone for Iter<'a, T> {
    fn clone(&self) -> Self { Self { range: self.range, _marker: PhantomData } }
}

impl<'a, T: fmt::Debug> fmt::Debug for Iter<'a, T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result { f.debug_list().entries(self.clone()).finish() }
}

impl<'a, T> Iterator for Iter<'a, T> {
    type Item = &'a T;

    fn next(&mut self) -> Option<&'a T> {
        //  Safety:
        //  -   The slot holds a live element, borrowed for `'a`.
        self.range.next().map(|slot| unsafe { &*slot.as_ptr() })
    }

    fn size_hint(&self) -> (usize, Option<usize>) { (self.range.len, Some(self.range.len)) }

    fn nth(&mut self, n: usize) -> Option<&'a T> {
        self.range.skip(n);
        self.next()
    }
}

impl<'a, T> DoubleEndedIterator for Iter<'a, T> {
    fn next_back(&mut self) -> Option<&'a T> {
        //  Safety:
        //  -   The slot holds a live element, borrowed for `'a`.
        self.range.next_back().map(|slot| unsafe { &*slot.as_ptr() })
    }
}

impl<'a, T> ExactSizeIterator for Iter<'a, T> {}

impl<'a, T> FusedIterator for Iter<'a, T> {}

//  Safety:
//  -   Equivalent to `&'a T`.
unsafe impl<'a, T: Sync> Send for Iter<'a, T> {}

//  Safety:
//  -   Equivalent to `&'a T`.
unsafe impl<'a, T: Sync> Sync for Iter<'a, T> {}

/// Iterator over mutable references to the elements of a deque.
pub struct IterMut<'a, T> {
    range: RawRange<'a, T>,
    _marker: PhantomData<&'a mut T>,
}

impl<'a, T> IterMut<'a, T> {
    //  Safety:
    //  -   Assumes that `[front, back)` holds `len` live elements, exclusively borrowed for `'a`.
    pub(crate) unsafe fn new(
        table: &'a BlockTable<T>,
        front: Position,
        back: Position,
        len: usize,
        capacity: PowerOf2,
    )
        -> Self
    {
        Self { range: RawRange { table, front, back, len, capacity }, _marker: PhantomData }
    }
}

impl<'a, T> fmt::Debug for IterMut<'a, T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("IterMut").field("len", &self.range.len).finish()
    }
}

impl<'a, T> Iterator for IterMut<'a, T> {
    type Item = &'a mut T;

    fn next(&mut self) -> Option<&'a mut T> {
        //  Safety:
        //  -   The slot holds a live element, exclusively borrowed for `'a`, and never yielded twice.
        self.range.next().map(|slot| unsafe { &mut *slot.as_ptr() })
    }

    fn size_hint(&self) -> (usize, Option<usize>) { (self.range.len, Some(self.range.len)) }

    fn nth(&mut self, n: usize) -> Option<&'a mut T> {
        self.range.skip(n);
        self.next()
    }
}

impl<'a, T> DoubleEndedIterator for IterMut<'a, T> {
    fn next_back(&mut self) -> Option<&'a mut T> {
        //  Safety:
        //  -   The slot holds a live element, exclusively borrowed for `'a`, and never yielded twice.
        self.range.next_back().map(|slot| unsafe { &mut *slot.as_ptr() })
    }
}

impl<'a, T> ExactSizeIterator for IterMut<'a, T> {}

impl<'a, T> FusedIterator for IterMut<'a, T> {}

//  Safety:
//  -   Equivalent to `&'a mut T`.
unsafe impl<'a, T: Send> Send for IterMut<'a, T> {}

//  Safety:
//  -   Equivalent to `&'a mut T`.
unsafe impl<'a, T: Sync> Sync for IterMut<'a, T> {}

/// Iterator over the elements of a deque, by value.
///
/// Elements not yet yielded are dropped alongside the iterator.
pub struct IntoIter<T, C, P>
    where
        C: Configuration,
        P: Platform,
{
    deque: BlockDeque<T, C, P>,
}

impl<T, C, P> IntoIter<T, C, P>
    where
        C: Configuration,
        P: Platform,
{
    pub(crate) fn new(deque: BlockDeque<T, C, P>) -> Self { Self { deque } }
}

impl<T, C, P> fmt::Debug for IntoIter<T, C, P>
    where
        T: fmt::Debug,
        C: Configuration,
        P: Platform,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result { f.debug_tuple("IntoIter").field(&self.deque).finish() }
}

impl<T, C, P> Iterator for IntoIter<T, C, P>
    where
        C: Configuration,
        P: Platform,
{
    type Item = T;

    fn next(&mut self) -> Option<T> { self.deque.pop_front() }

    fn size_hint(&self) -> (usize, Option<usize>) { (self.deque.len(), Some(self.deque.len())) }
}

impl<T, C, P> DoubleEndedIterator for IntoIter<T, C, P>
    where
        C: Configuration,
        P: Platform,
{
    fn next_back(&mut self) -> Option<T> { self.deque.pop_back() }
}

impl<T, C, P> ExactSizeIterator for IntoIter<T, C, P>
    where
        C: Configuration,
        P: Platform,
{}

impl<T, C, P> FusedIterator for IntoIter<T, C, P>
    where
        C: Configuration,
        P: Platform,
{}

//  A range of slots `[front, back)`, holding `len` elements.
struct RawRange<'a, T> {
    table: &'a BlockTable<T>,
    front: Position,
    back: Position,
    len: usize,
    capacity: PowerOf2,
}

impl<'a, T> RawRange<'a, T> {
    fn next(&mut self) -> Option<NonNull<T>> {
        if self.len == 0 {
            return None;
        }

        //  Safety:
        //  -   `front` is within `[front, back)`, hence within the table.
        let slot = unsafe { self.table.slot(self.front) };

        self.front = self.front.advance(1, self.capacity);
        self.len -= 1;

        Some(slot)
    }

    fn next_back(&mut self) -> Option<NonNull<T>> {
        if self.len == 0 {
            return None;
        }

        self.back = self.back.retreat(1, self.capacity);
        self.len -= 1;

        //  Safety:
        //  -   `back` is within the original `[front, back)`, hence within the table.
        Some(unsafe { self.table.slot(self.back) })
    }

    //  Skips up to `n` elements from the front, in O(1).
    fn skip(&mut self, n: usize) {
        let n = n.min(self.len);

        self.front = self.front.advance(n, self.capacity);
        self.len -= n;
    }
}

impl<'a, T> Clone for RawRange<'a, T> {
    fn clone(&self) -> Self { *self }
}

impl<'a, T> Copy for RawRange<'a, T> {}

#[cfg(test)]
mod tests {

use std::vec::Vec;

use super::*;

use blockdeque_test::FailingPlatform;

use crate::internals::test::TestDeque;

fn filled(platform: &FailingPlatform, len: i32) -> TestDeque<'_, i32> {
    let mut deque = TestDeque::new_in(platform).expect("Allocated");

    //  Spread the elements across both sides of the original block.
    for i in 0..len {
        if i % 2 == 0 {
            deque.push_back(i).expect("Pushed");
        } else {
            deque.push_front(i).expect("Pushed");
        }
    }

    deque
}

fn expected(len: i32) -> Vec<i32> {
    let mut front: Vec<i32> = (0..len).filter(|i| i % 2 == 1).rev().collect();
    front.extend((0..len).filter(|i| i % 2 == 0));
    front
}

#[test]
fn iter_forward() {
    let platform = FailingPlatform::new();

    for len in 0..20 {
        let deque = filled(&platform, len);

        assert_eq!(expected(len), deque.iter().copied().collect::<Vec<_>>());
        assert_eq!(len as usize, deque.iter().len());
    }
}

#[test]
fn iter_backward() {
    let platform = FailingPlatform::new();
    let deque = filled(&platform, 13);

    let mut reversed = expected(13);
    reversed.reverse();

    assert_eq!(reversed, deque.iter().rev().copied().collect::<Vec<_>>());
}

#[test]
fn iter_both_ends() {
    let platform = FailingPlatform::new();
    let deque = filled(&platform, 7);
    let expected = expected(7);

    let mut iter = deque.iter();

    assert_eq!(Some(&expected[0]), iter.next());
    assert_eq!(Some(&expected[6]), iter.next_back());
    assert_eq!(Some(&expected[1]), iter.next());
    assert_eq!(3, iter.len());
    assert_eq!(Some(&expected[5]), iter.next_back());
    assert_eq!(Some(&expected[2]), iter.next());
    assert_eq!(Some(&expected[3]), iter.next());
    assert_eq!(Some(&expected[4]), iter.next_back());
    assert_eq!(None, iter.next());
    assert_eq!(None, iter.next_back());
}

#[test]
fn iter_nth() {
    let platform = FailingPlatform::new();
    let deque = filled(&platform, 0);
    assert_eq!(None, deque.iter().nth(0));

    let mut deque = TestDeque::new_in(&platform).expect("Allocated");
    deque.extend(0..11);

    let mut iter = deque.iter();

    assert_eq!(Some(&5), iter.nth(5));
    assert_eq!(Some(&6), iter.next());
    assert_eq!(None, iter.nth(10));
    assert_eq!(None, iter.next());
}

#[test]
fn iter_mut() {
    let platform = FailingPlatform::new();
    let mut deque = filled(&platform, 11);

    for element in deque.iter_mut() {
        *element *= 10;
    }

    let expected: Vec<_> = expected(11).into_iter().map(|i| i * 10).collect();

    assert_eq!(expected, deque.iter().copied().collect::<Vec<_>>());

    for element in deque.iter_mut().rev().take(2) {
        *element = -1;
    }

    assert_eq!(Some(&-1), deque.back());
    assert_eq!(Some(&-1), deque.get(9));
}

#[test]
fn into_iter() {
    let platform = FailingPlatform::new();

    let deque = filled(&platform, 9);
    assert_eq!(expected(9), deque.into_iter().collect::<Vec<_>>());

    let deque = filled(&platform, 9);
    let mut reversed = expected(9);
    reversed.reverse();
    assert_eq!(reversed, deque.into_iter().rev().collect::<Vec<_>>());

    assert_eq!(0, platform.outstanding());
}

#[test]
fn into_iter_early_drop() {
    use std::{cell::Cell, rc::Rc};

    use crate::internals::test::Counted;

    let platform = FailingPlatform::new();
    let drops = Rc::new(Cell::new(0));

    let mut deque = TestDeque::new_in(&platform).expect("Allocated");

    for i in 0..10 {
        deque.push_back(Counted::new(i, &drops)).expect("Pushed");
    }

    let mut iter = deque.into_iter();

    assert_eq!(Some(0), iter.next().map(|c| c.value()));
    assert_eq!(Some(9), iter.next_back().map(|c| c.value()));
    assert_eq!(2, drops.get());

    drop(iter);

    assert_eq!(10, drops.get());
    assert_eq!(0, platform.outstanding());
}

}
