//! Cursor
//!
//! A random-access cursor over a deque, whose arithmetic crosses block boundaries transparently.
//!
//! A Cursor borrows its deque, hence cannot outlive an operation which may grow or replace the block table. To keep
//! track of a location across such operations, detach the cursor with `position`, and rebind it afterwards with
//! `BlockDeque::cursor`; growing at the front shifts positions, hence positions should be re-computed after pushing.

use core::{
    cmp,
    fmt,
    ops,
};

use super::{BlockDeque, Configuration, Platform, Position};

/// Cursor.
///
/// A Position, bound to the deque it belongs to.
pub struct Cursor<'a, T, C, P>
    where
        C: Configuration,
        P: Platform,
{
    deque: &'a BlockDeque<T, C, P>,
    position: Position,
}

impl<'a, T, C, P> Cursor<'a, T, C, P>
    where
        C: Configuration,
        P: Platform,
{
    pub(crate) fn new(deque: &'a BlockDeque<T, C, P>, position: Position) -> Self { Self { deque, position } }

    /// Returns the position of the cursor, detached from its deque.
    pub fn position(&self) -> Position { self.position }

    /// Returns the signed logical index of the cursor, relative to the first element.
    pub fn index(&self) -> isize { self.position.distance(self.deque.begin_position(), C::BLOCK_CAPACITY) }

    /// Returns a reference to the element the cursor points to, if it points to a live element.
    pub fn get(&self) -> Option<&'a T> {
        if !self.deque.is_occupied(self.position) {
            return None;
        }

        //  Safety:
        //  -   The position is within `[begin, end)`, hence points to a live element within the table.
        //  -   The deque is borrowed for `'a`.
        Some(unsafe { &*self.deque.slot(self.position) })
    }

    /// Moves the cursor one slot toward the back.
    pub fn move_next(&mut self) { *self += 1; }

    /// Moves the cursor one slot toward the front.
    ///
    /// #   Panics
    ///
    /// If the cursor is on the very first slot of the table.
    pub fn move_prev(&mut self) { *self -= 1; }
}

impl<'a, T, C, P> Clone for Cursor<'a, T, C, P>
    where
        C: Configuration,
        P: Platform,
{
    fn clone(&self) -> Self { *self }
}

impl<'a, T, C, P> Copy for Cursor<'a, T, C, P>
    where
        C: Configuration,
        P: Platform,
{}

impl<'a, T, C, P> fmt::Debug for Cursor<'a, T, C, P>
    where
        C: Configuration,
        P: Platform,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Cursor").field("position", &self.position).finish()
    }
}

//  Cursors are compared by position only; comparing cursors of distinct deques is meaningless.
impl<'a, T, C, P> PartialEq for Cursor<'a, T, C, P>
    where
        C: Configuration,
        P: Platform,
{
    fn eq(&self, other: &Self) -> bool { self.position == other.position }
}

impl<'a, T, C, P> Eq for Cursor<'a, T, C, P>
    where
        C: Configuration,
        P: Platform,
{}

impl<'a, T, C, P> PartialOrd for Cursor<'a, T, C, P>
    where
        C: Configuration,
        P: Platform,
{
    fn partial_cmp(&self, other: &Self) -> Option<cmp::Ordering> { Some(self.cmp(other)) }
}

impl<'a, T, C, P> Ord for Cursor<'a, T, C, P>
    where
        C: Configuration,
        P: Platform,
{
    fn cmp(&self, other: &Self) -> cmp::Ordering { self.position.cmp(&other.position) }
}

impl<'a, T, C, P> ops::AddAssign<isize> for Cursor<'a, T, C, P>
    where
        C: Configuration,
        P: Platform,
{
    fn add_assign(&mut self, n: isize) { self.position = self.position.offset_by(n, C::BLOCK_CAPACITY); }
}

impl<'a, T, C, P> ops::SubAssign<isize> for Cursor<'a, T, C, P>
    where
        C: Configuration,
        P: Platform,
{
    fn sub_assign(&mut self, n: isize) {
        let position = if n < 0 {
            self.position.advance(n.unsigned_abs(), C::BLOCK_CAPACITY)
        } else {
            self.position.retreat(n as usize, C::BLOCK_CAPACITY)
        };

        self.position = position;
    }
}

impl<'a, T, C, P> ops::Add<isize> for Cursor<'a, T, C, P>
    where
        C: Configuration,
        P: Platform,
{
    type Output = Self;

    fn add(mut self, n: isize) -> Self {
        self += n;
        self
    }
}

impl<'a, T, C, P> ops::Sub<isize> for Cursor<'a, T, C, P>
    where
        C: Configuration,
        P: Platform,
{
    type Output = Self;

    fn sub(mut self, n: isize) -> Self {
        self -= n;
        self
    }
}

impl<'a, T, C, P> ops::Sub for Cursor<'a, T, C, P>
    where
        C: Configuration,
        P: Platform,
{
    type Output = isize;

    /// Returns the signed number of slots from `other` to `self`, in O(1).
    fn sub(self, other: Self) -> isize { self.position.distance(other.position, C::BLOCK_CAPACITY) }
}

#[cfg(test)]
mod tests {

use super::*;

use blockdeque_test::FailingPlatform;

use crate::internals::test::TestDeque;

fn filled(platform: &FailingPlatform, len: i32) -> TestDeque<'_, i32> {
    let mut deque = TestDeque::new_in(platform).expect("Allocated");

    for i in 0..len {
        deque.push_back(i).expect("Pushed");
    }

    deque
}

#[test]
fn cursor_begin_end() {
    let platform = FailingPlatform::new();
    let deque = filled(&platform, 10);

    assert_eq!(Some(&0), deque.begin().get());
    assert_eq!(None, deque.end().get());
    assert_eq!(10, deque.end() - deque.begin());
    assert_eq!(-10, deque.begin() - deque.end());
    assert_eq!(0, deque.begin().index());
    assert_eq!(10, deque.end().index());
}

#[test]
fn cursor_empty() {
    let platform = FailingPlatform::new();
    let deque = filled(&platform, 0);

    assert_eq!(deque.begin(), deque.end());
    assert_eq!(None, deque.begin().get());
}

#[test]
fn cursor_arithmetic() {
    let platform = FailingPlatform::new();
    let deque = filled(&platform, 10);

    for i in 0..10 {
        assert_eq!(Some(&(i as i32)), (deque.begin() + i).get());
        assert_eq!(Some(&(9 - i as i32)), (deque.end() - (i + 1)).get());
    }

    let middle = deque.begin() + 6;

    assert_eq!(Some(&2), (middle + -4).get());
    assert_eq!(Some(&9), (middle - -3).get());

    let mut cursor = deque.begin();
    cursor += 7;
    assert_eq!(Some(&7), cursor.get());
    cursor -= 5;
    assert_eq!(Some(&2), cursor.get());
}

#[test]
fn cursor_move() {
    let platform = FailingPlatform::new();
    let deque = filled(&platform, 9);

    let mut cursor = deque.begin();
    let mut seen = std::vec::Vec::new();

    while let Some(element) = cursor.get() {
        seen.push(*element);
        cursor.move_next();
    }

    assert_eq!((0..9).collect::<std::vec::Vec<_>>(), seen);
    assert_eq!(deque.end(), cursor);

    cursor.move_prev();
    assert_eq!(Some(&8), cursor.get());
}

#[test]
fn cursor_order() {
    let platform = FailingPlatform::new();
    let deque = filled(&platform, 9);

    let (a, b) = (deque.begin() + 3, deque.begin() + 5);

    assert!(a < b);
    assert!(b > a);
    assert!(a <= a);
    assert!(a >= a);
    assert!(a != b);
    assert_eq!(a, b - 2);
}

#[test]
fn cursor_distance_matches_steps() {
    let platform = FailingPlatform::new();
    let deque = filled(&platform, 17);

    for from in 0..=17 {
        let a = deque.begin() + from;
        let mut b = a;
        let mut steps = 0;

        while b < deque.end() {
            assert_eq!(steps, b - a);
            b.move_next();
            steps += 1;
        }

        assert_eq!(steps, deque.end() - a);
    }
}

#[test]
fn cursor_get_offset_past_block() {
    let platform = FailingPlatform::new();
    let deque = filled(&platform, 8);

    for offset in [4, 5, 7] {
        let cursor = deque.cursor(Position::new(0, offset));

        assert!(deque.begin() < cursor && cursor < deque.end());
        assert_eq!(None, cursor.get(), "{}", offset);
    }
}

#[test]
#[should_panic]
fn cursor_retreat_before_table() {
    let platform = FailingPlatform::new();
    let deque = filled(&platform, 0);

    let _ = deque.end() - 1;
}

#[test]
#[should_panic]
fn cursor_move_prev_before_table() {
    let platform = FailingPlatform::new();
    let deque = filled(&platform, 3);

    let mut cursor = deque.begin();
    cursor.move_prev();
}

#[test]
fn cursor_rebind() {
    let platform = FailingPlatform::new();
    let mut deque = filled(&platform, 5);

    let position = (deque.begin() + 2).position();

    deque.push_back(5).expect("Pushed");

    assert_eq!(Some(&2), deque.cursor(position).get());
    assert_eq!(2, deque.cursor(position).index());
}

}
