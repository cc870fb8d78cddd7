//! Bidirectional cursors over a [`RangedArray`].

use std::fmt;

use tessera_core::{EntryId, Position, RangeCursor};

use crate::array::RangedArray;

/// A position in a [`RangedArray`] that can jump straight to any entry of
/// the array's domain.
///
/// The storage position is the cursor's rank in the domain, maintained
/// incrementally as the cursor moves, so reading the value is a single
/// slice index.
pub struct ArrayCursor<'a, T> {
    array: &'a RangedArray<T>,
    pos: RangeCursor<'a>,
}

impl<'a, T> ArrayCursor<'a, T> {
    pub(crate) fn start(array: &'a RangedArray<T>) -> Self {
        Self {
            array,
            pos: RangeCursor::start(array.domain()),
        }
    }

    pub(crate) fn end(array: &'a RangedArray<T>) -> Self {
        Self {
            array,
            pos: RangeCursor::end(array.domain()),
        }
    }

    /// The entry id at the cursor. At the end position this is the
    /// domain's upper bound.
    pub fn entry(&self) -> EntryId {
        self.pos.entry()
    }

    /// Storage position of the cursor.
    pub fn rank(&self) -> usize {
        self.pos.rank()
    }

    /// Position within the current interval.
    pub fn position(&self) -> Position {
        self.pos.position()
    }

    /// Whether the cursor is one past the last entry.
    pub fn is_end(&self) -> bool {
        self.pos.is_end()
    }

    /// Move by `steps` entries; negative steps move backwards.
    ///
    /// # Panics
    ///
    /// Panics if the move would leave `[start, end]`.
    pub fn advance(&mut self, steps: isize) {
        self.pos.advance(steps);
    }

    /// Jump to `target`, which must be in the array's domain.
    ///
    /// # Panics
    ///
    /// Panics if `target` is not held by the array.
    pub fn move_to(&mut self, target: EntryId) {
        self.pos.move_to(target);
    }

    /// Jump forward to `target`; used when the caller knows the direction.
    pub fn seek_forward(&mut self, target: EntryId) {
        self.pos.seek_forward(target);
    }

    /// Jump backward to `target`; used when the caller knows the direction.
    pub fn seek_backward(&mut self, target: EntryId) {
        self.pos.seek_backward(target);
    }

    /// The value at the cursor.
    ///
    /// # Panics
    ///
    /// Panics at the end position.
    pub fn value(&self) -> &'a T {
        assert!(
            !self.pos.is_end(),
            "dereferenced end cursor of attribute '{}'",
            self.array.name()
        );
        &self.array.as_slice()[self.pos.rank()]
    }

    /// The array this cursor reads.
    pub fn array(&self) -> &'a RangedArray<T> {
        self.array
    }
}

impl<T> Clone for ArrayCursor<'_, T> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<T> Copy for ArrayCursor<'_, T> {}

impl<T> PartialEq for ArrayCursor<'_, T> {
    fn eq(&self, other: &Self) -> bool {
        std::ptr::eq(self.array, other.array) && self.pos == other.pos
    }
}

impl<T> Eq for ArrayCursor<'_, T> {}

impl<T> fmt::Debug for ArrayCursor<'_, T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ArrayCursor")
            .field("attr", &self.array.attr())
            .field("entry", &self.entry())
            .field("rank", &self.rank())
            .field("position", &self.position())
            .finish()
    }
}
