//! Positions inside a [`RangeSet`] and the cursor that walks them.
//!
//! A [`RangeCursor`] locates one member of a range set as
//! `(interval index, Position)` and tracks its rank, the number of members
//! before it. For an attribute array the rank is the dense storage
//! position, so array cursors never consult an index.
//!
//! Resting positions are normalized: `AtOffset(o)` always satisfies
//! `o < interval.len()`, and `PastUpper` rests only on the last interval,
//! where it encodes the end position. Stepping backwards across an
//! interval boundary passes through `PastUpper` on the previous interval.
//! Normalization makes equality structural: the end position compares
//! equal however it was reached.

use crate::id::EntryId;
use crate::interval::Interval;
use crate::range_set::RangeSet;

/// Where a cursor sits within its current interval.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Position {
    /// `offset` entries past `interval.lower`.
    AtOffset(usize),
    /// At `interval.upper`, one past the interval's last entry.
    /// Never dereferenced.
    PastUpper,
}

/// A bidirectional position within a [`RangeSet`].
#[derive(Clone, Copy, Debug)]
pub struct RangeCursor<'r> {
    ranges: &'r RangeSet,
    interval: usize,
    position: Position,
    rank: usize,
}

impl<'r> RangeCursor<'r> {
    /// Cursor at the first member. Equal to [`RangeCursor::end`] when the
    /// set is empty.
    pub fn start(ranges: &'r RangeSet) -> Self {
        if ranges.is_empty() {
            return Self::end(ranges);
        }
        Self {
            ranges,
            interval: 0,
            position: Position::AtOffset(0),
            rank: 0,
        }
    }

    /// Cursor one past the last member.
    pub fn end(ranges: &'r RangeSet) -> Self {
        Self {
            ranges,
            interval: ranges.interval_count().saturating_sub(1),
            position: Position::PastUpper,
            rank: ranges.len(),
        }
    }

    /// The set this cursor walks.
    pub fn ranges(&self) -> &'r RangeSet {
        self.ranges
    }

    /// Index of the current interval.
    pub fn interval_index(&self) -> usize {
        self.interval
    }

    /// Position within the current interval.
    pub fn position(&self) -> Position {
        self.position
    }

    /// Number of members before the cursor.
    pub fn rank(&self) -> usize {
        self.rank
    }

    /// Whether the cursor is one past the last member.
    pub fn is_end(&self) -> bool {
        self.rank == self.ranges.len()
    }

    /// The entry id at the cursor.
    ///
    /// At the end position this is the upper bound of the last interval
    /// (zero for an empty set).
    pub fn entry(&self) -> EntryId {
        let interval = self.current();
        match self.position {
            Position::AtOffset(offset) => interval.lower.wrapping_add_unsigned(offset as u64),
            Position::PastUpper => interval.upper,
        }
    }

    /// Move by `steps` members; negative steps move backwards.
    ///
    /// # Panics
    ///
    /// Panics if the move would leave `[start, end]`.
    pub fn advance(&mut self, steps: isize) {
        if steps >= 0 {
            self.forward(steps as usize);
        } else {
            self.backward(steps.unsigned_abs());
        }
    }

    /// Move forward by `steps` members.
    ///
    /// # Panics
    ///
    /// Panics if the move would pass the end position.
    pub fn forward(&mut self, mut steps: usize) {
        let remaining = self.ranges.len() - self.rank;
        assert!(
            steps <= remaining,
            "cursor advanced {steps} past end of domain ({remaining} remaining)"
        );
        while steps > 0 {
            let offset = self.offset();
            let left = self.current().len() - offset;
            if steps < left {
                self.position = Position::AtOffset(offset + steps);
                self.rank += steps;
                return;
            }
            steps -= left;
            self.rank += left;
            if self.interval + 1 < self.ranges.interval_count() {
                self.interval += 1;
                self.position = Position::AtOffset(0);
            } else {
                self.position = Position::PastUpper;
            }
        }
    }

    /// Move backward by `steps` members.
    ///
    /// # Panics
    ///
    /// Panics if the move would pass the start position.
    pub fn backward(&mut self, mut steps: usize) {
        assert!(
            steps <= self.rank,
            "cursor moved {steps} before start of domain ({} preceding)",
            self.rank
        );
        while steps > 0 {
            let offset = self.offset();
            if steps <= offset {
                self.position = Position::AtOffset(offset - steps);
                self.rank -= steps;
                return;
            }
            steps -= offset;
            self.rank -= offset;
            self.interval -= 1;
            self.position = Position::PastUpper;
        }
    }

    /// Jump forward to `target`, walking whole intervals at a time.
    ///
    /// # Panics
    ///
    /// Panics if `target` is not a member at or after the current interval.
    pub fn seek_forward(&mut self, target: EntryId) {
        loop {
            let interval = self.current();
            if target < interval.upper {
                break;
            }
            assert!(
                self.interval + 1 < self.ranges.interval_count(),
                "entry {target} lies beyond domain {}",
                self.ranges
            );
            self.rank += interval.len() - self.offset();
            self.interval += 1;
            self.position = Position::AtOffset(0);
        }
        self.land(target);
    }

    /// Jump backward to `target`, walking whole intervals at a time.
    ///
    /// # Panics
    ///
    /// Panics if `target` is not a member at or before the current interval.
    pub fn seek_backward(&mut self, target: EntryId) {
        loop {
            let interval = self.current();
            if target >= interval.lower {
                break;
            }
            assert!(
                self.interval > 0,
                "entry {target} lies before domain {}",
                self.ranges
            );
            self.rank -= self.offset();
            self.interval -= 1;
            self.position = Position::PastUpper;
        }
        self.land(target);
    }

    /// Jump to `target` in whichever direction it lies.
    ///
    /// # Panics
    ///
    /// Panics if `target` is not a member of the set.
    pub fn move_to(&mut self, target: EntryId) {
        if target >= self.entry() {
            self.seek_forward(target);
        } else {
            self.seek_backward(target);
        }
    }

    fn current(&self) -> Interval {
        self.ranges.interval(self.interval).unwrap_or_default()
    }

    fn offset(&self) -> usize {
        match self.position {
            Position::AtOffset(offset) => offset,
            Position::PastUpper => self.current().len(),
        }
    }

    /// Settle on `target` inside the current interval.
    fn land(&mut self, target: EntryId) {
        let interval = self.current();
        assert!(
            interval.contains(target),
            "entry {target} is not in domain {}",
            self.ranges
        );
        let offset = target.abs_diff(interval.lower) as usize;
        self.rank = self.rank - self.offset() + offset;
        self.position = Position::AtOffset(offset);
    }
}

/// Cursors compare by position. Comparing cursors over different sets is
/// meaningless.
impl PartialEq for RangeCursor<'_> {
    fn eq(&self, other: &Self) -> bool {
        self.interval == other.interval && self.position == other.position
    }
}

impl Eq for RangeCursor<'_> {}
