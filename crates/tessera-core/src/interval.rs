//! Half-open entry intervals.

use std::fmt;
use std::ops::Range;

use crate::error::StoreError;
use crate::id::EntryId;

/// A half-open interval `[lower, upper)` of entry ids.
///
/// `lower <= upper` always holds; `lower == upper` is the empty interval.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub struct Interval {
    /// First entry in the interval (inclusive).
    pub lower: EntryId,
    /// One past the last entry in the interval (exclusive).
    pub upper: EntryId,
}

impl Interval {
    /// Create an interval.
    ///
    /// # Panics
    ///
    /// Panics if `lower > upper`. Use [`Interval::try_new`] for
    /// caller-supplied bounds.
    pub fn new(lower: EntryId, upper: EntryId) -> Self {
        assert!(
            lower <= upper,
            "interval lower bound {lower} exceeds upper bound {upper}"
        );
        Self { lower, upper }
    }

    /// Create an interval, rejecting `lower > upper`.
    pub fn try_new(lower: EntryId, upper: EntryId) -> Result<Self, StoreError> {
        if lower > upper {
            return Err(StoreError::InvalidRange {
                lower,
                upper,
                reason: "lower bound exceeds upper bound".into(),
            });
        }
        Ok(Self { lower, upper })
    }

    /// Number of entries in the interval.
    pub fn len(&self) -> usize {
        self.upper.abs_diff(self.lower) as usize
    }

    /// Whether the interval holds no entries.
    pub fn is_empty(&self) -> bool {
        self.lower == self.upper
    }

    /// Whether `entry` lies inside the interval.
    pub fn contains(&self, entry: EntryId) -> bool {
        self.lower <= entry && entry < self.upper
    }

    /// Whether the two intervals share at least one entry.
    pub fn overlaps(&self, other: &Interval) -> bool {
        self.lower < other.upper && other.lower < self.upper
    }

    /// The common part of two intervals, if non-empty.
    pub fn intersect(&self, other: &Interval) -> Option<Interval> {
        let lower = self.lower.max(other.lower);
        let upper = self.upper.min(other.upper);
        (lower < upper).then_some(Interval { lower, upper })
    }

    /// Entry ids in ascending order.
    pub fn entries(&self) -> Range<EntryId> {
        self.lower..self.upper
    }
}

impl From<Range<EntryId>> for Interval {
    fn from(r: Range<EntryId>) -> Self {
        Self::new(r.start, r.end)
    }
}

impl fmt::Display for Interval {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}, {})", self.lower, self.upper)
    }
}
