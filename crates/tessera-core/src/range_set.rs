//! Ordered sets of disjoint entry intervals.
//!
//! A [`RangeSet`] describes which entry ids an attribute currently holds.
//! Intervals are kept ascending, non-empty, and pairwise non-touching:
//! merging `[0, 5)` and `[5, 8)` yields the single interval `[0, 8)`.
//!
//! The set exposes exactly what the store needs from it: N-way
//! intersection, interval merge, total length, rank queries, and a
//! splitting constructor for fork-join decomposition.

use std::fmt;

use smallvec::SmallVec;

use crate::id::EntryId;
use crate::interval::Interval;

/// Ascending, pairwise-disjoint sequence of intervals.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct RangeSet {
    intervals: SmallVec<[Interval; 4]>,
    /// Total entries across all intervals.
    len: usize,
}

impl RangeSet {
    /// Create an empty set.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a set holding one interval (empty if the interval is).
    pub fn from_interval(interval: Interval) -> Self {
        let mut set = Self::new();
        set.merge(interval);
        set
    }

    /// Intersection of every set yielded by `sets`.
    ///
    /// An empty input yields an empty set.
    pub fn intersection_of<'s>(sets: impl IntoIterator<Item = &'s RangeSet>) -> Self {
        let mut sets = sets.into_iter();
        let Some(first) = sets.next() else {
            return Self::new();
        };
        sets.fold(first.clone(), |acc, s| acc.intersect(s))
    }

    /// Merge `interval` into the set, coalescing touching neighbours.
    ///
    /// Overlapping entries are absorbed; callers that must reject overlap
    /// check [`RangeSet::overlaps`] first.
    pub fn merge(&mut self, interval: Interval) {
        if interval.is_empty() {
            return;
        }
        let start = self
            .intervals
            .partition_point(|i| i.upper < interval.lower);
        let end = self
            .intervals
            .partition_point(|i| i.lower <= interval.upper);

        let mut merged = interval;
        if start < end {
            merged.lower = merged.lower.min(self.intervals[start].lower);
            merged.upper = merged.upper.max(self.intervals[end - 1].upper);
        }
        let absorbed: usize = self.intervals.drain(start..end).map(|i| i.len()).sum();
        self.intervals.insert(start, merged);
        self.len = self.len - absorbed + merged.len();
    }

    /// Whether `interval` shares any entry with the set.
    pub fn overlaps(&self, interval: &Interval) -> bool {
        if interval.is_empty() {
            return false;
        }
        let idx = self
            .intervals
            .partition_point(|i| i.upper <= interval.lower);
        self.intervals
            .get(idx)
            .is_some_and(|i| i.lower < interval.upper)
    }

    /// Entries present in both sets.
    pub fn intersect(&self, other: &RangeSet) -> RangeSet {
        let mut out = RangeSet::new();
        let (mut a, mut b) = (0, 0);
        while a < self.intervals.len() && b < other.intervals.len() {
            let (x, y) = (self.intervals[a], other.intervals[b]);
            if let Some(common) = x.intersect(&y) {
                out.len += common.len();
                out.intervals.push(common);
            }
            if x.upper <= y.upper {
                a += 1;
            } else {
                b += 1;
            }
        }
        out
    }

    /// Total number of entries.
    pub fn len(&self) -> usize {
        self.len
    }

    /// Whether the set holds no entries.
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Number of disjoint intervals.
    pub fn interval_count(&self) -> usize {
        self.intervals.len()
    }

    /// The interval at `idx`, in ascending order.
    pub fn interval(&self, idx: usize) -> Option<Interval> {
        self.intervals.get(idx).copied()
    }

    /// All intervals, ascending.
    pub fn intervals(&self) -> &[Interval] {
        &self.intervals
    }

    /// Iterate over intervals in ascending order.
    pub fn iter(&self) -> std::slice::Iter<'_, Interval> {
        self.intervals.iter()
    }

    /// Iterate over every member entry in ascending order.
    pub fn entries(&self) -> impl DoubleEndedIterator<Item = EntryId> + '_ {
        self.intervals.iter().flat_map(|i| i.entries())
    }

    /// Whether `entry` is a member.
    pub fn contains(&self, entry: EntryId) -> bool {
        let idx = self.intervals.partition_point(|i| i.upper <= entry);
        self.intervals.get(idx).is_some_and(|i| i.contains(entry))
    }

    /// Number of members strictly less than `entry`.
    ///
    /// For a member this is its dense storage position.
    pub fn rank_of(&self, entry: EntryId) -> usize {
        let idx = self.intervals.partition_point(|i| i.upper <= entry);
        let before: usize = self.intervals[..idx].iter().map(|i| i.len()).sum();
        match self.intervals.get(idx) {
            Some(i) if entry > i.lower => before + entry.abs_diff(i.lower) as usize,
            _ => before,
        }
    }

    /// Smallest member, if any.
    pub fn lower_bound(&self) -> Option<EntryId> {
        self.intervals.first().map(|i| i.lower)
    }

    /// One past the largest member, if any.
    pub fn upper_bound(&self) -> Option<EntryId> {
        self.intervals.last().map(|i| i.upper)
    }

    /// Whether a split would leave both halves with work to do.
    ///
    /// True when the set holds at least two entries and more than
    /// `grain` of them.
    pub fn is_divisible(&self, grain: usize) -> bool {
        self.len >= 2 && self.len > grain
    }

    /// Partition into the first `rank` members and the rest.
    ///
    /// The halves are disjoint, adjacent in entry order, and their union
    /// is `self`.
    ///
    /// # Panics
    ///
    /// Panics if `rank > self.len()`.
    pub fn split_at_rank(&self, rank: usize) -> (RangeSet, RangeSet) {
        assert!(
            rank <= self.len,
            "split rank {rank} exceeds set length {}",
            self.len
        );
        let mut left = RangeSet::new();
        let mut right = RangeSet::new();
        let mut remaining = rank;
        for &interval in &self.intervals {
            if remaining >= interval.len() {
                remaining -= interval.len();
                left.push_back(interval);
            } else if remaining == 0 {
                right.push_back(interval);
            } else {
                let cut = interval.lower.wrapping_add_unsigned(remaining as u64);
                left.push_back(Interval::new(interval.lower, cut));
                right.push_back(Interval::new(cut, interval.upper));
                remaining = 0;
            }
        }
        (left, right)
    }

    /// Partition into two halves of (nearly) equal size.
    ///
    /// # Panics
    ///
    /// Panics if the set holds fewer than two entries.
    pub fn split(&self) -> (RangeSet, RangeSet) {
        assert!(self.len >= 2, "cannot split a set of {} entries", self.len);
        self.split_at_rank(self.len / 2)
    }

    /// Append an interval known to lie strictly after every member.
    fn push_back(&mut self, interval: Interval) {
        debug_assert!(self
            .intervals
            .last()
            .is_none_or(|last| last.upper < interval.lower));
        self.len += interval.len();
        self.intervals.push(interval);
    }
}

impl From<Interval> for RangeSet {
    fn from(interval: Interval) -> Self {
        Self::from_interval(interval)
    }
}

impl FromIterator<Interval> for RangeSet {
    fn from_iter<I: IntoIterator<Item = Interval>>(iter: I) -> Self {
        let mut set = Self::new();
        set.extend(iter);
        set
    }
}

impl Extend<Interval> for RangeSet {
    fn extend<I: IntoIterator<Item = Interval>>(&mut self, iter: I) {
        for interval in iter {
            self.merge(interval);
        }
    }
}

impl<'s> IntoIterator for &'s RangeSet {
    type Item = &'s Interval;
    type IntoIter = std::slice::Iter<'s, Interval>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

impl fmt::Display for RangeSet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{{")?;
        for (i, interval) in self.intervals.iter().enumerate() {
            if i > 0 {
                write!(f, ", ")?;
            }
            write!(f, "{interval}")?;
        }
        write!(f, "}}")
    }
}
