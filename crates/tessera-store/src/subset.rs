//! Read-only zipped views over several attribute arrays.
//!
//! A [`Subset`] joins N [`RangedArray`](crate::RangedArray)s over the
//! intersection of their domains, optionally restricted further by a
//! caller-supplied range set. It holds only shared borrows of the arrays
//! and never copies values: every item is a tuple of references into the
//! original storage.
//!
//! Subsets are divisible. [`Subset::split`] partitions the covered entries
//! into two adjacent halves that share the same array borrows, which is
//! the shape fork-join schedulers expect from a splittable work range.

use std::iter::FusedIterator;
use std::marker::PhantomData;

use tessera_core::{EntryId, RangeSet};

use crate::config::StoreConfig;
use crate::pack::ArrayPack;
use crate::subset_cursor::SubsetCursor;

/// A zipped view over the common entries of a tuple of arrays.
pub struct Subset<'a, P> {
    sub_ranges: RangeSet,
    arrays: P,
    grain: usize,
    _arrays: PhantomData<&'a ()>,
}

impl<'a, P: ArrayPack<'a>> Subset<'a, P> {
    /// View over the intersection of every member's domain.
    pub fn new(arrays: P) -> Self {
        let sub_ranges = RangeSet::intersection_of(arrays.domains());
        Self::build(sub_ranges, arrays)
    }

    /// View over `range` intersected with every member's domain.
    pub fn restricted(range: &RangeSet, arrays: P) -> Self {
        let common = RangeSet::intersection_of(arrays.domains());
        Self::build(range.intersect(&common), arrays)
    }

    fn build(sub_ranges: RangeSet, arrays: P) -> Self {
        tracing::trace!(
            members = arrays.domains().len(),
            len = sub_ranges.len(),
            intervals = sub_ranges.interval_count(),
            "built subset"
        );
        Self {
            sub_ranges,
            arrays,
            grain: StoreConfig::DEFAULT_SPLIT_GRAIN,
            _arrays: PhantomData,
        }
    }

    /// Set the largest size that is never split further (minimum 1).
    pub fn with_grain(mut self, grain: usize) -> Self {
        self.grain = grain.max(1);
        self
    }

    /// The entries this view covers.
    pub fn sub_ranges(&self) -> &RangeSet {
        &self.sub_ranges
    }

    /// The member arrays.
    pub fn arrays(&self) -> P {
        self.arrays
    }

    /// The split grain.
    pub fn grain(&self) -> usize {
        self.grain
    }

    /// Number of entries covered.
    pub fn len(&self) -> usize {
        self.sub_ranges.len()
    }

    /// Whether the view covers no entries.
    pub fn is_empty(&self) -> bool {
        self.sub_ranges.is_empty()
    }

    /// Whether [`Subset::split`] may be called.
    pub fn is_divisible(&self) -> bool {
        self.sub_ranges.is_divisible(self.grain)
    }

    /// Partition into two adjacent halves over the same arrays.
    ///
    /// The halves' ranges are disjoint and their union is this view's
    /// range; the left half holds the lower entries.
    ///
    /// # Panics
    ///
    /// Panics if the view is not divisible.
    pub fn split(self) -> (Self, Self) {
        assert!(
            self.is_divisible(),
            "split of indivisible subset ({} entries, grain {})",
            self.len(),
            self.grain
        );
        let (left, right) = self.sub_ranges.split();
        tracing::trace!(left = left.len(), right = right.len(), "split subset");
        let half = |sub_ranges| Self {
            sub_ranges,
            arrays: self.arrays,
            grain: self.grain,
            _arrays: PhantomData,
        };
        (half(left), half(right))
    }

    /// Call `op` with the member values of every covered entry, in
    /// ascending entry order, exactly once per entry.
    pub fn for_each_element<F>(&self, mut op: F)
    where
        F: FnMut(P::Item),
    {
        let mut cursors = self.arrays.cursors_at_start();
        for interval in &self.sub_ranges {
            for entry in interval.entries() {
                P::seek_forward(&mut cursors, entry);
                op(P::values(&cursors));
            }
        }
    }

    /// Cursor at the first covered entry.
    pub fn begin(&self) -> SubsetCursor<'_, 'a, P> {
        SubsetCursor::begin(&self.sub_ranges, self.arrays)
    }

    /// Cursor one past the last covered entry.
    pub fn end(&self) -> SubsetCursor<'_, 'a, P> {
        SubsetCursor::end(&self.sub_ranges, self.arrays)
    }

    /// Iterate member value tuples in ascending entry order.
    pub fn iter(&self) -> SubsetIter<'_, 'a, P> {
        SubsetIter {
            front: self.begin(),
            back: self.end(),
        }
    }

    /// Iterate `(entry, values)` pairs in ascending entry order.
    pub fn iter_entries(&self) -> SubsetEntries<'_, 'a, P> {
        SubsetEntries { inner: self.iter() }
    }
}

impl<P: Copy> Clone for Subset<'_, P> {
    fn clone(&self) -> Self {
        Self {
            sub_ranges: self.sub_ranges.clone(),
            arrays: self.arrays,
            grain: self.grain,
            _arrays: PhantomData,
        }
    }
}

impl<P> std::fmt::Debug for Subset<'_, P> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Subset")
            .field("sub_ranges", &self.sub_ranges)
            .field("grain", &self.grain)
            .finish_non_exhaustive()
    }
}

impl<'s, 'a, P: ArrayPack<'a>> IntoIterator for &'s Subset<'a, P> {
    type Item = P::Item;
    type IntoIter = SubsetIter<'s, 'a, P>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

/// Iterator over the value tuples of a [`Subset`].
///
/// Both ends are [`SubsetCursor`]s, so long runs of `nth` or `skip` only
/// move the logical position; member cursors catch up on the next read.
pub struct SubsetIter<'s, 'a, P: ArrayPack<'a>> {
    front: SubsetCursor<'s, 'a, P>,
    back: SubsetCursor<'s, 'a, P>,
}

impl<'a, P: ArrayPack<'a>> Iterator for SubsetIter<'_, 'a, P> {
    type Item = P::Item;

    fn next(&mut self) -> Option<Self::Item> {
        if self.front == self.back {
            return None;
        }
        let values = self.front.values();
        self.front.advance(1);
        Some(values)
    }

    fn nth(&mut self, n: usize) -> Option<Self::Item> {
        let remaining = self.back.rank() - self.front.rank();
        if n >= remaining {
            self.front = self.back;
            return None;
        }
        self.front.advance(n as isize);
        self.next()
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let n = self.back.rank() - self.front.rank();
        (n, Some(n))
    }
}

impl<'a, P: ArrayPack<'a>> DoubleEndedIterator for SubsetIter<'_, 'a, P> {
    fn next_back(&mut self) -> Option<Self::Item> {
        if self.front == self.back {
            return None;
        }
        self.back.advance(-1);
        Some(self.back.values())
    }
}

impl<'a, P: ArrayPack<'a>> ExactSizeIterator for SubsetIter<'_, 'a, P> {}

impl<'a, P: ArrayPack<'a>> FusedIterator for SubsetIter<'_, 'a, P> {}

/// Iterator over `(entry, values)` pairs of a [`Subset`].
pub struct SubsetEntries<'s, 'a, P: ArrayPack<'a>> {
    inner: SubsetIter<'s, 'a, P>,
}

impl<'a, P: ArrayPack<'a>> Iterator for SubsetEntries<'_, 'a, P> {
    type Item = (EntryId, P::Item);

    fn next(&mut self) -> Option<Self::Item> {
        let entry = self.inner.front.entry();
        self.inner.next().map(|values| (entry, values))
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.inner.size_hint()
    }
}

impl<'a, P: ArrayPack<'a>> DoubleEndedIterator for SubsetEntries<'_, 'a, P> {
    fn next_back(&mut self) -> Option<Self::Item> {
        let values = self.inner.next_back()?;
        Some((self.inner.back.entry(), values))
    }
}

impl<'a, P: ArrayPack<'a>> ExactSizeIterator for SubsetEntries<'_, 'a, P> {}
