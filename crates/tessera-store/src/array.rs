//! Dense attribute storage indexed by a range set.
//!
//! A [`RangedArray`] pairs one attribute's values with the [`RangeSet`]
//! of entries it holds. The k-th stored value belongs to the k-th member
//! of the domain in ascending order, so the storage position of entry `e`
//! is the total length of the intervals before `e`'s interval plus `e`'s
//! offset inside it. No per-entry index is kept.

use std::iter::FusedIterator;

use tessera_core::{AttrId, EntryId, Interval, RangeSet, StoreError};

use crate::cursor::ArrayCursor;

/// One attribute's values over a sparse domain.
#[derive(Clone, Debug)]
pub struct RangedArray<T> {
    attr: AttrId,
    name: String,
    domain: RangeSet,
    data: Vec<T>,
}

impl<T> RangedArray<T> {
    /// Create an array with an empty domain.
    pub fn new(attr: AttrId, name: impl Into<String>) -> Self {
        Self {
            attr,
            name: name.into(),
            domain: RangeSet::new(),
            data: Vec::new(),
        }
    }

    /// Add `values` for the entries of `interval`.
    ///
    /// The interval may land before, between, or after existing intervals
    /// as long as it does not overlap them; touching intervals coalesce.
    /// On error the array is unchanged.
    ///
    /// # Errors
    ///
    /// - [`StoreError::InvalidArgument`] if `values.len() != interval.len()`.
    /// - [`StoreError::InvalidRange`] if `interval` overlaps the domain.
    pub fn append(&mut self, interval: Interval, values: Vec<T>) -> Result<(), StoreError> {
        if values.len() != interval.len() {
            return Err(StoreError::InvalidArgument {
                expected: interval.len(),
                actual: values.len(),
            });
        }
        if self.domain.overlaps(&interval) {
            return Err(StoreError::InvalidRange {
                lower: interval.lower,
                upper: interval.upper,
                reason: format!("overlaps existing domain {}", self.domain),
            });
        }
        if interval.is_empty() {
            return Ok(());
        }

        let at = self.domain.rank_of(interval.lower);
        if at == self.data.len() {
            self.data.extend(values);
        } else {
            self.data.splice(at..at, values);
        }
        self.domain.merge(interval);
        debug_assert_eq!(self.data.len(), self.domain.len());
        Ok(())
    }

    /// Add `interval.len()` copies of `value`.
    ///
    /// # Errors
    ///
    /// [`StoreError::InvalidRange`] if `interval` overlaps the domain.
    pub fn append_fill(&mut self, interval: Interval, value: T) -> Result<(), StoreError>
    where
        T: Clone,
    {
        self.append(interval, vec![value; interval.len()])
    }

    /// The attribute this array stores.
    pub fn attr(&self) -> AttrId {
        self.attr
    }

    /// The attribute name.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Entries currently held.
    pub fn domain(&self) -> &RangeSet {
        &self.domain
    }

    /// Number of entries held.
    pub fn len(&self) -> usize {
        self.data.len()
    }

    /// Whether the array holds no entries.
    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    /// Values in domain order.
    pub fn as_slice(&self) -> &[T] {
        &self.data
    }

    /// The value for `entry`, if held.
    pub fn get(&self, entry: EntryId) -> Option<&T> {
        if !self.domain.contains(entry) {
            return None;
        }
        self.data.get(self.domain.rank_of(entry))
    }

    /// Cursor at the first entry.
    pub fn cursor_at_start(&self) -> ArrayCursor<'_, T> {
        ArrayCursor::start(self)
    }

    /// Cursor one past the last entry.
    pub fn cursor_at_end(&self) -> ArrayCursor<'_, T> {
        ArrayCursor::end(self)
    }

    /// Iterate `(entry, value)` pairs in ascending entry order.
    pub fn iter(&self) -> Iter<'_, T> {
        Iter {
            front: self.cursor_at_start(),
            back: self.cursor_at_end(),
        }
    }
}

impl<'a, T> IntoIterator for &'a RangedArray<T> {
    type Item = (EntryId, &'a T);
    type IntoIter = Iter<'a, T>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

/// Iterator over `(entry, value)` pairs of a [`RangedArray`].
pub struct Iter<'a, T> {
    front: ArrayCursor<'a, T>,
    back: ArrayCursor<'a, T>,
}

impl<'a, T> Iterator for Iter<'a, T> {
    type Item = (EntryId, &'a T);

    fn next(&mut self) -> Option<Self::Item> {
        if self.front == self.back {
            return None;
        }
        let item = (self.front.entry(), self.front.value());
        self.front.advance(1);
        Some(item)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let n = self.back.rank() - self.front.rank();
        (n, Some(n))
    }
}

impl<T> DoubleEndedIterator for Iter<'_, T> {
    fn next_back(&mut self) -> Option<Self::Item> {
        if self.front == self.back {
            return None;
        }
        self.back.advance(-1);
        Some((self.back.entry(), self.back.value()))
    }
}

impl<T> ExactSizeIterator for Iter<'_, T> {}

impl<T> FusedIterator for Iter<'_, T> {}
