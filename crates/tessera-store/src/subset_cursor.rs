//! Cursors over a [`Subset`](crate::Subset) with deferred member movement.

use std::fmt;
use std::marker::PhantomData;

use tessera_core::{EntryId, RangeCursor, RangeSet};

use crate::pack::ArrayPack;

/// A position in a subset's range set plus one cursor per member array.
///
/// Moving the cursor only moves the logical position and records the
/// displacement in `pending`. Member cursors are brought to the logical
/// entry on [`SubsetCursor::sync`], which [`SubsetCursor::values`] calls
/// implicitly. The sign of the pending displacement picks the seek
/// direction, so members only ever move toward the target.
///
/// Two subset cursors are equal when their logical positions are equal,
/// whatever their member cursors are doing.
pub struct SubsetCursor<'s, 'a, P: ArrayPack<'a>> {
    pos: RangeCursor<'s>,
    cursors: P::Cursors,
    pending: isize,
    _arrays: PhantomData<&'a ()>,
}

impl<'s, 'a, P: ArrayPack<'a>> SubsetCursor<'s, 'a, P> {
    /// Cursor at the first entry of `sub_ranges`, with members synced.
    pub(crate) fn begin(sub_ranges: &'s RangeSet, arrays: P) -> Self {
        let mut cursor = Self {
            pos: RangeCursor::start(sub_ranges),
            cursors: arrays.cursors_at_start(),
            pending: 0,
            _arrays: PhantomData,
        };
        if !cursor.pos.is_end() {
            P::seek_forward(&mut cursor.cursors, cursor.pos.entry());
        }
        cursor
    }

    /// Cursor one past the last entry of `sub_ranges`. Members sit at
    /// their own end positions, beyond every subset entry.
    pub(crate) fn end(sub_ranges: &'s RangeSet, arrays: P) -> Self {
        Self {
            pos: RangeCursor::end(sub_ranges),
            cursors: arrays.cursors_at_end(),
            pending: 0,
            _arrays: PhantomData,
        }
    }

    /// Move by `steps` entries of the subset. Member cursors stay put.
    ///
    /// # Panics
    ///
    /// Panics if the move would leave `[begin, end]`.
    pub fn advance(&mut self, steps: isize) {
        self.pos.advance(steps);
        self.pending += steps;
    }

    /// The logical entry id.
    pub fn entry(&self) -> EntryId {
        self.pos.entry()
    }

    /// Rank of the logical position within the subset.
    pub fn rank(&self) -> usize {
        self.pos.rank()
    }

    /// Logical steps taken since the member cursors last moved.
    pub fn pending(&self) -> isize {
        self.pending
    }

    /// Whether no movement is waiting to be applied to the members.
    pub fn is_synced(&self) -> bool {
        self.pending == 0
    }

    /// Whether the cursor is one past the last entry.
    pub fn is_end(&self) -> bool {
        self.pos.is_end()
    }

    /// Bring every member cursor to the logical entry.
    ///
    /// At the end position there is no entry to seek to; the pending
    /// displacement is kept and applied once the cursor moves back.
    pub fn sync(&mut self) {
        if self.pos.is_end() || self.pending == 0 {
            return;
        }
        let entry = self.pos.entry();
        if self.pending > 0 {
            P::seek_forward(&mut self.cursors, entry);
        } else {
            P::seek_backward(&mut self.cursors, entry);
        }
        self.pending = 0;
    }

    /// Sync, then read the member values at the logical entry.
    ///
    /// # Panics
    ///
    /// Panics at the end position.
    pub fn values(&mut self) -> P::Item {
        assert!(!self.pos.is_end(), "dereferenced end cursor of subset");
        self.sync();
        P::values(&self.cursors)
    }
}

impl<'a, P: ArrayPack<'a>> Clone for SubsetCursor<'_, 'a, P> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<'a, P: ArrayPack<'a>> Copy for SubsetCursor<'_, 'a, P> {}

impl<'a, P: ArrayPack<'a>> PartialEq for SubsetCursor<'_, 'a, P> {
    fn eq(&self, other: &Self) -> bool {
        self.pos == other.pos
    }
}

impl<'a, P: ArrayPack<'a>> Eq for SubsetCursor<'_, 'a, P> {}

impl<'a, P: ArrayPack<'a>> fmt::Debug for SubsetCursor<'_, 'a, P> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SubsetCursor")
            .field("entry", &self.entry())
            .field("rank", &self.rank())
            .field("pending", &self.pending)
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use crate::array::RangedArray;
    use crate::subset::Subset;
    use tessera_core::{AttrId, Interval};

    /// A over `{[0, 3), [10, 12)}` and B over `{[1, 5), [10, 11)}`.
    fn scenario() -> (RangedArray<i32>, RangedArray<i32>) {
        let mut a = RangedArray::new(AttrId(0), "a");
        a.append(Interval::new(0, 3), vec![1, 2, 3]).unwrap();
        a.append(Interval::new(10, 12), vec![9, 10]).unwrap();
        let mut b = RangedArray::new(AttrId(1), "b");
        b.append(Interval::new(1, 5), vec![20, 21, 22, 23]).unwrap();
        b.append(Interval::new(10, 11), vec![30]).unwrap();
        (a, b)
    }

    #[test]
    fn advance_defers_member_movement() {
        let (a, b) = scenario();
        let subset = Subset::new((&a, &b));
        let mut c = subset.begin();
        assert!(c.is_synced());
        assert_eq!(c.entry(), 1);

        c.advance(2);
        assert_eq!(c.pending(), 2);
        assert_eq!(c.entry(), 10);
        assert!(!c.is_synced());

        let (x, y) = c.values();
        assert_eq!((*x, *y), (9, 30));
        assert_eq!(c.pending(), 0);
    }

    #[test]
    fn backward_moves_sync_backwards() {
        let (a, b) = scenario();
        let subset = Subset::new((&a, &b));
        let mut c = subset.end();
        c.advance(-3);
        assert_eq!(c.pending(), -3);
        assert_eq!(c.entry(), 1);
        let (x, y) = c.values();
        assert_eq!((*x, *y), (2, 20));
    }

    #[test]
    fn sync_at_end_keeps_pending() {
        let (a, b) = scenario();
        let subset = Subset::new((&a, &b));
        let mut c = subset.begin();
        c.advance(3);
        assert!(c.is_end());
        c.sync();
        assert_eq!(c.pending(), 3);

        c.advance(-1);
        assert_eq!(c.pending(), 2);
        let (x, _) = c.values();
        assert_eq!(*x, 9);
    }

    #[test]
    fn mixed_direction_walk_reads_expected_values() {
        let (a, b) = scenario();
        let subset = Subset::new((&a, &b));
        let mut c = subset.begin();
        c.advance(2);
        assert_eq!(*c.values().1, 30);
        c.advance(-1);
        assert_eq!(*c.values().1, 21);
        c.advance(1);
        c.advance(-2);
        assert_eq!(c.pending(), -1);
        assert_eq!(*c.values().0, 2);
        assert!(c.is_synced());
    }

    #[test]
    fn equality_ignores_member_state() {
        let (a, b) = scenario();
        let subset = Subset::new((&a, &b));
        let mut lazy = subset.begin();
        lazy.advance(1);
        let mut eager = subset.begin();
        eager.advance(1);
        let _ = eager.values();
        assert_ne!(lazy.pending(), eager.pending());
        assert_eq!(lazy, eager);

        let mut walked = subset.begin();
        walked.advance(3);
        assert_eq!(walked, subset.end());
    }

    #[test]
    #[should_panic(expected = "dereferenced end cursor of subset")]
    fn end_cursor_cannot_be_read() {
        let (a, b) = scenario();
        let subset = Subset::new((&a, &b));
        let _ = subset.end().values();
    }

    #[cfg(not(miri))]
    mod proptests {
        use super::*;
        use proptest::prelude::*;
        use tessera_core::{EntryId, RangeSet};

        fn arb_domain() -> impl Strategy<Value = RangeSet> {
            proptest::collection::vec((0i64..120, 1i64..10), 1..8).prop_map(|raw| {
                raw.into_iter()
                    .map(|(l, w)| Interval::new(l, l + w))
                    .collect()
            })
        }

        fn filled(id: u32, domain: &RangeSet) -> RangedArray<EntryId> {
            let mut out = RangedArray::new(AttrId(id), "walk");
            for interval in domain {
                let values = interval.entries().map(|e| e * 10 + id as EntryId).collect();
                out.append(*interval, values).unwrap();
            }
            out
        }

        proptest! {
            #[test]
            fn interleaved_moves_and_reads_track_entries(
                da in arb_domain(),
                db in arb_domain(),
                within in arb_domain(),
                from_end in any::<bool>(),
                ops in proptest::collection::vec((-12isize..=12, any::<bool>()), 1..40),
            ) {
                let a = filled(1, &da);
                let b = filled(2, &db);
                let subset = Subset::restricted(&within, (&a, &b));
                let entries: Vec<EntryId> = subset.sub_ranges().entries().collect();
                let len = entries.len() as isize;

                let (mut cursor, mut rank) = if from_end {
                    (subset.end(), len)
                } else {
                    (subset.begin(), 0)
                };
                for (step, read) in ops {
                    let target = (rank + step).clamp(0, len);
                    cursor.advance(target - rank);
                    rank = target;
                    prop_assert_eq!(cursor.rank(), rank as usize);
                    prop_assert_eq!(cursor.is_end(), rank == len);
                    if read && rank < len {
                        let e = entries[rank as usize];
                        prop_assert_eq!(cursor.entry(), e);
                        let (x, y) = cursor.values();
                        prop_assert_eq!((*x, *y), (e * 10 + 1, e * 10 + 2));
                        prop_assert!(cursor.is_synced());
                    }
                }
            }
        }
    }
}
