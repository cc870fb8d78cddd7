//! Fork-join traversal of subsets with rayon.
//!
//! A [`Subset`] is its own work unit: rayon's splitter calls
//! [`Subset::split`] while the halves stay divisible, and each leaf is
//! drained with the sequential iterator.

use rayon::iter::plumbing::{bridge_unindexed, Folder, UnindexedConsumer, UnindexedProducer};
use rayon::iter::{IntoParallelIterator, ParallelIterator};

use crate::pack::ArrayPack;
use crate::subset::Subset;

/// Parallel iterator over the value tuples of a [`Subset`].
#[derive(Debug)]
pub struct ParSubset<'a, P> {
    subset: Subset<'a, P>,
}

impl<'a, P> ParallelIterator for ParSubset<'a, P>
where
    P: ArrayPack<'a> + Send,
    P::Item: Send,
{
    type Item = P::Item;

    fn drive_unindexed<C>(self, consumer: C) -> C::Result
    where
        C: UnindexedConsumer<Self::Item>,
    {
        bridge_unindexed(SubsetProducer(self.subset), consumer)
    }
}

struct SubsetProducer<'a, P>(Subset<'a, P>);

impl<'a, P> UnindexedProducer for SubsetProducer<'a, P>
where
    P: ArrayPack<'a> + Send,
    P::Item: Send,
{
    type Item = P::Item;

    fn split(self) -> (Self, Option<Self>) {
        if self.0.is_divisible() {
            let (left, right) = self.0.split();
            (Self(left), Some(Self(right)))
        } else {
            (self, None)
        }
    }

    fn fold_with<F>(self, folder: F) -> F
    where
        F: Folder<Self::Item>,
    {
        folder.consume_iter(self.0.iter())
    }
}

impl<'a, P> IntoParallelIterator for Subset<'a, P>
where
    P: ArrayPack<'a> + Send,
    P::Item: Send,
{
    type Iter = ParSubset<'a, P>;
    type Item = P::Item;

    fn into_par_iter(self) -> Self::Iter {
        ParSubset { subset: self }
    }
}

impl<'a, P> Subset<'a, P>
where
    P: ArrayPack<'a> + Send,
    P::Item: Send,
{
    /// Call `op` once per covered entry, splitting the work across the
    /// rayon pool down to the subset's grain. Call order is unspecified.
    pub fn par_for_each_element<F>(&self, op: F)
    where
        F: Fn(P::Item) + Sync + Send,
    {
        self.clone().into_par_iter().for_each(op);
    }
}

#[cfg(test)]
mod tests {
    use std::sync::atomic::{AtomicUsize, Ordering};

    use super::*;
    use crate::array::RangedArray;
    use tessera_core::{AttrId, Interval};

    fn striped(id: u32, stride: i64, width: i64, count: i64) -> RangedArray<u64> {
        let mut out = RangedArray::new(AttrId(id), "striped");
        for k in 0..count {
            let interval = Interval::new(k * stride, k * stride + width);
            let values = interval.entries().map(|e| e as u64).collect();
            out.append(interval, values).unwrap();
        }
        out
    }

    #[test]
    fn parallel_sum_matches_sequential() {
        let a = striped(0, 10, 7, 200);
        let b = striped(1, 5, 4, 400);
        let subset = Subset::new((&a, &b)).with_grain(16);

        let sequential: u64 = subset.iter().map(|(x, y)| x + y).sum();
        let parallel: u64 = subset.clone().into_par_iter().map(|(x, y)| x + y).sum();
        assert_eq!(parallel, sequential);
    }

    #[test]
    fn every_entry_visited_once() {
        let a = striped(0, 3, 2, 500);
        let subset = Subset::new((&a,)).with_grain(8);
        let calls = AtomicUsize::new(0);
        let total = AtomicUsize::new(0);
        subset.par_for_each_element(|(x,)| {
            calls.fetch_add(1, Ordering::Relaxed);
            total.fetch_add(*x as usize, Ordering::Relaxed);
        });
        assert_eq!(calls.into_inner(), subset.len());
        let expected: u64 = a.as_slice().iter().sum();
        assert_eq!(total.into_inner() as u64, expected);
    }

    #[test]
    fn empty_subset_runs_no_work() {
        let a = striped(0, 10, 2, 5);
        let b = striped(1, 10, 2, 0);
        let subset = Subset::new((&a, &b));
        assert_eq!(subset.into_par_iter().count(), 0);
    }
}
