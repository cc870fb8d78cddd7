//! Tuple plumbing for zipped views.
//!
//! [`ArrayPack`] is implemented for tuples of `&RangedArray<T>` (arity 1
//! to 8) and gives a [`Subset`](crate::Subset) uniform access to its
//! member arrays: their domains, one cursor per array, and the tuple of
//! values at a common entry. [`AttrSet`] is the matching tuple of
//! [`Attr`] tokens that a registry resolves into an `ArrayPack`.

use smallvec::{smallvec, SmallVec};
use tessera_core::{Attr, EntryId, RangeSet, StoreError};

use crate::array::RangedArray;
use crate::cursor::ArrayCursor;
use crate::registry::AttributeRegistry;

/// A tuple of borrowed arrays that can be read in lockstep.
pub trait ArrayPack<'a>: Copy {
    /// One [`ArrayCursor`] per member array.
    type Cursors: Copy;
    /// One `&T` per member array.
    type Item;

    /// Member domains, in tuple order.
    fn domains(&self) -> SmallVec<[&'a RangeSet; 4]>;

    /// Cursors at the first entry of every member.
    fn cursors_at_start(&self) -> Self::Cursors;

    /// Cursors at the end position of every member.
    fn cursors_at_end(&self) -> Self::Cursors;

    /// Move every cursor forward to `entry`.
    fn seek_forward(cursors: &mut Self::Cursors, entry: EntryId);

    /// Move every cursor backward to `entry`.
    fn seek_backward(cursors: &mut Self::Cursors, entry: EntryId);

    /// Read every cursor.
    fn values(cursors: &Self::Cursors) -> Self::Item;
}

/// A tuple of attribute tokens that resolves to an [`ArrayPack`].
pub trait AttrSet {
    /// The resolved tuple of arrays.
    type Arrays<'a>: ArrayPack<'a>;

    /// Look up every member in `registry`.
    ///
    /// # Errors
    ///
    /// The first lookup failure, as reported by
    /// [`AttributeRegistry::get`].
    fn resolve<'a>(&self, registry: &'a AttributeRegistry)
        -> Result<Self::Arrays<'a>, StoreError>;
}

macro_rules! impl_packs {
    ($($T:ident $idx:tt),+) => {
        impl<'a, $($T: 'a),+> ArrayPack<'a> for ($(&'a RangedArray<$T>,)+) {
            type Cursors = ($(ArrayCursor<'a, $T>,)+);
            type Item = ($(&'a $T,)+);

            fn domains(&self) -> SmallVec<[&'a RangeSet; 4]> {
                smallvec![$(self.$idx.domain()),+]
            }

            fn cursors_at_start(&self) -> Self::Cursors {
                ($(self.$idx.cursor_at_start(),)+)
            }

            fn cursors_at_end(&self) -> Self::Cursors {
                ($(self.$idx.cursor_at_end(),)+)
            }

            fn seek_forward(cursors: &mut Self::Cursors, entry: EntryId) {
                $(cursors.$idx.seek_forward(entry);)+
            }

            fn seek_backward(cursors: &mut Self::Cursors, entry: EntryId) {
                $(cursors.$idx.seek_backward(entry);)+
            }

            fn values(cursors: &Self::Cursors) -> Self::Item {
                ($(cursors.$idx.value(),)+)
            }
        }

        impl<$($T: Send + Sync + 'static),+> AttrSet for ($(Attr<$T>,)+) {
            type Arrays<'a> = ($(&'a RangedArray<$T>,)+);

            fn resolve<'a>(
                &self,
                registry: &'a AttributeRegistry,
            ) -> Result<Self::Arrays<'a>, StoreError> {
                Ok(($(registry.get(self.$idx)?,)+))
            }
        }
    };
}

impl_packs!(A 0);
impl_packs!(A 0, B 1);
impl_packs!(A 0, B 1, C 2);
impl_packs!(A 0, B 1, C 2, D 3);
impl_packs!(A 0, B 1, C 2, D 3, E 4);
impl_packs!(A 0, B 1, C 2, D 3, E 4, F 5);
impl_packs!(A 0, B 1, C 2, D 3, E 4, F 5, G 6);
impl_packs!(A 0, B 1, C 2, D 3, E 4, F 5, G 6, H 7);
