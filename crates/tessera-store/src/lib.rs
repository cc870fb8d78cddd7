//! Sparse, multi-typed columnar attribute storage.
//!
//! Entries are plain integer ids. Each attribute owns a
//! [`RangedArray`]: a dense `Vec<T>` of values paired with the
//! [`RangeSet`](tessera_core::RangeSet) of entries it covers. Attributes
//! are registered by name in an [`AttributeRegistry`], which hands out
//! typed [`Attr`](tessera_core::Attr) tokens and owns the arrays.
//!
//! # Architecture
//!
//! ```text
//! AttributeRegistry
//! ├── name → (AttrId, TypeId) table (registration order)
//! └── AttrId → RangedArray<T> (type-erased, created on first append)
//!
//! Subset<(&RangedArray<A>, &RangedArray<B>, ..)>
//! ├── sub_ranges = ∩ member domains (∩ optional restriction)
//! ├── iter / for_each_element   (ascending entry order)
//! ├── split                     (fork-join work unit)
//! └── SubsetCursor              (logical cursor + lazily synced members)
//! ```
//!
//! # Example
//!
//! ```
//! use tessera_core::Interval;
//! use tessera_store::AttributeRegistry;
//!
//! let mut registry = AttributeRegistry::new();
//! let mass = registry.register::<f64>("mass").unwrap();
//! let tag = registry.register::<u8>("tag").unwrap();
//! registry.append(mass, Interval::new(0, 4), vec![1.0, 2.0, 3.0, 4.0]).unwrap();
//! registry.append_fill(tag, Interval::new(2, 8), 7).unwrap();
//!
//! let subset = registry.subset((mass, tag)).unwrap();
//! let rows: Vec<_> = subset.iter_entries().map(|(e, (m, t))| (e, *m, *t)).collect();
//! assert_eq!(rows, vec![(2, 3.0, 7), (3, 4.0, 7)]);
//! ```
//!
//! # Features
//!
//! - `parallel`: rayon `IntoParallelIterator` for [`Subset`] and
//!   `Subset::par_for_each_element`.

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![forbid(unsafe_code)]

pub mod array;
pub mod config;
pub mod cursor;
pub mod pack;
#[cfg(feature = "parallel")]
pub mod parallel;
pub mod registry;
pub mod subset;
pub mod subset_cursor;

// Public re-exports for the primary API surface.
pub use array::RangedArray;
pub use config::{ConfigError, StoreConfig};
pub use cursor::ArrayCursor;
pub use pack::{ArrayPack, AttrSet};
#[cfg(feature = "parallel")]
pub use parallel::ParSubset;
pub use registry::AttributeRegistry;
pub use subset::{Subset, SubsetEntries, SubsetIter};
pub use subset_cursor::SubsetCursor;
