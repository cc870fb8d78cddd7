//! Tessera: a sparse, multi-typed columnar attribute store.
//!
//! This is the top-level facade crate that re-exports the public API from
//! the Tessera sub-crates. For most users, adding `tessera` as a single
//! dependency is sufficient.
//!
//! # Quick start
//!
//! ```rust
//! use tessera::prelude::*;
//!
//! let mut registry = AttributeRegistry::new();
//! let heat = registry.register::<f32>("heat").unwrap();
//! let owner = registry.register::<u32>("owner").unwrap();
//!
//! // Two patches of heat, one patch of ownership straddling both.
//! registry.append_fill(heat, Interval::new(0, 4), 1.5).unwrap();
//! registry.append_fill(heat, Interval::new(10, 14), 3.0).unwrap();
//! registry.append(owner, Interval::new(2, 12), (0..10).collect()).unwrap();
//!
//! let subset = registry.subset((heat, owner)).unwrap();
//! assert_eq!(subset.len(), 4);
//!
//! let entries: Vec<EntryId> = subset.iter_entries().map(|(e, _)| e).collect();
//! assert_eq!(entries, vec![2, 3, 10, 11]);
//!
//! let mut total = 0.0;
//! subset.for_each_element(|(h, o)| total += h * *o as f32);
//! assert_eq!(total, 1.5 * (0.0 + 1.0) + 3.0 * (8.0 + 9.0));
//! ```
//!
//! # Modules
//!
//! Each module corresponds to a sub-crate. Use them for types not in the prelude:
//!
//! | Module | Sub-crate | Contents |
//! |--------|-----------|----------|
//! | [`types`] | `tessera-core` | Entry ids, intervals, range sets, range cursors, tokens, errors |
//! | [`store`] | `tessera-store` | Arrays, registry, subsets, subset cursors, config |

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![forbid(unsafe_code)]

/// Core vocabulary types (`tessera-core`).
///
/// Contains [`types::Interval`], [`types::RangeSet`], the
/// [`types::RangeCursor`] that walks a range set, attribute tokens, and
/// [`types::StoreError`].
pub use tessera_core as types;

/// Attribute storage and zipped views (`tessera-store`).
///
/// [`store::AttributeRegistry`] owns the arrays; [`store::Subset`] reads
/// several of them in lockstep over their common entries.
pub use tessera_store as store;

/// Common imports for typical Tessera usage.
///
/// ```rust
/// use tessera::prelude::*;
/// ```
pub mod prelude {
    // Core types
    pub use tessera_core::{Attr, EntryId, Interval, RangeSet, StoreError};

    // Storage
    pub use tessera_store::{AttributeRegistry, RangedArray, StoreConfig, Subset, SubsetCursor};
}
