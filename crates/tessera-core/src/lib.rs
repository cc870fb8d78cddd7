//! Core types for the Tessera attribute store.
//!
//! This is the leaf crate with no internal dependencies. It defines the
//! vocabulary shared by the rest of the workspace: entry ids, half-open
//! intervals, range sets and the cursor that walks them, typed attribute
//! tokens, and the store error type.

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![forbid(unsafe_code)]

pub mod error;
pub mod id;
pub mod interval;
pub mod range_cursor;
pub mod range_set;

pub use error::StoreError;
pub use id::{Attr, AttrId, EntryId, RegistryId};
pub use interval::Interval;
pub use range_cursor::{Position, RangeCursor};
pub use range_set::RangeSet;
