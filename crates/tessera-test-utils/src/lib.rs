//! Test utilities for Tessera development.
//!
//! Provides a [`TestRegistryBuilder`] for declaring attribute layouts in
//! one expression, domain generators for sparse layouts, and canned
//! registries in [`fixtures`].

#![forbid(unsafe_code)]
#![allow(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]

pub mod fixtures;

use tessera_core::{Attr, EntryId, Interval, RangeSet};
use tessera_store::{AttributeRegistry, StoreConfig};

/// Builder for registries with preconfigured attributes.
///
/// Every `with_*` call registers the attribute and appends its data
/// immediately, panicking on failure: a broken fixture should fail the
/// test that uses it, not surface as an error value.
pub struct TestRegistryBuilder {
    registry: AttributeRegistry,
}

impl TestRegistryBuilder {
    pub fn new() -> Self {
        Self {
            registry: AttributeRegistry::new(),
        }
    }

    /// Start from a registry with a custom split grain.
    pub fn with_grain(grain: usize) -> Self {
        let config = StoreConfig::new().with_split_grain(grain);
        Self {
            registry: AttributeRegistry::with_config(config).expect("valid test config"),
        }
    }

    /// Register `name` and fill every interval of `domain` with values
    /// computed from the entry id.
    pub fn with_attr<T, F>(mut self, name: &str, domain: &RangeSet, value: F) -> Self
    where
        T: Send + Sync + 'static,
        F: Fn(EntryId) -> T,
    {
        let attr = self.registry.register::<T>(name).expect("register");
        for interval in domain {
            let values = interval.entries().map(&value).collect();
            self.registry
                .append(attr, *interval, values)
                .expect("append");
        }
        self
    }

    /// Register `name` and fill `domain` with one constant.
    pub fn with_fill<T>(mut self, name: &str, domain: &RangeSet, value: T) -> Self
    where
        T: Clone + Send + Sync + 'static,
    {
        let attr = self.registry.register::<T>(name).expect("register");
        for interval in domain {
            self.registry
                .append_fill(attr, *interval, value.clone())
                .expect("append_fill");
        }
        self
    }

    pub fn build(self) -> AttributeRegistry {
        self.registry
    }
}

impl Default for TestRegistryBuilder {
    fn default() -> Self {
        Self::new()
    }
}

/// Build a range set from `(lower, upper)` pairs.
pub fn ranges(pairs: &[(EntryId, EntryId)]) -> RangeSet {
    pairs.iter().map(|&(l, u)| Interval::new(l, u)).collect()
}

/// `count` intervals of `width` entries, one every `stride` entries,
/// starting at `offset`.
pub fn striped(offset: EntryId, stride: EntryId, width: EntryId, count: usize) -> RangeSet {
    (0..count as EntryId)
        .map(|k| {
            let lower = offset + k * stride;
            Interval::new(lower, lower + width)
        })
        .collect()
}

/// Look up a typed token, panicking if it is missing.
pub fn attr<T: Send + Sync + 'static>(registry: &AttributeRegistry, name: &str) -> Attr<T> {
    registry
        .attr(name)
        .unwrap_or_else(|e| panic!("fixture attribute '{name}': {e}"))
}
