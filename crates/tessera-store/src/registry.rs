//! The attribute registry: owner of every [`RangedArray`] in a domain.
//!
//! Attributes are named once via [`AttributeRegistry::register`], which
//! issues a typed [`Attr`] token. Data arrives through `append`; the first
//! append creates the attribute's array and later appends extend it. The
//! registry never replaces or removes an array.
//!
//! Subsets borrow the registry immutably, so the borrow checker enforces
//! that no append happens while a subset (or any cursor or split derived
//! from it) is alive.

use std::any::{type_name, Any, TypeId};
use std::fmt;

use indexmap::IndexMap;
use tessera_core::{Attr, AttrId, EntryId, Interval, RangeSet, RegistryId, StoreError};

use crate::array::RangedArray;
use crate::config::{ConfigError, StoreConfig};
use crate::pack::AttrSet;
use crate::subset::Subset;

/// Type information recorded when a name is registered.
#[derive(Clone, Copy, Debug)]
struct AttrMeta {
    type_id: TypeId,
    type_name: &'static str,
}

/// Owns all attribute arrays for one domain.
pub struct AttributeRegistry {
    id: RegistryId,
    config: StoreConfig,
    /// Largest interval upper bound ever appended.
    total_size: EntryId,
    /// Registered names; the index of a name is its `AttrId`.
    attrs: IndexMap<String, AttrMeta>,
    /// Arrays for attributes that have received data.
    arrays: IndexMap<AttrId, Box<dyn Any + Send + Sync>>,
}

impl AttributeRegistry {
    /// Create an empty registry with default configuration.
    pub fn new() -> Self {
        Self::build(StoreConfig::default())
    }

    /// Create an empty registry with the given configuration.
    pub fn with_config(config: StoreConfig) -> Result<Self, ConfigError> {
        config.validate()?;
        Ok(Self::build(config))
    }

    fn build(config: StoreConfig) -> Self {
        Self {
            id: RegistryId::next(),
            attrs: IndexMap::with_capacity(config.expected_attributes),
            arrays: IndexMap::with_capacity(config.expected_attributes),
            total_size: 0,
            config,
        }
    }

    /// This registry's instance ID.
    pub fn id(&self) -> RegistryId {
        self.id
    }

    /// The configuration the registry was built with.
    pub fn config(&self) -> &StoreConfig {
        &self.config
    }

    /// Largest interval upper bound ever appended.
    pub fn total_size(&self) -> EntryId {
        self.total_size
    }

    /// Number of registered attribute names.
    pub fn len(&self) -> usize {
        self.attrs.len()
    }

    /// Whether no attribute has been registered.
    pub fn is_empty(&self) -> bool {
        self.attrs.is_empty()
    }

    /// Registered names in registration order.
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.attrs.keys().map(String::as_str)
    }

    /// Register `name` with element type `T`, or return its existing token.
    ///
    /// # Errors
    ///
    /// - [`StoreError::TypeMismatch`] if `name` is registered with another type.
    /// - [`StoreError::CapacityExceeded`] if the attribute ID space is exhausted.
    pub fn register<T: Send + Sync + 'static>(
        &mut self,
        name: &str,
    ) -> Result<Attr<T>, StoreError> {
        if self.attrs.contains_key(name) {
            return self.attr(name);
        }
        let count = self.attrs.len();
        let id = u32::try_from(count)
            .map(AttrId)
            .map_err(|_| StoreError::CapacityExceeded { count })?;
        self.attrs.insert(
            name.to_owned(),
            AttrMeta {
                type_id: TypeId::of::<T>(),
                type_name: type_name::<T>(),
            },
        );
        tracing::debug!(attr = %id, name, ty = type_name::<T>(), "registered attribute");
        Ok(Attr::new(id, self.id))
    }

    /// Look up the token for `name`.
    ///
    /// # Errors
    ///
    /// - [`StoreError::UnknownName`] if `name` was never registered.
    /// - [`StoreError::TypeMismatch`] if it was registered with another type.
    pub fn attr<T: Send + Sync + 'static>(&self, name: &str) -> Result<Attr<T>, StoreError> {
        let (idx, _, meta) = self
            .attrs
            .get_full(name)
            .ok_or_else(|| StoreError::UnknownName { name: name.into() })?;
        if meta.type_id != TypeId::of::<T>() {
            return Err(StoreError::TypeMismatch {
                name: name.into(),
                expected: meta.type_name,
                actual: type_name::<T>(),
            });
        }
        Ok(Attr::new(AttrId(idx as u32), self.id))
    }

    /// Whether `attr` has received data.
    pub fn contains<T>(&self, attr: Attr<T>) -> bool {
        attr.registry() == self.id && self.arrays.contains_key(&attr.id())
    }

    /// Append `values` for the entries of `interval`, creating the
    /// attribute's array on first use.
    ///
    /// # Errors
    ///
    /// - [`StoreError::ForeignAttribute`] if `attr` came from another registry.
    /// - [`StoreError::InvalidArgument`] if `values.len() != interval.len()`.
    /// - [`StoreError::InvalidRange`] if `interval` overlaps the attribute's domain.
    ///
    /// On error nothing changes.
    pub fn append<T: Send + Sync + 'static>(
        &mut self,
        attr: Attr<T>,
        interval: Interval,
        values: Vec<T>,
    ) -> Result<&RangedArray<T>, StoreError> {
        let meta = self.meta(attr)?.1;
        let id = attr.id();
        let name = self
            .attrs
            .get_index(id.0 as usize)
            .map_or("", |(name, _)| name.as_str());
        let rejected = |e: &StoreError| {
            tracing::debug!(attr = %id, name, %interval, error = %e, "rejected append");
        };

        if let Some(slot) = self.arrays.get_mut(&id) {
            let array = slot
                .downcast_mut::<RangedArray<T>>()
                .ok_or_else(|| mismatch::<T>(name, meta))?;
            array.append(interval, values).inspect_err(rejected)?;
        } else {
            let mut array = RangedArray::new(id, name);
            array.append(interval, values).inspect_err(rejected)?;
            self.arrays.insert(id, Box::new(array));
        }

        self.total_size = self.total_size.max(interval.upper);
        let array = self.get(attr)?;
        tracing::debug!(
            attr = %id,
            name = array.name(),
            %interval,
            len = array.len(),
            "appended interval"
        );
        Ok(array)
    }

    /// Append `interval.len()` copies of `value`.
    ///
    /// # Errors
    ///
    /// As for [`AttributeRegistry::append`].
    pub fn append_fill<T: Clone + Send + Sync + 'static>(
        &mut self,
        attr: Attr<T>,
        interval: Interval,
        value: T,
    ) -> Result<&RangedArray<T>, StoreError> {
        self.append(attr, interval, vec![value; interval.len()])
    }

    /// The array for `attr`.
    ///
    /// # Errors
    ///
    /// - [`StoreError::ForeignAttribute`] if `attr` came from another registry.
    /// - [`StoreError::NotFound`] if no data has been appended for `attr`.
    pub fn get<T: Send + Sync + 'static>(
        &self,
        attr: Attr<T>,
    ) -> Result<&RangedArray<T>, StoreError> {
        let (name, meta) = self.meta(attr)?;
        let slot = self
            .arrays
            .get(&attr.id())
            .ok_or(StoreError::NotFound { attr: attr.id() })?;
        slot.downcast_ref::<RangedArray<T>>()
            .ok_or_else(|| mismatch::<T>(name, meta))
    }

    /// A zipped view over the common domain of `attrs`.
    ///
    /// Members that share no entries produce an empty subset.
    ///
    /// # Errors
    ///
    /// The first lookup failure among `attrs`.
    pub fn subset<S: AttrSet>(&self, attrs: S) -> Result<Subset<'_, S::Arrays<'_>>, StoreError> {
        let arrays = attrs.resolve(self)?;
        Ok(Subset::new(arrays).with_grain(self.config.split_grain))
    }

    /// A zipped view over `range` intersected with the common domain of
    /// `attrs`.
    ///
    /// # Errors
    ///
    /// The first lookup failure among `attrs`.
    pub fn subset_in<S: AttrSet>(
        &self,
        range: &RangeSet,
        attrs: S,
    ) -> Result<Subset<'_, S::Arrays<'_>>, StoreError> {
        let arrays = attrs.resolve(self)?;
        Ok(Subset::restricted(range, arrays).with_grain(self.config.split_grain))
    }

    /// Name and type record for a token issued by this registry, checked
    /// against the token's element type.
    fn meta<T: 'static>(&self, attr: Attr<T>) -> Result<(&String, AttrMeta), StoreError> {
        if attr.registry() != self.id {
            return Err(StoreError::ForeignAttribute {
                attr: attr.id(),
                registry: attr.registry(),
            });
        }
        let (name, meta) = self
            .attrs
            .get_index(attr.id().0 as usize)
            .ok_or(StoreError::NotFound { attr: attr.id() })?;
        if meta.type_id != TypeId::of::<T>() {
            return Err(mismatch::<T>(name, *meta));
        }
        Ok((name, *meta))
    }
}

fn mismatch<T>(name: &str, meta: AttrMeta) -> StoreError {
    StoreError::TypeMismatch {
        name: name.into(),
        expected: meta.type_name,
        actual: type_name::<T>(),
    }
}

impl Default for AttributeRegistry {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for AttributeRegistry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AttributeRegistry")
            .field("id", &self.id)
            .field("total_size", &self.total_size)
            .field("attrs", &self.attrs.keys().collect::<Vec<_>>())
            .field("populated", &self.arrays.len())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn register_is_idempotent_per_type() {
        let mut reg = AttributeRegistry::new();
        let a = reg.register::<f32>("mass").unwrap();
        let b = reg.register::<f32>("mass").unwrap();
        assert_eq!(a, b);
        assert_eq!(reg.len(), 1);
        assert_eq!(reg.attr::<f32>("mass").unwrap(), a);
    }

    #[test]
    fn register_rejects_type_change() {
        let mut reg = AttributeRegistry::new();
        reg.register::<f32>("mass").unwrap();
        let err = reg.register::<u8>("mass").unwrap_err();
        assert!(matches!(err, StoreError::TypeMismatch { .. }));
    }

    #[test]
    fn unknown_name_is_reported() {
        let reg = AttributeRegistry::new();
        assert_eq!(
            reg.attr::<f32>("missing"),
            Err(StoreError::UnknownName {
                name: "missing".into()
            })
        );
    }

    #[test]
    fn get_before_append_is_not_found() {
        let mut reg = AttributeRegistry::new();
        let mass = reg.register::<f32>("mass").unwrap();
        assert_eq!(
            reg.get(mass).unwrap_err(),
            StoreError::NotFound { attr: mass.id() }
        );
        assert!(!reg.contains(mass));
    }

    #[test]
    fn foreign_token_is_rejected() {
        let mut ours = AttributeRegistry::new();
        let mut theirs = AttributeRegistry::new();
        ours.register::<f32>("mass").unwrap();
        let foreign = theirs.register::<f32>("mass").unwrap();
        theirs
            .append_fill(foreign, Interval::new(0, 2), 1.0)
            .unwrap();
        assert!(matches!(
            ours.get(foreign),
            Err(StoreError::ForeignAttribute { .. })
        ));
        assert!(ours.append_fill(foreign, Interval::new(0, 2), 1.0).is_err());
    }

    #[test]
    fn mistyped_token_cannot_claim_attribute() {
        let mut reg = AttributeRegistry::new();
        let mass = reg.register::<f32>("mass").unwrap();
        let forged = Attr::<u8>::new(mass.id(), mass.registry());

        let err = reg.append_fill(forged, Interval::new(0, 3), 1).unwrap_err();
        assert_eq!(
            err,
            StoreError::TypeMismatch {
                name: "mass".into(),
                expected: type_name::<f32>(),
                actual: type_name::<u8>(),
            }
        );
        assert!(!reg.contains(mass));
        assert_eq!(reg.total_size(), 0);

        reg.append_fill(mass, Interval::new(0, 3), 2.5).unwrap();
        assert!(matches!(reg.get(forged), Err(StoreError::TypeMismatch { .. })));
        assert_eq!(reg.get(mass).unwrap().as_slice(), &[2.5; 3]);
    }

    #[test]
    fn unrepresentable_length_is_invalid_argument() {
        let mut reg = AttributeRegistry::new();
        let x = reg.register::<i32>("x").unwrap();
        let err = reg
            .append(x, Interval::new(EntryId::MIN, 0), vec![])
            .unwrap_err();
        assert_eq!(
            err,
            StoreError::InvalidArgument {
                expected: 1usize << 63,
                actual: 0
            }
        );
        assert!(!reg.contains(x));
    }

    #[test]
    fn append_creates_then_extends() {
        let mut reg = AttributeRegistry::new();
        let x = reg.register::<i32>("x").unwrap();
        reg.append_fill(x, Interval::new(0, 5), 7).unwrap();
        let array = reg.append(x, Interval::new(5, 8), vec![1, 2, 3]).unwrap();
        assert_eq!(array.domain().intervals(), &[Interval::new(0, 8)]);
        assert_eq!(array.as_slice(), &[7, 7, 7, 7, 7, 1, 2, 3]);
        assert_eq!(array.name(), "x");
        assert_eq!(reg.total_size(), 8);
    }

    #[test]
    fn failed_first_append_creates_nothing() {
        let mut reg = AttributeRegistry::new();
        let x = reg.register::<i32>("x").unwrap();
        let err = reg.append(x, Interval::new(0, 3), vec![1]).unwrap_err();
        assert!(matches!(err, StoreError::InvalidArgument { .. }));
        assert!(!reg.contains(x));
        assert_eq!(reg.total_size(), 0);
    }

    #[test]
    fn overlapping_append_fails_and_keeps_array() {
        let mut reg = AttributeRegistry::new();
        let x = reg.register::<i32>("x").unwrap();
        reg.append_fill(x, Interval::new(0, 5), 1).unwrap();
        let err = reg.append_fill(x, Interval::new(2, 6), 2).unwrap_err();
        assert!(matches!(err, StoreError::InvalidRange { .. }));
        let array = reg.get(x).unwrap();
        assert_eq!(array.as_slice(), &[1; 5]);
        assert_eq!(reg.total_size(), 5);
    }

    #[test]
    fn total_size_tracks_largest_upper_bound() {
        let mut reg = AttributeRegistry::new();
        let a = reg.register::<u8>("a").unwrap();
        let b = reg.register::<u8>("b").unwrap();
        reg.append_fill(a, Interval::new(40, 50), 0).unwrap();
        reg.append_fill(b, Interval::new(0, 10), 0).unwrap();
        reg.append_fill(a, Interval::new(0, 5), 0).unwrap();
        assert_eq!(reg.total_size(), 50);
    }

    #[test]
    fn zero_grain_config_rejected() {
        let config = StoreConfig::new().with_split_grain(0);
        assert!(AttributeRegistry::with_config(config).is_err());
    }

    #[test]
    fn names_in_registration_order() {
        let mut reg = AttributeRegistry::new();
        reg.register::<u8>("b").unwrap();
        reg.register::<u8>("a").unwrap();
        assert_eq!(reg.names().collect::<Vec<_>>(), vec!["b", "a"]);
    }
}
