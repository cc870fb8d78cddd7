//! Strongly-typed identifiers and the [`EntryId`] type alias.

use std::any::type_name;
use std::fmt;
use std::hash::{Hash, Hasher};
use std::marker::PhantomData;
use std::sync::atomic::{AtomicU64, Ordering};

/// Identifies one logical row across all attributes of a domain.
///
/// Entry ids are totally ordered but need not be contiguous: an attribute
/// may hold entries `0..3` and `10..12` and nothing in between.
pub type EntryId = i64;

/// Identifies an attribute within an `AttributeRegistry`.
///
/// Attributes are registered on demand and assigned sequential IDs.
/// `AttrId(n)` corresponds to the n-th name registered with the registry.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct AttrId(pub u32);

impl fmt::Display for AttrId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<u32> for AttrId {
    fn from(v: u32) -> Self {
        Self(v)
    }
}

/// Counter for unique [`RegistryId`] allocation.
static REGISTRY_COUNTER: AtomicU64 = AtomicU64::new(1);

/// Unique per-instance identifier for an attribute registry.
///
/// Allocated from a monotonic atomic counter via [`RegistryId::next`].
/// Every [`Attr`] token records the registry that issued it, so a token
/// presented to a different registry is rejected instead of silently
/// aliasing whatever attribute happens to share its [`AttrId`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct RegistryId(u64);

impl RegistryId {
    /// Allocate a fresh, unique registry ID.
    ///
    /// Each call returns a new ID that has never been returned before
    /// within this process. Thread-safe.
    pub fn next() -> Self {
        Self(REGISTRY_COUNTER.fetch_add(1, Ordering::Relaxed))
    }
}

impl fmt::Display for RegistryId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Typed token naming one attribute of element type `T`.
///
/// Tokens are issued by a registry when a name is registered and replace
/// name hashing entirely: two different names can never collide, and the
/// element type is checked at compile time wherever the token is used.
///
/// `Attr<T>` is `Copy` for every `T`; it holds no value of `T`.
pub struct Attr<T> {
    id: AttrId,
    registry: RegistryId,
    _marker: PhantomData<fn() -> T>,
}

impl<T> Attr<T> {
    /// Create a token. Only registries should call this; a registry
    /// rejects tokens whose element type differs from the registered one.
    #[doc(hidden)]
    pub fn new(id: AttrId, registry: RegistryId) -> Self {
        Self {
            id,
            registry,
            _marker: PhantomData,
        }
    }

    /// The attribute ID within the issuing registry.
    pub fn id(&self) -> AttrId {
        self.id
    }

    /// The registry that issued this token.
    pub fn registry(&self) -> RegistryId {
        self.registry
    }
}

impl<T> Clone for Attr<T> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<T> Copy for Attr<T> {}

impl<T> PartialEq for Attr<T> {
    fn eq(&self, other: &Self) -> bool {
        self.id == other.id && self.registry == other.registry
    }
}

impl<T> Eq for Attr<T> {}

impl<T> Hash for Attr<T> {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.id.hash(state);
        self.registry.hash(state);
    }
}

impl<T> fmt::Debug for Attr<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Attr")
            .field("id", &self.id)
            .field("registry", &self.registry)
            .field("type", &type_name::<T>())
            .finish()
    }
}

impl<T> fmt::Display for Attr<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}@{}", self.id, self.registry)
    }
}
