//! Type-derived capability keys.
//!
//! A [`CapabilityKey`] names the interface a registry entry satisfies. It is
//! derived from a Rust type, usually a trait object type such as
//! `dyn KeyValueStore`, so callers never spell out string tags by hand.
//!
//! Equality and hashing use the [`TypeId`] only; the type name is carried
//! along for diagnostics and is not part of the key.

use core::any::{TypeId, type_name};
use core::fmt;
use core::hash::{Hash, Hasher};

/// Key identifying a capability (interface) in a typed registry.
#[derive(Clone, Copy)]
pub struct CapabilityKey {
    id: TypeId,
    name: &'static str,
}

impl CapabilityKey {
    /// Key for capability type `C`.
    ///
    /// ```
    /// use fcomp_core::CapabilityKey;
    ///
    /// trait Clock {}
    /// let key = CapabilityKey::of::<dyn Clock>();
    /// assert!(key.name().contains("Clock"));
    /// assert_eq!(key, CapabilityKey::of::<dyn Clock>());
    /// ```
    #[must_use]
    pub fn of<C: ?Sized + 'static>() -> Self {
        Self {
            id: TypeId::of::<C>(),
            name: type_name::<C>(),
        }
    }

    /// The underlying type id.
    #[inline]
    #[must_use]
    pub fn id(&self) -> TypeId {
        self.id
    }

    /// Human-readable type name (diagnostics only, not guaranteed stable).
    #[inline]
    #[must_use]
    pub fn name(&self) -> &'static str {
        self.name
    }
}

impl PartialEq for CapabilityKey {
    fn eq(&self, other: &Self) -> bool {
        self.id == other.id
    }
}

impl Eq for CapabilityKey {}

impl Hash for CapabilityKey {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.id.hash(state);
    }
}

impl fmt::Debug for CapabilityKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "CapabilityKey({})", self.name)
    }
}

impl fmt::Display for CapabilityKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name)
    }
}
