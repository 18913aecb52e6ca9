//! Capability-keyed registry.
//!
//! A [`TypedRegistry`] maps a [`CapabilityKey`] to exactly one value. The
//! caller names the capability with a type (usually `dyn Trait`) and gets
//! back an `Arc` of that type; a lookup whose stored value has a different
//! type yields `None` instead of panicking.
//!
//! Alongside the value each entry can carry a *dispatch handle* of type
//! `H`, the same object seen through an interface the owner wants to
//! iterate (lifecycle services, coordinators). Handles are returned in
//! registration order.
//!
//! # Invariants
//!
//! - At most one entry per key. Re-registering replaces the value and the
//!   handle.
//! - Registration order is oldest first; re-registering a key moves it to
//!   the end.
//!
//! The registry itself is not synchronized. The container wraps all of its
//! registries in one lock.

use core::any::Any;
use core::fmt;
use std::sync::Arc;

use ahash::AHashMap;
use fcomp_core::CapabilityKey;

struct Entry<H: ?Sized> {
    value: Box<dyn Any + Send + Sync>,
    handle: Option<Arc<H>>,
}

/// Registry of one namespace.
pub struct TypedRegistry<H: ?Sized = dyn Any + Send + Sync> {
    entries: AHashMap<CapabilityKey, Entry<H>>,
    order: Vec<CapabilityKey>,
}

impl<H: ?Sized> TypedRegistry<H> {
    #[must_use]
    pub fn new() -> Self {
        Self {
            entries: AHashMap::new(),
            order: Vec::new(),
        }
    }

    /// Register `value` under the capability `C`, with an optional dispatch
    /// handle. Returns `true` if an earlier value was replaced.
    pub fn insert<C: ?Sized + Send + Sync + 'static>(
        &mut self,
        value: Arc<C>,
        handle: Option<Arc<H>>,
    ) -> bool {
        let key = CapabilityKey::of::<C>();
        let replaced = self
            .entries
            .insert(
                key,
                Entry {
                    value: Box::new(value),
                    handle,
                },
            )
            .is_some();
        if replaced {
            self.order.retain(|k| *k != key);
        }
        self.order.push(key);
        replaced
    }

    /// The value registered under `C`, if any and if it has that type.
    #[must_use]
    pub fn get<C: ?Sized + Send + Sync + 'static>(&self) -> Option<Arc<C>> {
        self.entries
            .get(&CapabilityKey::of::<C>())
            .and_then(|e| e.value.downcast_ref::<Arc<C>>())
            .cloned()
    }

    #[must_use]
    pub fn contains_key(&self, key: CapabilityKey) -> bool {
        self.entries.contains_key(&key)
    }

    #[inline]
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Keys in registration order.
    pub fn keys(&self) -> impl Iterator<Item = CapabilityKey> + '_ {
        self.order.iter().copied()
    }

    /// Dispatch handles in registration order, with their keys. Entries
    /// registered without a handle are skipped.
    #[must_use]
    pub fn handles(&self) -> Vec<(CapabilityKey, Arc<H>)> {
        self.order
            .iter()
            .filter_map(|key| {
                let entry = self.entries.get(key)?;
                entry.handle.as_ref().map(|h| (*key, Arc::clone(h)))
            })
            .collect()
    }
}

impl<H: ?Sized> Default for TypedRegistry<H> {
    fn default() -> Self {
        Self::new()
    }
}

impl<H: ?Sized> fmt::Debug for TypedRegistry<H> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list()
            .entries(self.order.iter().map(|k| k.name()))
            .finish()
    }
}
