//! Proptest generators.

use fcomp_core::{Identifier, LifecycleEvent};
use proptest::prelude::*;

/// Segment names the path strategies draw from.
pub const SEGMENT_NAMES: [&str; 5] = ["home", "list", "detail", "settings", "about"];

/// A single identifier from [`SEGMENT_NAMES`].
pub fn segment_identifier() -> impl Strategy<Value = Identifier> {
    prop::sample::select(SEGMENT_NAMES.to_vec()).prop_map(Identifier::new)
}

/// A route path of up to `max_len` segments from [`SEGMENT_NAMES`].
pub fn route_path(max_len: usize) -> impl Strategy<Value = Vec<Identifier>> {
    prop::collection::vec(segment_identifier(), 0..=max_len)
}

/// Any lifecycle event.
pub fn lifecycle_event() -> impl Strategy<Value = LifecycleEvent> {
    prop::sample::select(LifecycleEvent::ALL.to_vec())
}

/// A sequence of up to `max_len` lifecycle events.
pub fn lifecycle_sequence(max_len: usize) -> impl Strategy<Value = Vec<LifecycleEvent>> {
    prop::collection::vec(lifecycle_event(), 0..=max_len)
}
