//! Ordered lifecycle fan-out.
//!
//! # Invariants
//!
//! - Targets are visited in the order they were captured, oldest
//!   registration first.
//! - The two launch events stop at the first target that answers `false`;
//!   later targets are not called for that event.
//! - Every other event visits every target.
//! - Catch-up replays exactly [`ContainerState::catch_up_events`] for the
//!   current phase, in order, and ignores the launch answers.

use std::sync::Arc;

use fcomp_core::{CapabilityKey, ContainerState, Lifecycle, LifecycleEvent};
use tracing::{debug, debug_span};

/// A snapshot of lifecycle-capable services, ready to receive one event.
///
/// The container builds a broadcaster while holding its lock and fans out
/// after releasing it, so targets may call back into the container.
pub struct LifecycleBroadcaster {
    targets: Vec<(CapabilityKey, Arc<dyn Lifecycle>)>,
}

impl LifecycleBroadcaster {
    #[must_use]
    pub fn new(targets: Vec<(CapabilityKey, Arc<dyn Lifecycle>)>) -> Self {
        Self { targets }
    }

    #[inline]
    #[must_use]
    pub fn len(&self) -> usize {
        self.targets.len()
    }

    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.targets.is_empty()
    }

    /// Deliver `event` to every target in order.
    ///
    /// Returns `false` iff `event` is vetoable and some target vetoed it.
    pub fn broadcast(&self, event: LifecycleEvent) -> bool {
        let _span = debug_span!(
            "lifecycle",
            event = event.as_str(),
            targets = self.targets.len()
        )
        .entered();

        for (key, target) in &self.targets {
            let answer = event.deliver(&**target);
            if !answer && event.is_vetoable() {
                debug!(service = key.name(), "launch vetoed");
                return false;
            }
        }
        true
    }

    /// Replay the events a service registered in `state` has missed.
    pub fn catch_up(key: CapabilityKey, target: &dyn Lifecycle, state: ContainerState) {
        let events = state.catch_up_events();
        if events.is_empty() {
            return;
        }
        debug!(
            service = key.name(),
            state = state.as_str(),
            replayed = events.len(),
            "lifecycle catch-up"
        );
        for event in events {
            // Launch answers only matter to the container's own fan-out.
            let _ = event.deliver(target);
        }
    }
}

impl core::fmt::Debug for LifecycleBroadcaster {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_list()
            .entries(self.targets.iter().map(|(k, _)| k.name()))
            .finish()
    }
}
