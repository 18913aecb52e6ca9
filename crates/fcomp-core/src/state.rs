//! Application lifecycle phase.
//!
//! ```text
//! uninitialized ─► launching ─► inactive ◄──► active
//!                                  ▲  │
//!                                  │  ▼
//!                               background ─► terminating
//! ```
//!
//! `inactive` is entered from three edges: after launch completes, after
//! the app resigns active, and when it is about to return to the
//! foreground. Any phase may move to `terminating`.

use core::fmt;

use crate::lifecycle::LifecycleEvent;

/// The lifecycle phase a container is in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum ContainerState {
    /// No lifecycle entry point has been called yet.
    #[default]
    Uninitialized,
    /// `will_finish_launching` has started.
    Launching,
    /// Launched but not receiving events.
    Inactive,
    /// In the foreground and receiving events.
    Active,
    /// In the background.
    Background,
    /// About to terminate.
    Terminating,
}

impl ContainerState {
    /// Lifecycle events a service registered in this phase has missed, in
    /// the order they must be replayed.
    ///
    /// `Uninitialized` and `Terminating` need no replay.
    #[must_use]
    pub const fn catch_up_events(self) -> &'static [LifecycleEvent] {
        use LifecycleEvent::*;
        match self {
            Self::Uninitialized | Self::Terminating => &[],
            Self::Launching => &[WillFinishLaunching],
            Self::Inactive => &[WillFinishLaunching, DidFinishLaunching],
            Self::Active => &[WillFinishLaunching, DidFinishLaunching, DidBecomeActive],
            Self::Background => &[WillFinishLaunching, DidFinishLaunching, DidEnterBackground],
        }
    }

    /// Stable lowercase name, used in log fields.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Uninitialized => "uninitialized",
            Self::Launching => "launching",
            Self::Inactive => "inactive",
            Self::Active => "active",
            Self::Background => "background",
            Self::Terminating => "terminating",
        }
    }
}

impl fmt::Display for ContainerState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
