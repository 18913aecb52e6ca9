//! Lifecycle capability for services.
//!
//! Services opt into lifecycle notifications by implementing [`Lifecycle`]
//! and returning `Some(self)` from [`Service::as_lifecycle`]. Every method
//! has a default body, so a service overrides only the events it cares
//! about.
//!
//! # Example
//!
//! ```
//! use fcomp_core::{Lifecycle, Service};
//!
//! struct Analytics;
//!
//! impl Lifecycle for Analytics {
//!     fn did_enter_background(&self) {
//!         // flush pending events
//!     }
//! }
//!
//! impl Service for Analytics {
//!     fn as_lifecycle(&self) -> Option<&dyn Lifecycle> {
//!         Some(self)
//!     }
//! }
//!
//! assert!(Analytics.as_lifecycle().is_some());
//! assert!(Analytics.will_finish_launching());
//! ```

use core::fmt;

use crate::state::ContainerState;

/// Lifecycle notifications, all optional.
///
/// The two launch methods return `false` to veto launch; dispatch stops at
/// the first veto.
pub trait Lifecycle: Send + Sync {
    /// Launch has begun.
    fn will_finish_launching(&self) -> bool {
        true
    }

    /// Launch has completed.
    fn did_finish_launching(&self) -> bool {
        true
    }

    /// The application moved to the foreground and receives events.
    fn did_become_active(&self) {}

    /// The application is about to stop receiving events.
    fn will_resign_active(&self) {}

    /// The application is about to terminate.
    fn will_terminate(&self) {}

    /// The application moved to the background.
    fn did_enter_background(&self) {}

    /// The application is about to leave the background.
    fn will_enter_foreground(&self) {}
}

/// Capability query implemented by everything stored in a container's
/// service namespace.
///
/// Service capability traits extend this one (`trait Store: Service`), so
/// the container can ask any registered service whether it also wants
/// lifecycle events.
pub trait Service: Send + Sync + 'static {
    /// The service's lifecycle capability, if it has one.
    fn as_lifecycle(&self) -> Option<&dyn Lifecycle> {
        None
    }
}

/// One of the seven lifecycle notifications.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum LifecycleEvent {
    WillFinishLaunching,
    DidFinishLaunching,
    DidBecomeActive,
    WillResignActive,
    WillTerminate,
    DidEnterBackground,
    WillEnterForeground,
}

impl LifecycleEvent {
    /// All events in declaration order.
    pub const ALL: [Self; 7] = [
        Self::WillFinishLaunching,
        Self::DidFinishLaunching,
        Self::DidBecomeActive,
        Self::WillResignActive,
        Self::WillTerminate,
        Self::DidEnterBackground,
        Self::WillEnterForeground,
    ];

    /// The phase a container enters before dispatching this event.
    #[must_use]
    pub const fn target_state(self) -> ContainerState {
        match self {
            Self::WillFinishLaunching => ContainerState::Launching,
            Self::DidFinishLaunching => ContainerState::Inactive,
            Self::DidBecomeActive => ContainerState::Active,
            Self::WillResignActive => ContainerState::Inactive,
            Self::WillTerminate => ContainerState::Terminating,
            Self::DidEnterBackground => ContainerState::Background,
            Self::WillEnterForeground => ContainerState::Inactive,
        }
    }

    /// Whether dispatch of this event stops at the first `false`.
    #[must_use]
    pub const fn is_vetoable(self) -> bool {
        matches!(self, Self::WillFinishLaunching | Self::DidFinishLaunching)
    }

    /// Deliver this event to `target`.
    ///
    /// Returns the target's answer for the launch events and `true` for the
    /// rest.
    pub fn deliver(self, target: &dyn Lifecycle) -> bool {
        match self {
            Self::WillFinishLaunching => target.will_finish_launching(),
            Self::DidFinishLaunching => target.did_finish_launching(),
            Self::DidBecomeActive => {
                target.did_become_active();
                true
            }
            Self::WillResignActive => {
                target.will_resign_active();
                true
            }
            Self::WillTerminate => {
                target.will_terminate();
                true
            }
            Self::DidEnterBackground => {
                target.did_enter_background();
                true
            }
            Self::WillEnterForeground => {
                target.will_enter_foreground();
                true
            }
        }
    }

    /// Stable snake_case name, used in log fields.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::WillFinishLaunching => "will_finish_launching",
            Self::DidFinishLaunching => "did_finish_launching",
            Self::DidBecomeActive => "did_become_active",
            Self::WillResignActive => "will_resign_active",
            Self::WillTerminate => "will_terminate",
            Self::DidEnterBackground => "did_enter_background",
            Self::WillEnterForeground => "will_enter_foreground",
        }
    }
}

impl fmt::Display for LifecycleEvent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
