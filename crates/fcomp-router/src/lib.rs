#![forbid(unsafe_code)]

//! Route reconciliation for FrankenComp.
//!
//! A [`Router`] maps an ordered path of segment [`Identifier`]s onto a stack
//! of presented screens. Each call to [`Router::execute_route`] compares the
//! target path with the active one, reuses the longest matching prefix, and
//! presents the differing suffix through registered [`RoutePresenter`]s.
//!
//! Screens, windows, and container screens (navigation stacks, tab bars,
//! modal hosts) are opaque collaborators described by the traits in
//! [`screen`].
//!
//! [`Identifier`]: fcomp_core::Identifier

pub mod presenter;
pub mod presenters;
pub mod router;
pub mod screen;
pub mod segment;

pub use presenter::{PresentCompletion, PresentOutcome, PresentOutcomeReader, RoutePresenter};
pub use presenters::{PushPresenter, RootPresenter, TabPresenter, WrappingPresenter};
pub use router::{RouteError, RouteReport, RouteStep, Router, StepAction};
pub use screen::{
    HostWindow, ModalHost, NavigationStack, Screen, ScreenKey, ScreenRef, TabContainer, WindowRef,
    same_screen,
};
pub use segment::{RouteSegment, ScreenFactory};
