#![forbid(unsafe_code)]

//! Test harness and reference fixtures for FrankenComp.
//!
//! Everything here is a stand-in for a collaborator the real platform
//! supplies: screens, navigation stacks, tab bars, windows, presenters, and
//! lifecycle-aware services. Every fixture reports what happened to it
//! through a shared [`Tracker`], so a test can assert both *that* and *in
//! which order* things were called.
//!
//! | Fixture | Stands in for |
//! |---------|---------------|
//! | [`Tracker`] | call log shared between fixtures |
//! | [`RecordingService`] | a service that wants lifecycle events |
//! | [`StubScreen`], [`StubStack`], [`StubTabs`], [`StubWindow`] | the view hierarchy |
//! | [`MockPresenter`] | a presentation strategy with a scripted outcome |
//! | [`strategies`] | proptest generators for paths and lifecycle sequences |

pub mod logging;
pub mod presenter;
pub mod screens;
pub mod services;
pub mod strategies;
pub mod tracker;

pub use logging::init_test_logging;
pub use presenter::{MockOutcome, MockPresenter};
pub use screens::{StubScreen, StubStack, StubTabs, StubWindow};
pub use services::RecordingService;
pub use tracker::Tracker;
