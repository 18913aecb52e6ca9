//! Presentation strategies.
//!
//! A [`RoutePresenter`] attaches a freshly built screen to the hierarchy:
//! as the window root, pushed onto a navigation stack, added as a tab,
//! wrapped and shown modally, and so on. The router looks presenters up by
//! identifier, so any number of strategies share one reconciliation
//! algorithm.
//!
//! # Completion contract
//!
//! `present` receives a one-shot [`PresentCompletion`] and must call
//! [`PresentCompletion::complete`] exactly once. The router reads the
//! outcome as soon as `present` returns, so completion has to happen
//! synchronously, before `present` returns. Dropping the completion without
//! calling it leaves the outcome [`PresentOutcome::Pending`].

use std::sync::{Arc, OnceLock};

use fcomp_core::Identifier;

use crate::screen::{ScreenRef, WindowRef};

/// Strategy for attaching a screen under its parent.
pub trait RoutePresenter: Send + Sync {
    /// Identifier segments use to select this presenter.
    fn identifier(&self) -> &Identifier;

    /// Attach `screen` under `parent`, or at the window root when `parent`
    /// is `None`, then report success through `completion`.
    fn present(
        &self,
        screen: &ScreenRef,
        parent: Option<&ScreenRef>,
        window: Option<&WindowRef>,
        completion: PresentCompletion,
    );
}

/// One-shot completion handle passed to [`RoutePresenter::present`].
#[derive(Debug)]
pub struct PresentCompletion {
    slot: Arc<OnceLock<bool>>,
}

impl PresentCompletion {
    /// Create a completion and the reader that observes it.
    #[must_use]
    pub fn new() -> (Self, PresentOutcomeReader) {
        let slot = Arc::new(OnceLock::new());
        (
            Self {
                slot: Arc::clone(&slot),
            },
            PresentOutcomeReader { slot },
        )
    }

    /// Report the presentation result. Consumes the handle.
    pub fn complete(self, success: bool) {
        // The handle is consumed, so the slot can only be written once.
        let _ = self.slot.set(success);
    }

    /// Shorthand for `complete(true)`.
    pub fn succeed(self) {
        self.complete(true);
    }

    /// Shorthand for `complete(false)`.
    pub fn fail(self) {
        self.complete(false);
    }
}

/// Read side of a [`PresentCompletion`].
#[derive(Debug, Clone)]
pub struct PresentOutcomeReader {
    slot: Arc<OnceLock<bool>>,
}

impl PresentOutcomeReader {
    /// Current outcome.
    #[must_use]
    pub fn outcome(&self) -> PresentOutcome {
        match self.slot.get() {
            Some(true) => PresentOutcome::Succeeded,
            Some(false) => PresentOutcome::Failed,
            None => PresentOutcome::Pending,
        }
    }
}

/// What a presenter reported.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PresentOutcome {
    /// `complete(true)` was called.
    Succeeded,
    /// `complete(false)` was called.
    Failed,
    /// The completion has not been called (yet).
    Pending,
}
