//! Scripted presenter.

use fcomp_core::Identifier;
use fcomp_router::{PresentCompletion, RoutePresenter, ScreenRef, WindowRef};

use crate::tracker::Tracker;

/// What a [`MockPresenter`] does with its completion.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MockOutcome {
    Succeed,
    Fail,
    /// Return without calling the completion.
    NeverComplete,
}

/// Presenter that attaches nothing and records
/// `present:<screen>:<parent or nil>:<window or nil>`.
#[derive(Debug)]
pub struct MockPresenter {
    identifier: Identifier,
    outcome: MockOutcome,
    tracker: Tracker,
}

impl MockPresenter {
    #[must_use]
    pub fn new(identifier: impl Into<Identifier>, outcome: MockOutcome, tracker: &Tracker) -> Self {
        Self {
            identifier: identifier.into(),
            outcome,
            tracker: tracker.clone(),
        }
    }

    /// Presenter that always succeeds.
    #[must_use]
    pub fn succeeding(identifier: impl Into<Identifier>, tracker: &Tracker) -> Self {
        Self::new(identifier, MockOutcome::Succeed, tracker)
    }
}

impl RoutePresenter for MockPresenter {
    fn identifier(&self) -> &Identifier {
        &self.identifier
    }

    fn present(
        &self,
        screen: &ScreenRef,
        parent: Option<&ScreenRef>,
        window: Option<&WindowRef>,
        completion: PresentCompletion,
    ) {
        let parent = parent.map_or("nil", |p| p.name());
        let window = if window.is_some() { "window" } else { "nil" };
        self.tracker
            .track(format!("present:{}:{parent}:{window}", screen.name()));
        match self.outcome {
            MockOutcome::Succeed => completion.succeed(),
            MockOutcome::Fail => completion.fail(),
            MockOutcome::NeverComplete => {}
        }
    }
}
