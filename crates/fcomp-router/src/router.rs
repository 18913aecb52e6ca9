//! The route reconciler.
//!
//! # Algorithm
//!
//! [`Router::execute_route`] walks the target path left to right. At each
//! position the screen produced by the previous position is the parent
//! (none at position 0), and the router decides whether the screen already
//! active at that position can be kept:
//!
//! 1. Nothing is active at this position: build a new screen.
//! 2. The parent is a tab container and one of its tabs was produced by
//!    this segment earlier: select that tab and keep it.
//! 3. Otherwise keep the active screen iff its segment identifier equals the
//!    target identifier.
//!
//! Once any position is rebuilt, every later position is rebuilt too: its
//! parent changed, so state inherited from the old parent is void.
//!
//! Reaching the end of a path without rebuilding the last position pops any
//! navigation stack back to that screen.
//!
//! # Invariants
//!
//! - The active path is replaced wholesale, only when every position
//!   succeeded. A failed call leaves it exactly as it was.
//! - Every segment and presenter named by the target path is resolved before
//!   anything is presented, so an unregistered identifier never causes a
//!   partial UI change.
//! - Screens presented earlier in a call that later fails are not rolled
//!   back. They stay on screen while the active path still describes the
//!   previous route.
//! - Every screen presented or kept is recorded in the screen-to-segment
//!   map as soon as its position succeeds, even if a later position fails.
//!   A tab added by a failed call is therefore still found as a sibling.
//!
//! # Failure Modes
//!
//! | Failure | Result | Active path |
//! |---------|--------|-------------|
//! | Unregistered segment | [`RouteError::UnregisteredSegment`] | unchanged |
//! | Unregistered presenter | [`RouteError::UnregisteredPresenter`] | unchanged |
//! | Factory returned `None` | [`RouteError::ScreenNotBuilt`] | unchanged |
//! | Presenter reported failure | [`RouteError::PresentationFailed`] | unchanged |
//! | Presenter never completed | treated as success, warning logged | committed |

use core::fmt;
use std::sync::{Arc, Weak};

use ahash::AHashMap;
use fcomp_core::Identifier;
use tracing::{debug, debug_span, warn};

use crate::presenter::{PresentCompletion, PresentOutcome, RoutePresenter};
use crate::presenters::{PushPresenter, RootPresenter, TabPresenter};
use crate::screen::{Screen, ScreenKey, ScreenRef, TabContainer, WindowRef};
use crate::segment::RouteSegment;

/// Errors from route execution.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RouteError {
    /// No segment is registered under this identifier.
    UnregisteredSegment { identifier: Identifier },
    /// The segment names a presenter that is not registered.
    UnregisteredPresenter {
        segment: Identifier,
        presenter: Identifier,
    },
    /// The segment's factory produced no screen.
    ScreenNotBuilt {
        identifier: Identifier,
        position: usize,
    },
    /// The presenter reported failure through its completion.
    PresentationFailed {
        identifier: Identifier,
        position: usize,
    },
}

impl fmt::Display for RouteError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::UnregisteredSegment { identifier } => {
                write!(f, "no segment registered for '{identifier}'")
            }
            Self::UnregisteredPresenter { segment, presenter } => {
                write!(
                    f,
                    "segment '{segment}' uses unregistered presenter '{presenter}'"
                )
            }
            Self::ScreenNotBuilt {
                identifier,
                position,
            } => write!(
                f,
                "segment '{identifier}' at position {position} did not build a screen"
            ),
            Self::PresentationFailed {
                identifier,
                position,
            } => write!(
                f,
                "presenting segment '{identifier}' at position {position} failed"
            ),
        }
    }
}

impl std::error::Error for RouteError {}

/// What happened at one position of a successful route.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StepAction {
    /// A new screen was built and presented.
    Presented,
    /// The active screen was kept.
    Reused,
    /// An existing tab produced by this segment was selected and kept.
    TabSelected { index: usize },
}

/// One position of a successful route.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RouteStep {
    pub position: usize,
    pub identifier: Identifier,
    pub action: StepAction,
}

/// Summary of a successful [`Router::execute_route`] call.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RouteReport {
    pub steps: Vec<RouteStep>,
}

impl RouteReport {
    /// Number of positions that built and presented a new screen.
    #[must_use]
    pub fn presented(&self) -> usize {
        self.count(|a| a == StepAction::Presented)
    }

    /// Number of positions that kept an existing screen (including tab
    /// re-selection).
    #[must_use]
    pub fn reused(&self) -> usize {
        self.count(|a| a != StepAction::Presented)
    }

    /// Index of the first rebuilt position, if any.
    #[must_use]
    pub fn first_presented(&self) -> Option<usize> {
        self.steps
            .iter()
            .find(|s| s.action == StepAction::Presented)
            .map(|s| s.position)
    }

    fn count(&self, pred: impl Fn(StepAction) -> bool) -> usize {
        self.steps.iter().filter(|s| pred(s.action)).count()
    }
}

/// A position in the active path.
struct ActiveSegment {
    identifier: Identifier,
    screen: ScreenRef,
}

/// Reverse-map entry: which segment produced a screen.
struct ScreenRecord {
    screen: Weak<dyn Screen>,
    identifier: Identifier,
}

/// Maps segment paths onto presented screens.
///
/// The active path and the screen-to-segment map are owned by the router
/// and change only inside [`execute_route`](Self::execute_route).
pub struct Router {
    window: Option<WindowRef>,
    segments: AHashMap<Identifier, RouteSegment>,
    presenters: AHashMap<Identifier, Arc<dyn RoutePresenter>>,
    active: Vec<ActiveSegment>,
    registered: AHashMap<ScreenKey, ScreenRecord>,
}

impl Router {
    /// Create a router presenting into `window`.
    #[must_use]
    pub fn new(window: Option<WindowRef>) -> Self {
        Self {
            window,
            segments: AHashMap::new(),
            presenters: AHashMap::new(),
            active: Vec::new(),
            registered: AHashMap::new(),
        }
    }

    /// The window presenters attach root screens to.
    #[must_use]
    pub fn window(&self) -> Option<&WindowRef> {
        self.window.as_ref()
    }

    // --- Registration ---

    /// Register a segment. A segment with the same identifier is replaced.
    pub fn register_segment(&mut self, segment: RouteSegment) {
        debug!(
            segment = %segment.identifier(),
            presenter = %segment.presenter_identifier(),
            "register segment"
        );
        self.segments.insert(segment.identifier().clone(), segment);
    }

    /// Register a presenter. A presenter with the same identifier is
    /// replaced.
    pub fn register_presenter(&mut self, presenter: Arc<dyn RoutePresenter>) {
        debug!(presenter = %presenter.identifier(), "register presenter");
        self.presenters
            .insert(presenter.identifier().clone(), presenter);
    }

    /// Register the root, push, and tab presenters under their default
    /// identifiers.
    pub fn register_stock_presenters(&mut self) {
        self.register_presenter(Arc::new(RootPresenter::new()));
        self.register_presenter(Arc::new(PushPresenter::new()));
        self.register_presenter(Arc::new(TabPresenter::new()));
    }

    #[must_use]
    pub fn segment(&self, identifier: &Identifier) -> Option<&RouteSegment> {
        self.segments.get(identifier)
    }

    #[must_use]
    pub fn presenter(&self, identifier: &Identifier) -> Option<&Arc<dyn RoutePresenter>> {
        self.presenters.get(identifier)
    }

    #[must_use]
    pub fn segment_count(&self) -> usize {
        self.segments.len()
    }

    #[must_use]
    pub fn presenter_count(&self) -> usize {
        self.presenters.len()
    }

    // --- Active path ---

    /// Identifiers of the committed active path.
    #[must_use]
    pub fn active_path(&self) -> Vec<Identifier> {
        self.active.iter().map(|a| a.identifier.clone()).collect()
    }

    /// Screens of the committed active path, root first.
    #[must_use]
    pub fn screens(&self) -> Vec<ScreenRef> {
        self.active.iter().map(|a| Arc::clone(&a.screen)).collect()
    }

    /// The segment that produced `screen`, if the router presented it and it
    /// is still alive.
    #[must_use]
    pub fn identifier_for(&self, screen: &ScreenRef) -> Option<&Identifier> {
        self.registered
            .get(&ScreenKey::of(screen))
            .filter(|r| r.screen.strong_count() > 0)
            .map(|r| &r.identifier)
    }

    // --- Execution ---

    /// Reconcile the active path with `identifiers`.
    ///
    /// On success the active path equals `identifiers`. On failure it is
    /// unchanged; see the module docs for what stays on screen.
    pub fn execute_route(&mut self, identifiers: &[Identifier]) -> Result<RouteReport, RouteError> {
        let _span = debug_span!("execute_route", target = %PathDisplay(identifiers)).entered();

        let plan = self.resolve(identifiers)?;
        let last = identifiers.len().checked_sub(1);

        let mut staged: Vec<ActiveSegment> = Vec::with_capacity(plan.len());
        let mut report = RouteReport {
            steps: Vec::with_capacity(plan.len()),
        };
        let mut route_changed = false;
        let mut failure = None;

        for (position, (segment, presenter)) in plan.into_iter().enumerate() {
            let identifier = segment.identifier();
            let parent = staged.last().map(|a| Arc::clone(&a.screen));

            let kept = if route_changed {
                None
            } else {
                self.reusable_screen(position, identifier, parent.as_ref())
            };

            let (screen, action) = match kept {
                Some((screen, action)) => {
                    if Some(position) == last {
                        pop_back_to(&screen);
                    }
                    debug!(position, segment = %identifier, ?action, "keep screen");
                    (screen, action)
                }
                None => {
                    route_changed = true;
                    match self.present(position, segment, &**presenter, parent.as_ref()) {
                        Ok(screen) => (screen, StepAction::Presented),
                        Err(err) => {
                            failure = Some(err);
                            break;
                        }
                    }
                }
            };

            report.steps.push(RouteStep {
                position,
                identifier: identifier.clone(),
                action,
            });
            staged.push(ActiveSegment {
                identifier: identifier.clone(),
                screen,
            });
        }

        self.record(&staged);
        if let Some(err) = failure {
            return Err(err);
        }
        self.commit(staged);
        Ok(report)
    }

    /// Execute the active path extended by `identifiers`.
    pub fn append_route(&mut self, identifiers: &[Identifier]) -> Result<RouteReport, RouteError> {
        let mut path = self.active_path();
        path.extend_from_slice(identifiers);
        self.execute_route(&path)
    }

    /// Look up every segment and presenter the path needs.
    fn resolve(
        &self,
        identifiers: &[Identifier],
    ) -> Result<Vec<(&RouteSegment, &Arc<dyn RoutePresenter>)>, RouteError> {
        identifiers
            .iter()
            .map(|identifier| {
                let Some(segment) = self.segments.get(identifier) else {
                    warn!(segment = %identifier, "no segment registered");
                    return Err(RouteError::UnregisteredSegment {
                        identifier: identifier.clone(),
                    });
                };
                let Some(presenter) = self.presenters.get(segment.presenter_identifier()) else {
                    warn!(
                        segment = %identifier,
                        presenter = %segment.presenter_identifier(),
                        "no presenter registered"
                    );
                    return Err(RouteError::UnregisteredPresenter {
                        segment: identifier.clone(),
                        presenter: segment.presenter_identifier().clone(),
                    });
                };
                Ok((segment, presenter))
            })
            .collect()
    }

    /// The screen that can stay at `position`, if any.
    fn reusable_screen(
        &self,
        position: usize,
        identifier: &Identifier,
        parent: Option<&ScreenRef>,
    ) -> Option<(ScreenRef, StepAction)> {
        let current = self.active.get(position)?;

        if let Some(tabs) = parent.and_then(|p| p.tab_container()) {
            if let Some((index, sibling)) = self.tab_sibling(tabs, identifier) {
                tabs.select_tab(index);
                return Some((sibling, StepAction::TabSelected { index }));
            }
        }

        (current.identifier == *identifier)
            .then(|| (Arc::clone(&current.screen), StepAction::Reused))
    }

    /// A tab of `tabs` that this router presented for `identifier`.
    fn tab_sibling(
        &self,
        tabs: &dyn TabContainer,
        identifier: &Identifier,
    ) -> Option<(usize, ScreenRef)> {
        tabs.tabs()
            .into_iter()
            .enumerate()
            .find(|(_, child)| self.identifier_for(child) == Some(identifier))
    }

    /// Build and present a segment's screen.
    fn present(
        &self,
        position: usize,
        segment: &RouteSegment,
        presenter: &dyn RoutePresenter,
        parent: Option<&ScreenRef>,
    ) -> Result<ScreenRef, RouteError> {
        let identifier = segment.identifier();

        let Some(screen) = segment.build() else {
            warn!(position, segment = %identifier, "segment did not build a screen");
            return Err(RouteError::ScreenNotBuilt {
                identifier: identifier.clone(),
                position,
            });
        };

        let (completion, reader) = PresentCompletion::new();
        presenter.present(&screen, parent, self.window.as_ref(), completion);

        match reader.outcome() {
            PresentOutcome::Succeeded => {}
            PresentOutcome::Failed => {
                warn!(
                    position,
                    segment = %identifier,
                    presenter = %presenter.identifier(),
                    "presentation failed"
                );
                return Err(RouteError::PresentationFailed {
                    identifier: identifier.clone(),
                    position,
                });
            }
            PresentOutcome::Pending => {
                warn!(
                    position,
                    segment = %identifier,
                    presenter = %presenter.identifier(),
                    "presenter returned without completing; treating as presented"
                );
            }
        }

        debug!(position, segment = %identifier, screen = screen.name(), "presented");
        Ok(screen)
    }

    /// Remember which segment produced each screen that reached the screen.
    fn record(&mut self, reached: &[ActiveSegment]) {
        for entry in reached {
            self.registered.insert(
                ScreenKey::of(&entry.screen),
                ScreenRecord {
                    screen: Arc::downgrade(&entry.screen),
                    identifier: entry.identifier.clone(),
                },
            );
        }
    }

    /// Replace the active path and drop records of released screens.
    fn commit(&mut self, staged: Vec<ActiveSegment>) {
        self.active = staged;
        self.registered.retain(|_, r| r.screen.strong_count() > 0);
        debug!(depth = self.active.len(), "route committed");
    }
}

impl fmt::Debug for Router {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Router")
            .field("active", &PathDisplay(&self.active_path()).to_string())
            .field("segments", &self.segments.len())
            .field("presenters", &self.presenters.len())
            .field("has_window", &self.window.is_some())
            .finish()
    }
}

/// Pop the navigation stack `screen` lives in back to it. Best effort.
fn pop_back_to(screen: &ScreenRef) {
    if let Some(nav) = screen.navigation() {
        let popped = nav.pop_to(screen);
        debug!(screen = screen.name(), popped, "pop back to reused screen");
    }
}

/// `a/b/c` rendering of a path for log fields.
struct PathDisplay<'a>(&'a [Identifier]);

impl fmt::Display for PathDisplay<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, id) in self.0.iter().enumerate() {
            if i > 0 {
                f.write_str("/")?;
            }
            f.write_str(id.name())?;
        }
        Ok(())
    }
}
