#![forbid(unsafe_code)]

//! Integration tests: route reconciliation against stub screens.

use std::sync::Arc;

use fcomp_core::Identifier;
use fcomp_harness::strategies::{SEGMENT_NAMES, route_path};
use fcomp_harness::{
    MockOutcome, MockPresenter, StubScreen, StubStack, StubTabs, StubWindow, Tracker,
    init_test_logging,
};
use fcomp_router::{
    HostWindow, PushPresenter, RootPresenter, RouteError, RouteSegment, Router, Screen, ScreenRef,
    StepAction, TabContainer, TabPresenter, WindowRef, WrappingPresenter, same_screen,
};
use proptest::prelude::*;

fn ids(names: &[&str]) -> Vec<Identifier> {
    names.iter().map(|n| Identifier::new(n)).collect()
}

/// Segment whose factory tracks `build:<name>` and returns a plain screen.
fn tracked_segment(name: &str, presenter: &str, tracker: &Tracker) -> RouteSegment {
    let label = name.to_string();
    let tracker = tracker.clone();
    RouteSegment::new(name, presenter, move || {
        tracker.track(format!("build:{label}"));
        Some(StubScreen::new(label.clone()).into_ref())
    })
}

/// Router with a succeeding mock presenter `"mock"` and one segment per
/// name.
fn mock_router(names: &[&str], tracker: &Tracker) -> Router {
    let mut router = Router::new(None);
    router.register_presenter(Arc::new(MockPresenter::succeeding("mock", tracker)));
    for name in names {
        router.register_segment(tracked_segment(name, "mock", tracker));
    }
    router
}

// ============================================================================
// Prefix reuse and cascade
// ============================================================================

#[test]
fn identical_route_rebuilds_nothing() {
    init_test_logging();
    let tracker = Tracker::new();
    let mut router = mock_router(&["a", "b", "c"], &tracker);

    router.execute_route(&ids(&["a", "b", "c"])).unwrap();
    assert_eq!(tracker.with_prefix("build:").len(), 3);
    tracker.clear();

    let report = router.execute_route(&ids(&["a", "b", "c"])).unwrap();
    assert_eq!(report.presented(), 0);
    assert_eq!(tracker.total(), 0);
}

#[test]
fn changed_middle_position_cascades() {
    init_test_logging();
    let tracker = Tracker::new();
    let mut router = mock_router(&["a", "b", "c", "x"], &tracker);
    router.execute_route(&ids(&["a", "b", "c"])).unwrap();
    let first_a = router.screens()[0].clone();
    tracker.clear();

    let report = router.execute_route(&ids(&["a", "x", "c"])).unwrap();

    let actions: Vec<_> = report.steps.iter().map(|s| s.action).collect();
    assert_eq!(
        actions,
        vec![StepAction::Reused, StepAction::Presented, StepAction::Presented]
    );
    assert_eq!(
        tracker.log(),
        vec![
            "build:x",
            "present:x:a:nil",
            "build:c",
            "present:c:x:nil"
        ]
    );
    assert!(same_screen(&router.screens()[0], &first_a));
}

#[test]
fn shorter_route_truncates_without_presenting() {
    let tracker = Tracker::new();
    let mut router = mock_router(&["a", "b", "c"], &tracker);
    router.execute_route(&ids(&["a", "b", "c"])).unwrap();
    tracker.clear();

    let report = router.execute_route(&ids(&["a"])).unwrap();
    assert_eq!(report.presented(), 0);
    assert_eq!(router.active_path(), ids(&["a"]));
}

#[test]
fn append_presents_only_the_suffix() {
    let tracker = Tracker::new();
    let mut router = mock_router(&["a", "b", "c"], &tracker);
    router.execute_route(&ids(&["a"])).unwrap();
    tracker.clear();

    router.append_route(&ids(&["b", "c"])).unwrap();
    assert_eq!(router.active_path(), ids(&["a", "b", "c"]));
    assert_eq!(tracker.with_prefix("build:"), vec!["build:b", "build:c"]);
}

// ============================================================================
// Failure leaves the active path untouched
// ============================================================================

#[test]
fn unregistered_segment_at_position_two() {
    let tracker = Tracker::new();
    let mut router = mock_router(&["a", "b"], &tracker);
    router.execute_route(&ids(&["a"])).unwrap();
    tracker.clear();

    let err = router.execute_route(&ids(&["a", "b", "z"])).unwrap_err();
    assert_eq!(
        err,
        RouteError::UnregisteredSegment {
            identifier: Identifier::new("z")
        }
    );
    assert_eq!(router.active_path(), ids(&["a"]));
    assert_eq!(tracker.total(), 0, "nothing built or presented");
}

#[test]
fn failure_at_position_one_keeps_earlier_presentation() {
    let tracker = Tracker::new();
    let mut router = mock_router(&["a"], &tracker);
    router.register_presenter(Arc::new(MockPresenter::new(
        "broken",
        MockOutcome::Fail,
        &tracker,
    )));
    router.register_segment(tracked_segment("b", "broken", &tracker));

    let err = router.execute_route(&ids(&["a", "b"])).unwrap_err();
    assert_eq!(
        err,
        RouteError::PresentationFailed {
            identifier: Identifier::new("b"),
            position: 1
        }
    );
    // Position 0 was presented and is not rolled back.
    assert_eq!(tracker.count("present:a:nil:nil"), 1);
    assert!(router.active_path().is_empty());
}

#[test]
fn never_completing_presenter_is_accepted() {
    let tracker = Tracker::new();
    let mut router = Router::new(None);
    router.register_presenter(Arc::new(MockPresenter::new(
        "silent",
        MockOutcome::NeverComplete,
        &tracker,
    )));
    router.register_segment(tracked_segment("a", "silent", &tracker));
    let report = router.execute_route(&ids(&["a"])).unwrap();
    assert_eq!(report.presented(), 1);
}

// ============================================================================
// Stock presenters against stub collaborators
// ============================================================================

#[test]
fn root_then_push_builds_navigation_stack() {
    init_test_logging();
    let tracker = Tracker::new();
    let window = StubWindow::new();
    let stack = StubStack::new(&tracker);

    let mut router = Router::new(Some(window.clone() as WindowRef));
    router.register_stock_presenters();

    let root_stack = Arc::clone(&stack);
    router.register_segment(RouteSegment::new(
        "nav",
        RootPresenter::DEFAULT_IDENTIFIER,
        move || Some(StubScreen::new("nav").with_stack(&root_stack).into_ref()),
    ));
    for name in ["list", "detail"] {
        let stack = Arc::clone(&stack);
        router.register_segment(RouteSegment::new(
            name,
            PushPresenter::DEFAULT_IDENTIFIER,
            move || Some(StubScreen::new(name).with_stack(&stack).into_ref()),
        ));
    }

    router.execute_route(&ids(&["nav", "list", "detail"])).unwrap();
    assert_eq!(window.root().map(|r| r.name().to_string()).as_deref(), Some("nav"));
    assert_eq!(stack.names(), vec!["list", "detail"]);

    // Going back reuses "list" and pops the stack to it.
    tracker.clear();
    let report = router.execute_route(&ids(&["nav", "list"])).unwrap();
    assert_eq!(report.presented(), 0);
    assert_eq!(tracker.log(), vec!["pop_to:list"]);
    assert_eq!(stack.names(), vec!["list"]);
    assert_eq!(window.root_changes(), 1);
}

#[test]
fn tab_sibling_is_reselected_without_rebuild() {
    init_test_logging();
    let tracker = Tracker::new();
    let window = StubWindow::new();
    let tabs = StubTabs::new("tabs", &tracker);

    let mut router = Router::new(Some(window as WindowRef));
    router.register_stock_presenters();
    let shared = Arc::clone(&tabs);
    router.register_segment(
        RouteSegment::new("tabs", RootPresenter::DEFAULT_IDENTIFIER, move || {
            Some(Arc::clone(&shared) as ScreenRef)
        })
        .singleton(true),
    );
    router.register_segment(tracked_segment("first", TabPresenter::DEFAULT_IDENTIFIER, &tracker));
    router.register_segment(tracked_segment("second", TabPresenter::DEFAULT_IDENTIFIER, &tracker));

    router.execute_route(&ids(&["tabs", "first"])).unwrap();
    router.execute_route(&ids(&["tabs", "second"])).unwrap();
    assert_eq!(tabs.tab_names(), vec!["first", "second"]);
    assert_eq!(tabs.selected_tab(), Some(1));
    tracker.clear();

    let report = router.execute_route(&ids(&["tabs", "first"])).unwrap();
    assert_eq!(report.steps[1].action, StepAction::TabSelected { index: 0 });
    assert_eq!(tracker.log(), vec!["select_tab:0"]);
    assert_eq!(tabs.selected_tab(), Some(0));
    assert_eq!(tabs.tab_names().len(), 2);
    assert_eq!(router.active_path(), ids(&["tabs", "first"]));
}

#[test]
fn tab_added_by_failed_route_is_reselected() {
    let tracker = Tracker::new();
    let window = StubWindow::new();
    let tabs = StubTabs::new("tabs", &tracker);

    let mut router = Router::new(Some(window as WindowRef));
    router.register_stock_presenters();
    router.register_presenter(Arc::new(MockPresenter::new(
        "broken",
        MockOutcome::Fail,
        &tracker,
    )));
    let shared = Arc::clone(&tabs);
    router.register_segment(RouteSegment::new(
        "tabs",
        RootPresenter::DEFAULT_IDENTIFIER,
        move || Some(Arc::clone(&shared) as ScreenRef),
    ));
    router.register_segment(tracked_segment("first", TabPresenter::DEFAULT_IDENTIFIER, &tracker));
    router.register_segment(tracked_segment("second", TabPresenter::DEFAULT_IDENTIFIER, &tracker));
    router.register_segment(tracked_segment("detail", "broken", &tracker));

    router.execute_route(&ids(&["tabs", "first"])).unwrap();
    assert!(router.execute_route(&ids(&["tabs", "second", "detail"])).is_err());
    assert_eq!(tabs.tab_names(), vec!["first", "second"]);
    assert_eq!(router.active_path(), ids(&["tabs", "first"]));

    let report = router.execute_route(&ids(&["tabs", "second"])).unwrap();
    assert_eq!(report.steps[1].action, StepAction::TabSelected { index: 1 });
    assert_eq!(tabs.tab_names(), vec!["first", "second"]);
    assert_eq!(tracker.count("build:second"), 1);
}

#[test]
fn wrapping_presenter_presents_modally() {
    let tracker = Tracker::new();
    let host = Arc::new(StubScreen::new("host").accepting_modals());

    let mut router = Router::new(None);
    router.register_presenter(Arc::new(MockPresenter::succeeding("mock", &tracker)));
    router.register_presenter(Arc::new(WrappingPresenter::new(|screen| {
        Some(StubScreen::new(format!("wrap({})", screen.name())).into_ref())
    })));
    let shared = Arc::clone(&host);
    router.register_segment(RouteSegment::new("host", "mock", move || {
        Some(Arc::clone(&shared) as ScreenRef)
    }));
    router.register_segment(tracked_segment(
        "sheet",
        WrappingPresenter::DEFAULT_IDENTIFIER,
        &tracker,
    ));

    router.execute_route(&ids(&["host"])).unwrap();
    router.append_route(&ids(&["sheet"])).unwrap();

    let modals = host.modals();
    assert_eq!(modals.len(), 1);
    assert_eq!(modals[0].name(), "wrap(sheet)");
    assert_eq!(
        router.identifier_for(&router.screens()[1]),
        Some(&Identifier::new("sheet"))
    );
}

#[test]
fn root_presenter_without_window_fails() {
    let tracker = Tracker::new();
    let mut router = Router::new(None);
    router.register_stock_presenters();
    router.register_segment(tracked_segment("a", RootPresenter::DEFAULT_IDENTIFIER, &tracker));
    assert!(matches!(
        router.execute_route(&ids(&["a"])),
        Err(RouteError::PresentationFailed { position: 0, .. })
    ));
}

// ============================================================================
// Properties
// ============================================================================

proptest! {
    #[test]
    fn repeated_route_is_idempotent(path in route_path(6)) {
        let tracker = Tracker::new();
        let mut router = mock_router(&SEGMENT_NAMES, &tracker);
        router.execute_route(&path).unwrap();
        let report = router.execute_route(&path).unwrap();
        prop_assert_eq!(report.presented(), 0);
        prop_assert_eq!(router.active_path(), path);
    }

    #[test]
    fn rebuilds_start_at_first_difference(
        before in route_path(6),
        after in route_path(6),
    ) {
        let tracker = Tracker::new();
        let mut router = mock_router(&SEGMENT_NAMES, &tracker);
        router.execute_route(&before).unwrap();

        let common = before.iter().zip(&after).take_while(|(a, b)| a == b).count();
        let report = router.execute_route(&after).unwrap();

        prop_assert_eq!(report.reused(), common);
        prop_assert_eq!(report.presented(), after.len() - common);
        prop_assert_eq!(router.active_path(), after);
    }

    #[test]
    fn unknown_segment_never_commits(
        before in route_path(4),
        mut after in route_path(4),
        at in 0usize..5,
    ) {
        let tracker = Tracker::new();
        let mut router = mock_router(&SEGMENT_NAMES, &tracker);
        router.execute_route(&before).unwrap();
        tracker.clear();

        let at = at.min(after.len());
        after.insert(at, Identifier::new("unregistered"));
        prop_assert!(router.execute_route(&after).is_err());
        prop_assert_eq!(router.active_path(), before);
        prop_assert_eq!(tracker.total(), 0);
    }
}
