#![forbid(unsafe_code)]

//! End-to-end: a host configures a container, a coordinator registers
//! segments, and the startup action routes to the first screens.

use std::sync::{Arc, Mutex};

use fcomp::prelude::*;
use fcomp_harness::{StubScreen, StubStack, StubWindow, Tracker, init_test_logging};

struct Home {
    tracker: Tracker,
}

impl Coordinator for Home {
    fn register_route_segments(&self, router: &mut Router) {
        router.register_stock_presenters();
        let stack = StubStack::new(&self.tracker);
        let home_stack = Arc::clone(&stack);
        router.register_segment(RouteSegment::new(
            "home",
            RootPresenter::DEFAULT_IDENTIFIER,
            move || Some(StubScreen::new("home").with_stack(&home_stack).into_ref()),
        ));
        router.register_segment(RouteSegment::new(
            "detail",
            PushPresenter::DEFAULT_IDENTIFIER,
            move || Some(StubScreen::new("detail").with_stack(&stack).into_ref()),
        ));
    }
}

struct Launcher;
impl Service for Launcher {}

struct DemoApp {
    tracker: Tracker,
    router: Arc<Mutex<Router>>,
}

impl AppHost for DemoApp {
    fn configure(&self, container: &ApplicationContainer) {
        container.add_service(Arc::new(Launcher));
        container.add_coordinator(Arc::new(Home {
            tracker: self.tracker.clone(),
        }));
        container.add_resource(Arc::clone(&self.router));

        let mut router = self.router.lock().unwrap();
        container.register_route_segments(&mut router);
        drop(router);

        let router = Arc::clone(&self.router);
        let tracker = self.tracker.clone();
        container.set_startup_action(move || {
            let report = router
                .lock()
                .unwrap()
                .execute_route(&["home".into(), "detail".into()]);
            tracker.track(format!("startup:{}", report.is_ok()));
        });
    }
}

#[test]
fn host_launch_routes_to_first_screens() {
    init_test_logging();
    let tracker = Tracker::new();
    let window = StubWindow::new();
    let container = Arc::new(ApplicationContainer::new(Some(window.clone() as WindowRef)));
    let router = Arc::new(Mutex::new(Router::new(container.window().cloned())));
    let driver = HostDriver::new(
        DemoApp {
            tracker: tracker.clone(),
            router: Arc::clone(&router),
        },
        Arc::clone(&container),
    );

    assert!(driver.will_finish_launching());
    assert!(driver.did_finish_launching());

    assert!(window.is_visible());
    assert_eq!(window.root_changes(), 1);
    assert_eq!(tracker.log(), vec!["push:detail", "startup:true"]);
    assert!(container.resource::<Mutex<Router>>().is_some());

    let router = router.lock().unwrap();
    let path: Vec<String> = router
        .active_path()
        .iter()
        .map(ToString::to_string)
        .collect();
    assert_eq!(path, vec!["home", "detail"]);
}
