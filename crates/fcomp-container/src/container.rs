//! The application container.
//!
//! An [`ApplicationContainer`] is the composition root of one running
//! application: three capability registries (resources, services,
//! coordinators), the current [`ContainerState`], and a one-shot startup
//! action.
//!
//! # Lifecycle
//!
//! Each of the seven entry points sets the state to
//! [`LifecycleEvent::target_state`] and then fans the event out to every
//! lifecycle-capable service in registration order. A service registered
//! after launch began is first brought up to date with the events the
//! current state implies (see [`ContainerState::catch_up_events`]).
//!
//! # Concurrency
//!
//! One mutex guards every registry, the state, and the startup action. It
//! serializes individual reads and writes; it does not make a whole
//! lifecycle transition atomic. The lock is released before any service,
//! coordinator, or startup action runs, so those callbacks may use the
//! container freely. Running two transitions concurrently is unsupported.
//!
//! Registration and dispatch are ordered only when they happen on one
//! thread, including registration from inside a callback. If another thread
//! dispatches between [`ApplicationContainer::add_service`] inserting a service
//! and replaying its catch-up events, the service may see that live event
//! before its replay. Register services and drive the lifecycle from the
//! same thread, as host callbacks are delivered.
//!
//! # Failure Modes
//!
//! | Situation | Behavior |
//! |-----------|----------|
//! | Lookup of an unregistered capability | `None` |
//! | Lookup with a capability type different from the registered one | `None` |
//! | Startup action executed while unset | warning logged, no-op |
//! | Lock poisoned by a panicking thread | recovered, data used as-is |

use core::fmt;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use fcomp_core::{CapabilityKey, ContainerState, Lifecycle, LifecycleEvent, Service};
use fcomp_router::{Router, WindowRef};
use tracing::{debug, warn};

use crate::broadcaster::LifecycleBroadcaster;
use crate::coordinator::{Coordinator, CoordinatorRef};
use crate::registry::TypedRegistry;

/// Deferred launch work set by the host.
pub type StartupAction = Box<dyn FnOnce() + Send>;

struct Inner {
    state: ContainerState,
    resources: TypedRegistry,
    services: TypedRegistry<dyn Lifecycle>,
    coordinators: TypedRegistry<dyn Coordinator>,
    startup_action: Option<StartupAction>,
}

/// Typed registries plus ordered lifecycle dispatch for one application.
pub struct ApplicationContainer {
    window: Option<WindowRef>,
    inner: Mutex<Inner>,
}

impl ApplicationContainer {
    /// Create an uninitialized container for `window`.
    #[must_use]
    pub fn new(window: Option<WindowRef>) -> Self {
        Self {
            window,
            inner: Mutex::new(Inner {
                state: ContainerState::Uninitialized,
                resources: TypedRegistry::new(),
                services: TypedRegistry::new(),
                coordinators: TypedRegistry::new(),
                startup_action: None,
            }),
        }
    }

    /// The host window this container was created with.
    #[must_use]
    pub fn window(&self) -> Option<&WindowRef> {
        self.window.as_ref()
    }

    /// Current lifecycle phase.
    #[must_use]
    pub fn state(&self) -> ContainerState {
        self.lock().state
    }

    fn lock(&self) -> MutexGuard<'_, Inner> {
        self.inner.lock().unwrap_or_else(PoisonError::into_inner)
    }

    // --- Resources ---

    /// Register a resource under capability `C`. Replaces any earlier one.
    pub fn add_resource<C: ?Sized + Send + Sync + 'static>(&self, resource: Arc<C>) {
        let replaced = self.lock().resources.insert::<C>(resource, None);
        debug!(capability = CapabilityKey::of::<C>().name(), replaced, "add resource");
    }

    #[must_use]
    pub fn resource<C: ?Sized + Send + Sync + 'static>(&self) -> Option<Arc<C>> {
        self.lock().resources.get::<C>()
    }

    #[must_use]
    pub fn resource_count(&self) -> usize {
        self.lock().resources.len()
    }

    // --- Services ---

    /// Register a service under capability `C`.
    ///
    /// Replacing a service moves its capability to the end of the dispatch
    /// order. If the service reports a lifecycle capability and launch has
    /// already begun, it receives the events it missed before this returns.
    pub fn add_service<C: ?Sized + Service>(&self, service: Arc<C>) {
        let key = CapabilityKey::of::<C>();
        let lifecycle = service
            .as_lifecycle()
            .is_some()
            .then(|| Arc::new(ServiceLifecycle(Arc::clone(&service))) as Arc<dyn Lifecycle>);

        let state = {
            let mut inner = self.lock();
            let replaced = inner.services.insert::<C>(service, lifecycle.clone());
            debug!(
                capability = key.name(),
                replaced,
                lifecycle = lifecycle.is_some(),
                "add service"
            );
            inner.state
        };

        if let Some(target) = lifecycle {
            LifecycleBroadcaster::catch_up(key, &*target, state);
        }
    }

    #[must_use]
    pub fn service<C: ?Sized + Service>(&self) -> Option<Arc<C>> {
        self.lock().services.get::<C>()
    }

    #[must_use]
    pub fn service_count(&self) -> usize {
        self.lock().services.len()
    }

    /// Capability names of every registered service, in dispatch order.
    #[must_use]
    pub fn services_in_dispatch_order(&self) -> Vec<&'static str> {
        self.lock().services.keys().map(|k| k.name()).collect()
    }

    // --- Coordinators ---

    /// Register a coordinator under capability `C`. Replaces any earlier
    /// one.
    pub fn add_coordinator<C: ?Sized + Coordinator>(&self, coordinator: Arc<C>) {
        let handle = Arc::new(CoordinatorRef(Arc::clone(&coordinator))) as Arc<dyn Coordinator>;
        let replaced = self.lock().coordinators.insert::<C>(coordinator, Some(handle));
        debug!(capability = CapabilityKey::of::<C>().name(), replaced, "add coordinator");
    }

    #[must_use]
    pub fn coordinator<C: ?Sized + Coordinator>(&self) -> Option<Arc<C>> {
        self.lock().coordinators.get::<C>()
    }

    #[must_use]
    pub fn coordinator_count(&self) -> usize {
        self.lock().coordinators.len()
    }

    /// Every registered coordinator, oldest first.
    #[must_use]
    pub fn coordinators(&self) -> Vec<Arc<dyn Coordinator>> {
        self.lock()
            .coordinators
            .handles()
            .into_iter()
            .map(|(_, c)| c)
            .collect()
    }

    /// Let every coordinator register its segments and presenters.
    pub fn register_route_segments(&self, router: &mut Router) {
        for coordinator in self.coordinators() {
            coordinator.register_route_segments(router);
        }
        debug!(
            segments = router.segment_count(),
            presenters = router.presenter_count(),
            "route segments registered"
        );
    }

    // --- Startup action ---

    /// Set the action run by [`execute_startup_action`](Self::execute_startup_action).
    pub fn set_startup_action(&self, action: impl FnOnce() + Send + 'static) {
        self.lock().startup_action = Some(Box::new(action));
    }

    #[must_use]
    pub fn has_startup_action(&self) -> bool {
        self.lock().startup_action.is_some()
    }

    /// Run and consume the startup action. Logs a warning if none is set.
    pub fn execute_startup_action(&self) {
        let action = self.lock().startup_action.take();
        match action {
            Some(action) => action(),
            None => warn!("startup action is undefined"),
        }
    }

    // --- Lifecycle entry points ---

    /// Enter [`ContainerState::Launching`]. `false` if a service vetoed.
    pub fn will_finish_launching(&self) -> bool {
        self.dispatch(LifecycleEvent::WillFinishLaunching)
    }

    /// Enter [`ContainerState::Inactive`] after launch. `false` if a
    /// service vetoed.
    pub fn did_finish_launching(&self) -> bool {
        self.dispatch(LifecycleEvent::DidFinishLaunching)
    }

    pub fn did_become_active(&self) {
        self.dispatch(LifecycleEvent::DidBecomeActive);
    }

    pub fn will_resign_active(&self) {
        self.dispatch(LifecycleEvent::WillResignActive);
    }

    pub fn will_terminate(&self) {
        self.dispatch(LifecycleEvent::WillTerminate);
    }

    pub fn did_enter_background(&self) {
        self.dispatch(LifecycleEvent::DidEnterBackground);
    }

    pub fn will_enter_foreground(&self) {
        self.dispatch(LifecycleEvent::WillEnterForeground);
    }

    /// Apply `event`: set its target state, then fan it out.
    ///
    /// Returns the fan-out result, which is only ever `false` for the two
    /// launch events.
    pub fn dispatch(&self, event: LifecycleEvent) -> bool {
        let broadcaster = {
            let mut inner = self.lock();
            let from = inner.state;
            inner.state = event.target_state();
            debug!(
                event = event.as_str(),
                from = from.as_str(),
                to = inner.state.as_str(),
                "transition"
            );
            LifecycleBroadcaster::new(inner.services.handles())
        };
        broadcaster.broadcast(event)
    }
}

impl fmt::Debug for ApplicationContainer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let inner = self.lock();
        f.debug_struct("ApplicationContainer")
            .field("state", &inner.state)
            .field("resources", &inner.resources)
            .field("services", &inner.services)
            .field("coordinators", &inner.coordinators)
            .field("has_startup_action", &inner.startup_action.is_some())
            .field("has_window", &self.window.is_some())
            .finish()
    }
}

/// Presents a service registered under any capability type as
/// `dyn Lifecycle`, forwarding through [`Service::as_lifecycle`].
struct ServiceLifecycle<C: ?Sized>(Arc<C>);

impl<C: ?Sized + Service> ServiceLifecycle<C> {
    fn with<R>(&self, fallback: R, f: impl FnOnce(&dyn Lifecycle) -> R) -> R {
        self.0.as_lifecycle().map_or(fallback, f)
    }
}

impl<C: ?Sized + Service> Lifecycle for ServiceLifecycle<C> {
    fn will_finish_launching(&self) -> bool {
        self.with(true, |l| l.will_finish_launching())
    }

    fn did_finish_launching(&self) -> bool {
        self.with(true, |l| l.did_finish_launching())
    }

    fn did_become_active(&self) {
        self.with((), |l| l.did_become_active());
    }

    fn will_resign_active(&self) {
        self.with((), |l| l.will_resign_active());
    }

    fn will_terminate(&self) {
        self.with((), |l| l.will_terminate());
    }

    fn did_enter_background(&self) {
        self.with((), |l| l.did_enter_background());
    }

    fn will_enter_foreground(&self) {
        self.with((), |l| l.will_enter_foreground());
    }
}
