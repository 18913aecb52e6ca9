//! Feature coordinators.

use std::sync::Arc;

use fcomp_router::Router;

/// A feature-specific collaborator that contributes route segments and
/// presenters to the application's router.
///
/// Coordinators usually keep a handle to the container (or to the router)
/// so the screens they build can issue route requests later.
pub trait Coordinator: Send + Sync + 'static {
    /// Register this feature's segments and presenters.
    fn register_route_segments(&self, router: &mut Router);
}

/// Lets a coordinator registered under any capability type be iterated as
/// `dyn Coordinator`.
pub(crate) struct CoordinatorRef<C: ?Sized>(pub(crate) Arc<C>);

impl<C: ?Sized + Coordinator> Coordinator for CoordinatorRef<C> {
    fn register_route_segments(&self, router: &mut Router) {
        self.0.register_route_segments(router);
    }
}
