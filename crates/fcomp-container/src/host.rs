//! Host driver template.
//!
//! A platform layer owns a [`HostDriver`] and forwards the operating
//! system's lifecycle callbacks to it. The driver runs the application's
//! [`AppHost::configure`] hook and the startup action at the right point of
//! launch, so individual applications only describe *what* to register.
//!
//! Launch sequence:
//!
//! 1. `will_finish_launching`: `configure`, then the startup action, then
//!    the container's own `will_finish_launching`.
//! 2. `did_finish_launching`: the container's result; on success the
//!    window is made visible.

use std::sync::Arc;

use fcomp_router::HostWindow;
use tracing::debug;

use crate::container::ApplicationContainer;

/// Application-specific setup.
pub trait AppHost {
    /// Register resources, services, and coordinators, and set the startup
    /// action.
    fn configure(&self, container: &ApplicationContainer);
}

/// Forwards host lifecycle callbacks to a container.
pub struct HostDriver<H: AppHost> {
    host: H,
    container: Arc<ApplicationContainer>,
}

impl<H: AppHost> HostDriver<H> {
    #[must_use]
    pub fn new(host: H, container: Arc<ApplicationContainer>) -> Self {
        Self { host, container }
    }

    #[must_use]
    pub fn host(&self) -> &H {
        &self.host
    }

    #[must_use]
    pub fn container(&self) -> &Arc<ApplicationContainer> {
        &self.container
    }

    pub fn will_finish_launching(&self) -> bool {
        self.host.configure(&self.container);
        debug!(
            resources = self.container.resource_count(),
            services = self.container.service_count(),
            coordinators = self.container.coordinator_count(),
            "container configured"
        );
        self.container.execute_startup_action();
        self.container.will_finish_launching()
    }

    pub fn did_finish_launching(&self) -> bool {
        let launched = self.container.did_finish_launching();
        if launched {
            if let Some(window) = self.container.window() {
                window.make_visible();
            }
        }
        launched
    }

    pub fn did_become_active(&self) {
        self.container.did_become_active();
    }

    pub fn will_resign_active(&self) {
        self.container.will_resign_active();
    }

    pub fn will_terminate(&self) {
        self.container.will_terminate();
    }

    pub fn did_enter_background(&self) {
        self.container.did_enter_background();
    }

    pub fn will_enter_foreground(&self) {
        self.container.will_enter_foreground();
    }
}
