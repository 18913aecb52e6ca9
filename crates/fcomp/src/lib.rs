#![forbid(unsafe_code)]

//! FrankenComp public facade.
//!
//! # Role in FrankenComp
//! This crate is the user-facing entry point. It re-exports the core
//! contracts, the router, and (with the default `container` feature) the
//! application container, so applications depend on one crate.
//!
//! # Example
//! ```
//! use std::sync::Arc;
//! use fcomp::prelude::*;
//!
//! struct Analytics;
//! impl Service for Analytics {}
//!
//! let container = ApplicationContainer::new(None);
//! container.add_service(Arc::new(Analytics));
//! assert!(container.will_finish_launching());
//! assert_eq!(container.state(), ContainerState::Launching);
//! ```

pub use fcomp_core as contracts;
pub use fcomp_router as router;

#[cfg(feature = "container")]
pub use fcomp_container as container;

pub use fcomp_core::{CapabilityKey, ContainerState, Identifier, Lifecycle, LifecycleEvent, Service};
pub use fcomp_router::{
    PresentCompletion, PresentOutcome, PushPresenter, RootPresenter, RouteError, RoutePresenter,
    RouteReport, RouteSegment, Router, Screen, ScreenRef, TabPresenter, WindowRef,
    WrappingPresenter,
};

#[cfg(feature = "container")]
pub use fcomp_container::{
    AppHost, ApplicationContainer, Coordinator, DefaultsConfig, DefaultsError, DefaultsService,
    HostDriver, KeyValueStore,
};

/// Common imports for applications.
pub mod prelude {
    pub use fcomp_core::{
        CapabilityKey, ContainerState, Identifier, Lifecycle, LifecycleEvent, Service,
    };
    pub use fcomp_router::{
        HostWindow, ModalHost, NavigationStack, PresentCompletion, PushPresenter, RootPresenter,
        RouteError, RoutePresenter, RouteSegment, Router, Screen, ScreenRef, TabContainer,
        TabPresenter, WindowRef, WrappingPresenter,
    };

    #[cfg(feature = "container")]
    pub use fcomp_container::{
        AppHost, ApplicationContainer, Coordinator, DefaultsService, HostDriver, KeyValueStore,
    };
}
