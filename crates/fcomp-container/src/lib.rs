#![forbid(unsafe_code)]

//! Application composition for FrankenComp.
//!
//! - [`ApplicationContainer`]: capability registries for resources,
//!   services, and coordinators, plus ordered lifecycle dispatch with
//!   catch-up for late registrations.
//! - [`TypedRegistry`] and [`LifecycleBroadcaster`]: the two building
//!   blocks the container is made of.
//! - [`Coordinator`]: feature collaborators that register route segments.
//! - [`HostDriver`]: forwards platform lifecycle callbacks.
//! - [`DefaultsService`]: typed key-value persistence as a lifecycle-aware
//!   service.

pub mod broadcaster;
pub mod container;
pub mod coordinator;
pub mod defaults;
pub mod host;
pub mod registry;

pub use broadcaster::LifecycleBroadcaster;
pub use container::{ApplicationContainer, StartupAction};
pub use coordinator::Coordinator;
pub use defaults::{
    DEFAULTS_PATH_ENV, DefaultsConfig, DefaultsError, DefaultsService, InlineDefault,
    KeyValueStore, PersistedValue, StoredValue,
};
pub use host::{AppHost, HostDriver};
pub use registry::TypedRegistry;
