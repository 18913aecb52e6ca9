#![forbid(unsafe_code)]

//! Core contracts for FrankenComp.
//!
//! This crate holds the vocabulary shared by the container and the router:
//!
//! - [`Identifier`]: name-keyed value object used for route segments and
//!   presenters.
//! - [`CapabilityKey`]: type-derived key used by the typed registries.
//! - [`ContainerState`]: the application lifecycle phase.
//! - [`Lifecycle`] and [`Service`]: the optional-method lifecycle capability
//!   and the capability query every service exposes.

pub mod capability;
pub mod identifier;
pub mod lifecycle;
pub mod state;

pub use capability::CapabilityKey;
pub use identifier::Identifier;
pub use lifecycle::{Lifecycle, LifecycleEvent, Service};
pub use state::ContainerState;
