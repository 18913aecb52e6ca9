//! Route segment descriptors.

use core::fmt;

use fcomp_core::Identifier;

use crate::screen::ScreenRef;

/// Lazily builds a segment's screen. `None` means the screen could not be
/// built.
pub type ScreenFactory = Box<dyn Fn() -> Option<ScreenRef> + Send + Sync>;

/// A named, lazily constructed unit of navigable content.
///
/// Segments are registered once per router and never change afterwards.
pub struct RouteSegment {
    identifier: Identifier,
    presenter: Identifier,
    singleton: bool,
    factory: ScreenFactory,
}

impl RouteSegment {
    /// Describe a segment presented by `presenter` and built by `factory`.
    pub fn new(
        identifier: impl Into<Identifier>,
        presenter: impl Into<Identifier>,
        factory: impl Fn() -> Option<ScreenRef> + Send + Sync + 'static,
    ) -> Self {
        Self {
            identifier: identifier.into(),
            presenter: presenter.into(),
            singleton: false,
            factory: Box::new(factory),
        }
    }

    /// Mark the segment as a singleton.
    ///
    /// The flag is recorded for coordinators that want to inspect it; the
    /// reconciler does not read it.
    #[must_use]
    pub fn singleton(mut self, singleton: bool) -> Self {
        self.singleton = singleton;
        self
    }

    /// The segment's identifier.
    #[inline]
    #[must_use]
    pub fn identifier(&self) -> &Identifier {
        &self.identifier
    }

    /// Identifier of the presenter that attaches this segment's screen.
    #[inline]
    #[must_use]
    pub fn presenter_identifier(&self) -> &Identifier {
        &self.presenter
    }

    #[inline]
    #[must_use]
    pub fn is_singleton(&self) -> bool {
        self.singleton
    }

    /// Build a fresh screen.
    #[must_use]
    pub fn build(&self) -> Option<ScreenRef> {
        (self.factory)()
    }
}

impl fmt::Debug for RouteSegment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RouteSegment")
            .field("identifier", &self.identifier)
            .field("presenter", &self.presenter)
            .field("singleton", &self.singleton)
            .finish_non_exhaustive()
    }
}
