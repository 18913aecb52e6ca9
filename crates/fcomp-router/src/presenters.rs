//! Stock presentation strategies.
//!
//! | Presenter | Identifier | Attaches the screen by |
//! |-----------|------------|------------------------|
//! | [`RootPresenter`] | `fcomp.presenter.root` | replacing the window root |
//! | [`PushPresenter`] | `fcomp.presenter.push` | pushing onto the parent's navigation stack |
//! | [`TabPresenter`] | `fcomp.presenter.tab` | appending a tab to the parent and selecting it |
//! | [`WrappingPresenter`] | `fcomp.presenter.wrap` | wrapping it and presenting the wrapper modally |
//!
//! Each presenter completes synchronously and reports failure when the
//! collaborator it needs is missing.

use core::fmt;

use fcomp_core::Identifier;
use tracing::warn;

use crate::presenter::{PresentCompletion, RoutePresenter};
use crate::screen::{ScreenRef, WindowRef};

/// Sets the screen as the window root.
#[derive(Debug, Clone)]
pub struct RootPresenter {
    identifier: Identifier,
}

impl RootPresenter {
    pub const DEFAULT_IDENTIFIER: &'static str = "fcomp.presenter.root";

    #[must_use]
    pub fn new() -> Self {
        Self::with_identifier(Self::DEFAULT_IDENTIFIER)
    }

    #[must_use]
    pub fn with_identifier(identifier: impl Into<Identifier>) -> Self {
        Self {
            identifier: identifier.into(),
        }
    }
}

impl Default for RootPresenter {
    fn default() -> Self {
        Self::new()
    }
}

impl RoutePresenter for RootPresenter {
    fn identifier(&self) -> &Identifier {
        &self.identifier
    }

    fn present(
        &self,
        screen: &ScreenRef,
        _parent: Option<&ScreenRef>,
        window: Option<&WindowRef>,
        completion: PresentCompletion,
    ) {
        match window {
            Some(window) => {
                window.set_root(ScreenRef::clone(screen));
                completion.succeed();
            }
            None => {
                warn!(screen = screen.name(), "root presenter has no window");
                completion.fail();
            }
        }
    }
}

/// Pushes the screen onto the parent's navigation stack.
#[derive(Debug, Clone)]
pub struct PushPresenter {
    identifier: Identifier,
}

impl PushPresenter {
    pub const DEFAULT_IDENTIFIER: &'static str = "fcomp.presenter.push";

    #[must_use]
    pub fn new() -> Self {
        Self::with_identifier(Self::DEFAULT_IDENTIFIER)
    }

    #[must_use]
    pub fn with_identifier(identifier: impl Into<Identifier>) -> Self {
        Self {
            identifier: identifier.into(),
        }
    }
}

impl Default for PushPresenter {
    fn default() -> Self {
        Self::new()
    }
}

impl RoutePresenter for PushPresenter {
    fn identifier(&self) -> &Identifier {
        &self.identifier
    }

    fn present(
        &self,
        screen: &ScreenRef,
        parent: Option<&ScreenRef>,
        _window: Option<&WindowRef>,
        completion: PresentCompletion,
    ) {
        match parent.and_then(|p| p.navigation()) {
            Some(nav) => {
                nav.push(ScreenRef::clone(screen));
                completion.succeed();
            }
            None => {
                warn!(
                    screen = screen.name(),
                    parent = parent.map(|p| p.name()),
                    "push presenter needs a parent with a navigation stack"
                );
                completion.fail();
            }
        }
    }
}

/// Adds the screen as a new tab of the parent and selects it.
#[derive(Debug, Clone)]
pub struct TabPresenter {
    identifier: Identifier,
}

impl TabPresenter {
    pub const DEFAULT_IDENTIFIER: &'static str = "fcomp.presenter.tab";

    #[must_use]
    pub fn new() -> Self {
        Self::with_identifier(Self::DEFAULT_IDENTIFIER)
    }

    #[must_use]
    pub fn with_identifier(identifier: impl Into<Identifier>) -> Self {
        Self {
            identifier: identifier.into(),
        }
    }
}

impl Default for TabPresenter {
    fn default() -> Self {
        Self::new()
    }
}

impl RoutePresenter for TabPresenter {
    fn identifier(&self) -> &Identifier {
        &self.identifier
    }

    fn present(
        &self,
        screen: &ScreenRef,
        parent: Option<&ScreenRef>,
        _window: Option<&WindowRef>,
        completion: PresentCompletion,
    ) {
        let Some(tabs) = parent.and_then(|p| p.tab_container()) else {
            warn!(screen = screen.name(), "tab presenter needs a tab container parent");
            completion.fail();
            return;
        };
        tabs.add_tab(ScreenRef::clone(screen));
        let index = tabs.tabs().len().saturating_sub(1);
        tabs.select_tab(index);
        completion.succeed();
    }
}

/// Builds the wrapper around a screen. `None` means the screen cannot be
/// wrapped.
pub type WrapFn = Box<dyn Fn(&ScreenRef) -> Option<ScreenRef> + Send + Sync>;

/// Wraps the screen in a caller-built container and presents the wrapper
/// modally from the parent.
///
/// The router records the wrapped screen, not the wrapper, as the active
/// screen for the segment.
pub struct WrappingPresenter {
    identifier: Identifier,
    wrap: WrapFn,
}

impl WrappingPresenter {
    pub const DEFAULT_IDENTIFIER: &'static str = "fcomp.presenter.wrap";

    pub fn new(wrap: impl Fn(&ScreenRef) -> Option<ScreenRef> + Send + Sync + 'static) -> Self {
        Self::with_identifier(Self::DEFAULT_IDENTIFIER, wrap)
    }

    pub fn with_identifier(
        identifier: impl Into<Identifier>,
        wrap: impl Fn(&ScreenRef) -> Option<ScreenRef> + Send + Sync + 'static,
    ) -> Self {
        Self {
            identifier: identifier.into(),
            wrap: Box::new(wrap),
        }
    }
}

impl fmt::Debug for WrappingPresenter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("WrappingPresenter")
            .field("identifier", &self.identifier)
            .finish_non_exhaustive()
    }
}

impl RoutePresenter for WrappingPresenter {
    fn identifier(&self) -> &Identifier {
        &self.identifier
    }

    fn present(
        &self,
        screen: &ScreenRef,
        parent: Option<&ScreenRef>,
        _window: Option<&WindowRef>,
        completion: PresentCompletion,
    ) {
        let Some(host) = parent.and_then(|p| p.modal_host()) else {
            warn!(screen = screen.name(), "wrapping presenter needs a modal host parent");
            completion.fail();
            return;
        };
        let Some(wrapper) = (self.wrap)(screen) else {
            warn!(screen = screen.name(), "wrapper could not be built");
            completion.fail();
            return;
        };
        host.present_modal(wrapper);
        completion.succeed();
    }
}
