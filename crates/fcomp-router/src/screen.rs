//! Screen and window collaborator contracts.
//!
//! The router never renders anything. It manipulates screens only through
//! these traits, which a platform layer implements over its real view
//! hierarchy (or which tests implement with stubs).
//!
//! A plain screen implements [`Screen`] and nothing else. Screens that host
//! other screens expose that capability through the optional accessors:
//!
//! | Accessor | Capability | Used by |
//! |----------|------------|---------|
//! | [`Screen::navigation`] | push / pop-to stack the screen lives in | [`PushPresenter`](crate::PushPresenter), pop-back on reuse |
//! | [`Screen::tab_container`] | tab bar whose children can be re-selected | tab-sibling reuse, [`TabPresenter`](crate::TabPresenter) |
//! | [`Screen::modal_host`] | modal presentation on top of the screen | [`WrappingPresenter`](crate::WrappingPresenter) |
//!
//! # Identity
//!
//! Screens are compared by allocation identity ([`ScreenKey`]), never by
//! value. Two `ScreenRef`s are the same screen iff they point at the same
//! `Arc` allocation.

use core::fmt;
use std::sync::Arc;

/// Shared handle to a live screen.
pub type ScreenRef = Arc<dyn Screen>;

/// Shared handle to the host window.
pub type WindowRef = Arc<dyn HostWindow>;

/// A presentable unit of UI.
pub trait Screen: Send + Sync {
    /// Short name used in diagnostics.
    fn name(&self) -> &str {
        "screen"
    }

    /// The navigation stack this screen is part of, or that it is.
    fn navigation(&self) -> Option<Arc<dyn NavigationStack>> {
        None
    }

    /// This screen's tab container capability, if it is a tab bar.
    fn tab_container(&self) -> Option<&dyn TabContainer> {
        None
    }

    /// This screen's modal presentation capability.
    fn modal_host(&self) -> Option<&dyn ModalHost> {
        None
    }
}

/// A push/pop stack of screens.
pub trait NavigationStack: Send + Sync {
    /// Push `screen` on top of the stack.
    fn push(&self, screen: ScreenRef);

    /// Pop everything above `screen`. Returns `false` if `screen` is not in
    /// the stack.
    fn pop_to(&self, screen: &ScreenRef) -> bool;

    /// Screens currently in the stack, bottom first.
    fn stack(&self) -> Vec<ScreenRef>;
}

/// A tab bar hosting sibling screens.
pub trait TabContainer: Send + Sync {
    /// Child screens in tab order.
    fn tabs(&self) -> Vec<ScreenRef>;

    /// Append a tab.
    fn add_tab(&self, screen: ScreenRef);

    /// Make the tab at `index` the selected one.
    fn select_tab(&self, index: usize);

    /// Index of the selected tab.
    fn selected_tab(&self) -> Option<usize>;
}

/// A screen that can present another screen modally.
pub trait ModalHost: Send + Sync {
    /// Present `screen` modally on top of this one.
    fn present_modal(&self, screen: ScreenRef);
}

/// The top-level window screens are attached to.
pub trait HostWindow: Send + Sync {
    /// Replace the window's root screen.
    fn set_root(&self, screen: ScreenRef);

    /// The current root screen.
    fn root(&self) -> Option<ScreenRef>;

    /// Bring the window on screen. Called once launch has succeeded.
    fn make_visible(&self) {}
}

/// Allocation identity of a screen.
///
/// Only meaningful while something keeps the allocation alive; the router
/// keeps a `Weak` alongside every key it stores for that reason.
#[derive(Clone, Copy, PartialEq, Eq, Hash)]
pub struct ScreenKey(usize);

impl ScreenKey {
    /// Identity key for `screen`.
    #[must_use]
    pub fn of(screen: &ScreenRef) -> Self {
        Self(Arc::as_ptr(screen).cast::<()>() as usize)
    }
}

impl fmt::Debug for ScreenKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "ScreenKey({:#x})", self.0)
    }
}

/// Whether two handles refer to the same screen.
#[inline]
#[must_use]
pub fn same_screen(a: &ScreenRef, b: &ScreenRef) -> bool {
    ScreenKey::of(a) == ScreenKey::of(b)
}
