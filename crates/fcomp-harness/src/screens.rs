//! Stub view hierarchy.
//!
//! A [`StubStack`] plays the navigation controller: every screen built
//! `with_stack(stack)` reports that stack from [`Screen::navigation`], the
//! way a pushed child reports the controller it lives in. The screen that
//! owns the stack is built the same way.

use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use fcomp_router::{
    HostWindow, ModalHost, NavigationStack, Screen, ScreenRef, TabContainer, same_screen,
};

use crate::tracker::Tracker;

fn lock<T>(m: &Mutex<T>) -> MutexGuard<'_, T> {
    m.lock().unwrap_or_else(PoisonError::into_inner)
}

// ============================================================================
// Navigation stack
// ============================================================================

/// Push/pop stack that records `push:<name>` and `pop_to:<name>` calls.
#[derive(Default)]
pub struct StubStack {
    screens: Mutex<Vec<ScreenRef>>,
    tracker: Tracker,
}

impl StubStack {
    #[must_use]
    pub fn new(tracker: &Tracker) -> Arc<Self> {
        Arc::new(Self {
            screens: Mutex::new(Vec::new()),
            tracker: tracker.clone(),
        })
    }

    /// Names of the stacked screens, bottom first.
    #[must_use]
    pub fn names(&self) -> Vec<String> {
        lock(&self.screens)
            .iter()
            .map(|s| s.name().to_string())
            .collect()
    }
}

impl NavigationStack for StubStack {
    fn push(&self, screen: ScreenRef) {
        self.tracker.track(format!("push:{}", screen.name()));
        lock(&self.screens).push(screen);
    }

    fn pop_to(&self, screen: &ScreenRef) -> bool {
        self.tracker.track(format!("pop_to:{}", screen.name()));
        let mut screens = lock(&self.screens);
        match screens.iter().position(|s| same_screen(s, screen)) {
            Some(index) => {
                screens.truncate(index + 1);
                true
            }
            None => false,
        }
    }

    fn stack(&self) -> Vec<ScreenRef> {
        lock(&self.screens).clone()
    }
}

// ============================================================================
// Screens
// ============================================================================

/// A named screen with opt-in navigation and modal capabilities.
pub struct StubScreen {
    name: String,
    stack: Option<Arc<StubStack>>,
    accepts_modals: bool,
    modals: Mutex<Vec<ScreenRef>>,
}

impl StubScreen {
    #[must_use]
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            stack: None,
            accepts_modals: false,
            modals: Mutex::new(Vec::new()),
        }
    }

    /// Report `stack` as this screen's navigation stack.
    #[must_use]
    pub fn with_stack(mut self, stack: &Arc<StubStack>) -> Self {
        self.stack = Some(Arc::clone(stack));
        self
    }

    /// Expose a modal host capability.
    #[must_use]
    pub fn accepting_modals(mut self) -> Self {
        self.accepts_modals = true;
        self
    }

    /// Finish building as a shared handle.
    #[must_use]
    pub fn into_ref(self) -> ScreenRef {
        Arc::new(self)
    }

    /// Screens presented modally from this one.
    #[must_use]
    pub fn modals(&self) -> Vec<ScreenRef> {
        lock(&self.modals).clone()
    }
}

impl Screen for StubScreen {
    fn name(&self) -> &str {
        &self.name
    }

    fn navigation(&self) -> Option<Arc<dyn NavigationStack>> {
        self.stack
            .as_ref()
            .map(|s| Arc::clone(s) as Arc<dyn NavigationStack>)
    }

    fn modal_host(&self) -> Option<&dyn ModalHost> {
        if self.accepts_modals { Some(self) } else { None }
    }
}

impl ModalHost for StubScreen {
    fn present_modal(&self, screen: ScreenRef) {
        lock(&self.modals).push(screen);
    }
}

/// A tab bar screen. Records `select_tab:<index>`.
pub struct StubTabs {
    name: String,
    tabs: Mutex<Vec<ScreenRef>>,
    selected: Mutex<Option<usize>>,
    tracker: Tracker,
}

impl StubTabs {
    #[must_use]
    pub fn new(name: impl Into<String>, tracker: &Tracker) -> Arc<Self> {
        Arc::new(Self {
            name: name.into(),
            tabs: Mutex::new(Vec::new()),
            selected: Mutex::new(None),
            tracker: tracker.clone(),
        })
    }

    #[must_use]
    pub fn tab_names(&self) -> Vec<String> {
        lock(&self.tabs)
            .iter()
            .map(|s| s.name().to_string())
            .collect()
    }
}

impl Screen for StubTabs {
    fn name(&self) -> &str {
        &self.name
    }

    fn tab_container(&self) -> Option<&dyn TabContainer> {
        Some(self)
    }
}

impl TabContainer for StubTabs {
    fn tabs(&self) -> Vec<ScreenRef> {
        lock(&self.tabs).clone()
    }

    fn add_tab(&self, screen: ScreenRef) {
        lock(&self.tabs).push(screen);
    }

    fn select_tab(&self, index: usize) {
        self.tracker.track(format!("select_tab:{index}"));
        *lock(&self.selected) = Some(index);
    }

    fn selected_tab(&self) -> Option<usize> {
        *lock(&self.selected)
    }
}

// ============================================================================
// Window
// ============================================================================

/// Host window that remembers its root and visibility.
#[derive(Default)]
pub struct StubWindow {
    root: Mutex<Option<ScreenRef>>,
    root_changes: AtomicUsize,
    visible: AtomicBool,
}

impl StubWindow {
    #[must_use]
    pub fn new() -> Arc<Self> {
        Arc::new(Self::default())
    }

    /// How many times `set_root` was called.
    #[must_use]
    pub fn root_changes(&self) -> usize {
        self.root_changes.load(Ordering::Relaxed)
    }

    #[must_use]
    pub fn is_visible(&self) -> bool {
        self.visible.load(Ordering::Relaxed)
    }
}

impl HostWindow for StubWindow {
    fn set_root(&self, screen: ScreenRef) {
        self.root_changes.fetch_add(1, Ordering::Relaxed);
        *lock(&self.root) = Some(screen);
    }

    fn root(&self) -> Option<ScreenRef> {
        lock(&self.root).clone()
    }

    fn make_visible(&self) {
        self.visible.store(true, Ordering::Relaxed);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn stack_pop_to_truncates_above() {
        let tracker = Tracker::new();
        let stack = StubStack::new(&tracker);
        let a = StubScreen::new("a").with_stack(&stack).into_ref();
        let b = StubScreen::new("b").with_stack(&stack).into_ref();
        stack.push(Arc::clone(&a));
        stack.push(b);
        assert!(stack.pop_to(&a));
        assert_eq!(stack.names(), vec!["a"]);
        assert_eq!(tracker.log(), vec!["push:a", "push:b", "pop_to:a"]);
        assert!(a.navigation().is_some());
    }

    #[test]
    fn modal_host_is_opt_in() {
        assert!(StubScreen::new("plain").modal_host().is_none());
        let host = StubScreen::new("host").accepting_modals();
        host.modal_host()
            .unwrap()
            .present_modal(StubScreen::new("m").into_ref());
        assert_eq!(host.modals().len(), 1);
    }

    #[test]
    fn window_tracks_root_and_visibility() {
        let window = StubWindow::new();
        assert!(window.root().is_none());
        window.set_root(StubScreen::new("r").into_ref());
        window.make_visible();
        assert_eq!(window.root_changes(), 1);
        assert!(window.is_visible());
    }
}
