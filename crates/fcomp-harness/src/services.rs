//! Lifecycle-aware service fixture.

use fcomp_core::{Lifecycle, LifecycleEvent, Service};

use crate::tracker::Tracker;

/// A service that records every lifecycle event it receives as
/// `"<name>.<event>"` and answers the launch events with configurable
/// results.
#[derive(Debug)]
pub struct RecordingService {
    name: String,
    tracker: Tracker,
    allow_will_finish: bool,
    allow_did_finish: bool,
}

impl RecordingService {
    #[must_use]
    pub fn new(name: impl Into<String>, tracker: &Tracker) -> Self {
        Self {
            name: name.into(),
            tracker: tracker.clone(),
            allow_will_finish: true,
            allow_did_finish: true,
        }
    }

    /// Answer `false` to `will_finish_launching`.
    #[must_use]
    pub fn vetoing_will_finish(mut self) -> Self {
        self.allow_will_finish = false;
        self
    }

    /// Answer `false` to `did_finish_launching`.
    #[must_use]
    pub fn vetoing_did_finish(mut self) -> Self {
        self.allow_did_finish = false;
        self
    }

    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Tracker key this service uses for `event`.
    #[must_use]
    pub fn key(&self, event: LifecycleEvent) -> String {
        format!("{}.{}", self.name, event)
    }

    /// Events this service has seen, in order.
    #[must_use]
    pub fn events(&self) -> Vec<String> {
        let prefix = format!("{}.", self.name);
        self.tracker
            .with_prefix(&prefix)
            .into_iter()
            .map(|k| k[prefix.len()..].to_string())
            .collect()
    }

    fn record(&self, event: LifecycleEvent) {
        self.tracker.track(self.key(event));
    }
}

impl Lifecycle for RecordingService {
    fn will_finish_launching(&self) -> bool {
        self.record(LifecycleEvent::WillFinishLaunching);
        self.allow_will_finish
    }

    fn did_finish_launching(&self) -> bool {
        self.record(LifecycleEvent::DidFinishLaunching);
        self.allow_did_finish
    }

    fn did_become_active(&self) {
        self.record(LifecycleEvent::DidBecomeActive);
    }

    fn will_resign_active(&self) {
        self.record(LifecycleEvent::WillResignActive);
    }

    fn will_terminate(&self) {
        self.record(LifecycleEvent::WillTerminate);
    }

    fn did_enter_background(&self) {
        self.record(LifecycleEvent::DidEnterBackground);
    }

    fn will_enter_foreground(&self) {
        self.record(LifecycleEvent::WillEnterForeground);
    }
}

impl Service for RecordingService {
    fn as_lifecycle(&self) -> Option<&dyn Lifecycle> {
        Some(self)
    }
}
