//! Application store: the shared loading flag and the app-loaded latch.

use std::sync::atomic::{AtomicUsize, Ordering};

use tokio::sync::watch;

use super::cell::StateCell;

#[derive(Debug, Clone, Default, PartialEq)]
pub struct AppState {
    pub app_loaded: bool,
}

/// Holds the process-wide loading flag toggled by the spinner wrapper.
///
/// The flag is reference-counted: every wrapped call increments on entry and
/// decrements on exit, so overlapping calls cannot clear a flag another call
/// still owns. `loading` is true while at least one call is outstanding.
pub struct AppStore {
    in_flight: AtomicUsize,
    loading_tx: watch::Sender<bool>,
    state: StateCell<AppState>,
}

impl AppStore {
    pub const NAME: &'static str = "appStore";

    pub fn new() -> Self {
        let (loading_tx, _) = watch::channel(false);
        Self {
            in_flight: AtomicUsize::new(0),
            loading_tx,
            state: StateCell::new(AppState::default()),
        }
    }

    pub fn loading(&self) -> bool {
        self.in_flight.load(Ordering::SeqCst) > 0
    }

    /// Subscribe to on/off transitions of the loading flag.
    pub fn subscribe_loading(&self) -> watch::Receiver<bool> {
        self.loading_tx.subscribe()
    }

    pub(crate) fn begin_loading(&self) {
        if self.in_flight.fetch_add(1, Ordering::SeqCst) == 0 {
            self.loading_tx.send_replace(true);
        }
    }

    pub(crate) fn end_loading(&self) {
        if self.in_flight.fetch_sub(1, Ordering::SeqCst) == 1 {
            self.loading_tx.send_replace(false);
        }
    }

    pub fn app_loaded(&self) -> bool {
        self.state.read(|s| s.app_loaded)
    }

    pub fn set_app_loaded(&self, loaded: bool) {
        self.state.update(|s| s.app_loaded = loaded);
    }
}

impl Default for AppStore {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn loading_reflects_outstanding_count() {
        let app = AppStore::new();
        assert!(!app.loading());

        app.begin_loading();
        app.begin_loading();
        assert!(app.loading());

        app.end_loading();
        assert!(app.loading(), "one call still outstanding");

        app.end_loading();
        assert!(!app.loading());
    }

    #[test]
    fn loading_transitions_notify_subscribers() {
        let app = AppStore::new();
        let rx = app.subscribe_loading();
        assert!(!*rx.borrow());

        app.begin_loading();
        assert!(*rx.borrow());

        app.end_loading();
        assert!(!*rx.borrow());
    }

    #[test]
    fn app_loaded_latch() {
        let app = AppStore::new();
        assert!(!app.app_loaded());
        app.set_app_loaded(true);
        assert!(app.app_loaded());
    }
}
