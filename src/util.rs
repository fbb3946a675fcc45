//! Shared helpers: form validation and keystroke debouncing.

use std::sync::{Mutex, OnceLock};
use std::time::Duration;

use regex::Regex;
use tokio::task::JoinHandle;

/// Format check only — one `@`, something on each side, a dot in the
/// domain. Real validation is the server's job; this gates dispatch.
pub fn is_valid_email(email: &str) -> bool {
    static EMAIL_RE: OnceLock<Regex> = OnceLock::new();
    let re = EMAIL_RE.get_or_init(|| {
        Regex::new(r"^[^@\s]+@[^@\s]+\.[^@\s]+$").expect("email pattern is a valid static regex")
    });
    re.is_match(email)
}

/// Collapses bursts of calls into one: each `call` aborts the previously
/// scheduled task and schedules the new one after the quiet window, so only
/// the last value within the window is acted on.
pub struct Debouncer {
    delay: Duration,
    pending: Mutex<Option<JoinHandle<()>>>,
}

impl Debouncer {
    pub fn new(delay: Duration) -> Self {
        Self {
            delay,
            pending: Mutex::new(None),
        }
    }

    /// Schedule `fut` to run after the quiet window, cancelling whatever was
    /// scheduled before.
    pub fn call<F>(&self, fut: F)
    where
        F: std::future::Future<Output = ()> + Send + 'static,
    {
        let delay = self.delay;
        let handle = tokio::spawn(async move {
            tokio::time::sleep(delay).await;
            fut.await;
        });
        let mut pending = self.pending.lock().expect("debouncer lock poisoned");
        if let Some(previous) = pending.replace(handle) {
            previous.abort();
        }
    }

    /// Drop whatever is scheduled without running it.
    pub fn cancel(&self) {
        let mut pending = self.pending.lock().expect("debouncer lock poisoned");
        if let Some(previous) = pending.take() {
            previous.abort();
        }
    }
}

impl Drop for Debouncer {
    fn drop(&mut self) {
        self.cancel();
    }
}
