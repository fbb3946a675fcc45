//! Terminal feedback for in-flight requests.

use std::sync::Arc;
use std::time::Duration;

use indicatif::{ProgressBar, ProgressStyle};
use tokio::task::JoinHandle;

use taskboard::stores::AppStore;

/// Watch the shared loading flag and show a spinner while any request is
/// outstanding. The spinner clears itself on the off transition.
pub fn spawn_loading_indicator(app: Arc<AppStore>) -> JoinHandle<()> {
    let mut rx = app.subscribe_loading();
    tokio::spawn(async move {
        let mut bar: Option<ProgressBar> = None;
        loop {
            if rx.changed().await.is_err() {
                break;
            }
            let loading = *rx.borrow_and_update();
            if loading && bar.is_none() {
                let spinner = ProgressBar::new_spinner();
                if let Ok(style) = ProgressStyle::default_spinner().template("{spinner} {msg}") {
                    spinner.set_style(style);
                }
                spinner.set_message("Contacting server...");
                spinner.enable_steady_tick(Duration::from_millis(80));
                bar = Some(spinner);
            } else if !loading {
                if let Some(spinner) = bar.take() {
                    spinner.finish_and_clear();
                }
            }
        }
        if let Some(spinner) = bar {
            spinner.finish_and_clear();
        }
    })
}
