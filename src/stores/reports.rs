//! Bug reports store: cached report list, page filter, and an editing draft.

use std::sync::Arc;

use crate::http::{CallOptions, Flow};
use crate::models::{BugReport, Page};
use crate::services::ReportsService;

use super::app::AppStore;
use super::cell::StateCell;
use super::draft::Draft;
use super::spinner::with_spinner;

#[derive(Debug, Clone, Default, PartialEq)]
pub struct ReportsState {
    pub bug_reports: Vec<BugReport>,
    pub page_filter: Option<Page>,
    pub draft: Draft<BugReport>,
}

pub struct ReportsStore {
    state: Arc<StateCell<ReportsState>>,
    app: Arc<AppStore>,
    service: ReportsService,
}

impl ReportsStore {
    pub const NAME: &'static str = "bugReportsStore";

    pub fn new(service: ReportsService, app: Arc<AppStore>) -> Self {
        Self {
            state: Arc::new(StateCell::new(ReportsState::default())),
            app,
            service,
        }
    }

    pub fn state(&self) -> ReportsState {
        self.state.get()
    }

    pub fn subscribe(&self) -> tokio::sync::watch::Receiver<u64> {
        self.state.subscribe()
    }

    /// Setting a page filter narrows the next fetch; clearing it re-fetches
    /// the unfiltered list immediately.
    pub async fn set_page_filter(&self, page: Option<Page>) {
        self.state.update(|s| s.page_filter = page);
        if page.is_none() {
            self.fetch_reports().await;
        }
    }

    pub fn begin_report(&self) {
        self.state
            .update(|s| s.draft.begin_new(BugReport::default()));
    }

    pub fn modify_draft(&self, f: impl FnOnce(&mut BugReport)) {
        self.state.update(|s| s.draft.modify(f));
    }

    pub fn reset_editing(&self) {
        self.state.update(|s| s.draft.clear());
    }

    fn collect_options(&self) -> CallOptions {
        let state = Arc::clone(&self.state);
        CallOptions::new().on_response(move |response| {
            if let Some(reports) = response.data::<Vec<BugReport>>() {
                state.update(|s| s.bug_reports = reports);
            }
            Flow::Continue
        })
    }

    pub async fn fetch_reports(&self) {
        let _ = with_spinner(
            &self.app,
            self.service.get_bug_reports(self.collect_options()),
        )
        .await;
    }

    pub async fn fetch_reports_by_page(&self) {
        let Some(page) = self.state.read(|s| s.page_filter) else {
            return self.fetch_reports().await;
        };
        let _ = with_spinner(
            &self.app,
            self.service
                .get_bug_reports_by_page(page, self.collect_options()),
        )
        .await;
    }

    /// Submit the draft; a successful create clears it and re-fetches.
    pub async fn create_report(&self) {
        let Some(report) = self.state.read(|s| s.draft.get()) else {
            return;
        };
        let result = with_spinner(
            &self.app,
            self.service.create_bug_report(&report, CallOptions::new()),
        )
        .await;
        if result.is_ok() {
            self.state.update(|s| s.draft.clear());
            self.fetch_reports().await;
        }
    }

    pub async fn remove_report(&self, id: &str) {
        let result = with_spinner(
            &self.app,
            self.service.delete_bug_report(id, CallOptions::new()),
        )
        .await;
        if result.is_ok() {
            self.fetch_reports().await;
        }
    }

    pub fn reset(&self) {
        self.state.update(|s| *s = ReportsState::default());
    }
}
