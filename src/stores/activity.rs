//! Activity store: the activity feed, whole or windowed to today/past week.

use std::sync::Arc;

use crate::http::{CallOptions, Flow};
use crate::models::Activity;
use crate::services::ActivityService;

use super::app::AppStore;
use super::cell::StateCell;
use super::spinner::with_spinner;

#[derive(Debug, Clone, Default, PartialEq)]
pub struct ActivityState {
    pub activities: Vec<Activity>,
}

pub struct ActivityStore {
    state: Arc<StateCell<ActivityState>>,
    app: Arc<AppStore>,
    service: ActivityService,
}

impl ActivityStore {
    pub const NAME: &'static str = "activityStore";

    pub fn new(service: ActivityService, app: Arc<AppStore>) -> Self {
        Self {
            state: Arc::new(StateCell::new(ActivityState::default())),
            app,
            service,
        }
    }

    pub fn state(&self) -> ActivityState {
        self.state.get()
    }

    pub fn subscribe(&self) -> tokio::sync::watch::Receiver<u64> {
        self.state.subscribe()
    }

    /// Response middleware that replaces the cached feed; error middleware
    /// that logs and drops, matching the original's silent handling.
    fn collect_options(&self) -> CallOptions {
        let state = Arc::clone(&self.state);
        CallOptions::new()
            .on_response(move |response| {
                if let Some(activities) = response.data::<Vec<Activity>>() {
                    state.update(|s| s.activities = activities);
                }
                Flow::Continue
            })
            .on_error(|err| {
                tracing::warn!(error = %err, "failed to fetch activities");
                Flow::Continue
            })
    }

    pub async fn fetch_all(&self) {
        let _ = with_spinner(
            &self.app,
            self.service.get_all_activities(self.collect_options()),
        )
        .await;
    }

    pub async fn fetch_today(&self) {
        let _ = with_spinner(
            &self.app,
            self.service.get_today_activities(self.collect_options()),
        )
        .await;
    }

    pub async fn fetch_past_week(&self) {
        let _ = with_spinner(
            &self.app,
            self.service.get_past_week_activities(self.collect_options()),
        )
        .await;
    }

    pub fn reset(&self) {
        self.state.update(|s| *s = ActivityState::default());
    }
}
