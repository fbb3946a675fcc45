//! `/api/activity` — the activity feed, whole or windowed.

use std::sync::Arc;

use crate::errors::HttpError;
use crate::http::{CallOptions, HttpClient, MiddlewareSet, RequestConfig};
use crate::models::{Activity, Envelope};

const ACTIVITY_BASE_URI: &str = "/api/activity";

pub struct ActivityService {
    client: Arc<HttpClient>,
    middlewares: MiddlewareSet,
}

impl ActivityService {
    pub fn new(client: Arc<HttpClient>) -> Self {
        Self {
            client,
            middlewares: MiddlewareSet::new(),
        }
    }

    pub async fn get_all_activities(
        &self,
        options: CallOptions,
    ) -> Result<Envelope<Vec<Activity>>, HttpError> {
        self.client
            .send(
                RequestConfig::get(ACTIVITY_BASE_URI),
                &self.middlewares,
                options,
            )
            .await
    }

    pub async fn get_today_activities(
        &self,
        options: CallOptions,
    ) -> Result<Envelope<Vec<Activity>>, HttpError> {
        self.client
            .send(
                RequestConfig::get(format!("{ACTIVITY_BASE_URI}/today")),
                &self.middlewares,
                options,
            )
            .await
    }

    pub async fn get_past_week_activities(
        &self,
        options: CallOptions,
    ) -> Result<Envelope<Vec<Activity>>, HttpError> {
        self.client
            .send(
                RequestConfig::get(format!("{ACTIVITY_BASE_URI}/week")),
                &self.middlewares,
                options,
            )
            .await
    }
}
