//! `/api/task` — task CRUD, per-project and per-date queries.

use std::sync::Arc;

use serde_json::json;

use crate::errors::HttpError;
use crate::http::{CallOptions, HttpClient, MiddlewareSet, RequestConfig};
use crate::models::{Envelope, Task};

const TASKS_BASE_URI: &str = "/api/task";

pub struct TasksService {
    client: Arc<HttpClient>,
    middlewares: MiddlewareSet,
}

impl TasksService {
    pub fn new(client: Arc<HttpClient>) -> Self {
        Self {
            client,
            middlewares: MiddlewareSet::new(),
        }
    }

    pub async fn get_project_tasks(
        &self,
        project_id: &str,
        options: CallOptions,
    ) -> Result<Envelope<Vec<Task>>, HttpError> {
        self.client
            .send(
                RequestConfig::get(format!("{TASKS_BASE_URI}/project/{project_id}")),
                &self.middlewares,
                options,
            )
            .await
    }

    /// Tasks due on a given date; the date travels in the body, formatted
    /// `DD Mon YYYY` like every deadline field.
    pub async fn get_tasks_by_date(
        &self,
        date: &str,
        options: CallOptions,
    ) -> Result<Envelope<Vec<Task>>, HttpError> {
        self.client
            .send(
                RequestConfig::post(format!("{TASKS_BASE_URI}/date"))
                    .with_json(&json!({ "date": date })),
                &self.middlewares,
                options,
            )
            .await
    }

    pub async fn create_task(
        &self,
        task: &Task,
        options: CallOptions,
    ) -> Result<Envelope<Task>, HttpError> {
        self.client
            .send(
                RequestConfig::post(TASKS_BASE_URI).with_json(task),
                &self.middlewares,
                options,
            )
            .await
    }

    pub async fn update_task(
        &self,
        id: &str,
        task: &Task,
        options: CallOptions,
    ) -> Result<Envelope<Task>, HttpError> {
        self.client
            .send(
                RequestConfig::patch(format!("{TASKS_BASE_URI}/{id}")).with_json(task),
                &self.middlewares,
                options,
            )
            .await
    }

    pub async fn remove_task(
        &self,
        id: &str,
        options: CallOptions,
    ) -> Result<Envelope<Task>, HttpError> {
        self.client
            .send(
                RequestConfig::delete(format!("{TASKS_BASE_URI}/{id}")),
                &self.middlewares,
                options,
            )
            .await
    }
}
