//! `/api/project` — project CRUD and filtered queries.

use std::sync::Arc;

use serde_json::json;

use crate::errors::HttpError;
use crate::http::{CallOptions, HttpClient, MiddlewareSet, RequestConfig};
use crate::models::{Envelope, Project, ProjectsFilter};

const PROJECTS_BASE_URI: &str = "/api/project";

pub struct ProjectsService {
    client: Arc<HttpClient>,
    middlewares: MiddlewareSet,
}

impl ProjectsService {
    pub fn new(client: Arc<HttpClient>) -> Self {
        Self {
            client,
            middlewares: MiddlewareSet::new(),
        }
    }

    pub async fn get_user_projects(
        &self,
        filter: Option<&ProjectsFilter>,
        options: CallOptions,
    ) -> Result<Envelope<Vec<Project>>, HttpError> {
        let mut config = RequestConfig::get(PROJECTS_BASE_URI);
        if let Some(filter) = filter {
            config = config.with_params(filter.to_query());
        }
        self.client.send(config, &self.middlewares, options).await
    }

    pub async fn get_user_projects_by_filter(
        &self,
        filter: &ProjectsFilter,
        options: CallOptions,
    ) -> Result<Envelope<Vec<Project>>, HttpError> {
        self.client
            .send(
                RequestConfig::post(format!("{PROJECTS_BASE_URI}/filter"))
                    .with_json(&json!({ "filter": filter })),
                &self.middlewares,
                options,
            )
            .await
    }

    pub async fn create_project(
        &self,
        project: &Project,
        options: CallOptions,
    ) -> Result<Envelope<Project>, HttpError> {
        self.client
            .send(
                RequestConfig::post(PROJECTS_BASE_URI).with_json(project),
                &self.middlewares,
                options,
            )
            .await
    }

    pub async fn get_project_by_id(
        &self,
        id: &str,
        options: CallOptions,
    ) -> Result<Envelope<Project>, HttpError> {
        self.client
            .send(
                RequestConfig::get(format!("{PROJECTS_BASE_URI}/{id}")),
                &self.middlewares,
                options,
            )
            .await
    }

    pub async fn remove_project_by_id(
        &self,
        id: &str,
        options: CallOptions,
    ) -> Result<Envelope<Project>, HttpError> {
        self.client
            .send(
                RequestConfig::delete(format!("{PROJECTS_BASE_URI}/{id}")),
                &self.middlewares,
                options,
            )
            .await
    }

    pub async fn update_project_by_id(
        &self,
        id: &str,
        project: &Project,
        options: CallOptions,
    ) -> Result<Envelope<Project>, HttpError> {
        self.client
            .send(
                RequestConfig::patch(format!("{PROJECTS_BASE_URI}/{id}")).with_json(project),
                &self.middlewares,
                options,
            )
            .await
    }
}
