//! Projects store: cached project lists, the currently opened project, a
//! server-side filter, and the editing draft behind the project dialog.

use std::sync::Arc;

use chrono::{Duration, Local};
use futures::FutureExt;
use futures::future::BoxFuture;

use crate::errors::HttpError;
use crate::http::{CallOptions, Flow};
use crate::models::{Envelope, Project, ProjectsFilter};
use crate::services::ProjectsService;

use super::app::AppStore;
use super::cell::StateCell;
use super::draft::Draft;
use super::spinner::{with_spinner, with_spinner_all};

/// Deadline wire format, `26 Aug 2026` style.
pub const DEADLINE_FORMAT: &str = "%d %b %Y";

/// Template for a freshly opened "new project" dialog.
pub fn project_template() -> Project {
    Project {
        title: Some(String::new()),
        description: Some(String::new()),
        color: Some("#083D77".to_string()),
        deadline: Some((Local::now() + Duration::days(1)).format(DEADLINE_FORMAT).to_string()),
        ..Default::default()
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct ProjectsState {
    pub projects: Vec<Project>,
    pub favorite_projects: Vec<Project>,
    /// The singly opened project, when a project page is active.
    pub project: Option<Project>,
    pub filter: Option<ProjectsFilter>,
    pub edit_dialog_open: bool,
    pub draft: Draft<Project>,
}

pub struct ProjectsStore {
    state: Arc<StateCell<ProjectsState>>,
    app: Arc<AppStore>,
    service: ProjectsService,
}

impl ProjectsStore {
    pub const NAME: &'static str = "projectsStore";

    pub fn new(service: ProjectsService, app: Arc<AppStore>) -> Self {
        Self {
            state: Arc::new(StateCell::new(ProjectsState::default())),
            app,
            service,
        }
    }

    pub fn state(&self) -> ProjectsState {
        self.state.get()
    }

    pub fn subscribe(&self) -> tokio::sync::watch::Receiver<u64> {
        self.state.subscribe()
    }

    pub fn begin_edit(&self, project: Project) {
        self.state.update(|s| s.draft.begin_edit(project));
    }

    pub fn begin_create(&self) {
        self.state.update(|s| s.draft.begin_new(project_template()));
    }

    pub fn modify_draft(&self, f: impl FnOnce(&mut Project)) {
        self.state.update(|s| s.draft.modify(f));
    }

    pub fn modify_filter(&self, f: impl FnOnce(&mut ProjectsFilter)) {
        self.state
            .update(|s| f(s.filter.get_or_insert_with(ProjectsFilter::default)));
    }

    pub fn set_edit_dialog_open(&self, open: bool) {
        self.state.update(|s| s.edit_dialog_open = open);
    }

    pub fn draft_modified(&self) -> bool {
        self.state.read(|s| s.draft.is_dirty())
    }

    /// Dispatch the draft as a create or an update depending on whether the
    /// server has seen the entity before.
    pub async fn save_project(&self) {
        if self.state.read(|s| s.draft.is_new()) {
            self.create_project().await;
        } else {
            self.update_project(None).await;
        }
    }

    /// Response middleware closes the dialog; a successful save then
    /// re-fetches the list so the cache reflects server state.
    pub async fn create_project(&self) {
        let Some(project) = self.state.read(|s| s.draft.get()) else {
            return;
        };
        let state = Arc::clone(&self.state);
        let options = CallOptions::new()
            .on_response(move |_response| {
                state.update(|s| {
                    s.edit_dialog_open = false;
                    s.draft.clear();
                });
                Flow::Continue
            })
            .on_error(|err| {
                tracing::warn!(error = %err, "failed to create project");
                Flow::Continue
            });

        let result = with_spinner(&self.app, self.service.create_project(&project, options)).await;
        if result.is_ok() {
            self.fetch_projects(None).await;
        }
    }

    /// Update either the supplied project or the current draft.
    pub async fn update_project(&self, project: Option<Project>) {
        let editing = project.or_else(|| self.state.read(|s| s.draft.get()));
        let Some(editing) = editing else { return };
        let Some(id) = editing.id.clone() else {
            tracing::warn!("update_project called on a project without an id");
            return;
        };

        let state = Arc::clone(&self.state);
        let options = CallOptions::new()
            .on_response(move |_response| {
                state.update(|s| {
                    s.edit_dialog_open = false;
                    s.draft.clear();
                });
                Flow::Continue
            })
            .on_error(|err| {
                tracing::warn!(error = %err, "failed to update project");
                Flow::Continue
            });

        let result = with_spinner(
            &self.app,
            self.service.update_project_by_id(&id, &editing, options),
        )
        .await;
        if result.is_ok() {
            self.fetch_projects(None).await;
        }
    }

    pub async fn remove_project(&self, id: &str) {
        let options = CallOptions::new().on_error(|err| {
            tracing::warn!(error = %err, "failed to remove project");
            Flow::Continue
        });
        let result = with_spinner(&self.app, self.service.remove_project_by_id(id, options)).await;
        if result.is_ok() {
            self.fetch_projects(None).await;
        }
    }

    /// Fetch the project list; an explicit filter overrides the stored one
    /// for this call only.
    pub async fn fetch_projects(&self, filter: Option<ProjectsFilter>) {
        let applied = filter.or_else(|| self.state.read(|s| s.filter.clone()));
        let state = Arc::clone(&self.state);
        let options = CallOptions::new()
            .on_response(move |response| {
                if let Some(projects) = response.data::<Vec<Project>>() {
                    state.update(|s| s.projects = projects);
                }
                Flow::Continue
            })
            .on_error(|err| {
                tracing::warn!(error = %err, "failed to fetch projects");
                Flow::Continue
            });

        let _ = with_spinner(
            &self.app,
            self.service.get_user_projects(applied.as_ref(), options),
        )
        .await;
    }

    pub async fn fetch_favorite_projects(&self) {
        let filter = ProjectsFilter {
            favorite: Some(true),
            ..Default::default()
        };
        let state = Arc::clone(&self.state);
        let options = CallOptions::new()
            .on_response(move |response| {
                if let Some(projects) = response.data::<Vec<Project>>() {
                    state.update(|s| s.favorite_projects = projects);
                }
                Flow::Continue
            })
            .on_error(|err| {
                tracing::warn!(error = %err, "failed to fetch favorite projects");
                Flow::Continue
            });

        let _ = with_spinner(
            &self.app,
            self.service.get_user_projects_by_filter(&filter, options),
        )
        .await;
    }

    /// Main-screen load: the full list and the favorites list, fetched
    /// concurrently under a single loading-flag hold.
    pub async fn fetch_overview(&self) {
        let stored = self.state.read(|s| s.filter.clone());
        let favorites_filter = ProjectsFilter {
            favorite: Some(true),
            ..Default::default()
        };

        let list_state = Arc::clone(&self.state);
        let list_options = CallOptions::new()
            .on_response(move |response| {
                if let Some(projects) = response.data::<Vec<Project>>() {
                    list_state.update(|s| s.projects = projects);
                }
                Flow::Continue
            })
            .on_error(|err| {
                tracing::warn!(error = %err, "failed to fetch projects");
                Flow::Continue
            });

        let favorites_state = Arc::clone(&self.state);
        let favorites_options = CallOptions::new()
            .on_response(move |response| {
                if let Some(projects) = response.data::<Vec<Project>>() {
                    favorites_state.update(|s| s.favorite_projects = projects);
                }
                Flow::Continue
            })
            .on_error(|err| {
                tracing::warn!(error = %err, "failed to fetch favorite projects");
                Flow::Continue
            });

        let fetches: Vec<BoxFuture<'_, Result<Envelope<Vec<Project>>, HttpError>>> = vec![
            self.service
                .get_user_projects(stored.as_ref(), list_options)
                .boxed(),
            self.service
                .get_user_projects_by_filter(&favorites_filter, favorites_options)
                .boxed(),
        ];
        let _ = with_spinner_all(&self.app, fetches).await;
    }

    pub async fn open_project(&self, id: &str) {
        let state = Arc::clone(&self.state);
        let options = CallOptions::new()
            .on_response(move |response| {
                if let Some(project) = response.data::<Project>() {
                    state.update(|s| s.project = Some(project));
                }
                Flow::Continue
            })
            .on_error(|err| {
                tracing::warn!(error = %err, "failed to open project");
                Flow::Continue
            });

        let _ = with_spinner(&self.app, self.service.get_project_by_id(id, options)).await;
    }

    /// Clear navigation-scoped state when leaving a project page.
    pub fn reset_current(&self) {
        self.state.update(|s| {
            s.project = None;
            s.edit_dialog_open = false;
            s.draft.clear();
        });
    }

    pub fn reset(&self) {
        self.state.update(|s| *s = ProjectsState::default());
    }
}
