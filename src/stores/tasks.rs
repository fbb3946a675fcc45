//! Tasks store: the opened project's tasks, today's tasks, and the editing
//! draft. Updates are applied optimistically to the cached lists before the
//! request settles.

use std::sync::Arc;

use chrono::{Duration, Local};

use crate::http::{CallOptions, Flow};
use crate::models::{Task, TaskStatus};
use crate::services::TasksService;

use super::app::AppStore;
use super::cell::StateCell;
use super::draft::Draft;
use super::projects::DEADLINE_FORMAT;
use super::spinner::with_spinner;

/// Template for a freshly created task, optionally pinned to a project.
pub fn task_template(project_id: Option<&str>) -> Task {
    Task {
        title: Some(String::new()),
        description: Some(String::new()),
        deadline: Some((Local::now() + Duration::days(1)).format(DEADLINE_FORMAT).to_string()),
        status: Some(TaskStatus::New),
        completed: Some(false),
        project_id: Some(project_id.unwrap_or_default().to_string()),
        ..Default::default()
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct TasksState {
    pub project_tasks: Vec<Task>,
    pub today_tasks: Vec<Task>,
    pub draft: Draft<Task>,
    /// Project whose tasks are currently cached; create/remove re-fetch it.
    pub project_id: Option<String>,
}

pub struct TasksStore {
    state: Arc<StateCell<TasksState>>,
    app: Arc<AppStore>,
    service: TasksService,
}

impl TasksStore {
    pub const NAME: &'static str = "tasksStore";

    pub fn new(service: TasksService, app: Arc<AppStore>) -> Self {
        Self {
            state: Arc::new(StateCell::new(TasksState::default())),
            app,
            service,
        }
    }

    pub fn state(&self) -> TasksState {
        self.state.get()
    }

    pub fn subscribe(&self) -> tokio::sync::watch::Receiver<u64> {
        self.state.subscribe()
    }

    pub fn begin_edit(&self, task: Task) {
        self.state.update(|s| s.draft.begin_edit(task));
    }

    pub fn begin_create(&self, project_id: Option<&str>) {
        self.state
            .update(|s| s.draft.begin_new(task_template(project_id)));
    }

    pub fn modify_draft(&self, f: impl FnOnce(&mut Task)) {
        self.state.update(|s| s.draft.modify(f));
    }

    pub fn draft_modified(&self) -> bool {
        self.state.read(|s| s.draft.is_dirty())
    }

    pub async fn fetch_project_tasks(&self, project_id: &str) {
        self.state
            .update(|s| s.project_id = Some(project_id.to_string()));

        let state = Arc::clone(&self.state);
        let options = CallOptions::new()
            .on_response(move |response| {
                if let Some(tasks) = response.data::<Vec<Task>>() {
                    state.update(|s| s.project_tasks = tasks);
                }
                Flow::Continue
            })
            .on_error(|err| {
                tracing::warn!(error = %err, "failed to fetch project tasks");
                Flow::Continue
            });

        let _ = with_spinner(
            &self.app,
            self.service.get_project_tasks(project_id, options),
        )
        .await;
    }

    pub async fn fetch_today_tasks(&self) {
        let today = Local::now().format(DEADLINE_FORMAT).to_string();
        let state = Arc::clone(&self.state);
        let options = CallOptions::new()
            .on_response(move |response| {
                if let Some(tasks) = response.data::<Vec<Task>>() {
                    state.update(|s| s.today_tasks = tasks);
                }
                Flow::Continue
            })
            .on_error(|err| {
                tracing::warn!(error = %err, "failed to fetch today's tasks");
                Flow::Continue
            });

        let _ = with_spinner(&self.app, self.service.get_tasks_by_date(&today, options)).await;
    }

    pub async fn save_task(&self) {
        if self.state.read(|s| s.draft.is_new()) {
            self.create_task().await;
        } else {
            self.update_task(None).await;
        }
    }

    pub async fn create_task(&self) {
        let Some(task) = self.state.read(|s| s.draft.get()) else {
            return;
        };
        let options = CallOptions::new().on_error(|err| {
            tracing::warn!(error = %err, "failed to create task");
            Flow::Continue
        });
        let result = with_spinner(&self.app, self.service.create_task(&task, options)).await;
        if result.is_ok() {
            self.state.update(|s| s.draft.clear());
            let project_id = self.state.read(|s| s.project_id.clone());
            if let Some(project_id) = project_id {
                self.fetch_project_tasks(&project_id).await;
            }
        }
    }

    /// Update either the supplied task or the current draft. The cached
    /// lists are patched immediately for responsiveness; the server is the
    /// source of truth on the next fetch.
    pub async fn update_task(&self, task: Option<Task>) {
        let edited = task.or_else(|| self.state.read(|s| s.draft.get()));
        let Some(edited) = edited else { return };
        let Some(id) = edited.id.clone() else {
            tracing::warn!("update_task called on a task without an id");
            return;
        };

        self.state.update(|s| {
            if let Some(slot) = s.project_tasks.iter_mut().find(|t| t.id == edited.id) {
                *slot = edited.clone();
            }
            if let Some(slot) = s.today_tasks.iter_mut().find(|t| t.id == edited.id) {
                *slot = edited.clone();
            }
        });

        let state = Arc::clone(&self.state);
        let options = CallOptions::new()
            .on_response(move |_response| {
                state.update(|s| s.draft.clear());
                Flow::Continue
            })
            .on_error(|err| {
                tracing::warn!(error = %err, "failed to update task");
                Flow::Continue
            });

        let _ = with_spinner(&self.app, self.service.update_task(&id, &edited, options)).await;
    }

    pub async fn remove_task(&self, id: &str) {
        let options = CallOptions::new().on_error(|err| {
            tracing::warn!(error = %err, "failed to remove task");
            Flow::Continue
        });
        let result = with_spinner(&self.app, self.service.remove_task(id, options)).await;
        if result.is_ok() {
            let project_id = self.state.read(|s| s.project_id.clone());
            if let Some(project_id) = project_id {
                self.fetch_project_tasks(&project_id).await;
            }
        }
    }

    pub fn reset(&self) {
        self.state.update(|s| *s = TasksState::default());
    }
}
