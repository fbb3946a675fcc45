//! Observable state layer.
//!
//! Each store owns one slice of application state inside a [`StateCell`]
//! and exposes actions that mutate it; subscribers watch a revision counter
//! instead of the data itself. Stores talk to the server through the
//! service layer and flip the shared loading flag via the spinner wrapper.
//!
//! | Store | Holds |
//! |-----------------|---------------------------------------------|
//! | `AppStore` | loading flag, app-loaded latch |
//! | `AuthStore` | auth form, error message, session lifecycle |
//! | `UserStore` | the signed-in user |
//! | `ProjectsStore` | project lists, filter, editing draft |
//! | `TasksStore` | project/today task lists, editing draft |
//! | `TeamsStore` | teams, membership, email autocomplete |
//! | `ReportsStore` | bug reports, page filter |
//! | `ActivityStore` | activity feed |
//!
//! Cross-store references go through the [`StoreRegistry`] so no store
//! needs another at construction time.

pub mod activity;
pub mod app;
pub mod auth;
pub mod cell;
pub mod draft;
pub mod projects;
pub mod registry;
pub mod reports;
pub mod spinner;
pub mod tasks;
pub mod teams;
pub mod user;

pub use activity::ActivityStore;
pub use app::AppStore;
pub use auth::{AuthKind, AuthStore};
pub use cell::StateCell;
pub use draft::Draft;
pub use projects::ProjectsStore;
pub use registry::StoreRegistry;
pub use reports::ReportsStore;
pub use spinner::{with_spinner, with_spinner_all};
pub use tasks::TasksStore;
pub use teams::TeamsStore;
pub use user::UserStore;

use std::sync::Arc;

use crate::errors::RegistryError;
use crate::http::{Flow, HttpClient, MiddlewareSet};
use crate::services::{
    ActivityService, AuthService, ProjectsService, ReportsService, TasksService, TeamsService,
};
use crate::session::SessionFile;

/// The full store set for one running app instance.
pub struct Stores {
    pub registry: Arc<StoreRegistry>,
    pub app: Arc<AppStore>,
    pub auth: Arc<AuthStore>,
    pub user: Arc<UserStore>,
    pub projects: Arc<ProjectsStore>,
    pub tasks: Arc<TasksStore>,
    pub teams: Arc<TeamsStore>,
    pub reports: Arc<ReportsStore>,
    pub activity: Arc<ActivityStore>,
}

/// Build every store against a shared client and register each under its
/// identifier. Runs once at bootstrap.
pub fn create_stores(
    client: Arc<HttpClient>,
    session: SessionFile,
) -> Result<Stores, RegistryError> {
    let registry = Arc::new(StoreRegistry::new());
    let app = Arc::new(AppStore::new());

    // Every auth endpoint failure is worth a trace line; the store only
    // keeps the user-facing message.
    let auth_middlewares = MiddlewareSet::new().on_error(|err| {
        tracing::debug!(error = %err, "auth endpoint call failed");
        Flow::Continue
    });
    let auth = Arc::new(AuthStore::new(
        AuthService::with_middlewares(Arc::clone(&client), auth_middlewares),
        Arc::clone(&client),
        session,
        Arc::clone(&app),
        Arc::clone(&registry),
    ));
    let user = Arc::new(UserStore::new());
    let projects = Arc::new(ProjectsStore::new(
        ProjectsService::new(Arc::clone(&client)),
        Arc::clone(&app),
    ));
    let tasks = Arc::new(TasksStore::new(
        TasksService::new(Arc::clone(&client)),
        Arc::clone(&app),
    ));
    let teams = Arc::new(TeamsStore::new(
        TeamsService::new(Arc::clone(&client)),
        Arc::clone(&app),
    ));
    let reports = Arc::new(ReportsStore::new(
        ReportsService::new(Arc::clone(&client)),
        Arc::clone(&app),
    ));
    let activity = Arc::new(ActivityStore::new(
        ActivityService::new(Arc::clone(&client)),
        Arc::clone(&app),
    ));

    registry.register(AppStore::NAME, Arc::clone(&app))?;
    registry.register(AuthStore::NAME, Arc::clone(&auth))?;
    registry.register(UserStore::NAME, Arc::clone(&user))?;
    registry.register(ProjectsStore::NAME, Arc::clone(&projects))?;
    registry.register(TasksStore::NAME, Arc::clone(&tasks))?;
    registry.register(TeamsStore::NAME, Arc::clone(&teams))?;
    registry.register(ReportsStore::NAME, Arc::clone(&reports))?;
    registry.register(ActivityStore::NAME, Arc::clone(&activity))?;

    Ok(Stores {
        registry,
        app,
        auth,
        user,
        projects,
        tasks,
        teams,
        reports,
        activity,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn bootstrap() -> Stores {
        let dir = std::env::temp_dir().join("taskboard-stores-test");
        create_stores(
            Arc::new(HttpClient::new("http://localhost:0")),
            SessionFile::new(dir.join("session.json")),
        )
        .unwrap()
    }

    #[test]
    fn every_store_is_registered_under_its_name() {
        let stores = bootstrap();
        assert_eq!(
            stores.registry.registered_ids(),
            vec![
                ActivityStore::NAME,
                AppStore::NAME,
                AuthStore::NAME,
                ReportsStore::NAME,
                ProjectsStore::NAME,
                TasksStore::NAME,
                TeamsStore::NAME,
                UserStore::NAME,
            ]
        );
    }

    #[test]
    fn registry_lookup_returns_the_bundled_instance() {
        let stores = bootstrap();
        let looked_up = stores
            .registry
            .lookup::<ProjectsStore>(ProjectsStore::NAME)
            .unwrap();
        assert!(Arc::ptr_eq(&stores.projects, &looked_up));
    }
}
