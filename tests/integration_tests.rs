//! Integration tests for the taskboard client.
//!
//! The store-level tests run against a small in-process API fixture that
//! speaks the backend's envelope protocol and counts the requests it sees.

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

use assert_cmd::Command;
use assert_cmd::cargo::cargo_bin_cmd;
use axum::extract::State;
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::routing::{get, post};
use axum::{Json, Router};
use serde_json::{Value, json};
use tempfile::TempDir;

use taskboard::http::HttpClient;
use taskboard::session::SessionFile;
use taskboard::stores::{AuthKind, Stores, create_stores};

fn taskboard_cmd() -> Command {
    cargo_bin_cmd!("taskboard")
}

// =============================================================================
// Basic CLI tests
// =============================================================================

mod cli_basics {
    use super::*;

    #[test]
    fn test_help() {
        taskboard_cmd().arg("--help").assert().success();
    }

    #[test]
    fn test_version() {
        taskboard_cmd().arg("--version").assert().success();
    }

    #[test]
    fn test_subcommand_help() {
        taskboard_cmd()
            .args(["project", "--help"])
            .assert()
            .success();
    }
}

// =============================================================================
// API fixture
// =============================================================================

#[derive(Default)]
struct Hits {
    login: AtomicUsize,
    project_list: AtomicUsize,
    project_filter: AtomicUsize,
    project_create: AtomicUsize,
    user_search: AtomicUsize,
    last_search: Mutex<Option<String>>,
}

struct Fixture {
    base_url: String,
    hits: Arc<Hits>,
    _session_dir: TempDir,
    session_file: SessionFile,
}

async fn login_handler(State(hits): State<Arc<Hits>>, Json(body): Json<Value>) -> impl IntoResponse {
    hits.login.fetch_add(1, Ordering::SeqCst);
    if body["password"] == "secret" {
        Json(json!({
            "success": true,
            "data": { "token": "fixture-token", "tokenExpiration": 2 }
        }))
        .into_response()
    } else {
        (
            StatusCode::UNAUTHORIZED,
            Json(json!({ "success": false, "error": "Invalid credentials" })),
        )
            .into_response()
    }
}

async fn self_handler() -> Json<Value> {
    Json(json!({
        "success": true,
        "data": { "id": "u1", "name": "Ada", "email": "ada@example.com", "avatar": "" }
    }))
}

async fn project_list_handler(State(hits): State<Arc<Hits>>) -> Json<Value> {
    hits.project_list.fetch_add(1, Ordering::SeqCst);
    Json(json!({
        "success": true,
        "data": [{ "_id": "p1", "title": "Engine", "favorite": false }]
    }))
}

async fn project_filter_handler(
    State(hits): State<Arc<Hits>>,
    Json(_body): Json<Value>,
) -> Json<Value> {
    hits.project_filter.fetch_add(1, Ordering::SeqCst);
    Json(json!({
        "success": true,
        "data": [{ "_id": "p2", "title": "Docs", "favorite": true }]
    }))
}

async fn project_create_handler(
    State(hits): State<Arc<Hits>>,
    Json(body): Json<Value>,
) -> Json<Value> {
    hits.project_create.fetch_add(1, Ordering::SeqCst);
    let mut project = body;
    project["_id"] = json!("p-new");
    Json(json!({ "success": true, "data": project }))
}

async fn user_search_handler(
    State(hits): State<Arc<Hits>>,
    Json(body): Json<Value>,
) -> Json<Value> {
    hits.user_search.fetch_add(1, Ordering::SeqCst);
    let email = body["email"].as_str().unwrap_or_default().to_string();
    *hits.last_search.lock().unwrap() = Some(email.clone());
    Json(json!({
        "success": true,
        "data": [{ "id": "u2", "name": "Bob", "email": email, "avatar": "" }]
    }))
}

async fn empty_list_handler() -> Json<Value> {
    Json(json!({ "success": true, "data": [] }))
}

/// Bind the fixture API on an ephemeral port and serve it in the background.
async fn spawn_fixture() -> Fixture {
    let hits = Arc::new(Hits::default());
    let app = Router::new()
        .route("/api/user/login", post(login_handler))
        .route("/api/user/self", get(self_handler))
        .route("/api/user/email", post(user_search_handler))
        .route(
            "/api/project",
            get(project_list_handler).post(project_create_handler),
        )
        .route("/api/project/filter", post(project_filter_handler))
        .route("/api/task/project/{id}", get(empty_list_handler))
        .route("/api/teams", get(empty_list_handler))
        .with_state(Arc::clone(&hits));

    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });

    let session_dir = TempDir::new().unwrap();
    let session_file = SessionFile::new(session_dir.path().join("session.json"));
    Fixture {
        base_url: format!("http://{addr}"),
        hits,
        _session_dir: session_dir,
        session_file,
    }
}

fn stores_for(fixture: &Fixture) -> Stores {
    create_stores(
        Arc::new(HttpClient::new(&fixture.base_url)),
        fixture.session_file.clone(),
    )
    .unwrap()
}

fn fill_login_form(stores: &Stores, email: &str, password: &str) {
    stores.auth.set_auth_kind(AuthKind::Login);
    let email = email.to_string();
    let password = password.to_string();
    stores.auth.modify_form(move |f| {
        f.email = Some(email);
        f.password = Some(password);
    });
}

// =============================================================================
// Auth flows
// =============================================================================

#[tokio::test]
async fn login_sets_user_and_persists_session() {
    let fixture = spawn_fixture().await;
    let stores = stores_for(&fixture);

    fill_login_form(&stores, "ada@example.com", "secret");
    stores.auth.login().await;

    assert!(stores.auth.error_message().is_empty());
    assert!(stores.user.logged_in());
    assert_eq!(stores.user.current_user().unwrap().name, "Ada");
    let session = fixture.session_file.load().unwrap().unwrap();
    assert_eq!(session.token, "fixture-token");
    assert!(stores.app.app_loaded());
}

#[tokio::test]
async fn rejected_login_surfaces_the_server_error() {
    let fixture = spawn_fixture().await;
    let stores = stores_for(&fixture);

    fill_login_form(&stores, "ada@example.com", "wrong");
    stores.auth.login().await;

    assert_eq!(stores.auth.error_message(), "Invalid credentials");
    assert!(!stores.user.logged_in());
    assert!(fixture.session_file.load().unwrap().is_none());
}

#[tokio::test]
async fn malformed_email_never_reaches_the_server() {
    let fixture = spawn_fixture().await;
    let stores = stores_for(&fixture);

    fill_login_form(&stores, "not-an-email", "secret");
    stores.auth.login().await;

    assert_eq!(fixture.hits.login.load(Ordering::SeqCst), 0);
    assert!(!stores.auth.error_message().is_empty());
}

#[tokio::test]
async fn logout_resets_dependent_stores_through_the_registry() {
    let fixture = spawn_fixture().await;
    let stores = stores_for(&fixture);

    fill_login_form(&stores, "ada@example.com", "secret");
    stores.auth.login().await;
    stores.projects.fetch_projects(None).await;
    stores.tasks.fetch_project_tasks("p1").await;
    assert!(stores.user.logged_in());
    assert!(!stores.projects.state().projects.is_empty());

    stores.auth.logout();

    assert!(!stores.user.logged_in());
    assert!(stores.projects.state().projects.is_empty());
    assert!(stores.tasks.state().project_id.is_none());
    assert!(fixture.session_file.load().unwrap().is_none());
}

// =============================================================================
// Project flows
// =============================================================================

#[tokio::test]
async fn create_project_closes_the_dialog_and_refetches() {
    let fixture = spawn_fixture().await;
    let stores = stores_for(&fixture);

    stores.projects.set_edit_dialog_open(true);
    stores.projects.begin_create();
    stores
        .projects
        .modify_draft(|p| p.title = Some("Engine".to_string()));
    assert!(stores.projects.draft_modified());

    stores.projects.save_project().await;

    assert_eq!(fixture.hits.project_create.load(Ordering::SeqCst), 1);
    assert_eq!(fixture.hits.project_list.load(Ordering::SeqCst), 1);
    let state = stores.projects.state();
    assert!(!state.edit_dialog_open);
    assert!(!state.draft.is_open());
    assert_eq!(state.projects.len(), 1);
    assert_eq!(state.projects[0].id.as_deref(), Some("p1"));
}

#[tokio::test]
async fn overview_fetch_fills_projects_and_favorites_together() {
    let fixture = spawn_fixture().await;
    let stores = stores_for(&fixture);

    stores.projects.fetch_overview().await;

    assert_eq!(fixture.hits.project_list.load(Ordering::SeqCst), 1);
    assert_eq!(fixture.hits.project_filter.load(Ordering::SeqCst), 1);
    let state = stores.projects.state();
    assert_eq!(state.projects.len(), 1);
    assert_eq!(state.favorite_projects.len(), 1);
    assert_eq!(state.favorite_projects[0].id.as_deref(), Some("p2"));
    assert!(!stores.app.loading());
}

#[tokio::test]
async fn loading_flag_clears_after_overlapping_fetches() {
    let fixture = spawn_fixture().await;
    let stores = stores_for(&fixture);

    let first = stores.projects.fetch_projects(None);
    let second = stores.teams.fetch_teams();
    tokio::join!(first, second);

    assert!(!stores.app.loading());
}

// =============================================================================
// Debounced user search
// =============================================================================

#[tokio::test]
async fn rapid_autocomplete_keystrokes_collapse_into_one_search() {
    let fixture = spawn_fixture().await;
    let stores = stores_for(&fixture);

    stores.teams.set_autocomplete_value("a");
    stores.teams.set_autocomplete_value("ad");
    stores.teams.set_autocomplete_value("ada");
    tokio::time::sleep(std::time::Duration::from_millis(600)).await;

    assert_eq!(fixture.hits.user_search.load(Ordering::SeqCst), 1);
    assert_eq!(
        fixture.hits.last_search.lock().unwrap().as_deref(),
        Some("ada")
    );
    let users = stores.teams.state().autocomplete_users;
    assert_eq!(users.len(), 1);
    assert_eq!(users[0].email, "ada");
}

#[tokio::test]
async fn clearing_the_autocomplete_cancels_the_pending_search() {
    let fixture = spawn_fixture().await;
    let stores = stores_for(&fixture);

    stores.teams.set_autocomplete_value("ada");
    stores.teams.set_autocomplete_value("");
    tokio::time::sleep(std::time::Duration::from_millis(600)).await;

    assert_eq!(fixture.hits.user_search.load(Ordering::SeqCst), 0);
    assert!(stores.teams.state().autocomplete_users.is_empty());
}
