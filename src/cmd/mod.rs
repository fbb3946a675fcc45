//! CLI command implementations.
//!
//! Each submodule owns one or more related `Commands` variants:
//!
//! | Module     | Commands handled              |
//! |------------|-------------------------------|
//! | `auth`     | `Login`, `Register`, `Logout`, `Whoami` |
//! | `project`  | `Project`                     |
//! | `task`     | `Task`                        |
//! | `team`     | `Team`                        |
//! | `report`   | `Report`                      |
//! | `activity` | `Activity`                    |
//! | `serve`    | `Serve`                       |

pub mod activity;
pub mod auth;
pub mod project;
pub mod report;
pub mod serve;
pub mod task;
pub mod team;

pub use activity::cmd_activity;
pub use auth::{cmd_login, cmd_logout, cmd_register, cmd_whoami};
pub use project::cmd_project;
pub use report::cmd_report;
pub use serve::cmd_serve;
pub use task::cmd_task;
pub use team::cmd_team;

use std::sync::Arc;

use anyhow::{Context, Result};

use taskboard::config::Config;
use taskboard::http::HttpClient;
use taskboard::models::AuthorizedUser;
use taskboard::stores::{create_stores, Stores};

use crate::Cli;

/// Everything a command needs: the wired store set plus the background
/// loading indicator tied to its lifetime.
pub struct AppContext {
    pub stores: Stores,
    _indicator: tokio::task::JoinHandle<()>,
}

/// Resolve configuration, build the shared client, and wire the stores.
pub fn bootstrap(cli: &Cli) -> Result<AppContext> {
    let config = Config::load(cli.server_url.clone())?;
    let client = Arc::new(HttpClient::new(&config.server_url));
    let stores =
        create_stores(client, config.session_file()).context("failed to initialize stores")?;
    let indicator = crate::ui::spawn_loading_indicator(Arc::clone(&stores.app));
    Ok(AppContext {
        stores,
        _indicator: indicator,
    })
}

/// Restore the session and insist on a signed-in user.
pub async fn require_login(stores: &Stores) -> Result<AuthorizedUser> {
    stores.auth.pull_user().await;
    stores
        .user
        .current_user()
        .context("Not logged in. Run 'taskboard login' first.")
}
