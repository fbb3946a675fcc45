//! Teams store: the user's teams, the opened team, membership editing, and
//! a debounced email autocomplete for inviting users.

use std::sync::Arc;
use std::time::Duration;

use crate::http::{CallOptions, Flow};
use crate::models::{AuthorizedUser, Team, TeamUser, TeamUserRole};
use crate::services::TeamsService;
use crate::util::Debouncer;

use super::app::AppStore;
use super::cell::StateCell;
use super::draft::Draft;
use super::spinner::with_spinner;

/// Quiet window for autocomplete keystrokes.
pub const SEARCH_DEBOUNCE: Duration = Duration::from_millis(300);

pub fn team_template() -> Team {
    Team {
        title: Some(String::new()),
        users: Vec::new(),
        projects: Vec::new(),
        ..Default::default()
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct TeamsState {
    pub teams: Vec<Team>,
    pub team: Option<Team>,
    pub draft: Draft<Team>,
    pub autocomplete_value: String,
    pub autocomplete_users: Vec<AuthorizedUser>,
    pub autocomplete_selected: Option<AuthorizedUser>,
    pub current_user_role: TeamUserRole,
}

pub struct TeamsStore {
    state: Arc<StateCell<TeamsState>>,
    app: Arc<AppStore>,
    service: Arc<TeamsService>,
    search_debouncer: Debouncer,
}

impl TeamsStore {
    pub const NAME: &'static str = "teamStore";

    pub fn new(service: TeamsService, app: Arc<AppStore>) -> Self {
        Self {
            state: Arc::new(StateCell::new(TeamsState::default())),
            app,
            service: Arc::new(service),
            search_debouncer: Debouncer::new(SEARCH_DEBOUNCE),
        }
    }

    pub fn state(&self) -> TeamsState {
        self.state.get()
    }

    pub fn subscribe(&self) -> tokio::sync::watch::Receiver<u64> {
        self.state.subscribe()
    }

    pub fn begin_edit(&self, team: Team) {
        self.state.update(|s| s.draft.begin_edit(team));
    }

    pub fn begin_create(&self) {
        self.state.update(|s| s.draft.begin_new(team_template()));
    }

    pub fn modify_draft(&self, f: impl FnOnce(&mut Team)) {
        self.state.update(|s| s.draft.modify(f));
    }

    pub fn draft_modified(&self) -> bool {
        self.state.read(|s| s.draft.is_dirty())
    }

    pub fn is_new_team(&self) -> bool {
        self.state.read(|s| s.draft.is_new())
    }

    pub fn set_autocomplete_selected(&self, user: Option<AuthorizedUser>) {
        self.state.update(|s| s.autocomplete_selected = user);
    }

    /// Record an autocomplete keystroke. A non-empty value schedules a user
    /// search after the quiet window — rapid keystrokes collapse into one
    /// request for the last value. An empty value clears the matches and
    /// cancels any pending search.
    pub fn set_autocomplete_value(self: &Arc<Self>, value: &str) {
        self.state
            .update(|s| s.autocomplete_value = value.to_string());

        if value.trim().is_empty() {
            self.search_debouncer.cancel();
            self.state.update(|s| s.autocomplete_users.clear());
            return;
        }

        let store = Arc::clone(self);
        let value = value.to_string();
        self.search_debouncer
            .call(async move { store.search_users_by_email(&value).await });
    }

    /// Direct search, bypassing the debounce window. Not spinner-wrapped:
    /// autocomplete must not flash the global loading indicator.
    pub async fn search_users_by_email(&self, email: &str) {
        let state = Arc::clone(&self.state);
        let options = CallOptions::new()
            .on_response(move |response| {
                if let Some(users) = response.data::<Vec<AuthorizedUser>>() {
                    state.update(|s| s.autocomplete_users = users);
                }
                Flow::Continue
            })
            .on_error(|err| {
                tracing::warn!(error = %err, "user search failed");
                Flow::Continue
            });

        let _ = self.service.search_users_by_email(email, options).await;
    }

    pub async fn fetch_teams(&self) {
        let state = Arc::clone(&self.state);
        let options = CallOptions::new()
            .on_response(move |response| {
                if let Some(teams) = response.data::<Vec<Team>>() {
                    state.update(|s| s.teams = teams);
                }
                Flow::Continue
            })
            .on_error(|err| {
                tracing::warn!(error = %err, "failed to fetch teams");
                Flow::Continue
            });

        let _ = with_spinner(&self.app, self.service.get_users_teams(options)).await;
    }

    /// Open a team, then fetch the caller's membership row for it so the UI
    /// knows which actions their role allows.
    pub async fn fetch_team(&self, id: &str) {
        let state = Arc::clone(&self.state);
        let options = CallOptions::new()
            .on_response(move |response| {
                if let Some(team) = response.data::<Team>() {
                    state.update(|s| s.team = Some(team));
                }
                Flow::Continue
            })
            .on_error(|err| {
                tracing::warn!(error = %err, "failed to fetch team");
                Flow::Continue
            });

        let result = with_spinner(&self.app, self.service.get_team(id, options)).await;
        if result.is_ok() {
            self.fetch_team_user(id).await;
        }
    }

    async fn fetch_team_user(&self, team_id: &str) {
        let result = with_spinner(
            &self.app,
            self.service.get_team_user(team_id, CallOptions::new()),
        )
        .await;
        if let Ok(envelope) = result {
            let role = envelope
                .data
                .as_ref()
                .and_then(|tu: &TeamUser| tu.role)
                .unwrap_or_default();
            self.state.update(|s| s.current_user_role = role);
        }
    }

    pub async fn save_team(&self) {
        if self.is_new_team() {
            self.create_team().await;
        } else {
            self.update_team().await;
        }
    }

    pub async fn create_team(&self) {
        let Some(team) = self.state.read(|s| s.draft.get()) else {
            return;
        };
        let options = CallOptions::new().on_error(|err| {
            tracing::warn!(error = %err, "failed to create team");
            Flow::Continue
        });
        let result = with_spinner(&self.app, self.service.create_team(&team, options)).await;
        if result.is_ok() {
            self.reset_editing();
            self.fetch_teams().await;
        }
    }

    pub async fn update_team(&self) {
        let Some(team) = self.state.read(|s| s.draft.get()) else {
            return;
        };
        let Some(id) = team.id.clone() else {
            tracing::warn!("update_team called on a team without an id");
            return;
        };
        let options = CallOptions::new().on_error(|err| {
            tracing::warn!(error = %err, "failed to update team");
            Flow::Continue
        });
        let result = with_spinner(&self.app, self.service.update_team(&id, &team, options)).await;
        if result.is_ok() {
            self.reset_editing();
            self.fetch_teams().await;
        }
    }

    pub async fn remove_team(&self, id: &str) {
        let options = CallOptions::new().on_error(|err| {
            tracing::warn!(error = %err, "failed to remove team");
            Flow::Continue
        });
        let result = with_spinner(&self.app, self.service.delete_team(id, options)).await;
        if result.is_ok() {
            self.fetch_teams().await;
        }
    }

    /// Add a user to the team under edit. The server answers with the
    /// updated membership; it lands in both the working copy and the
    /// original so an accepted membership change never reads as a pending
    /// edit.
    pub async fn add_user(&self, user_id: &str, role: TeamUserRole) {
        let Some(team_id) = self.state.read(|s| s.draft.working().and_then(|t| t.id.clone()))
        else {
            return;
        };

        let state = Arc::clone(&self.state);
        let options = CallOptions::new()
            .on_response(move |response| {
                if let Some(team) = response.data::<Team>() {
                    state.update(|s| {
                        s.draft.modify_both(|t| t.users = team.users.clone());
                    });
                }
                Flow::Continue
            })
            .on_error(|err| {
                tracing::warn!(error = %err, "failed to add user to team");
                Flow::Continue
            });

        let _ = with_spinner(
            &self.app,
            self.service.add_user_to_team(&team_id, user_id, role, options),
        )
        .await;
    }

    pub async fn remove_user(&self, user_id: &str) {
        let Some(team_id) = self.state.read(|s| s.draft.working().and_then(|t| t.id.clone()))
        else {
            return;
        };

        let state = Arc::clone(&self.state);
        let options = CallOptions::new()
            .on_response(move |response| {
                if let Some(team) = response.data::<Team>() {
                    state.update(|s| {
                        s.draft.modify_both(|t| t.users = team.users.clone());
                    });
                }
                Flow::Continue
            })
            .on_error(|err| {
                tracing::warn!(error = %err, "failed to remove user from team");
                Flow::Continue
            });

        let _ = with_spinner(
            &self.app,
            self.service.remove_user_from_team(&team_id, user_id, options),
        )
        .await;
    }

    pub fn reset_editing(&self) {
        self.state.update(|s| {
            s.draft.clear();
            s.autocomplete_users.clear();
            s.autocomplete_selected = None;
        });
    }

    /// Clear navigation-scoped state when leaving a team page.
    pub fn reset_current(&self) {
        self.state.update(|s| {
            s.team = None;
            s.current_user_role = TeamUserRole::default();
        });
    }

    pub fn reset(&self) {
        self.search_debouncer.cancel();
        self.state.update(|s| *s = TeamsState::default());
    }
}
