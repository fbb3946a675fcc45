//! `/api/teams` and `/api/team-user` — teams, membership, and user search.

use std::sync::Arc;

use serde_json::json;

use crate::errors::HttpError;
use crate::http::{CallOptions, HttpClient, MiddlewareSet, RequestConfig};
use crate::models::{AuthorizedUser, Envelope, Team, TeamUser, TeamUserRole};

const TEAM_BASE_URI: &str = "/api/teams";
const USER_BASE_URI: &str = "/api/user";
const TEAM_USER_BASE_URI: &str = "/api/team-user";

pub struct TeamsService {
    client: Arc<HttpClient>,
    middlewares: MiddlewareSet,
}

impl TeamsService {
    pub fn new(client: Arc<HttpClient>) -> Self {
        Self {
            client,
            middlewares: MiddlewareSet::new(),
        }
    }

    pub async fn create_team(
        &self,
        team: &Team,
        options: CallOptions,
    ) -> Result<Envelope<Team>, HttpError> {
        self.client
            .send(
                RequestConfig::post(TEAM_BASE_URI).with_json(team),
                &self.middlewares,
                options,
            )
            .await
    }

    pub async fn update_team(
        &self,
        id: &str,
        team: &Team,
        options: CallOptions,
    ) -> Result<Envelope<Team>, HttpError> {
        self.client
            .send(
                RequestConfig::patch(format!("{TEAM_BASE_URI}/{id}")).with_json(team),
                &self.middlewares,
                options,
            )
            .await
    }

    pub async fn add_user_to_team(
        &self,
        team_id: &str,
        user_id: &str,
        role: TeamUserRole,
        options: CallOptions,
    ) -> Result<Envelope<Team>, HttpError> {
        self.client
            .send(
                RequestConfig::post(format!("{TEAM_BASE_URI}/users/add/{team_id}"))
                    .with_json(&json!({ "userId": user_id, "role": role })),
                &self.middlewares,
                options,
            )
            .await
    }

    pub async fn remove_user_from_team(
        &self,
        team_id: &str,
        user_id: &str,
        options: CallOptions,
    ) -> Result<Envelope<Team>, HttpError> {
        self.client
            .send(
                RequestConfig::post(format!("{TEAM_BASE_URI}/users/remove/{team_id}"))
                    .with_json(&json!({ "userId": user_id })),
                &self.middlewares,
                options,
            )
            .await
    }

    pub async fn get_team(
        &self,
        team_id: &str,
        options: CallOptions,
    ) -> Result<Envelope<Team>, HttpError> {
        self.client
            .send(
                RequestConfig::get(format!("{TEAM_BASE_URI}/{team_id}")),
                &self.middlewares,
                options,
            )
            .await
    }

    pub async fn get_users_teams(
        &self,
        options: CallOptions,
    ) -> Result<Envelope<Vec<Team>>, HttpError> {
        self.client
            .send(
                RequestConfig::get(TEAM_BASE_URI),
                &self.middlewares,
                options,
            )
            .await
    }

    pub async fn delete_team(
        &self,
        team_id: &str,
        options: CallOptions,
    ) -> Result<Envelope<Team>, HttpError> {
        self.client
            .send(
                RequestConfig::delete(format!("{TEAM_BASE_URI}/{team_id}")),
                &self.middlewares,
                options,
            )
            .await
    }

    pub async fn search_users_by_email(
        &self,
        email: &str,
        options: CallOptions,
    ) -> Result<Envelope<Vec<AuthorizedUser>>, HttpError> {
        self.client
            .send(
                RequestConfig::post(format!("{USER_BASE_URI}/email"))
                    .with_json(&json!({ "email": email })),
                &self.middlewares,
                options,
            )
            .await
    }

    /// The caller's membership row for a team, carrying their role.
    pub async fn get_team_user(
        &self,
        team_id: &str,
        options: CallOptions,
    ) -> Result<Envelope<TeamUser>, HttpError> {
        self.client
            .send(
                RequestConfig::get(format!("{TEAM_USER_BASE_URI}/{team_id}")),
                &self.middlewares,
                options,
            )
            .await
    }
}
