//! Domain entities shared by the services and stores.
//!
//! Every entity is a plain record: `Clone + PartialEq` so drafts can be
//! compared structurally, serde-enabled for the wire. Identifiers are
//! server-assigned (`_id`); stores replace entities whole rather than
//! mutating fields in place.

use serde::{Deserialize, Serialize};

/// Response envelope shared by every endpoint:
/// `{ success: boolean, error?: string, data: Entity | Entity[] }`.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct Envelope<T> {
    pub success: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
    #[serde(default = "Option::default")]
    pub data: Option<T>,
}

/// Payload of a successful login or registration.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct AuthData {
    pub token: String,
    /// Expiry window in weeks; the session file multiplies this out.
    #[serde(rename = "tokenExpiration")]
    pub token_expiration: i64,
}

/// The signed-in user as returned by `GET /api/user/self`.
#[derive(Debug, Clone, Default, PartialEq, Deserialize, Serialize)]
pub struct AuthorizedUser {
    #[serde(default)]
    pub id: String,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub avatar: String,
}

/// Login/registration form contents. All fields optional; validation
/// happens in the auth store before dispatch.
#[derive(Debug, Clone, Default, PartialEq, Deserialize, Serialize)]
pub struct UserFormData {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub avatar: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub password: Option<String>,
    #[serde(rename = "passwordConfirmation", skip_serializing_if = "Option::is_none")]
    pub password_confirmation: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize, Serialize)]
pub struct Project {
    #[serde(rename = "_id", skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub user_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub color: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub deadline: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub category: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub favorite: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub emoji: Option<String>,
}

/// Server-side project filter; sent as query params on list requests and
/// as the body of `POST /api/project/filter`.
#[derive(Debug, Clone, Default, PartialEq, Deserialize, Serialize)]
pub struct ProjectsFilter {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub color: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub category: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub deadline: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub favorite: Option<bool>,
}

impl ProjectsFilter {
    /// Flatten into query-string pairs for GET requests.
    pub fn to_query(&self) -> Vec<(String, String)> {
        let mut pairs = Vec::new();
        if let Some(title) = &self.title {
            pairs.push(("title".to_string(), title.clone()));
        }
        if let Some(color) = &self.color {
            pairs.push(("color".to_string(), color.clone()));
        }
        if let Some(category) = &self.category {
            pairs.push(("category".to_string(), category.clone()));
        }
        if let Some(deadline) = &self.deadline {
            pairs.push(("deadline".to_string(), deadline.clone()));
        }
        if let Some(favorite) = self.favorite {
            pairs.push(("favorite".to_string(), favorite.to_string()));
        }
        pairs
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum TaskStatus {
    #[default]
    New,
    InProgress,
    Closed,
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize, Serialize)]
pub struct Task {
    #[serde(rename = "_id", skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub user_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub deadline: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<TaskStatus>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub completed: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub completion_date: Option<chrono::DateTime<chrono::Utc>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub project_id: Option<String>,
}

/// Team membership role; wire values are the numeric strings the backend
/// stores ("1" = owner through "4" = read-only).
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize, Serialize)]
pub enum TeamUserRole {
    #[serde(rename = "1")]
    Owner,
    #[serde(rename = "2")]
    ReadWriteDelete,
    #[serde(rename = "3")]
    ReadWrite,
    #[default]
    #[serde(rename = "4")]
    Read,
}

impl TeamUserRole {
    pub fn label(&self) -> &'static str {
        match self {
            TeamUserRole::Owner => "owner",
            TeamUserRole::ReadWriteDelete => "read-write-delete",
            TeamUserRole::ReadWrite => "read-write",
            TeamUserRole::Read => "read",
        }
    }
}

/// A team embeds denormalized user and project snapshots.
#[derive(Debug, Clone, Default, PartialEq, Deserialize, Serialize)]
pub struct Team {
    #[serde(rename = "_id", skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub creator_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(default)]
    pub users: Vec<AuthorizedUser>,
    #[serde(default)]
    pub projects: Vec<Project>,
}

/// Row of the team/user join table, carrying the caller's role in a team.
#[derive(Debug, Clone, Default, PartialEq, Deserialize, Serialize)]
pub struct TeamUser {
    #[serde(rename = "_id", skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub user_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub team_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub role: Option<TeamUserRole>,
}

/// Application page a bug report was filed from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Page {
    Main,
    Auth,
    Projects,
    Project,
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize, Serialize)]
pub struct BugReport {
    #[serde(rename = "_id", skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub user_id: Option<String>,
    #[serde(rename = "issuerAvatar", skip_serializing_if = "Option::is_none")]
    pub issuer_avatar: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub page: Option<Page>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ActivityType {
    AddProject,
    AddTask,
    BeginTask,
    CompleteTask,
    CompleteProject,
    EditProject,
    EditTask,
    BeginProject,
    DeleteProject,
    DeleteTask,
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize, Serialize)]
pub struct Activity {
    #[serde(rename = "_id", skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub user_id: Option<String>,
    #[serde(rename = "type", skip_serializing_if = "Option::is_none")]
    pub kind: Option<ActivityType>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub activity_object: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn envelope_decodes_with_and_without_data() {
        let ok: Envelope<Vec<Project>> =
            serde_json::from_str(r#"{"success":true,"data":[]}"#).unwrap();
        assert!(ok.success);
        assert_eq!(ok.data, Some(vec![]));

        let err: Envelope<Project> =
            serde_json::from_str(r#"{"success":false,"error":"nope"}"#).unwrap();
        assert!(!err.success);
        assert_eq!(err.error.as_deref(), Some("nope"));
        assert!(err.data.is_none());
    }

    #[test]
    fn project_id_round_trips_through_underscore_field() {
        let project: Project = serde_json::from_str(r#"{"_id":"p1","title":"Launch"}"#).unwrap();
        assert_eq!(project.id.as_deref(), Some("p1"));

        let json = serde_json::to_value(&project).unwrap();
        assert_eq!(json["_id"], "p1");
    }

    #[test]
    fn task_status_uses_screaming_snake_wire_values() {
        assert_eq!(
            serde_json::to_string(&TaskStatus::InProgress).unwrap(),
            r#""IN_PROGRESS""#
        );
        let status: TaskStatus = serde_json::from_str(r#""NEW""#).unwrap();
        assert_eq!(status, TaskStatus::New);
    }

    #[test]
    fn team_user_role_uses_numeric_wire_values() {
        assert_eq!(serde_json::to_string(&TeamUserRole::Owner).unwrap(), r#""1""#);
        let role: TeamUserRole = serde_json::from_str(r#""4""#).unwrap();
        assert_eq!(role, TeamUserRole::Read);
        assert_eq!(TeamUserRole::default(), TeamUserRole::Read);
    }

    #[test]
    fn page_and_activity_type_wire_values() {
        assert_eq!(serde_json::to_string(&Page::Projects).unwrap(), r#""projects""#);
        assert_eq!(
            serde_json::to_string(&ActivityType::CompleteTask).unwrap(),
            r#""COMPLETE_TASK""#
        );
    }

    #[test]
    fn activity_kind_maps_to_type_field() {
        let activity: Activity =
            serde_json::from_str(r#"{"_id":"a1","type":"ADD_PROJECT","activity_object":"Launch"}"#)
                .unwrap();
        assert_eq!(activity.kind, Some(ActivityType::AddProject));
    }

    #[test]
    fn projects_filter_to_query_skips_unset_fields() {
        let filter = ProjectsFilter {
            favorite: Some(true),
            title: Some("Launch".to_string()),
            ..Default::default()
        };
        let query = filter.to_query();
        assert_eq!(query.len(), 2);
        assert!(query.contains(&("favorite".to_string(), "true".to_string())));
    }

    #[test]
    fn form_data_serializes_password_confirmation_in_camel_case() {
        let form = UserFormData {
            password_confirmation: Some("secret".to_string()),
            ..Default::default()
        };
        let json = serde_json::to_value(&form).unwrap();
        assert_eq!(json["passwordConfirmation"], "secret");
        assert!(json.get("email").is_none());
    }
}
