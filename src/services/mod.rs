//! Service layer: one struct per REST resource.
//!
//! Services contain no business logic — each method shapes one request
//! (verb, path template, payload) and hands it to the shared [`HttpClient`].
//! A service carries its own middleware tier, applied to every call it
//! makes, between the per-call and client-wide tiers.
//!
//! | Service | Resource |
//! |-------------------|------------------------------|
//! | `AuthService` | `/api/user` (login/register/self) |
//! | `ProjectsService` | `/api/project` |
//! | `TasksService` | `/api/task` |
//! | `TeamsService` | `/api/teams`, `/api/team-user`, user search |
//! | `ReportsService` | `/api/reports` |
//! | `ActivityService` | `/api/activity` |

pub mod activity;
pub mod auth;
pub mod projects;
pub mod reports;
pub mod tasks;
pub mod teams;

pub use activity::ActivityService;
pub use auth::AuthService;
pub use projects::ProjectsService;
pub use reports::ReportsService;
pub use tasks::TasksService;
pub use teams::TeamsService;
