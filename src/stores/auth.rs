//! Auth store: login/registration form state, session restore, and the
//! logout fan-out that resets the other stores through the registry.

use std::sync::Arc;

use crate::errors::ValidationError;
use crate::http::{CallOptions, Flow, HttpClient};
use crate::models::{AuthData, UserFormData};
use crate::services::AuthService;
use crate::session::{Session, SessionFile};
use crate::util::is_valid_email;

use super::app::AppStore;
use super::cell::StateCell;
use super::projects::ProjectsStore;
use super::registry::StoreRegistry;
use super::spinner::with_spinner;
use super::tasks::TasksStore;
use super::user::UserStore;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum AuthKind {
    #[default]
    Login,
    Register,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct AuthState {
    pub user_data: UserFormData,
    pub auth_kind: AuthKind,
    pub error_message: String,
}

pub struct AuthStore {
    state: Arc<StateCell<AuthState>>,
    app: Arc<AppStore>,
    registry: Arc<StoreRegistry>,
    service: AuthService,
    session: SessionFile,
    client: Arc<HttpClient>,
}

impl AuthStore {
    pub const NAME: &'static str = "authStore";

    pub fn new(
        service: AuthService,
        client: Arc<HttpClient>,
        session: SessionFile,
        app: Arc<AppStore>,
        registry: Arc<StoreRegistry>,
    ) -> Self {
        Self {
            state: Arc::new(StateCell::new(AuthState::default())),
            app,
            registry,
            service,
            session,
            client,
        }
    }

    pub fn state(&self) -> AuthState {
        self.state.get()
    }

    pub fn subscribe(&self) -> tokio::sync::watch::Receiver<u64> {
        self.state.subscribe()
    }

    pub fn set_auth_kind(&self, kind: AuthKind) {
        self.state.update(|s| {
            s.auth_kind = kind;
            s.error_message.clear();
        });
    }

    /// Merge form edits; any edit clears the stale error message.
    pub fn modify_form(&self, f: impl FnOnce(&mut UserFormData)) {
        self.state.update(|s| {
            f(&mut s.user_data);
            s.error_message.clear();
        });
    }

    pub fn set_error_message(&self, message: impl Into<String>) {
        self.state.update(|s| s.error_message = message.into());
    }

    pub fn error_message(&self) -> String {
        self.state.read(|s| s.error_message.clone())
    }

    /// Form-validity check run before any dispatch.
    pub fn validate(&self, kind: AuthKind) -> Result<(), ValidationError> {
        let form = self.state.read(|s| s.user_data.clone());
        let email = form.email.as_deref().unwrap_or_default();
        if !is_valid_email(email) {
            return Err(ValidationError::InvalidEmail);
        }
        if form.password.as_deref().unwrap_or_default().is_empty() {
            return Err(ValidationError::MissingField("password"));
        }
        if kind == AuthKind::Register && form.password != form.password_confirmation {
            return Err(ValidationError::PasswordMismatch);
        }
        Ok(())
    }

    /// Log in with the current form. An invalid form never dispatches; a
    /// rejected request lands in `error_message` via the error middleware;
    /// success persists the session and pulls the user.
    pub async fn login(&self) {
        if let Err(e) = self.validate(AuthKind::Login) {
            self.set_error_message(e.to_string());
            return;
        }
        let form = self.state.read(|s| s.user_data.clone());
        let result = with_spinner(
            &self.app,
            self.service.login(&form, self.surface_error_options()),
        )
        .await;
        if let Ok(envelope) = result {
            if let Some(auth) = envelope.data {
                self.establish_session(auth).await;
            }
        }
    }

    pub async fn register(&self) {
        if let Err(e) = self.validate(AuthKind::Register) {
            self.set_error_message(e.to_string());
            return;
        }
        let form = self.state.read(|s| s.user_data.clone());
        let result = with_spinner(
            &self.app,
            self.service.register(&form, self.surface_error_options()),
        )
        .await;
        if let Ok(envelope) = result {
            if let Some(auth) = envelope.data {
                self.establish_session(auth).await;
            }
        }
    }

    /// Restore a persisted session and fetch the signed-in user. With no
    /// usable session this degrades to a logout; either way the app-loaded
    /// latch flips so the UI stops waiting.
    pub async fn pull_user(&self) {
        let session = self.session.load().unwrap_or_else(|e| {
            tracing::warn!(error = %e, "failed to read session file");
            None
        });
        let Some(session) = session else {
            self.logout();
            self.app.set_app_loaded(true);
            return;
        };
        self.client.set_auth_token(Some(session.token));

        let result = with_spinner(&self.app, self.service.pull_user(CallOptions::new())).await;
        match result {
            Ok(envelope) => {
                if let Ok(user_store) = self.registry.lookup::<UserStore>(UserStore::NAME) {
                    user_store.set_current_user(envelope.data);
                }
                self.reset_form();
            }
            Err(_) => self.logout(),
        }
        self.app.set_app_loaded(true);
    }

    /// Drop the auth header, delete the persisted session, and reset the
    /// user/projects/tasks stores — resolved through the registry so the
    /// auth store needs no construction-time reference to any of them.
    pub fn logout(&self) {
        self.client.set_auth_token(None);
        if let Err(e) = self.session.delete() {
            tracing::warn!(error = %e, "failed to delete session file");
        }

        match self.registry.lookup::<UserStore>(UserStore::NAME) {
            Ok(store) => store.reset(),
            Err(e) => tracing::warn!(error = %e, "logout could not reset user store"),
        }
        match self.registry.lookup::<ProjectsStore>(ProjectsStore::NAME) {
            Ok(store) => store.reset(),
            Err(e) => tracing::warn!(error = %e, "logout could not reset projects store"),
        }
        match self.registry.lookup::<TasksStore>(TasksStore::NAME) {
            Ok(store) => store.reset(),
            Err(e) => tracing::warn!(error = %e, "logout could not reset tasks store"),
        }
    }

    pub fn reset_form(&self) {
        self.state.update(|s| *s = AuthState::default());
    }

    fn surface_error_options(&self) -> CallOptions {
        let state = Arc::clone(&self.state);
        CallOptions::new().on_error(move |err| {
            let message = err.user_message();
            state.update(|s| s.error_message = message);
            Flow::Continue
        })
    }

    async fn establish_session(&self, auth: AuthData) {
        let session = Session::from_token(auth.token.clone(), auth.token_expiration);
        if let Err(e) = self.session.save(&session) {
            tracing::warn!(error = %e, "failed to persist session");
        }
        self.client.set_auth_token(Some(auth.token));
        self.pull_user().await;
    }
}
