//! User store: the signed-in user, nothing else.

use crate::models::AuthorizedUser;

use super::cell::StateCell;

#[derive(Debug, Clone, Default, PartialEq)]
pub struct UserState {
    pub current_user: Option<AuthorizedUser>,
}

pub struct UserStore {
    state: StateCell<UserState>,
}

impl UserStore {
    pub const NAME: &'static str = "userStore";

    pub fn new() -> Self {
        Self {
            state: StateCell::new(UserState::default()),
        }
    }

    pub fn state(&self) -> UserState {
        self.state.get()
    }

    pub fn subscribe(&self) -> tokio::sync::watch::Receiver<u64> {
        self.state.subscribe()
    }

    pub fn current_user(&self) -> Option<AuthorizedUser> {
        self.state.read(|s| s.current_user.clone())
    }

    pub fn set_current_user(&self, user: Option<AuthorizedUser>) {
        self.state.update(|s| s.current_user = user);
    }

    pub fn logged_in(&self) -> bool {
        self.state.read(|s| s.current_user.is_some())
    }

    pub fn reset(&self) {
        self.state.update(|s| *s = UserState::default());
    }
}

impl Default for UserStore {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn logged_in_tracks_current_user() {
        let store = UserStore::new();
        assert!(!store.logged_in());

        store.set_current_user(Some(AuthorizedUser {
            id: "u1".to_string(),
            name: "Ada".to_string(),
            ..Default::default()
        }));
        assert!(store.logged_in());
        assert_eq!(store.current_user().unwrap().name, "Ada");

        store.reset();
        assert!(!store.logged_in());
    }
}
