//! `/api/user` — login, registration, and the signed-in user.

use std::sync::Arc;

use crate::errors::HttpError;
use crate::http::{CallOptions, HttpClient, MiddlewareSet, RequestConfig};
use crate::models::{AuthData, AuthorizedUser, Envelope, UserFormData};

const AUTH_BASE_URI: &str = "/api/user";

pub struct AuthService {
    client: Arc<HttpClient>,
    middlewares: MiddlewareSet,
}

impl AuthService {
    pub fn new(client: Arc<HttpClient>) -> Self {
        Self {
            client,
            middlewares: MiddlewareSet::new(),
        }
    }

    pub fn with_middlewares(client: Arc<HttpClient>, middlewares: MiddlewareSet) -> Self {
        Self {
            client,
            middlewares,
        }
    }

    pub async fn login(
        &self,
        data: &UserFormData,
        options: CallOptions,
    ) -> Result<Envelope<AuthData>, HttpError> {
        self.client
            .send(
                RequestConfig::post(format!("{AUTH_BASE_URI}/login")).with_json(data),
                &self.middlewares,
                options,
            )
            .await
    }

    pub async fn register(
        &self,
        data: &UserFormData,
        options: CallOptions,
    ) -> Result<Envelope<AuthData>, HttpError> {
        self.client
            .send(
                RequestConfig::post(format!("{AUTH_BASE_URI}/register")).with_json(data),
                &self.middlewares,
                options,
            )
            .await
    }

    pub async fn pull_user(
        &self,
        options: CallOptions,
    ) -> Result<Envelope<AuthorizedUser>, HttpError> {
        self.client
            .send(
                RequestConfig::get(format!("{AUTH_BASE_URI}/self")),
                &self.middlewares,
                options,
            )
            .await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::http::Flow;
    use std::sync::Mutex;

    #[tokio::test]
    async fn service_tier_middleware_observes_every_call_failure() {
        let seen = Arc::new(Mutex::new(Vec::new()));
        let sink = Arc::clone(&seen);
        let middlewares = MiddlewareSet::new().on_error(move |err| {
            sink.lock().unwrap().push(err.to_string());
            Flow::Continue
        });
        // Port 9 (discard) has no listener; every dispatch fails in transport.
        let client = Arc::new(HttpClient::new("http://127.0.0.1:9"));
        let service = AuthService::with_middlewares(client, middlewares);

        let login = service
            .login(&UserFormData::default(), CallOptions::new())
            .await;
        let pull = service.pull_user(CallOptions::new()).await;

        assert!(login.is_err());
        assert!(pull.is_err());
        assert_eq!(seen.lock().unwrap().len(), 2);
    }
}
