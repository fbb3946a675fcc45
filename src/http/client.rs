//! The HTTP client wrapper: one dispatch per call, middleware chains around
//! it, envelope decoding, and debug logging of every outcome.

use std::sync::RwLock;
use std::time::Instant;

use serde::de::DeserializeOwned;
use serde_json::Value;

use crate::errors::HttpError;
use crate::models::Envelope;

use super::middleware::{self, CallOptions, MiddlewareSet};

/// Request verbs the backend understands.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Method {
    Get,
    Post,
    Patch,
    Delete,
}

impl Method {
    fn as_reqwest(self) -> reqwest::Method {
        match self {
            Method::Get => reqwest::Method::GET,
            Method::Post => reqwest::Method::POST,
            Method::Patch => reqwest::Method::PATCH,
            Method::Delete => reqwest::Method::DELETE,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Method::Get => "GET",
            Method::Post => "POST",
            Method::Patch => "PATCH",
            Method::Delete => "DELETE",
        }
    }
}

/// The in-flight request config. Built from a verb + path, then handed
/// mutably to the request middleware chain before dispatch.
#[derive(Debug, Clone)]
pub struct RequestConfig {
    pub method: Method,
    pub path: String,
    pub body: Option<Value>,
    pub params: Vec<(String, String)>,
    pub headers: Vec<(String, String)>,
}

impl RequestConfig {
    pub fn new(method: Method, path: impl Into<String>) -> Self {
        Self {
            method,
            path: path.into(),
            body: None,
            params: Vec::new(),
            headers: Vec::new(),
        }
    }

    pub fn get(path: impl Into<String>) -> Self {
        Self::new(Method::Get, path)
    }

    pub fn post(path: impl Into<String>) -> Self {
        Self::new(Method::Post, path)
    }

    pub fn patch(path: impl Into<String>) -> Self {
        Self::new(Method::Patch, path)
    }

    pub fn delete(path: impl Into<String>) -> Self {
        Self::new(Method::Delete, path)
    }

    /// Attach a JSON body. Serialization of domain entities is infallible
    /// (plain records, no maps with non-string keys), so failures are
    /// collapsed to `Value::Null` and caught by the server's validation.
    pub fn with_json(mut self, body: &impl serde::Serialize) -> Self {
        self.body = Some(serde_json::to_value(body).unwrap_or(Value::Null));
        self
    }

    pub fn with_params(mut self, params: Vec<(String, String)>) -> Self {
        self.params = params;
        self
    }
}

/// The response artifact handed to the response middleware chain: status
/// plus the parsed JSON body, before envelope decoding.
#[derive(Debug)]
pub struct HttpResponse {
    pub status: u16,
    pub body: Value,
}

impl HttpResponse {
    /// Decode the `data` payload of the envelope without consuming the
    /// response. Middlewares use this to pull entities into store state.
    pub fn data<T: DeserializeOwned>(&self) -> Option<T> {
        self.body
            .get("data")
            .cloned()
            .and_then(|v| serde_json::from_value(v).ok())
    }

    /// The envelope's `error` string, if the server supplied one.
    pub fn error_message(&self) -> Option<String> {
        self.body
            .get("error")
            .and_then(Value::as_str)
            .map(str::to_string)
    }
}

/// Client wrapper around `reqwest` holding the base URL, the client-wide
/// middleware tier, and the auth token attached to every request once set.
///
/// One instance is shared (via `Arc`) by every service in the process, which
/// is what makes the general tier and the auth header process-wide.
pub struct HttpClient {
    base_url: String,
    http: reqwest::Client,
    general: RwLock<MiddlewareSet>,
    auth_token: RwLock<Option<String>>,
}

impl HttpClient {
    pub fn new(base_url: impl Into<String>) -> Self {
        let mut base_url = base_url.into();
        while base_url.ends_with('/') {
            base_url.pop();
        }
        Self {
            base_url,
            http: reqwest::Client::new(),
            general: RwLock::new(MiddlewareSet::new()),
            auth_token: RwLock::new(None),
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Attach a token sent as the `Authorization` header on every
    /// subsequent request, or clear it with `None`.
    pub fn set_auth_token(&self, token: Option<String>) {
        *self.auth_token.write().expect("auth token lock poisoned") = token;
    }

    pub fn auth_token(&self) -> Option<String> {
        self.auth_token
            .read()
            .expect("auth token lock poisoned")
            .clone()
    }

    /// Register middlewares on the client-wide tier. Within the tier the
    /// last-registered middleware runs first.
    pub fn add_general_middlewares(&self, set: MiddlewareSet) {
        let mut general = self.general.write().expect("middleware lock poisoned");
        general.request.extend(set.request);
        general.response.extend(set.response);
        general.error.extend(set.error);
    }

    /// Issue one request. The request chain runs against the mutable config
    /// first; exactly one network call follows (no retry); then either the
    /// response chain runs and the envelope is decoded, or the error chain
    /// runs and the failure is returned.
    pub async fn send<T: DeserializeOwned>(
        &self,
        mut config: RequestConfig,
        service: &MiddlewareSet,
        options: CallOptions,
    ) -> Result<Envelope<T>, HttpError> {
        let started = Instant::now();

        {
            let general = self.general.read().expect("middleware lock poisoned");
            middleware::run_request_chain(
                &mut config,
                &options.request,
                &service.request,
                &general.request,
            );
        }

        let url = format!("{}{}", self.base_url, config.path);
        let mut request = self.http.request(config.method.as_reqwest(), &url);
        if !config.params.is_empty() {
            request = request.query(&config.params);
        }
        if let Some(body) = &config.body {
            request = request.json(body);
        }
        let mut has_auth_header = false;
        for (name, value) in &config.headers {
            has_auth_header |= name.eq_ignore_ascii_case("authorization");
            request = request.header(name, value);
        }
        if !has_auth_header {
            if let Some(token) = self.auth_token() {
                request = request.header(reqwest::header::AUTHORIZATION, token);
            }
        }

        let response = match request.send().await {
            Ok(response) => response,
            Err(e) => {
                return Err(self.fail(&config, started, HttpError::Transport(e), service, &options))
            }
        };

        let status = response.status();
        let text = match response.text().await {
            Ok(text) => text,
            Err(e) => {
                return Err(self.fail(&config, started, HttpError::Transport(e), service, &options))
            }
        };

        if !status.is_success() {
            // Prefer the envelope's error string when the body parses.
            let message = serde_json::from_str::<Value>(&text)
                .ok()
                .and_then(|body| {
                    body.get("error")
                        .and_then(Value::as_str)
                        .map(str::to_string)
                })
                .unwrap_or_else(|| text.trim().to_string());
            let err = HttpError::Status {
                status: status.as_u16(),
                message,
            };
            return Err(self.fail(&config, started, err, service, &options));
        }

        let body = match serde_json::from_str::<Value>(&text) {
            Ok(body) => body,
            Err(e) => {
                return Err(self.fail(&config, started, HttpError::Decode(e), service, &options))
            }
        };

        tracing::debug!(
            method = config.method.as_str(),
            path = %config.path,
            params = ?config.params,
            has_body = config.body.is_some(),
            status = status.as_u16(),
            elapsed_ms = started.elapsed().as_millis() as u64,
            "request completed"
        );

        let mut http_response = HttpResponse {
            status: status.as_u16(),
            body,
        };
        {
            let general = self.general.read().expect("middleware lock poisoned");
            middleware::run_response_chain(
                &mut http_response,
                &options.response,
                &service.response,
                &general.response,
            );
        }

        serde_json::from_value(http_response.body)
            .map_err(|e| self.fail(&config, started, HttpError::Decode(e), service, &options))
    }

    /// Log the failure, run the error middleware chain, hand the error back.
    fn fail(
        &self,
        config: &RequestConfig,
        started: Instant,
        err: HttpError,
        service: &MiddlewareSet,
        options: &CallOptions,
    ) -> HttpError {
        tracing::error!(
            method = config.method.as_str(),
            path = %config.path,
            params = ?config.params,
            has_body = config.body.is_some(),
            elapsed_ms = started.elapsed().as_millis() as u64,
            error = %err,
            "request failed"
        );
        let general = self.general.read().expect("middleware lock poisoned");
        middleware::run_error_chain(&err, &options.error, &service.error, &general.error);
        err
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn base_url_trailing_slash_is_normalized() {
        let client = HttpClient::new("http://localhost:8080/");
        assert_eq!(client.base_url(), "http://localhost:8080");
    }

    #[test]
    fn auth_token_set_and_clear() {
        let client = HttpClient::new("http://localhost:8080");
        assert!(client.auth_token().is_none());
        client.set_auth_token(Some("t0ken".to_string()));
        assert_eq!(client.auth_token().as_deref(), Some("t0ken"));
        client.set_auth_token(None);
        assert!(client.auth_token().is_none());
    }

    #[test]
    fn request_config_builders_set_verb_and_path() {
        let config = RequestConfig::patch("/api/task/t1").with_json(&serde_json::json!({
            "title": "Ship it"
        }));
        assert_eq!(config.method, Method::Patch);
        assert_eq!(config.path, "/api/task/t1");
        assert_eq!(config.body.unwrap()["title"], "Ship it");
    }

    #[test]
    fn response_artifact_extracts_data_and_error() {
        let response = HttpResponse {
            status: 200,
            body: serde_json::json!({
                "success": true,
                "data": [{"_id": "p1", "title": "Launch"}]
            }),
        };
        let projects: Vec<crate::models::Project> = response.data().unwrap();
        assert_eq!(projects.len(), 1);
        assert!(response.error_message().is_none());

        let failed = HttpResponse {
            status: 200,
            body: serde_json::json!({"success": false, "error": "nope"}),
        };
        assert_eq!(failed.error_message().as_deref(), Some("nope"));
    }
}
