//! Typed error hierarchy for the taskboard client.
//!
//! Three top-level enums cover the three failure channels:
//! - `RegistryError` — store registry misuse, always raised synchronously
//! - `HttpError` — transport and server failures, routed through the error
//!   middleware chain before surfacing
//! - `ValidationError` — client-side form checks that fail before dispatch

use thiserror::Error;

/// Errors from the store registry. These never pass through middleware;
/// both lookup and registration failures indicate a broken initialization
/// pipeline.
#[derive(Debug, Error)]
pub enum RegistryError {
    #[error("Duplicate registration for store '{0}'")]
    DuplicateStore(String),

    #[error("No store registered under '{0}', check the initialization pipeline")]
    UnknownStore(String),

    #[error("Store '{0}' is registered with a different type")]
    TypeMismatch(String),
}

/// Errors from the HTTP client wrapper.
///
/// Every variant is run through the assembled error middleware chain before
/// `HttpClient::send` returns it to the caller.
#[derive(Debug, Error)]
pub enum HttpError {
    #[error("Request failed: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("Server returned {status}: {message}")]
    Status { status: u16, message: String },

    #[error("Failed to decode response body: {0}")]
    Decode(#[source] serde_json::Error),
}

impl HttpError {
    /// Message suitable for a store-level, user-facing error field.
    ///
    /// For server rejections this is the `error` string from the response
    /// envelope; other variants fall back to a generic description.
    pub fn user_message(&self) -> String {
        match self {
            HttpError::Status { message, .. } if !message.is_empty() => message.clone(),
            HttpError::Status { status, .. } => format!("Request failed with status {status}"),
            HttpError::Transport(_) => "Could not reach the server".to_string(),
            HttpError::Decode(_) => "Unexpected response from the server".to_string(),
        }
    }

    /// HTTP status code, when the server answered at all.
    pub fn status(&self) -> Option<u16> {
        match self {
            HttpError::Status { status, .. } => Some(*status),
            HttpError::Transport(e) => e.status().map(|s| s.as_u16()),
            HttpError::Decode(_) => None,
        }
    }
}

/// Client-side validation failures. These never reach the network.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ValidationError {
    #[error("Enter a valid email address")]
    InvalidEmail,

    #[error("Passwords must match")]
    PasswordMismatch,

    #[error("{0} is required")]
    MissingField(&'static str),
}
