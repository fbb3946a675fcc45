//! Middleware kinds, chain assembly, and the iterative chain runners.
//!
//! Three middleware kinds exist, one per artifact: request middlewares may
//! mutate the in-flight request config before dispatch, response middlewares
//! see the parsed response, error middlewares see the failure. Chains are
//! plain ordered lists composed by explicit iteration; a middleware that
//! returns [`Flow::Halt`] stops the remainder of its chain permanently.

use crate::errors::HttpError;

use super::client::{HttpResponse, RequestConfig};

/// Control value returned by every middleware. `Halt` stops the chain;
/// there is no resumption.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Flow {
    Continue,
    Halt,
}

pub type RequestMiddleware = Box<dyn Fn(&mut RequestConfig) -> Flow + Send + Sync>;
pub type ResponseMiddleware = Box<dyn Fn(&mut HttpResponse) -> Flow + Send + Sync>;
pub type ErrorMiddleware = Box<dyn Fn(&HttpError) -> Flow + Send + Sync>;

/// Middlewares attached to one service instance, applied to every call the
/// service makes. The client-wide tier reuses the same shape.
#[derive(Default)]
pub struct MiddlewareSet {
    pub request: Vec<RequestMiddleware>,
    pub response: Vec<ResponseMiddleware>,
    pub error: Vec<ErrorMiddleware>,
}

impl MiddlewareSet {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn on_request<F>(mut self, f: F) -> Self
    where
        F: Fn(&mut RequestConfig) -> Flow + Send + Sync + 'static,
    {
        self.request.push(Box::new(f));
        self
    }

    pub fn on_response<F>(mut self, f: F) -> Self
    where
        F: Fn(&mut HttpResponse) -> Flow + Send + Sync + 'static,
    {
        self.response.push(Box::new(f));
        self
    }

    pub fn on_error<F>(mut self, f: F) -> Self
    where
        F: Fn(&HttpError) -> Flow + Send + Sync + 'static,
    {
        self.error.push(Box::new(f));
        self
    }
}

/// Per-call middlewares, passed into a single service method invocation.
pub type CallOptions = MiddlewareSet;

/// Run the request chain across the three tiers.
///
/// Assembly precedence is fixed: per-call, then per-service, then
/// client-wide — each tier reversed so its last-registered middleware runs
/// first.
pub fn run_request_chain(
    config: &mut RequestConfig,
    call: &[RequestMiddleware],
    service: &[RequestMiddleware],
    general: &[RequestMiddleware],
) {
    for mw in assembled(call, service, general) {
        if mw(config) == Flow::Halt {
            return;
        }
    }
}

/// Run the response chain; same tier precedence and halt semantics as the
/// request chain.
pub fn run_response_chain(
    response: &mut HttpResponse,
    call: &[ResponseMiddleware],
    service: &[ResponseMiddleware],
    general: &[ResponseMiddleware],
) {
    for mw in assembled(call, service, general) {
        if mw(response) == Flow::Halt {
            return;
        }
    }
}

/// Run the error chain; same tier precedence and halt semantics as the
/// request chain.
pub fn run_error_chain(
    error: &HttpError,
    call: &[ErrorMiddleware],
    service: &[ErrorMiddleware],
    general: &[ErrorMiddleware],
) {
    for mw in assembled(call, service, general) {
        if mw(error) == Flow::Halt {
            return;
        }
    }
}

fn assembled<'a, M>(
    call: &'a [M],
    service: &'a [M],
    general: &'a [M],
) -> impl Iterator<Item = &'a M> {
    call.iter()
        .rev()
        .chain(service.iter().rev())
        .chain(general.iter().rev())
}
