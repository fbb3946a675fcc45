//! HTTP client wrapper with a three-tier middleware pipeline.
//!
//! ## Overview
//!
//! Every request flows through ordered interceptor chains assembled at call
//! time from three tiers — per-call, per-service, and client-wide — with the
//! last-registered middleware of each tier running first. A middleware halts
//! the rest of its chain by returning [`middleware::Flow::Halt`].
//!
//! ```text
//! store action ──> service method ──> HttpClient::send
//!                                        │  request chain (mutates config)
//!                                        │  one reqwest dispatch
//!                                        ├─ 2xx: response chain, decode envelope
//!                                        └─ failure: error chain, Err(HttpError)
//! ```

pub mod client;
pub mod middleware;

pub use client::{HttpClient, HttpResponse, Method, RequestConfig};
pub use middleware::{CallOptions, Flow, MiddlewareSet};
