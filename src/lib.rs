//! Client-side core for the taskboard app: an HTTP layer with tiered
//! middleware, a service per REST resource, and observable stores holding
//! the application state. The binary drives the stores from a CLI and can
//! serve the built front-end bundle.

pub mod config;
pub mod errors;
pub mod http;
pub mod models;
pub mod server;
pub mod services;
pub mod session;
pub mod stores;
pub mod util;
