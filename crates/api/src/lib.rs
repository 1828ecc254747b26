//! Lumina API server library.
//!
//! Exposes config, state, error handling, auth, and the router builder so
//! both the binary entrypoint and the integration tests can use them.

pub mod auth;
pub mod background;
pub mod config;
pub mod error;
pub mod extract;
pub mod handlers;
pub mod middleware;
pub mod query;
pub mod response;
pub mod router;
pub mod routes;
pub mod state;
