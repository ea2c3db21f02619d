//! HTTP surface of the rental back office: configuration, router,
//! handlers and error mapping.
//!
//! The binary in `main.rs` and the integration tests both build the app
//! through [`router::build_app_router`].

pub mod config;
pub mod error;
pub mod extract;
pub mod handlers;
pub mod query;
pub mod router;
pub mod routes;
pub mod state;
