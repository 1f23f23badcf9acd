//! # todo-api
//!
//! REST API server built with Axum framework: the todo resource, user
//! management, and the token, role and basic-auth gated route groups.

pub mod extractors;
pub mod handlers;
pub mod middleware;
pub mod response;
pub mod routes;
pub mod server;
pub mod state;

pub use server::{build_app_state, create_app, create_app_state, run};
pub use state::AppState;
