//! Axum extractors for request handling
//!
//! Custom extractors for the authenticated principal, path ids, and
//! validated bodies.

mod auth;
mod path;
mod validated;

pub use auth::AuthUser;
pub use path::{TodoIdPath, UsernamePath};
pub use validated::ValidatedJson;
