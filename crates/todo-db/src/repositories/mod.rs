//! Repository implementations
//!
//! PostgreSQL implementations of the repository traits defined in todo-core.
//! The todo resource has no table; it is served by the in-memory store.

mod error;
mod session;
mod user;
mod user_role;

pub use session::PgSessionRepository;
pub use user::PgUserRepository;
pub use user_role::PgUserRoleRepository;
