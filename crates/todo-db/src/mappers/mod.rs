//! Entity to model mappers
//!
//! Conversions between domain entities (todo-core) and database rows.

mod role;
mod session;
mod user;

pub use role::role_set_from_names;
