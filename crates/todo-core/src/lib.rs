//! # todo-core
//!
//! Domain layer containing entities, the role model, and repository traits.
//! This crate has zero dependencies on infrastructure (database, web framework, etc.).

pub mod entities;
pub mod error;
pub mod traits;
pub mod value_objects;

// Re-export commonly used types at crate root
pub use entities::{Session, SessionState, Todo, User};
pub use error::DomainError;
pub use traits::{
    RepoResult, SessionRepository, TodoRepository, UserRepository, UserRoleRepository,
};
pub use value_objects::{Role, RoleParseError, RoleSet, Snowflake, SnowflakeGenerator, SnowflakeParseError};
