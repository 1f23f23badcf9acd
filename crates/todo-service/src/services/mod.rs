//! Business logic services
//!
//! This module contains all service layer implementations that handle
//! business logic, validation, and orchestration of domain operations.

pub mod auth;
pub mod context;
pub mod error;
pub mod pruner;
pub mod role;
pub mod todo;
pub mod user;

#[cfg(test)]
pub(crate) mod test_support;

pub use auth::AuthService;
pub use context::{AuthSettings, ServiceContext, ServiceContextBuilder};
pub use error::{ServiceError, ServiceResult};
pub use pruner::SessionPruner;
pub use role::RoleService;
pub use todo::TodoService;
pub use user::UserService;
