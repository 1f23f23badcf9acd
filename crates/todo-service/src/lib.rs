//! # todo-service
//!
//! Application layer: the framework-independent auth core, the services
//! behind each endpoint, and the request/response DTOs.

pub mod auth;
pub mod dto;
pub mod services;

pub use auth::{AuthPipeline, Identity, Principal};
pub use services::{
    AuthService, AuthSettings, RoleService, ServiceContext, ServiceContextBuilder, ServiceError,
    ServiceResult, SessionPruner, TodoService, UserService,
};
