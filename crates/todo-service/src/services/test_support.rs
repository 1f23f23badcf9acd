//! Memory-backed service context for unit tests

use std::sync::Arc;

use todo_common::JwtService;
use todo_core::traits::SessionRepository;
use todo_core::SnowflakeGenerator;
use todo_db::{MemorySessionRepository, MemoryTodoRepository, MemoryUserStore};

use crate::dto::{RegisterRequest, UserResponse};

use super::context::{AuthSettings, ServiceContext, ServiceContextBuilder};
use super::user::UserService;

pub const SECRET: &str = "test-secret-key-that-is-at-least-32-bytes";

pub fn memory_context() -> (ServiceContext, Arc<MemoryUserStore>) {
    memory_context_with(AuthSettings::default(), 3600)
}

pub fn memory_context_with(
    settings: AuthSettings,
    token_ttl: i64,
) -> (ServiceContext, Arc<MemoryUserStore>) {
    let sessions = Arc::new(MemorySessionRepository::new());
    build_context(sessions.clone(), sessions, settings, token_ttl)
}

/// Context whose services reach the sessions through `session_repo` while the
/// user store keeps writing to `sessions` directly
pub fn memory_context_over(
    sessions: Arc<MemorySessionRepository>,
    session_repo: Arc<dyn SessionRepository>,
) -> (ServiceContext, Arc<MemoryUserStore>) {
    build_context(sessions, session_repo, AuthSettings::default(), 3600)
}

fn build_context(
    sessions: Arc<MemorySessionRepository>,
    session_repo: Arc<dyn SessionRepository>,
    settings: AuthSettings,
    token_ttl: i64,
) -> (ServiceContext, Arc<MemoryUserStore>) {
    let users = Arc::new(MemoryUserStore::new(sessions));
    let ctx = ServiceContextBuilder::new()
        .user_repo(users.clone())
        .role_repo(users.clone())
        .session_repo(session_repo)
        .todo_repo(Arc::new(MemoryTodoRepository::new()))
        .jwt_service(Arc::new(JwtService::new(SECRET, token_ttl)))
        .snowflake_generator(Arc::new(SnowflakeGenerator::new(1)))
        .auth_settings(settings)
        .build()
        .unwrap();
    (ctx, users)
}

pub async fn register(ctx: &ServiceContext, username: &str, password: &str) -> UserResponse {
    UserService::new(ctx)
        .register(RegisterRequest {
            username: username.to_string(),
            password: password.to_string(),
            display_name: None,
            email: None,
        })
        .await
        .unwrap()
}
