//! Route definitions
//!
//! Routes are grouped by the auth pipeline that guards them. Groups that
//! share a path with different methods are merged, each method keeping its
//! own gate.

use axum::{
    routing::{delete, get, post, put},
    Router,
};
use todo_core::RoleSet;

use crate::handlers::{self, auth, health, members, roles, todos, users};
use crate::middleware::guarded;
use crate::state::AppState;

/// Create the main API router with all routes (excluding health for separate middleware handling)
pub fn create_router(state: &AppState) -> Router<AppState> {
    Router::new()
        .merge(public_routes())
        .merge(guarded(token_routes(), state.token_pipeline()))
        .merge(guarded(
            any_member_routes(),
            state.role_pipeline(RoleSet::ANY_MEMBER),
        ))
        .merge(guarded(admin_routes(), state.role_pipeline(RoleSet::ADMIN)))
        .merge(guarded(
            manager_routes(),
            state.role_pipeline(RoleSet::MANAGER),
        ))
        .merge(guarded(
            admin_manager_routes(),
            state.role_pipeline(RoleSet::ADMIN | RoleSet::MANAGER),
        ))
        .merge(guarded(
            basic_todo_routes("/admin/todo"),
            state.static_basic_pipeline(),
        ))
        .merge(guarded(
            basic_todo_routes("/admin2/todo"),
            state.store_basic_pipeline(),
        ))
}

/// Health check routes (exported separately to bypass rate limiting)
pub fn health_routes() -> Router<AppState> {
    Router::new()
        .route("/health", get(health::health_check))
        .route("/health/ready", get(health::readiness_check))
}

/// No credentials required
fn public_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(handlers::root))
        .route("/login", post(auth::login))
        // Todo resource
        .route("/api/todo", get(todos::list_todos).post(todos::create_todo))
        .route(
            "/api/todo/:id",
            get(todos::get_todo)
                .put(todos::update_todo)
                .delete(todos::delete_todo),
        )
        // Users
        .route("/api/register", post(users::register))
        .route("/api/users", get(users::list_users))
        .route("/api/user/:username", get(users::get_user))
        .route("/api/changepassword", put(users::change_password))
        .route("/api/changeprofile", put(users::change_profile))
}

/// Any live session
fn token_routes() -> Router<AppState> {
    Router::new()
        .route("/logout", get(auth::logout))
        .route("/refresh_token", get(auth::refresh_token))
        .route("/member/todo", get(todos::list_todos))
}

/// Live session holding USER, ADMIN or MANAGER
fn any_member_routes() -> Router<AppState> {
    Router::new()
        .route("/member/todo2", get(todos::list_todos))
        .route("/member/todo", post(todos::create_todo))
}

fn admin_routes() -> Router<AppState> {
    Router::new()
        .route("/member/admin", get(members::admin_only))
        .route("/member/addrole", post(roles::add_role))
        .route("/member/removerole", post(roles::remove_role))
        .route("/api/user/:username", delete(users::delete_user))
}

fn manager_routes() -> Router<AppState> {
    Router::new().route("/member/manager", get(members::manager_only))
}

fn admin_manager_routes() -> Router<AppState> {
    Router::new().route("/member/adminmanager", get(members::admin_or_manager))
}

/// Todo list and create behind basic auth
fn basic_todo_routes(path: &str) -> Router<AppState> {
    Router::new().route(path, get(todos::list_todos).post(todos::create_todo))
}
