//! Route handlers
//!
//! All HTTP request handlers organized by domain.

pub mod auth;
pub mod health;
pub mod members;
pub mod roles;
pub mod todos;
pub mod users;

use axum::Json;
use todo_service::dto::MessageResponse;

/// Landing message
///
/// GET /
pub async fn root() -> Json<MessageResponse> {
    Json(MessageResponse::new("welcome todo app"))
}
