//! Role-gated member endpoints
//!
//! The gate in front of each route does the work; these only answer.

use axum::Json;
use todo_service::dto::MessageResponse;

use crate::extractors::AuthUser;

/// GET /member/admin
pub async fn admin_only(auth: AuthUser) -> Json<MessageResponse> {
    tracing::debug!(username = auth.username(), "Admin endpoint");
    Json(MessageResponse::new("this api for admin member"))
}

/// GET /member/manager
pub async fn manager_only(auth: AuthUser) -> Json<MessageResponse> {
    tracing::debug!(username = auth.username(), "Manager endpoint");
    Json(MessageResponse::new("this api for manager member"))
}

/// GET /member/adminmanager
pub async fn admin_or_manager(auth: AuthUser) -> Json<MessageResponse> {
    tracing::debug!(username = auth.username(), "Admin or manager endpoint");
    Json(MessageResponse::new("this api for admin and manager member"))
}
