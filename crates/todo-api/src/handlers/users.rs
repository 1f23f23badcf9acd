//! User handlers
//!
//! Registration, lookup, credential and profile changes, and deletion.

use axum::{
    extract::{Path, State},
    Json,
};
use todo_service::dto::{
    ChangePasswordRequest, ChangeProfileRequest, MessageResponse, RegisterRequest, UserResponse,
};
use todo_service::UserService;

use crate::extractors::{AuthUser, UsernamePath, ValidatedJson};
use crate::response::{ApiResult, Created};
use crate::state::AppState;

/// Register a new user
///
/// POST /api/register
pub async fn register(
    State(state): State<AppState>,
    ValidatedJson(request): ValidatedJson<RegisterRequest>,
) -> ApiResult<Created<Json<UserResponse>>> {
    let service = UserService::new(state.service_context());
    let user = service.register(request).await?;
    Ok(Created(Json(user)))
}

/// GET /api/users
pub async fn list_users(State(state): State<AppState>) -> ApiResult<Json<Vec<UserResponse>>> {
    let service = UserService::new(state.service_context());
    Ok(Json(service.list().await?))
}

/// Get a user with its current roles
///
/// GET /api/user/:username
pub async fn get_user(
    State(state): State<AppState>,
    Path(path): Path<UsernamePath>,
) -> ApiResult<Json<UserResponse>> {
    let service = UserService::new(state.service_context());
    let user = service.get_by_username(&path.username).await?;
    Ok(Json(user))
}

/// PUT /api/changepassword
pub async fn change_password(
    State(state): State<AppState>,
    ValidatedJson(request): ValidatedJson<ChangePasswordRequest>,
) -> ApiResult<Json<MessageResponse>> {
    let service = UserService::new(state.service_context());
    Ok(Json(service.change_password(request).await?))
}

/// PUT /api/changeprofile
pub async fn change_profile(
    State(state): State<AppState>,
    ValidatedJson(request): ValidatedJson<ChangeProfileRequest>,
) -> ApiResult<Json<UserResponse>> {
    let service = UserService::new(state.service_context());
    Ok(Json(service.change_profile(request).await?))
}

/// Soft delete a user
///
/// DELETE /api/user/:username
pub async fn delete_user(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(path): Path<UsernamePath>,
) -> ApiResult<Json<MessageResponse>> {
    tracing::info!(by = auth.username(), username = %path.username, "User deletion requested");
    let service = UserService::new(state.service_context());
    Ok(Json(service.delete_user(&path.username).await?))
}
