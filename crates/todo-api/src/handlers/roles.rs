//! Role grant handlers

use axum::{extract::State, Json};
use todo_service::dto::{MessageResponse, RoleChangeRequest};
use todo_service::RoleService;

use crate::extractors::{AuthUser, ValidatedJson};
use crate::response::ApiResult;
use crate::state::AppState;

/// Grant a role
///
/// POST /member/addrole
pub async fn add_role(
    State(state): State<AppState>,
    auth: AuthUser,
    ValidatedJson(request): ValidatedJson<RoleChangeRequest>,
) -> ApiResult<Json<MessageResponse>> {
    tracing::info!(
        by = auth.username(),
        username = %request.username,
        role = %request.role,
        "Role grant requested"
    );
    let service = RoleService::new(state.service_context());
    let response = service.add_role(request).await?;
    Ok(Json(response))
}

/// Remove a role grant
///
/// POST /member/removerole
pub async fn remove_role(
    State(state): State<AppState>,
    auth: AuthUser,
    ValidatedJson(request): ValidatedJson<RoleChangeRequest>,
) -> ApiResult<Json<MessageResponse>> {
    tracing::info!(
        by = auth.username(),
        username = %request.username,
        role = %request.role,
        "Role removal requested"
    );
    let service = RoleService::new(state.service_context());
    let response = service.remove_role(request).await?;
    Ok(Json(response))
}
