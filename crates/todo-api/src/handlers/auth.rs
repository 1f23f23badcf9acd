//! Authentication handlers
//!
//! Endpoints for login, logout, and token refresh.

use axum::{extract::State, Json};
use todo_service::dto::{LoginRequest, LogoutResponse, TokenResponse};
use todo_service::AuthService;

use crate::extractors::{AuthUser, ValidatedJson};
use crate::response::ApiResult;
use crate::state::AppState;

/// Login with username and password
///
/// POST /login
pub async fn login(
    State(state): State<AppState>,
    ValidatedJson(request): ValidatedJson<LoginRequest>,
) -> ApiResult<Json<TokenResponse>> {
    let service = AuthService::new(state.service_context());
    let response = service.login(request).await?;
    Ok(Json(response))
}

/// Revoke the presented token's session
///
/// GET /logout
pub async fn logout(
    State(state): State<AppState>,
    AuthUser(principal): AuthUser,
) -> ApiResult<Json<LogoutResponse>> {
    let service = AuthService::new(state.service_context());
    let response = service.logout(&principal).await?;
    Ok(Json(response))
}

/// Exchange the presented token for a fresh one
///
/// GET /refresh_token
pub async fn refresh_token(
    State(state): State<AppState>,
    AuthUser(principal): AuthUser,
) -> ApiResult<Json<TokenResponse>> {
    let service = AuthService::new(state.service_context());
    let response = service.refresh(&principal).await?;
    Ok(Json(response))
}
