//! Todo handlers
//!
//! The same list and create handlers are mounted publicly under `/api` and
//! behind each auth group.

use axum::{
    extract::{Path, State},
    Json,
};
use todo_service::dto::{MessageResponse, TodoRequest, TodoResponse};
use todo_service::TodoService;

use crate::extractors::{TodoIdPath, ValidatedJson};
use crate::response::ApiResult;
use crate::state::AppState;

/// GET /api/todo
pub async fn list_todos(State(state): State<AppState>) -> ApiResult<Json<Vec<TodoResponse>>> {
    let service = TodoService::new(state.service_context());
    Ok(Json(service.list().await?))
}

/// POST /api/todo
pub async fn create_todo(
    State(state): State<AppState>,
    ValidatedJson(request): ValidatedJson<TodoRequest>,
) -> ApiResult<Json<TodoResponse>> {
    let service = TodoService::new(state.service_context());
    Ok(Json(service.create(request).await?))
}

/// GET /api/todo/:id
pub async fn get_todo(
    State(state): State<AppState>,
    Path(path): Path<TodoIdPath>,
) -> ApiResult<Json<TodoResponse>> {
    let service = TodoService::new(state.service_context());
    Ok(Json(service.get(path.id()?).await?))
}

/// Replace a todo
///
/// PUT /api/todo/:id
pub async fn update_todo(
    State(state): State<AppState>,
    Path(path): Path<TodoIdPath>,
    ValidatedJson(request): ValidatedJson<TodoRequest>,
) -> ApiResult<Json<TodoResponse>> {
    let service = TodoService::new(state.service_context());
    Ok(Json(service.update(path.id()?, request).await?))
}

/// DELETE /api/todo/:id
pub async fn delete_todo(
    State(state): State<AppState>,
    Path(path): Path<TodoIdPath>,
) -> ApiResult<Json<MessageResponse>> {
    let service = TodoService::new(state.service_context());
    Ok(Json(service.delete(path.id()?).await?))
}
