//! Todo service

use chrono::Utc;
use todo_core::entities::Todo;
use todo_core::{DomainError, Snowflake};
use tracing::{debug, instrument};

use crate::dto::{MessageResponse, TodoRequest, TodoResponse};

use super::context::ServiceContext;
use super::error::ServiceResult;

pub struct TodoService<'a> {
    ctx: &'a ServiceContext,
}

impl<'a> TodoService<'a> {
    pub fn new(ctx: &'a ServiceContext) -> Self {
        Self { ctx }
    }

    #[instrument(skip(self))]
    pub async fn list(&self) -> ServiceResult<Vec<TodoResponse>> {
        let todos = self.ctx.todo_repo().find_all().await?;
        Ok(todos.iter().map(TodoResponse::from).collect())
    }

    #[instrument(skip(self))]
    pub async fn get(&self, id: Snowflake) -> ServiceResult<TodoResponse> {
        Ok(TodoResponse::from(self.find(id).await?))
    }

    #[instrument(skip(self, request))]
    pub async fn create(&self, request: TodoRequest) -> ServiceResult<TodoResponse> {
        let mut todo = Todo::new(self.ctx.generate_id(), request.task);
        todo.completed = request.completed;
        todo.start_date = request.start_date;
        todo.end_date = request.end_date;

        self.ctx.todo_repo().create(&todo).await?;
        debug!(todo_id = %todo.id, "Todo created");
        Ok(TodoResponse::from(todo))
    }

    /// Replace every editable field of a todo
    #[instrument(skip(self, request))]
    pub async fn update(&self, id: Snowflake, request: TodoRequest) -> ServiceResult<TodoResponse> {
        let mut todo = self.find(id).await?;
        todo.task = request.task;
        todo.completed = request.completed;
        todo.start_date = request.start_date;
        todo.end_date = request.end_date;
        todo.updated_at = Utc::now();

        self.ctx.todo_repo().save(&todo).await?;
        Ok(TodoResponse::from(todo))
    }

    #[instrument(skip(self))]
    pub async fn delete(&self, id: Snowflake) -> ServiceResult<MessageResponse> {
        if !self.ctx.todo_repo().delete(id).await? {
            return Err(DomainError::TodoNotFound(id).into());
        }
        Ok(MessageResponse::new("Todo was deleted successfully"))
    }

    async fn find(&self, id: Snowflake) -> ServiceResult<Todo> {
        self.ctx
            .todo_repo()
            .find_by_id(id)
            .await?
            .ok_or_else(|| DomainError::TodoNotFound(id).into())
    }
}
