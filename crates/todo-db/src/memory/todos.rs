//! In-memory todo store

use std::collections::BTreeMap;

use async_trait::async_trait;
use parking_lot::RwLock;

use todo_core::entities::Todo;
use todo_core::error::DomainError;
use todo_core::traits::{RepoResult, TodoRepository};
use todo_core::value_objects::Snowflake;

#[derive(Default)]
pub struct MemoryTodoRepository {
    todos: RwLock<BTreeMap<Snowflake, Todo>>,
}

impl MemoryTodoRepository {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl TodoRepository for MemoryTodoRepository {
    async fn find_all(&self) -> RepoResult<Vec<Todo>> {
        Ok(self.todos.read().values().cloned().collect())
    }

    async fn find_by_id(&self, id: Snowflake) -> RepoResult<Option<Todo>> {
        Ok(self.todos.read().get(&id).cloned())
    }

    async fn create(&self, todo: &Todo) -> RepoResult<()> {
        let mut todos = self.todos.write();
        if todos.contains_key(&todo.id) {
            return Err(DomainError::InternalError(format!("duplicate todo id {}", todo.id)));
        }
        todos.insert(todo.id, todo.clone());
        Ok(())
    }

    async fn save(&self, todo: &Todo) -> RepoResult<()> {
        match self.todos.write().get_mut(&todo.id) {
            Some(slot) => {
                *slot = todo.clone();
                Ok(())
            }
            None => Err(DomainError::TodoNotFound(todo.id)),
        }
    }

    async fn delete(&self, id: Snowflake) -> RepoResult<bool> {
        Ok(self.todos.write().remove(&id).is_some())
    }
}
