//! In-memory repository implementation.

use std::collections::BTreeMap;
use std::sync::Arc;

use async_trait::async_trait;
use tokio::sync::RwLock;

use todos_core::storage::{RepositoryError, Result, TodoRepository};
use todos_core::todo::{
    current_timestamp, sort_newest_first, CreateTodoRequest, TodoId, TodoItem, UpdateTodoRequest,
};

#[derive(Debug, Default)]
struct Store {
    todos: BTreeMap<TodoId, TodoItem>,
    /// Last id handed out. Never decreases, so deleted ids are not reused.
    last_id: TodoId,
}

/// In-memory storage backend.
///
/// Data is not persisted and will be lost when the repository is dropped.
#[derive(Debug, Clone, Default)]
pub struct InMemoryRepository {
    store: Arc<RwLock<Store>>,
}

impl InMemoryRepository {
    /// Creates a new empty in-memory repository.
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl TodoRepository for InMemoryRepository {
    async fn list_todos(&self) -> Result<Vec<TodoItem>> {
        let store = self.store.read().await;
        let mut todos: Vec<TodoItem> = store.todos.values().cloned().collect();
        sort_newest_first(&mut todos);
        Ok(todos)
    }

    async fn get_todo(&self, id: TodoId) -> Result<Option<TodoItem>> {
        let store = self.store.read().await;
        Ok(store.todos.get(&id).cloned())
    }

    async fn create_todo(&self, request: &CreateTodoRequest) -> Result<TodoItem> {
        let mut store = self.store.write().await;
        store.last_id += 1;
        let todo = TodoItem::new(
            store.last_id,
            request.title.clone(),
            request.content.clone(),
            current_timestamp(),
        );
        store.todos.insert(todo.id, todo.clone());
        Ok(todo)
    }

    async fn update_todo(&self, id: TodoId, request: UpdateTodoRequest) -> Result<TodoItem> {
        let mut store = self.store.write().await;
        let todo = store
            .todos
            .get_mut(&id)
            .ok_or_else(|| RepositoryError::todo_not_found(id))?;
        request.apply_to(todo, current_timestamp());
        Ok(todo.clone())
    }

    async fn delete_todo(&self, id: TodoId) -> Result<()> {
        let mut store = self.store.write().await;
        if store.todos.remove(&id).is_none() {
            return Err(RepositoryError::todo_not_found(id));
        }
        Ok(())
    }

    async fn ping(&self) -> Result<()> {
        Ok(())
    }
}
