use async_trait::async_trait;

use crate::todo::{CreateTodoRequest, TodoId, TodoItem, UpdateTodoRequest};

use super::Result;

/// Repository for todo item operations.
///
/// Requests are validated by the caller; implementations persist what they are given.
#[async_trait]
pub trait TodoRepository: Send + Sync {
    /// Lists all items, most recently created first.
    async fn list_todos(&self) -> Result<Vec<TodoItem>>;

    /// Gets an item by its ID.
    async fn get_todo(&self, id: TodoId) -> Result<Option<TodoItem>>;

    /// Creates a new item and returns it with its store-assigned id and timestamps.
    async fn create_todo(&self, request: &CreateTodoRequest) -> Result<TodoItem>;

    /// Applies a partial update and returns the item as stored afterwards.
    ///
    /// Fails with `RepositoryError::NotFound` when no item has the given id.
    async fn update_todo(&self, id: TodoId, request: UpdateTodoRequest) -> Result<TodoItem>;

    /// Deletes an item by its ID.
    ///
    /// Fails with `RepositoryError::NotFound` when no item has the given id.
    async fn delete_todo(&self, id: TodoId) -> Result<()>;

    /// Checks that the underlying store answers queries.
    async fn ping(&self) -> Result<()>;
}
