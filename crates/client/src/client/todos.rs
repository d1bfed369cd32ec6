//! Todo API operations.

use super::TodosClient;
use crate::error::Result;
use todos_core::todo::{CreateTodoRequest, TodoId, TodoItem, UpdateTodoRequest};

impl TodosClient {
    /// List all todos, newest first.
    pub async fn list_todos(&self) -> Result<Vec<TodoItem>> {
        let response = self.client.get(self.url("/api/todos")).send().await?;
        self.handle_response(response).await
    }

    /// Get a todo by ID.
    pub async fn get_todo(&self, id: TodoId) -> Result<TodoItem> {
        let response = self
            .client
            .get(self.url(&format!("/api/todos/{}", id)))
            .send()
            .await?;
        self.handle_response(response).await
    }

    /// Create a new todo.
    pub async fn create_todo(&self, request: &CreateTodoRequest) -> Result<TodoItem> {
        let response = self
            .client
            .post(self.url("/api/todos"))
            .json(request)
            .send()
            .await?;
        self.handle_response(response).await
    }

    /// Update a todo. Only the fields set on `request` are sent.
    pub async fn update_todo(&self, id: TodoId, request: &UpdateTodoRequest) -> Result<TodoItem> {
        let response = self
            .client
            .put(self.url(&format!("/api/todos/{}", id)))
            .json(request)
            .send()
            .await?;
        self.handle_response(response).await
    }

    /// Delete a todo.
    pub async fn delete_todo(&self, id: TodoId) -> Result<()> {
        let response = self
            .client
            .delete(self.url(&format!("/api/todos/{}", id)))
            .send()
            .await?;
        self.handle_empty_response(response).await
    }

    /// Flip the completion flag of a todo.
    pub async fn toggle_todo(&self, id: TodoId) -> Result<TodoItem> {
        let todo = self.get_todo(id).await?;
        self.update_todo(id, &UpdateTodoRequest::new().with_completed(!todo.completed))
            .await
    }
}
