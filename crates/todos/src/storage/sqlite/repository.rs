//! SQLite repository implementation.
//!
//! Implements [`TodoRepository`] from `todos_core::storage` using SQLite.

use async_trait::async_trait;
use tokio_rusqlite::Connection;

use todos_core::storage::{RepositoryError, Result, TodoRepository};
use todos_core::todo::{current_timestamp, CreateTodoRequest, TodoId, TodoItem, UpdateTodoRequest};

use super::conversions::{format_datetime, row_to_todo};
use super::error::{map_tokio_rusqlite_error, map_tokio_rusqlite_error_with_id};
use super::schema;

const ENTITY: &str = "Todo";

/// Helper to wrap rusqlite errors for tokio_rusqlite closures.
fn wrap_err(e: rusqlite::Error) -> tokio_rusqlite::Error {
    tokio_rusqlite::Error::Rusqlite(e)
}

/// SQLite-based repository implementation.
///
/// Holds the connection handle explicitly; every query runs on the
/// `tokio_rusqlite` background thread, which serialises writers.
pub struct SqliteRepository {
    conn: Connection,
}

impl SqliteRepository {
    /// Creates a new repository with a file-based database.
    ///
    /// The database file will be created if it doesn't exist.
    /// Schema tables are created automatically.
    pub async fn new(path: &str) -> Result<Self> {
        let conn = Connection::open(path)
            .await
            .map_err(|e| RepositoryError::ConnectionFailed(e.to_string()))?;

        Self::init_schema(&conn).await?;

        tracing::debug!(path = %path, "Opened SQLite store");

        Ok(Self { conn })
    }

    /// Creates a new repository with an in-memory database.
    ///
    /// Useful for testing - data is lost when the connection is dropped.
    pub async fn new_in_memory() -> Result<Self> {
        let conn = Connection::open_in_memory()
            .await
            .map_err(|e| RepositoryError::ConnectionFailed(e.to_string()))?;

        Self::init_schema(&conn).await?;

        Ok(Self { conn })
    }

    /// Initialize the database schema.
    async fn init_schema(conn: &Connection) -> Result<()> {
        conn.call(|conn| {
            conn.execute_batch(schema::CREATE_TABLES)
                .map_err(wrap_err)?;
            Ok(())
        })
        .await
        .map_err(|e| map_tokio_rusqlite_error(e, ENTITY))
    }
}

#[async_trait]
impl TodoRepository for SqliteRepository {
    async fn list_todos(&self) -> Result<Vec<TodoItem>> {
        self.conn
            .call(|conn| {
                let mut stmt = conn.prepare(schema::SELECT_ALL_TODOS).map_err(wrap_err)?;
                let rows = stmt.query_map([], row_to_todo).map_err(wrap_err)?;

                let mut todos = Vec::new();
                for row_result in rows {
                    todos.push(row_result.map_err(wrap_err)?);
                }
                Ok(todos)
            })
            .await
            .map_err(|e| map_tokio_rusqlite_error(e, ENTITY))
    }

    async fn get_todo(&self, id: TodoId) -> Result<Option<TodoItem>> {
        self.conn
            .call(move |conn| {
                let mut stmt = conn.prepare(schema::SELECT_TODO_BY_ID).map_err(wrap_err)?;
                match stmt.query_row([id], row_to_todo) {
                    Ok(todo) => Ok(Some(todo)),
                    Err(rusqlite::Error::QueryReturnedNoRows) => Ok(None),
                    Err(e) => Err(wrap_err(e)),
                }
            })
            .await
            .map_err(|e| map_tokio_rusqlite_error_with_id(e, ENTITY, id.to_string()))
    }

    async fn create_todo(&self, request: &CreateTodoRequest) -> Result<TodoItem> {
        let title = request.title.clone();
        let content = request.content.clone();
        let now = current_timestamp();
        let timestamp = format_datetime(&now);

        self.conn
            .call(move |conn| {
                conn.execute(
                    schema::INSERT_TODO,
                    rusqlite::params![title, content, timestamp, timestamp],
                )
                .map_err(wrap_err)?;
                let id = conn.last_insert_rowid();
                Ok(TodoItem::new(id, title, content, now))
            })
            .await
            .map_err(|e| map_tokio_rusqlite_error(e, ENTITY))
    }

    async fn update_todo(&self, id: TodoId, request: UpdateTodoRequest) -> Result<TodoItem> {
        let now = current_timestamp();

        self.conn
            .call(move |conn| {
                let tx = conn.transaction().map_err(wrap_err)?;

                let mut todo = tx
                    .query_row(schema::SELECT_TODO_BY_ID, [id], row_to_todo)
                    .map_err(wrap_err)?;
                request.apply_to(&mut todo, now);

                tx.execute(
                    schema::UPDATE_TODO,
                    rusqlite::params![
                        todo.id,
                        todo.title,
                        todo.content,
                        todo.completed,
                        format_datetime(&todo.updated_at)
                    ],
                )
                .map_err(wrap_err)?;

                let stored = tx
                    .query_row(schema::SELECT_TODO_BY_ID, [id], row_to_todo)
                    .map_err(wrap_err)?;
                tx.commit().map_err(wrap_err)?;
                Ok(stored)
            })
            .await
            .map_err(|e| map_tokio_rusqlite_error_with_id(e, ENTITY, id.to_string()))
    }

    async fn delete_todo(&self, id: TodoId) -> Result<()> {
        self.conn
            .call(move |conn| {
                let rows = conn
                    .execute(schema::DELETE_TODO, [id])
                    .map_err(wrap_err)?;
                if rows == 0 {
                    Err(wrap_err(rusqlite::Error::QueryReturnedNoRows))
                } else {
                    Ok(())
                }
            })
            .await
            .map_err(|e| map_tokio_rusqlite_error_with_id(e, ENTITY, id.to_string()))
    }

    async fn ping(&self) -> Result<()> {
        self.conn
            .call(|conn| {
                conn.query_row(schema::PING, [], |row| row.get::<_, i64>(0))
                    .map_err(wrap_err)?;
                Ok(())
            })
            .await
            .map_err(|e| map_tokio_rusqlite_error(e, ENTITY))
    }
}
