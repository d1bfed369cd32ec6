//! SQLite schema definitions and SQL query constants.
//!
//! This module contains all SQL statements used by the SQLite repository,
//! following the Functional Core pattern - pure data, no I/O.

/// SQL statement to create the todo table. Safe to run on every startup.
pub const CREATE_TABLES: &str = r#"
CREATE TABLE IF NOT EXISTS todos (
    id INTEGER PRIMARY KEY AUTOINCREMENT,
    title TEXT NOT NULL,
    content TEXT NOT NULL DEFAULT '',
    completed INTEGER NOT NULL DEFAULT 0,
    created_at TEXT NOT NULL,
    updated_at TEXT NOT NULL
);

CREATE INDEX IF NOT EXISTS idx_todos_created_at ON todos(created_at);
"#;

pub const SELECT_ALL_TODOS: &str = r#"
SELECT id, title, content, completed, created_at, updated_at
FROM todos
ORDER BY created_at DESC, id DESC
"#;

pub const SELECT_TODO_BY_ID: &str = r#"
SELECT id, title, content, completed, created_at, updated_at
FROM todos
WHERE id = ?1
"#;

pub const INSERT_TODO: &str = r#"
INSERT INTO todos (title, content, completed, created_at, updated_at)
VALUES (?1, ?2, 0, ?3, ?4)
"#;

pub const UPDATE_TODO: &str = r#"
UPDATE todos
SET title = ?2, content = ?3, completed = ?4, updated_at = ?5
WHERE id = ?1
"#;

pub const DELETE_TODO: &str = r#"
DELETE FROM todos
WHERE id = ?1
"#;

pub const PING: &str = "SELECT 1";
