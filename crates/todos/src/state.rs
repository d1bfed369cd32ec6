//! Application state with repository-based storage.
//!
//! This module defines the shared application state that is passed to all
//! request handlers. The store handle is constructed explicitly at startup and
//! injected here as a repository trait object.

use std::sync::Arc;

use todos_core::storage::TodoRepository;

use crate::config::Config;

/// Shared application state.
///
/// This is cloned for each request handler; cloning only bumps the `Arc`.
#[derive(Clone)]
pub struct AppState {
    /// Todo repository (SQLite or in-memory, per build features).
    pub todo_repo: Arc<dyn TodoRepository>,
}

impl AppState {
    /// Creates a new AppState around an already opened repository.
    pub fn new(todo_repo: Arc<dyn TodoRepository>) -> Self {
        Self { todo_repo }
    }

    /// Opens the configured SQLite store and ensures its schema exists.
    #[cfg(feature = "sqlite")]
    pub async fn from_config(config: &Config) -> anyhow::Result<Self> {
        use crate::storage::SqliteRepository;

        tracing::info!(path = %config.sqlite_path, "Using SQLite storage");
        let repo = SqliteRepository::new(&config.sqlite_path).await?;
        Ok(Self::new(Arc::new(repo)))
    }

    /// Creates an empty in-memory store.
    #[cfg(all(feature = "inmemory", not(feature = "sqlite")))]
    pub async fn from_config(_config: &Config) -> anyhow::Result<Self> {
        use crate::storage::InMemoryRepository;

        tracing::warn!("Using in-memory storage, data will not survive a restart");
        Ok(Self::new(Arc::new(InMemoryRepository::new())))
    }
}

#[cfg(test)]
impl Default for AppState {
    fn default() -> Self {
        Self::new(Arc::new(crate::storage::InMemoryRepository::new()))
    }
}
