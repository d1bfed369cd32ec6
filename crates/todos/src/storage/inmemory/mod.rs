//! In-memory storage backend.
//!
//! This module provides an in-memory implementation of [`TodoRepository`]
//! that stores all data in a `BTreeMap` wrapped in `Arc<RwLock<_>>`. This is useful
//! for testing and development scenarios where persistence is not required.
//!
//! [`TodoRepository`]: todos_core::storage::TodoRepository

mod repository;

pub use repository::InMemoryRepository;
