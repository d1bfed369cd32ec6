use thiserror::Error;

/// Errors that can occur when validating a todo item.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum TodoError {
    #[error("title is required")]
    EmptyTitle,
    #[error("title too long (max 200 characters)")]
    TitleTooLong,
}
