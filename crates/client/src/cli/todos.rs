//! Todo CLI commands.

use clap::{Parser, Subcommand};
use todos_core::todo::TodoId;

/// Todo management commands.
#[derive(Debug, Parser)]
pub struct TodosCommand {
    #[command(subcommand)]
    pub action: TodosAction,
}

/// Available todo actions.
#[derive(Debug, Subcommand)]
pub enum TodosAction {
    /// List all todos, newest first.
    List,
    /// Create a new todo.
    Create {
        /// Todo title.
        #[arg(long)]
        title: String,
        /// Optional free-form content.
        #[arg(long, default_value = "")]
        content: String,
    },
    /// Get todo by ID.
    Get {
        /// Todo ID.
        id: TodoId,
    },
    /// Update a todo. Omitted fields are left unchanged.
    Update {
        /// Todo ID.
        id: TodoId,
        /// New title.
        #[arg(long)]
        title: Option<String>,
        /// New content.
        #[arg(long)]
        content: Option<String>,
        /// Mark as completed or not.
        #[arg(long)]
        completed: Option<bool>,
    },
    /// Delete todo by ID.
    Delete {
        /// Todo ID.
        id: TodoId,
    },
    /// Toggle completion status.
    Toggle {
        /// Todo ID.
        id: TodoId,
    },
}
