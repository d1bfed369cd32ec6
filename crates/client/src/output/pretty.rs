//! Pretty output formatting.

use todos_core::todo::TodoItem;

const TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S UTC";

/// Format a todo for display.
pub fn format_todo(todo: &TodoItem) -> String {
    let mark = if todo.completed { "x" } else { " " };
    let mut output = format!("[{}] {}\n  ID: {}", mark, todo.title, todo.id);
    if !todo.content.is_empty() {
        output.push_str(&format!("\n  Content: {}", todo.content));
    }
    output.push_str(&format!(
        "\n  Created: {}",
        todo.created_at.format(TIMESTAMP_FORMAT)
    ));
    if todo.updated_at != todo.created_at {
        output.push_str(&format!(
            "\n  Updated: {}",
            todo.updated_at.format(TIMESTAMP_FORMAT)
        ));
    }
    output
}

/// Format todos for display.
pub fn format_todos(todos: &[TodoItem]) -> String {
    if todos.is_empty() {
        return "No todos found.".to_string();
    }
    let done = todos.iter().filter(|t| t.completed).count();
    let mut output = format!("TODOS ({}, {} done)\n", todos.len(), done);
    output.push_str(&"-".repeat(40));
    for todo in todos {
        output.push_str(&format!("\n{}", format_todo(todo)));
        output.push('\n');
    }
    output
}
