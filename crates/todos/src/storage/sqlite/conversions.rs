//! SQLite row conversion functions.
//!
//! Pure functions for converting between SQLite rows and domain types.
//! These are testable in isolation without database access.

use chrono::{DateTime, SecondsFormat, Utc};
use rusqlite::Row;

use todos_core::todo::TodoItem;

/// Convert a SQLite row to a TodoItem.
///
/// Expected columns: id, title, content, completed, created_at, updated_at
pub fn row_to_todo(row: &Row) -> rusqlite::Result<TodoItem> {
    let id: i64 = row.get(0)?;
    let title: String = row.get(1)?;
    let content: String = row.get(2)?;
    let completed: bool = row.get(3)?;
    let created_at: String = row.get(4)?;
    let updated_at: String = row.get(5)?;

    Ok(TodoItem {
        id,
        title,
        content,
        completed,
        created_at: parse_datetime(&created_at, 4)?,
        updated_at: parse_datetime(&updated_at, 5)?,
    })
}

/// Parse a datetime from RFC 3339 string.
fn parse_datetime(s: &str, column: usize) -> rusqlite::Result<DateTime<Utc>> {
    DateTime::parse_from_rfc3339(s)
        .map(|dt| dt.with_timezone(&Utc))
        .map_err(|e| {
            rusqlite::Error::FromSqlConversionFailure(
                column,
                rusqlite::types::Type::Text,
                Box::new(e),
            )
        })
}

/// Format a DateTime<Utc> for SQLite storage.
///
/// Always microseconds and a `Z` suffix, so the text sorts in time order.
pub fn format_datetime(dt: &DateTime<Utc>) -> String {
    dt.to_rfc3339_opts(SecondsFormat::Micros, true)
}
