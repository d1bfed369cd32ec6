use chrono::{DateTime, Duration, SubsecRound, Utc};

use super::error::TodoError;
use super::types::TodoItem;

/// Maximum number of characters allowed in a title.
pub const MAX_TITLE_LEN: usize = 200;

/// Validates a title before creation or update.
pub fn validate_title(title: &str) -> Result<(), TodoError> {
    if title.trim().is_empty() {
        return Err(TodoError::EmptyTitle);
    }
    if title.chars().count() > MAX_TITLE_LEN {
        return Err(TodoError::TitleTooLong);
    }
    Ok(())
}

/// Current time truncated to the microsecond precision used by the stores.
///
/// Truncating up front means an item handed back from `create` compares equal to the
/// same item read back from storage.
pub fn current_timestamp() -> DateTime<Utc> {
    Utc::now().trunc_subsecs(6)
}

/// Computes the `updated_at` value for a mutation of an item last touched at `previous`.
///
/// The result is never earlier than `now` and always strictly later than `previous`,
/// even when two mutations land within the same microsecond.
pub fn next_updated_at(previous: DateTime<Utc>, now: DateTime<Utc>) -> DateTime<Utc> {
    let now = now.trunc_subsecs(6);
    let floor = previous.trunc_subsecs(6) + Duration::microseconds(1);
    now.max(floor)
}

/// Sorts items by creation time, most recent first. Ties fall back to the higher id.
pub fn sort_newest_first(items: &mut [TodoItem]) {
    items.sort_by(|a, b| {
        b.created_at
            .cmp(&a.created_at)
            .then_with(|| b.id.cmp(&a.id))
    });
}
