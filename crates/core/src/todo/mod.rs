mod error;
mod operations;
mod requests;
mod types;

pub use error::TodoError;
pub use operations::{
    current_timestamp, next_updated_at, sort_newest_first, validate_title, MAX_TITLE_LEN,
};
pub use requests::{CreateTodoRequest, UpdateTodoRequest};
pub use types::{TodoId, TodoItem};
