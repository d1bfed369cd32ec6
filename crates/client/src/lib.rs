//! todos_client - CLI client for the todos API.

pub mod cli;
pub mod client;
pub mod error;
pub mod output;

pub use client::TodosClient;
pub use error::{ClientError, Result};
