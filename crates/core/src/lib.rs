//! todos_core - domain types shared by the todos server and client.
//!
//! Everything in this crate is pure data and pure functions. Storage backends and
//! HTTP plumbing live in the `todos` crate and implement the traits defined here.

pub mod api;
pub mod storage;
pub mod todo;
