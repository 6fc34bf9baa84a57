//! Data access layer.
//!
//! Repositories wrap the connection pool and expose typed queries per table.

pub mod user_repository;
