//! Shared building blocks for the HTTP API surface.
//!
//! Route groups live next to their domain (see `auth::routes`); this module
//! holds the response envelope and error mapping they all use.

pub mod common;
