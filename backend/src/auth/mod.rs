//! Authentication module for managing user accounts and sessions.
//!
//! This module provides registration, login and logout, the session guard
//! middleware that protects routes, and the routes that expose them.

pub mod handlers;
pub mod middleware;
pub mod models;
pub mod routes;
pub mod service;
