//! Module for core business logic services.
//!
//! Services sit between the auth flow and the repositories, owning rules
//! such as email uniqueness and password hashing.

pub mod user_service;
