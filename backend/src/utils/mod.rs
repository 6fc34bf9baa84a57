//! Collection of general utility functions shared by the auth flow.
//!
//! Token issuance lives in `jwt`, cookie handling in `cookie`.

pub mod cookie;
pub mod jwt;
