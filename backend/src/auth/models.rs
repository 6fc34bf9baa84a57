//! Data structures for authentication requests, responses and the
//! per-request session context.

use crate::database::models::UserProfile;
use serde::{Deserialize, Deserializer, Serialize};
use validator::Validate;

/// Registration request payload
#[derive(Debug, Default, Deserialize, Validate)]
#[serde(default)]
pub struct RegisterRequest {
    #[validate(length(min = 1, message = "All fields are required"))]
    #[serde(deserialize_with = "null_as_empty")]
    pub name: String,

    #[validate(length(min = 1, message = "All fields are required"))]
    #[serde(deserialize_with = "null_as_empty")]
    pub email: String,

    #[validate(length(min = 1, message = "All fields are required"))]
    #[serde(deserialize_with = "null_as_empty")]
    pub password: String,
}

/// Login request payload
#[derive(Debug, Default, Deserialize, Validate)]
#[serde(default)]
pub struct LoginRequest {
    #[validate(length(min = 1, message = "All fields are required"))]
    #[serde(deserialize_with = "null_as_empty")]
    pub email: String,

    #[validate(length(min = 1, message = "All fields are required"))]
    #[serde(deserialize_with = "null_as_empty")]
    pub password: String,
}

/// Treats an explicit JSON `null` like a missing field.
fn null_as_empty<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    Option::<String>::deserialize(deserializer).map(Option::unwrap_or_default)
}

/// Session token issued on register and login
#[derive(Debug, Serialize, Deserialize)]
pub struct TokenResponse {
    pub token: String,
}

/// Empty payload returned by logout
#[derive(Debug, Serialize, Deserialize)]
pub struct EmptyData {}

/// User resolved by the session guard.
///
/// `None` means the token verified but its user no longer exists; handlers
/// that need the record must check.
#[derive(Debug, Clone)]
pub struct CurrentUser(pub Option<UserProfile>);
