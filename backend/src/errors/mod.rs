//! Global application error types.
//!
//! Every service operation returns a `ServiceResult`; the variants below are
//! mapped to HTTP responses in exactly one place, `api::common::service_error_to_http`.

use thiserror::Error;

/// Generic service error that can be used across all entities
#[derive(Debug, Error)]
pub enum ServiceError {
    /// Missing or malformed input.
    #[error("{message}")]
    Validation { message: String },

    /// Duplicate of a unique value, such as a registered email.
    #[error("{entity} already exists")]
    AlreadyExists { entity: String },

    #[error("{entity} not found")]
    NotFound { entity: String },

    /// Credentials were supplied but did not match.
    #[error("{message}")]
    Authentication { message: String },

    /// Missing, invalid or expired session token.
    #[error("Unauthorized")]
    Unauthorized,

    #[error("Database error: {source}")]
    Database {
        #[from]
        source: anyhow::Error,
    },

    #[error("Internal error: {message}")]
    InternalError { message: String },
}

pub type ServiceResult<T> = Result<T, ServiceError>;

impl ServiceError {
    // Helper constructors for common patterns

    pub fn validation(message: impl Into<String>) -> Self {
        Self::Validation {
            message: message.into(),
        }
    }

    pub fn already_exists(entity: impl Into<String>) -> Self {
        Self::AlreadyExists {
            entity: entity.into(),
        }
    }

    pub fn not_found(entity: impl Into<String>) -> Self {
        Self::NotFound {
            entity: entity.into(),
        }
    }

    pub fn authentication(message: impl Into<String>) -> Self {
        Self::Authentication {
            message: message.into(),
        }
    }

    pub fn internal_error(message: impl Into<String>) -> Self {
        Self::InternalError {
            message: message.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display_messages() {
        assert_eq!(
            ServiceError::validation("All fields are required").to_string(),
            "All fields are required"
        );
        assert_eq!(
            ServiceError::already_exists("User").to_string(),
            "User already exists"
        );
        assert_eq!(ServiceError::not_found("User").to_string(), "User not found");
        assert_eq!(
            ServiceError::authentication("Invalid credentials").to_string(),
            "Invalid credentials"
        );
        assert_eq!(ServiceError::Unauthorized.to_string(), "Unauthorized");
    }

    #[test]
    fn test_anyhow_converts_to_database_error() {
        let error: ServiceError = anyhow::anyhow!("disk I/O error").into();
        assert!(matches!(error, ServiceError::Database { .. }));
    }
}
