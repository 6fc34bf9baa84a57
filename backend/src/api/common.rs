//! Response envelope and error mapping shared by every endpoint.
//!
//! All responses, successful or not, use the same JSON shape:
//! - `success`: whether the request succeeded
//! - `statusCode`: the HTTP status code, repeated in the body
//! - `data`: payload on success
//! - `message`: human-readable message
//! - `error`: error message on failure
//! - `stack`: error detail chain, development mode only
//!
//! # Error Handling Flow
//! 1. Service layer returns a domain-specific `ServiceError`
//! 2. `service_error_to_http` converts it to a status code and envelope
//! 3. Server-side failures are logged and their detail is withheld outside
//!    development mode

use crate::config::Environment;
use crate::errors::ServiceError;
use axum::{Json, http::StatusCode};
use serde::{Deserialize, Serialize};

/// Standard API response wrapper for all endpoints
#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ApiResponse<T> {
    /// Indicates if the request was successful
    pub success: bool,
    /// HTTP status code of the response
    pub status_code: u16,
    /// Response data (present on success)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<T>,
    /// Human-readable message
    pub message: String,
    /// Error message (present on failure)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
    /// Error detail chain (development mode only)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub stack: Option<String>,
}

/// Error half of a handler result: status plus error envelope.
pub type ErrorResponse = (StatusCode, Json<ApiResponse<()>>);

impl<T> ApiResponse<T> {
    /// Create a successful response
    pub fn success(data: T, message: impl Into<String>) -> Self {
        Self {
            success: true,
            status_code: StatusCode::OK.as_u16(),
            data: Some(data),
            message: message.into(),
            error: None,
            stack: None,
        }
    }
}

impl ApiResponse<()> {
    /// Create an error response
    pub fn error(status: StatusCode, message: impl Into<String>, stack: Option<String>) -> Self {
        let message = message.into();
        Self {
            success: false,
            status_code: status.as_u16(),
            data: None,
            error: Some(message.clone()),
            message,
            stack,
        }
    }
}

/// Converts ServiceError to appropriate HTTP response with standard format
pub fn service_error_to_http(error: ServiceError, environment: Environment) -> ErrorResponse {
    let status = match &error {
        ServiceError::Validation { .. }
        | ServiceError::AlreadyExists { .. }
        | ServiceError::Authentication { .. } => StatusCode::BAD_REQUEST,
        ServiceError::NotFound { .. } => StatusCode::NOT_FOUND,
        ServiceError::Unauthorized => StatusCode::UNAUTHORIZED,
        ServiceError::Database { .. } | ServiceError::InternalError { .. } => {
            StatusCode::INTERNAL_SERVER_ERROR
        }
    };

    let message = if status.is_server_error() {
        tracing::error!("Request failed: {:?}", error);
        "Internal Server Error".to_string()
    } else {
        error.to_string()
    };

    let stack = environment
        .is_development()
        .then(|| format!("{:?}", error));

    (status, Json(ApiResponse::error(status, message, stack)))
}

/// Flattens validator errors into a single message, one entry per distinct text.
pub fn validation_errors_to_message(errors: &validator::ValidationErrors) -> String {
    let mut messages: Vec<String> = errors
        .field_errors()
        .into_values()
        .flat_map(|errors| {
            errors.iter().map(|error| {
                error
                    .message
                    .as_ref()
                    .map(|message| message.to_string())
                    .unwrap_or_else(|| "Invalid value".to_string())
            })
        })
        .collect();
    messages.sort();
    messages.dedup();
    messages.join(", ")
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use validator::Validate;

    #[derive(Validate)]
    struct Sample {
        #[validate(length(min = 1, message = "All fields are required"))]
        a: String,
        #[validate(length(min = 1, message = "All fields are required"))]
        b: String,
    }

    #[test]
    fn test_success_envelope_shape() {
        let response = ApiResponse::success(json!({"token": "abc"}), "Login successful");
        let value = serde_json::to_value(&response).unwrap();
        assert_eq!(
            value,
            json!({
                "success": true,
                "statusCode": 200,
                "data": {"token": "abc"},
                "message": "Login successful"
            })
        );
    }

    #[test]
    fn test_client_errors_map_to_status() {
        let cases = [
            (ServiceError::validation("All fields are required"), 400),
            (ServiceError::already_exists("User"), 400),
            (ServiceError::authentication("Invalid credentials"), 400),
            (ServiceError::not_found("User"), 404),
            (ServiceError::Unauthorized, 401),
        ];

        for (error, expected) in cases {
            let message = error.to_string();
            let (status, Json(body)) = service_error_to_http(error, Environment::Production);
            assert_eq!(status.as_u16(), expected);
            assert_eq!(body.status_code, expected);
            assert!(!body.success);
            assert_eq!(body.error.as_deref(), Some(message.as_str()));
            assert!(body.stack.is_none());
        }
    }

    #[test]
    fn test_server_error_hides_detail_in_production() {
        let error: ServiceError = anyhow::anyhow!("connection refused").into();
        let (status, Json(body)) = service_error_to_http(error, Environment::Production);
        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(body.message, "Internal Server Error");
        assert!(body.stack.is_none());
    }

    #[test]
    fn test_stack_included_in_development() {
        let error: ServiceError = anyhow::anyhow!("connection refused").into();
        let (_, Json(body)) = service_error_to_http(error, Environment::Development);
        let stack = body.stack.expect("development mode includes stack");
        assert!(stack.contains("connection refused"));
    }

    #[test]
    fn test_validation_messages_are_deduplicated() {
        let sample = Sample {
            a: String::new(),
            b: String::new(),
        };
        let errors = sample.validate().unwrap_err();
        assert_eq!(
            validation_errors_to_message(&errors),
            "All fields are required"
        );
    }
}
