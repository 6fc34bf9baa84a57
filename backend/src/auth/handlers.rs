//! Handler functions for authentication-related API endpoints.
//!
//! These functions parse request data, delegate to `auth::service`, and turn
//! the outcome into the response envelope plus any session cookie change.

use crate::api::common::{ApiResponse, ErrorResponse, service_error_to_http};
use crate::auth::models::*;
use crate::auth::service::AuthService;
use crate::config::Config;
use crate::database::models::UserProfile;
use crate::errors::ServiceError;
use crate::utils::cookie::{clear_session_cookie, session_cookie};
use crate::utils::jwt::JwtUtils;
use axum::{
    extract::{Extension, Json, rejection::JsonRejection},
    http::{HeaderMap, header::SET_COOKIE},
    response::Json as ResponseJson,
};
use sqlx::SqlitePool;

type TokenResult = Result<(HeaderMap, ResponseJson<ApiResponse<TokenResponse>>), ErrorResponse>;

/// Handle user registration request
#[axum::debug_handler]
pub async fn register(
    Extension(pool): Extension<SqlitePool>,
    Extension(jwt_utils): Extension<JwtUtils>,
    Extension(config): Extension<Config>,
    payload: Result<Json<RegisterRequest>, JsonRejection>,
) -> TokenResult {
    let Json(payload) = payload.map_err(|e| rejection_to_http(e, &config))?;
    let auth_service = AuthService::new(&pool, &jwt_utils, config.bcrypt_cost);

    match auth_service.register(payload).await {
        Ok(response) => with_session_cookie(response, "Registration successful", &config),
        Err(error) => Err(service_error_to_http(error, config.environment)),
    }
}

/// Handle user login request
#[axum::debug_handler]
pub async fn login(
    Extension(pool): Extension<SqlitePool>,
    Extension(jwt_utils): Extension<JwtUtils>,
    Extension(config): Extension<Config>,
    payload: Result<Json<LoginRequest>, JsonRejection>,
) -> TokenResult {
    let Json(payload) = payload.map_err(|e| rejection_to_http(e, &config))?;
    let auth_service = AuthService::new(&pool, &jwt_utils, config.bcrypt_cost);

    match auth_service.login(payload).await {
        Ok(response) => with_session_cookie(response, "Login successful", &config),
        Err(error) => Err(service_error_to_http(error, config.environment)),
    }
}

/// Handle logout request for the session attached by the guard
#[axum::debug_handler]
pub async fn logout(
    Extension(pool): Extension<SqlitePool>,
    Extension(jwt_utils): Extension<JwtUtils>,
    Extension(config): Extension<Config>,
    Extension(current_user): Extension<CurrentUser>,
) -> Result<(HeaderMap, ResponseJson<ApiResponse<EmptyData>>), ErrorResponse> {
    let auth_service = AuthService::new(&pool, &jwt_utils, config.bcrypt_cost);

    auth_service
        .logout(&current_user)
        .await
        .map_err(|error| service_error_to_http(error, config.environment))?;

    let mut headers = HeaderMap::new();
    headers.insert(SET_COOKIE, clear_session_cookie());

    Ok((
        headers,
        ResponseJson(ApiResponse::success(EmptyData {}, "Logout successful")),
    ))
}

/// Get current user information from the session
#[axum::debug_handler]
pub async fn me(
    Extension(config): Extension<Config>,
    Extension(current_user): Extension<CurrentUser>,
) -> Result<ResponseJson<ApiResponse<UserProfile>>, ErrorResponse> {
    match current_user.0 {
        Some(profile) => Ok(ResponseJson(ApiResponse::success(
            profile,
            "User retrieved successfully",
        ))),
        None => Err(service_error_to_http(
            ServiceError::not_found("User"),
            config.environment,
        )),
    }
}

fn with_session_cookie(response: TokenResponse, message: &str, config: &Config) -> TokenResult {
    let cookie = session_cookie(&response.token).map_err(|e| {
        service_error_to_http(
            ServiceError::internal_error(format!("Invalid cookie value: {}", e)),
            config.environment,
        )
    })?;

    let mut headers = HeaderMap::new();
    headers.insert(SET_COOKIE, cookie);

    Ok((headers, ResponseJson(ApiResponse::success(response, message))))
}

fn rejection_to_http(rejection: JsonRejection, config: &Config) -> ErrorResponse {
    service_error_to_http(
        ServiceError::validation(rejection.body_text()),
        config.environment,
    )
}
