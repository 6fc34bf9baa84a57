//! Session guard for protected routes.
//!
//! Reads the session token from the `token` cookie, verifies it, resolves the
//! user it names, and attaches a `CurrentUser` to the request extensions
//! before handing off to the next handler.

use crate::api::common::{ErrorResponse, service_error_to_http};
use crate::auth::models::CurrentUser;
use crate::config::Config;
use crate::errors::ServiceError;
use crate::repositories::user_repository::UserRepository;
use crate::utils::cookie::{SESSION_COOKIE_NAME, get_cookie};
use crate::utils::jwt::JwtUtils;
use axum::{extract::Extension, extract::Request, middleware::Next, response::Response};
use sqlx::SqlitePool;

/// Cookie-based session authentication middleware
pub async fn session_guard(
    Extension(pool): Extension<SqlitePool>,
    Extension(jwt_utils): Extension<JwtUtils>,
    Extension(config): Extension<Config>,
    mut request: Request,
    next: Next,
) -> Result<Response, ErrorResponse> {
    let unauthorized = || service_error_to_http(ServiceError::Unauthorized, config.environment);

    let Some(token) = get_cookie(request.headers(), SESSION_COOKIE_NAME) else {
        tracing::warn!("Rejected {}: no session cookie", request.uri().path());
        return Err(unauthorized());
    };

    let claims = match jwt_utils.validate_token(&token) {
        Ok(claims) => claims,
        Err(_) => {
            tracing::warn!("Rejected {}: invalid session token", request.uri().path());
            return Err(unauthorized());
        }
    };

    // A user deleted after the token was issued resolves to `None`.
    let profile = UserRepository::new(&pool)
        .get_user_profile_by_id(claims.user_id())
        .await
        .map_err(|e| service_error_to_http(e.into(), config.environment))?;

    request.extensions_mut().insert(CurrentUser(profile));
    Ok(next.run(request).await)
}
