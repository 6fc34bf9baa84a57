//! Core business logic for the authentication system.
//!
//! Register and login mint a session token and record it on the user;
//! logout clears the recorded token. The recorded token is bookkeeping only:
//! a logged-out token still verifies until it expires.

use crate::api::common::validation_errors_to_message;
use crate::auth::models::*;
use crate::errors::{ServiceError, ServiceResult};
use crate::repositories::user_repository::UserRepository;
use crate::services::user_service::UserService;
use crate::utils::jwt::JwtUtils;
use sqlx::SqlitePool;
use validator::Validate;

/// Authentication service for handling registration, login and logout
pub struct AuthService<'a> {
    pool: &'a SqlitePool,
    jwt_utils: &'a JwtUtils,
    user_service: UserService<'a>,
}

impl<'a> AuthService<'a> {
    /// Create a new AuthService instance
    pub fn new(pool: &'a SqlitePool, jwt_utils: &'a JwtUtils, bcrypt_cost: u32) -> Self {
        AuthService {
            pool,
            jwt_utils,
            user_service: UserService::new(pool, bcrypt_cost),
        }
    }

    /// Create an account and open a session for it
    pub async fn register(&self, request: RegisterRequest) -> ServiceResult<TokenResponse> {
        validate_request(&request)?;

        let user = self
            .user_service
            .create_user(&request.name, &request.email, &request.password)
            .await?;

        let token = self.jwt_utils.generate_token(&user)?;
        UserRepository::new(self.pool)
            .update_refresh_token(&user.id, Some(&token))
            .await?;

        tracing::info!("Registered user {}", user.id);
        Ok(TokenResponse { token })
    }

    /// Check credentials and issue a fresh session token
    pub async fn login(&self, request: LoginRequest) -> ServiceResult<TokenResponse> {
        validate_request(&request)?;

        let user = match self
            .user_service
            .authenticate_user(&request.email, &request.password)
            .await
        {
            Ok(user) => user,
            Err(error) => {
                tracing::warn!("Login rejected for {}: {}", request.email, error);
                return Err(error);
            }
        };

        let token = self.jwt_utils.generate_token(&user)?;
        UserRepository::new(self.pool)
            .update_refresh_token(&user.id, Some(&token))
            .await?;

        tracing::info!("User {} logged in", user.id);
        Ok(TokenResponse { token })
    }

    /// Clear the recorded session of the user attached by the session guard
    pub async fn logout(&self, current_user: &CurrentUser) -> ServiceResult<()> {
        let profile = current_user
            .0
            .as_ref()
            .ok_or_else(|| ServiceError::not_found("User"))?;

        let user = self.user_service.get_user_required(&profile.id).await?;

        let updated = UserRepository::new(self.pool)
            .update_refresh_token(&user.id, None)
            .await?;
        if !updated {
            return Err(ServiceError::not_found("User"));
        }

        tracing::info!("User {} logged out", user.id);
        Ok(())
    }
}

fn validate_request(request: &impl Validate) -> ServiceResult<()> {
    request
        .validate()
        .map_err(|errors| ServiceError::validation(validation_errors_to_message(&errors)))
}
