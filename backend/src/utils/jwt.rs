//! JWT token utilities for session issuance and verification.
//!
//! Tokens are self-contained: verification checks the signature and expiry
//! only and never consults the store.

use chrono::{Duration, Utc};
use jsonwebtoken::{Algorithm, DecodingKey, EncodingKey, Header, Validation, decode, encode};
use serde::{Deserialize, Serialize};

use crate::config::Config;
use crate::database::models::{Role, User};
use crate::errors::ServiceError;

/// JWT Claims structure identifying a user session
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct Claims {
    /// User ID
    pub id: String,
    /// User email
    pub email: String,
    /// User role
    pub role: Role,
    /// Token expiration timestamp
    pub exp: usize,
    /// Token issued at timestamp
    pub iat: usize,
}

/// JWT token utility for creating and validating tokens
#[derive(Clone)]
pub struct JwtUtils {
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
    validation: Validation,
    expires_in_seconds: u64,
}

impl JwtUtils {
    /// Create a new JwtUtils instance from the loaded configuration
    pub fn new(config: &Config) -> Self {
        let encoding_key = EncodingKey::from_secret(config.jwt_secret.as_bytes());
        let decoding_key = DecodingKey::from_secret(config.jwt_secret.as_bytes());

        let mut validation = Validation::new(Algorithm::HS256);
        validation.validate_exp = true;

        JwtUtils {
            encoding_key,
            decoding_key,
            validation,
            expires_in_seconds: config.jwt_expires_in_seconds,
        }
    }

    /// Generate a session token embedding the user's id, email and role
    pub fn generate_token(&self, user: &User) -> Result<String, ServiceError> {
        let now = Utc::now();
        let exp = now + Duration::seconds(self.expires_in_seconds as i64);

        let claims = Claims {
            id: user.id.clone(),
            email: user.email.clone(),
            role: user.role,
            exp: exp.timestamp() as usize,
            iat: now.timestamp() as usize,
        };

        encode(&Header::default(), &claims, &self.encoding_key)
            .map_err(|e| ServiceError::internal_error(format!("Token generation failed: {}", e)))
    }

    /// Validate and decode a JWT token
    pub fn validate_token(&self, token: &str) -> Result<Claims, ServiceError> {
        decode::<Claims>(token, &self.decoding_key, &self.validation)
            .map(|token_data| token_data.claims)
            .map_err(|e| {
                tracing::debug!("Token validation failed: {}", e);
                ServiceError::Unauthorized
            })
    }
}

impl Claims {
    pub fn user_id(&self) -> &str {
        &self.id
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_utils::test_config;

    fn sample_user() -> User {
        let now = Utc::now();
        User {
            id: "0190a1b2-c3d4-7e5f-8a9b-0c1d2e3f4a5b".to_string(),
            name: "A".to_string(),
            email: "a@x.com".to_string(),
            password_hash: "hash".to_string(),
            role: Role::User,
            refresh_token: None,
            created_at: now,
            updated_at: now,
        }
    }

    #[test]
    fn test_generated_token_round_trips_claims() {
        let jwt = JwtUtils::new(&test_config());
        let user = sample_user();

        let token = jwt.generate_token(&user).unwrap();
        let claims = jwt.validate_token(&token).unwrap();

        assert_eq!(claims.user_id(), user.id);
        assert_eq!(claims.email, user.email);
        assert_eq!(claims.role, Role::User);
        assert_eq!(claims.exp - claims.iat, 28 * 24 * 60 * 60);
    }

    #[test]
    fn test_token_signed_with_other_secret_is_rejected() {
        let jwt = JwtUtils::new(&test_config());
        let mut other_config = test_config();
        other_config.jwt_secret = "another-secret".to_string();
        let other = JwtUtils::new(&other_config);

        let token = other.generate_token(&sample_user()).unwrap();
        assert!(matches!(
            jwt.validate_token(&token),
            Err(ServiceError::Unauthorized)
        ));
    }

    #[test]
    fn test_expired_token_is_rejected() {
        let config = test_config();
        let jwt = JwtUtils::new(&config);
        let issued = Utc::now() - Duration::days(30);
        let claims = Claims {
            id: "u1".to_string(),
            email: "a@x.com".to_string(),
            role: Role::User,
            exp: (issued + Duration::days(28)).timestamp() as usize,
            iat: issued.timestamp() as usize,
        };
        let token = encode(
            &Header::default(),
            &claims,
            &EncodingKey::from_secret(config.jwt_secret.as_bytes()),
        )
        .unwrap();

        assert!(matches!(
            jwt.validate_token(&token),
            Err(ServiceError::Unauthorized)
        ));
    }

    #[test]
    fn test_garbage_token_is_rejected() {
        let jwt = JwtUtils::new(&test_config());
        assert!(jwt.validate_token("not-a-jwt").is_err());
    }
}
