//! User business logic service.
//!
//! Owns account creation, credential checks and password hashing. bcrypt is
//! CPU-bound, so hashing and verification run on tokio's blocking pool.

use crate::database::models::{CreateUser, Role, User};
use crate::errors::{ServiceError, ServiceResult};
use crate::repositories::user_repository::{UserRepository, is_unique_violation};
use bcrypt::{hash, verify};
use sqlx::SqlitePool;

pub struct UserService<'a> {
    /// Shared database connection pool
    pool: &'a SqlitePool,
    /// bcrypt work factor for new password hashes
    bcrypt_cost: u32,
}

impl<'a> UserService<'a> {
    /// Creates a new UserService instance.
    ///
    /// # Arguments
    /// * `pool` - Reference to SQLite connection pool
    /// * `bcrypt_cost` - Work factor used when hashing new passwords
    pub fn new(pool: &'a SqlitePool, bcrypt_cost: u32) -> Self {
        Self { pool, bcrypt_cost }
    }

    /// Creates a new user with the default role.
    ///
    /// # Errors
    /// Returns `ServiceError::AlreadyExists` if the email is taken, including
    /// when a concurrent registration wins the race to the UNIQUE constraint.
    pub async fn create_user(
        &self,
        name: &str,
        email: &str,
        password: &str,
    ) -> ServiceResult<User> {
        let repo = UserRepository::new(self.pool);

        if repo.email_exists(email).await? {
            return Err(ServiceError::already_exists("User"));
        }

        let password_hash = self.hash_password(password).await?;

        let data = CreateUser {
            name: name.to_string(),
            email: email.to_string(),
            password_hash,
            role: Role::default(),
        };

        match repo.create_user(data).await {
            Ok(user) => Ok(user),
            Err(error) if is_unique_violation(&error) => {
                Err(ServiceError::already_exists("User"))
            }
            Err(error) => Err(error.into()),
        }
    }

    /// Looks up a user by email and checks the candidate password.
    ///
    /// # Errors
    /// - `ServiceError::NotFound` if no user has this email
    /// - `ServiceError::Authentication` if the password does not match
    pub async fn authenticate_user(&self, email: &str, password: &str) -> ServiceResult<User> {
        let repo = UserRepository::new(self.pool);
        let user = repo
            .get_user_by_email(email)
            .await?
            .ok_or_else(|| ServiceError::not_found("User"))?;

        if !Self::verify_password(password, &user.password_hash).await? {
            return Err(ServiceError::authentication("Invalid credentials"));
        }

        Ok(user)
    }

    /// Retrieves a user by ID with existence verification.
    ///
    /// # Errors
    /// Returns `ServiceError::NotFound` if user doesn't exist
    pub async fn get_user_required(&self, id: &str) -> ServiceResult<User> {
        let repo = UserRepository::new(self.pool);
        let user = repo
            .get_user_by_id(id)
            .await?
            .ok_or_else(|| ServiceError::not_found("User"))?;
        Ok(user)
    }

    /// Function to hash a password before storing in database
    async fn hash_password(&self, password: &str) -> ServiceResult<String> {
        let password = password.to_string();
        let cost = self.bcrypt_cost;
        tokio::task::spawn_blocking(move || hash(password, cost))
            .await
            .map_err(|e| ServiceError::internal_error(format!("Hashing task failed: {}", e)))?
            .map_err(|e| ServiceError::internal_error(format!("Password hashing failed: {}", e)))
    }

    /// Function to verify a password against the stored hash
    async fn verify_password(password: &str, password_hash: &str) -> ServiceResult<bool> {
        let password = password.to_string();
        let password_hash = password_hash.to_string();
        tokio::task::spawn_blocking(move || verify(password, &password_hash))
            .await
            .map_err(|e| ServiceError::internal_error(format!("Verification task failed: {}", e)))?
            .map_err(|e| {
                ServiceError::internal_error(format!("Password verification failed: {}", e))
            })
    }
}
