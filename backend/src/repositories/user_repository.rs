//! Database repository for user management operations.
//!
//! Provides the persistence operations the authentication flow needs:
//! create, lookup by id or email, and session token bookkeeping.

use crate::database::models::{CreateUser, User, UserProfile};
use anyhow::Result;
use chrono::Utc;
use sqlx::SqlitePool;
use uuid::Uuid;

const USER_COLUMNS: &str =
    "id, name, email, password_hash, role, refresh_token, created_at, updated_at";

const PROFILE_COLUMNS: &str = "id, name, email, role, created_at, updated_at";

/// Repository for user database operations.
pub struct UserRepository<'a> {
    /// Shared SQLite connection pool
    pool: &'a SqlitePool,
}

impl<'a> UserRepository<'a> {
    /// Creates a new UserRepository instance.
    ///
    /// # Arguments
    /// * `pool` - Reference to SQLite connection pool
    pub fn new(pool: &'a SqlitePool) -> Self {
        Self { pool }
    }

    /// Creates a new user in the database.
    ///
    /// # Arguments
    /// * `user` - CreateUser DTO containing user details
    ///
    /// # Returns
    /// The newly created User with all fields populated
    pub async fn create_user(&self, user: CreateUser) -> Result<User> {
        let id = Uuid::now_v7().to_string();
        let now = Utc::now();

        let user = sqlx::query_as::<_, User>(&format!(
            r#"
            INSERT INTO users (id, name, email, password_hash, role, created_at, updated_at)
            VALUES (?, ?, ?, ?, ?, ?, ?)
            RETURNING {USER_COLUMNS}
            "#
        ))
        .bind(id)
        .bind(user.name)
        .bind(user.email)
        .bind(user.password_hash)
        .bind(user.role)
        .bind(now)
        .bind(now)
        .fetch_one(self.pool)
        .await?;

        Ok(user)
    }

    /// Retrieves a user by their unique identifier.
    ///
    /// # Returns
    /// `Some(User)` if found, `None` otherwise
    pub async fn get_user_by_id(&self, id: &str) -> Result<Option<User>> {
        let user =
            sqlx::query_as::<_, User>(&format!("SELECT {USER_COLUMNS} FROM users WHERE id = ?"))
                .bind(id)
                .fetch_optional(self.pool)
                .await?;

        Ok(user)
    }

    /// Retrieves a user by their email.
    ///
    /// # Returns
    /// `Some(User)` if found, `None` otherwise
    pub async fn get_user_by_email(&self, email: &str) -> Result<Option<User>> {
        let user = sqlx::query_as::<_, User>(&format!(
            "SELECT {USER_COLUMNS} FROM users WHERE email = ?"
        ))
        .bind(email)
        .fetch_optional(self.pool)
        .await?;

        Ok(user)
    }

    /// Retrieves a user by id without the password hash or session token.
    pub async fn get_user_profile_by_id(&self, id: &str) -> Result<Option<UserProfile>> {
        let profile = sqlx::query_as::<_, UserProfile>(&format!(
            "SELECT {PROFILE_COLUMNS} FROM users WHERE id = ?"
        ))
        .bind(id)
        .fetch_optional(self.pool)
        .await?;

        Ok(profile)
    }

    /// Checks if an email already exists in the system.
    pub async fn email_exists(&self, email: &str) -> Result<bool> {
        let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM users WHERE email = ?")
            .bind(email)
            .fetch_one(self.pool)
            .await?;

        Ok(count > 0)
    }

    /// Overwrites the stored session token; `None` clears it.
    ///
    /// # Returns
    /// `true` if a user row was updated
    pub async fn update_refresh_token(&self, id: &str, token: Option<&str>) -> Result<bool> {
        let result =
            sqlx::query("UPDATE users SET refresh_token = ?, updated_at = ? WHERE id = ?")
                .bind(token)
                .bind(Utc::now())
                .bind(id)
                .execute(self.pool)
                .await?;

        Ok(result.rows_affected() > 0)
    }
}

/// Whether an error from this repository is a UNIQUE constraint violation.
pub fn is_unique_violation(error: &anyhow::Error) -> bool {
    error
        .downcast_ref::<sqlx::Error>()
        .and_then(|error| error.as_database_error())
        .is_some_and(|error| error.is_unique_violation())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::database::models::Role;
    use crate::test_utils::test_database;

    fn new_user(email: &str) -> CreateUser {
        CreateUser {
            name: "A".to_string(),
            email: email.to_string(),
            password_hash: "hash".to_string(),
            role: Role::default(),
        }
    }

    #[tokio::test]
    async fn test_create_and_lookup() {
        let db = test_database().await;
        let repo = UserRepository::new(db.pool());

        let created = repo.create_user(new_user("a@x.com")).await.unwrap();
        assert_eq!(created.role, Role::User);
        assert!(created.refresh_token.is_none());

        let by_email = repo.get_user_by_email("a@x.com").await.unwrap().unwrap();
        assert_eq!(by_email.id, created.id);

        let profile = repo
            .get_user_profile_by_id(&created.id)
            .await
            .unwrap()
            .unwrap();
        assert_eq!(profile.email, "a@x.com");

        assert!(repo.email_exists("a@x.com").await.unwrap());
        assert!(!repo.email_exists("b@x.com").await.unwrap());
        assert!(repo.get_user_by_id("missing").await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_duplicate_email_is_unique_violation() {
        let db = test_database().await;
        let repo = UserRepository::new(db.pool());

        repo.create_user(new_user("a@x.com")).await.unwrap();
        let error = repo.create_user(new_user("a@x.com")).await.unwrap_err();
        assert!(is_unique_violation(&error));
    }

    #[tokio::test]
    async fn test_update_refresh_token() {
        let db = test_database().await;
        let repo = UserRepository::new(db.pool());
        let user = repo.create_user(new_user("a@x.com")).await.unwrap();

        assert!(repo.update_refresh_token(&user.id, Some("t1")).await.unwrap());
        let stored = repo.get_user_by_id(&user.id).await.unwrap().unwrap();
        assert_eq!(stored.refresh_token.as_deref(), Some("t1"));

        assert!(repo.update_refresh_token(&user.id, None).await.unwrap());
        let stored = repo.get_user_by_id(&user.id).await.unwrap().unwrap();
        assert!(stored.refresh_token.is_none());

        assert!(!repo.update_refresh_token("missing", None).await.unwrap());
    }
}
