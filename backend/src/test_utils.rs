//! Fixtures shared by the unit tests: configuration, an in-memory database
//! with migrations applied, and a fully wired router.

use crate::config::{Config, Environment};
use crate::database::Database;
use crate::utils::jwt::JwtUtils;
use axum::Router;

pub const TEST_SECRET: &str = "test-secret";

pub fn test_config() -> Config {
    Config {
        // Each in-memory connection is its own database, so keep a single one.
        database_url: "sqlite::memory:".to_string(),
        max_connections: 1,
        acquire_timeout_seconds: 3,
        jwt_secret: TEST_SECRET.to_string(),
        jwt_expires_in_seconds: crate::config::DEFAULT_JWT_EXPIRES_IN_SECONDS,
        bcrypt_cost: 4,
        server_port: 0,
        environment: Environment::Production,
    }
}

pub async fn test_database() -> Database {
    let db = Database::new(&test_config())
        .await
        .expect("in-memory database");
    db.migrate().await.expect("migrations");
    db
}

pub async fn test_app() -> (Router, Database) {
    test_app_with(test_config()).await
}

pub async fn test_app_with(config: Config) -> (Router, Database) {
    let db = test_database().await;
    let jwt_utils = JwtUtils::new(&config);
    (crate::app(db.pool().clone(), jwt_utils, config), db)
}
