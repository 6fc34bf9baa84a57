//! Defines the HTTP routes specifically for authentication.
//!
//! Register and login are open; logout and me sit behind the session guard.
//! The router expects the pool, `JwtUtils` and `Config` extensions to be
//! layered on by the caller (see `app` in `main.rs`).

use crate::auth::handlers::*;
use crate::auth::middleware::session_guard;
use axum::{
    Router, middleware,
    routing::{get, post},
};

/// Creates the authentication router with all auth-related routes
pub fn auth_router() -> Router {
    Router::new()
        .route("/register", post(register))
        .route("/login", post(login))
        .route(
            "/logout",
            post(logout).layer(middleware::from_fn(session_guard)),
        )
        .route("/me", get(me).layer(middleware::from_fn(session_guard)))
}
