//! Defines the HTTP routes specifically for authentication.
//!
//! These routes handle user login, registration and token verification.
//! They are designed to be nested into the main Axum router.

use crate::auth::handlers::*;
use crate::state::AppState;
use axum::{
    Router,
    routing::{get, post},
};

/// Creates the authentication router with all auth-related routes
pub fn auth_router() -> Router<AppState> {
    Router::new()
        .route("/login", post(login))
        .route("/register", post(register))
        .route("/verify", get(verify_token))
}
