//! Central module for organizing the application's API endpoints.
//!
//! Builds the full router: health check, authentication routes and the
//! user collection, all under `/api`.

pub mod common;
pub mod user;

use crate::api::common::ApiResponse;
use crate::auth::routes::auth_router;
use crate::state::AppState;
use axum::{Json, Router, routing::get};

/// Assembles every route and binds the shared state.
pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/api/health", get(health))
        .nest("/api/auth", auth_router())
        .nest("/api/users", user::routes::user_router())
        .with_state(state)
}

async fn health() -> Json<ApiResponse<()>> {
    Json(ApiResponse::message("API is running"))
}
