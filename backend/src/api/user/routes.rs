//! Defines the HTTP routes for user profile and management.

use super::handlers::{create_user, delete_user, get_user, list_users, update_user};
use crate::state::AppState;
use axum::{Router, routing::get};

pub fn user_router() -> Router<AppState> {
    Router::new()
        .route("/", get(list_users).post(create_user))
        .route("/{id}", get(get_user).put(update_user).delete(delete_user))
}
