//! Handler functions for user profile and management API endpoints.
//!
//! Every route here requires a bearer token. Mutating routes additionally
//! require the token's user to still exist, and update/delete only act on
//! the caller's own profile.

use crate::api::common::{
    ApiJson, ApiPath, ApiQuery, ApiResponse, PaginatedData, PaginationFilter,
};
use crate::auth::middleware::{AuthUser, CurrentUser};
use crate::auth::models::UserId;
use crate::database::models::{CreateNewUser, UpdateUserRequest, User};
use crate::errors::ServiceError;
use crate::services::user_service::UserService;
use crate::state::AppState;
use axum::{
    extract::{Json, State},
    http::StatusCode,
};

/// Lists users page by page.
#[axum::debug_handler(state = AppState)]
pub async fn list_users(
    State(state): State<AppState>,
    AuthUser(_): AuthUser,
    ApiQuery(filter): ApiQuery<PaginationFilter>,
) -> Result<Json<ApiResponse<PaginatedData<User>>>, ServiceError> {
    let page = UserService::new(&state.pool, &state.credentials)
        .list_users(&filter)
        .await?;
    Ok(Json(ApiResponse::ok(page)))
}

/// Creates a user on behalf of an authenticated caller.
#[axum::debug_handler(state = AppState)]
pub async fn create_user(
    State(state): State<AppState>,
    CurrentUser(caller): CurrentUser,
    ApiJson(payload): ApiJson<CreateNewUser>,
) -> Result<(StatusCode, Json<ApiResponse<User>>), ServiceError> {
    tracing::info!("User {} is creating a new user", caller.id);

    let user = UserService::new(&state.pool, &state.credentials)
        .create_user(payload)
        .await?;
    Ok((
        StatusCode::CREATED,
        Json(ApiResponse::success(user, "User created successfully")),
    ))
}

/// Retrieves a user by its ID.
#[axum::debug_handler(state = AppState)]
pub async fn get_user(
    State(state): State<AppState>,
    AuthUser(_): AuthUser,
    ApiPath(id): ApiPath<i64>,
) -> Result<Json<ApiResponse<User>>, ServiceError> {
    let user = UserService::new(&state.pool, &state.credentials)
        .get_user_required(UserId(id))
        .await?;
    Ok(Json(ApiResponse::ok(user)))
}

/// Updates the caller's own profile.
#[axum::debug_handler(state = AppState)]
pub async fn update_user(
    State(state): State<AppState>,
    CurrentUser(caller): CurrentUser,
    ApiPath(id): ApiPath<i64>,
    ApiJson(payload): ApiJson<UpdateUserRequest>,
) -> Result<Json<ApiResponse<User>>, ServiceError> {
    let user = UserService::new(&state.pool, &state.credentials)
        .update_user(caller.user_id(), UserId(id), payload)
        .await?;
    Ok(Json(ApiResponse::success(user, "User updated successfully")))
}

/// Deletes the caller's own profile.
#[axum::debug_handler(state = AppState)]
pub async fn delete_user(
    State(state): State<AppState>,
    CurrentUser(caller): CurrentUser,
    ApiPath(id): ApiPath<i64>,
) -> Result<Json<ApiResponse<()>>, ServiceError> {
    UserService::new(&state.pool, &state.credentials)
        .delete_user(caller.user_id(), UserId(id))
        .await?;
    Ok(Json(ApiResponse::message("User deleted successfully")))
}
