//! Handler functions for authentication-related API endpoints.
//!
//! These functions parse request data and delegate to `auth::service` for
//! login, registration and token verification.

use crate::api::common::{ApiJson, ApiResponse};
use crate::auth::middleware::AuthUser;
use crate::auth::models::*;
use crate::auth::service::AuthService;
use crate::database::models::CreateNewUser;
use crate::errors::ServiceError;
use crate::state::AppState;
use axum::{
    extract::{Json, State},
    http::StatusCode,
};

/// Handle user login request
#[axum::debug_handler(state = AppState)]
pub async fn login(
    State(state): State<AppState>,
    ApiJson(payload): ApiJson<LoginRequest>,
) -> Result<Json<ApiResponse<AuthResponse>>, ServiceError> {
    let response = AuthService::new(&state).login(payload).await?;
    Ok(Json(ApiResponse::success(response, "Login successful")))
}

/// Handle user registration request
#[axum::debug_handler(state = AppState)]
pub async fn register(
    State(state): State<AppState>,
    ApiJson(payload): ApiJson<CreateNewUser>,
) -> Result<(StatusCode, Json<ApiResponse<AuthResponse>>), ServiceError> {
    let response = AuthService::new(&state).register(payload).await?;
    Ok((
        StatusCode::CREATED,
        Json(ApiResponse::success(response, "User created successfully")),
    ))
}

/// Check a bearer token and return the user it belongs to
#[axum::debug_handler(state = AppState)]
pub async fn verify_token(
    State(state): State<AppState>,
    AuthUser(user_id): AuthUser,
) -> Result<Json<ApiResponse<VerifyResponse>>, ServiceError> {
    let response = AuthService::new(&state).verify(user_id).await?;
    Ok(Json(ApiResponse::success(response, "Token is valid")))
}
