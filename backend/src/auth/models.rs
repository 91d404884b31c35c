//! Data structures for authentication-related entities.
//!
//! This module defines the user identity type and the request/response
//! payloads used by the login, registration and verification endpoints.

use crate::database::models::User;
use serde::{Deserialize, Serialize};
use std::fmt;
use validator::Validate;

/// Opaque, immutable user identifier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct UserId(pub i64);

impl fmt::Display for UserId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<i64> for UserId {
    fn from(id: i64) -> Self {
        UserId(id)
    }
}

/// Login request payload
#[derive(Debug, Default, Deserialize, Validate)]
pub struct LoginRequest {
    #[serde(default)]
    #[validate(required, length(min = 1))]
    pub email: Option<String>,

    #[serde(default)]
    #[validate(required, length(min = 1))]
    pub password: Option<String>,
}

/// Returned by login and registration.
#[derive(Debug, Serialize)]
pub struct AuthResponse {
    pub token: String,
    pub user: User,
    /// Token lifetime in seconds
    pub expires_in: i64,
}

#[derive(Debug, Serialize)]
pub struct VerifyResponse {
    pub user: User,
}
