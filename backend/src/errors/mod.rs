//! Global application error types.
//!
//! This module defines the error taxonomy shared by every service and handler.
//! The HTTP mapping lives in `api::common`.

use crate::auth::credentials::CredentialError;
use crate::auth::token::TokenError;
use thiserror::Error;

/// Generic service error that can be used across all entities
#[derive(Debug, Error)]
pub enum ServiceError {
    /// Input failed one or more validation rules.
    #[error("Validation failed: {}", errors.join(", "))]
    Validation { errors: Vec<String> },

    /// Request shape is unusable (missing body, unparseable JSON, missing login fields).
    #[error("Bad request: {message}")]
    BadRequest { message: String },

    /// Bad credentials or bad token.
    #[error("Authentication failed: {message}")]
    Authentication { message: String },

    #[error("Permission denied: {message}")]
    PermissionDenied { message: String },

    #[error("{message}")]
    NotFound { message: String },

    #[error("{message}")]
    AlreadyExists { message: String },

    #[error("Database error: {source}")]
    Database {
        #[from]
        source: anyhow::Error,
    },

    #[error("Internal error: {message}")]
    Internal { message: String },
}

pub type ServiceResult<T> = Result<T, ServiceError>;

impl ServiceError {
    pub fn validation(errors: Vec<String>) -> Self {
        Self::Validation { errors }
    }

    pub fn bad_request(message: impl Into<String>) -> Self {
        Self::BadRequest {
            message: message.into(),
        }
    }

    pub fn authentication(message: impl Into<String>) -> Self {
        Self::Authentication {
            message: message.into(),
        }
    }

    pub fn permission_denied(message: impl Into<String>) -> Self {
        Self::PermissionDenied {
            message: message.into(),
        }
    }

    /// `entity` is the human name, e.g. "User" yields "User not found".
    pub fn not_found(entity: impl Into<String>) -> Self {
        Self::NotFound {
            message: format!("{} not found", entity.into()),
        }
    }

    /// `field` is the human name, e.g. "Email" yields "Email already exists".
    pub fn already_exists(field: impl Into<String>) -> Self {
        Self::AlreadyExists {
            message: format!("{} already exists", field.into()),
        }
    }

    pub fn internal_error(message: impl Into<String>) -> Self {
        Self::Internal {
            message: message.into(),
        }
    }
}

impl From<TokenError> for ServiceError {
    fn from(error: TokenError) -> Self {
        match error {
            TokenError::InvalidSignature | TokenError::Expired | TokenError::Malformed => {
                ServiceError::authentication(error.to_string())
            }
            other => ServiceError::internal_error(other.to_string()),
        }
    }
}

impl From<CredentialError> for ServiceError {
    fn from(error: CredentialError) -> Self {
        match error {
            CredentialError::Encoding(message) => ServiceError::validation(vec![message]),
            CredentialError::Hashing(message) => ServiceError::internal_error(message),
        }
    }
}
