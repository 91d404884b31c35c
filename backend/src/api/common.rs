//! Shared response envelope and error mapping for the HTTP API.
//!
//! Every endpoint answers with the same JSON shape:
//! - `success`: whether the request succeeded
//! - `data`: payload on success
//! - `message`: human-readable message
//! - `errors`: list of validation messages on a 400
//! - `timestamp`: RFC 3339 time the response was produced
//!
//! # Error Handling Flow
//! 1. Services return a `ServiceError`
//! 2. `service_error_to_http` picks the status code and body
//! 3. Internal failures are logged and reported generically

use crate::errors::ServiceError;
use axum::{
    Json,
    extract::{
        FromRequest, FromRequestParts, Path, Query, Request,
        rejection::{JsonRejection, PathRejection, QueryRejection},
    },
    http::{StatusCode, request::Parts},
    response::{IntoResponse, Response},
};
use serde::{Deserialize, Serialize};

const DEFAULT_PER_PAGE: u32 = 10;
const MAX_PER_PAGE: u32 = 100;

/// Standard API response wrapper for all endpoints
#[derive(Debug, Serialize, Deserialize)]
pub struct ApiResponse<T> {
    /// Indicates if the request was successful
    pub success: bool,
    /// Response data (present on success)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<T>,
    /// Human-readable message
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
    /// Validation messages (present on validation failure)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub errors: Option<Vec<String>>,
    /// Response timestamp
    pub timestamp: String,
}

impl<T> ApiResponse<T> {
    /// Create a successful response
    pub fn success(data: T, message: impl Into<String>) -> Self {
        Self {
            success: true,
            data: Some(data),
            message: Some(message.into()),
            errors: None,
            timestamp: chrono::Utc::now().to_rfc3339(),
        }
    }

    /// Create a successful response without a message
    pub fn ok(data: T) -> Self {
        Self {
            success: true,
            data: Some(data),
            message: None,
            errors: None,
            timestamp: chrono::Utc::now().to_rfc3339(),
        }
    }
}

impl ApiResponse<()> {
    /// Create a successful response that carries only a message
    pub fn message(message: impl Into<String>) -> Self {
        Self {
            success: true,
            data: None,
            message: Some(message.into()),
            errors: None,
            timestamp: chrono::Utc::now().to_rfc3339(),
        }
    }

    /// Create an error response
    pub fn error(message: impl Into<String>) -> Self {
        Self {
            success: false,
            data: None,
            message: Some(message.into()),
            errors: None,
            timestamp: chrono::Utc::now().to_rfc3339(),
        }
    }

    /// Create a validation error response listing every problem
    pub fn validation_errors(errors: Vec<String>) -> Self {
        Self {
            success: false,
            data: None,
            message: None,
            errors: Some(errors),
            timestamp: chrono::Utc::now().to_rfc3339(),
        }
    }
}

/// Pagination parameters for list requests
#[derive(Debug, Default, Serialize, Deserialize)]
pub struct PaginationFilter {
    /// Page number (1-indexed)
    pub page: Option<u32>,
    /// Number of items per page
    pub per_page: Option<u32>,
}

impl PaginationFilter {
    /// Get page number, at least 1
    pub fn page(&self) -> u32 {
        self.page.unwrap_or(1).max(1)
    }

    /// Get per_page clamped to the allowed range
    pub fn per_page(&self) -> u32 {
        self.per_page
            .unwrap_or(DEFAULT_PER_PAGE)
            .clamp(1, MAX_PER_PAGE)
    }

    /// Calculate offset for database queries
    pub fn offset(&self) -> u64 {
        u64::from(self.page() - 1) * u64::from(self.per_page())
    }

    /// Get limit for database queries
    pub fn limit(&self) -> u32 {
        self.per_page()
    }
}

/// One page of a collection
#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PaginatedData<T> {
    pub items: Vec<T>,
    pub total: u64,
    pub page: u32,
    pub per_page: u32,
    pub total_pages: u64,
}

impl<T> PaginatedData<T> {
    pub fn new(items: Vec<T>, total: u64, filter: &PaginationFilter) -> Self {
        let per_page = filter.per_page();
        Self {
            items,
            total,
            page: filter.page(),
            per_page,
            total_pages: total.div_ceil(u64::from(per_page)),
        }
    }
}

/// Converts ServiceError to appropriate HTTP response with standard format
pub fn service_error_to_http(error: ServiceError) -> (StatusCode, Json<ApiResponse<()>>) {
    let (status, body) = match error {
        ServiceError::Validation { errors } => (
            StatusCode::BAD_REQUEST,
            ApiResponse::validation_errors(errors),
        ),
        ServiceError::BadRequest { message } => {
            (StatusCode::BAD_REQUEST, ApiResponse::error(message))
        }
        ServiceError::Authentication { message } => {
            (StatusCode::UNAUTHORIZED, ApiResponse::error(message))
        }
        ServiceError::PermissionDenied { message } => {
            (StatusCode::FORBIDDEN, ApiResponse::error(message))
        }
        ServiceError::NotFound { message } => (StatusCode::NOT_FOUND, ApiResponse::error(message)),
        ServiceError::AlreadyExists { message } => {
            (StatusCode::CONFLICT, ApiResponse::error(message))
        }
        ServiceError::Database { source } => {
            tracing::error!("Database error: {:#}", source);
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                ApiResponse::error("Internal server error"),
            )
        }
        ServiceError::Internal { message } => {
            tracing::error!("Internal error: {}", message);
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                ApiResponse::error("Internal server error"),
            )
        }
    };

    (status, Json(body))
}

impl IntoResponse for ServiceError {
    fn into_response(self) -> Response {
        service_error_to_http(self).into_response()
    }
}

/// JSON body extractor whose rejections use the standard error envelope.
pub struct ApiJson<T>(pub T);

impl<S, T> FromRequest<S> for ApiJson<T>
where
    Json<T>: FromRequest<S, Rejection = JsonRejection>,
    S: Send + Sync,
{
    type Rejection = ServiceError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        match Json::<T>::from_request(req, state).await {
            Ok(Json(value)) => Ok(ApiJson(value)),
            Err(rejection) => Err(ServiceError::bad_request(rejection.body_text())),
        }
    }
}

/// Path extractor whose rejections use the standard error envelope.
pub struct ApiPath<T>(pub T);

impl<S, T> FromRequestParts<S> for ApiPath<T>
where
    Path<T>: FromRequestParts<S, Rejection = PathRejection>,
    S: Send + Sync,
{
    type Rejection = ServiceError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        match Path::<T>::from_request_parts(parts, state).await {
            Ok(Path(value)) => Ok(ApiPath(value)),
            Err(rejection) => Err(ServiceError::bad_request(rejection.body_text())),
        }
    }
}

/// Query string extractor whose rejections use the standard error envelope.
pub struct ApiQuery<T>(pub T);

impl<S, T> FromRequestParts<S> for ApiQuery<T>
where
    Query<T>: FromRequestParts<S, Rejection = QueryRejection>,
    S: Send + Sync,
{
    type Rejection = ServiceError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        match Query::<T>::from_request_parts(parts, state).await {
            Ok(Query(value)) => Ok(ApiQuery(value)),
            Err(rejection) => Err(ServiceError::bad_request(rejection.body_text())),
        }
    }
}
