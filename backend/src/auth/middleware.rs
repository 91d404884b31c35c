//! Authorization gate for protected routes.
//!
//! Protected handlers take [`AuthUser`] (or [`CurrentUser`]) as an argument, so
//! the authenticated identity is part of their signature. A request moves
//! `NoToken -> TokenPresent -> TokenParsed -> SignatureValid -> Authorized`;
//! any failed step rejects it with 401 and the handler never runs.

use crate::auth::models::UserId;
use crate::auth::token::{TokenError, TokenService};
use crate::database::models::User;
use crate::errors::ServiceError;
use crate::repositories::user_repository::UserRepository;
use crate::state::AppState;
use axum::{
    extract::FromRequestParts,
    http::{HeaderMap, header::AUTHORIZATION, request::Parts},
    response::{IntoResponse, Response},
};
use chrono::{DateTime, Utc};
use thiserror::Error;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum GateError {
    #[error("Token is missing")]
    MissingToken,
    #[error("Token format invalid")]
    MalformedHeader,
    #[error(transparent)]
    Token(#[from] TokenError),
}

impl From<GateError> for ServiceError {
    fn from(error: GateError) -> Self {
        match error {
            GateError::Token(token_error) => token_error.into(),
            other => ServiceError::authentication(other.to_string()),
        }
    }
}

impl IntoResponse for GateError {
    fn into_response(self) -> Response {
        ServiceError::from(self).into_response()
    }
}

/// Pulls the token out of `Authorization: Bearer <token>`.
pub fn bearer_token(headers: &HeaderMap) -> Result<&str, GateError> {
    let value = headers
        .get(AUTHORIZATION)
        .ok_or(GateError::MissingToken)?
        .to_str()
        .map_err(|_| GateError::MalformedHeader)?;

    let (scheme, token) = value.split_once(' ').ok_or(GateError::MalformedHeader)?;
    if !scheme.eq_ignore_ascii_case("Bearer") || token.is_empty() || token.contains(' ') {
        return Err(GateError::MalformedHeader);
    }

    Ok(token)
}

/// Runs the whole gate over a set of request headers at instant `now`.
pub fn authorize(
    headers: &HeaderMap,
    tokens: &TokenService,
    now: DateTime<Utc>,
) -> Result<UserId, GateError> {
    let token = bearer_token(headers)?;
    Ok(tokens.verify(token, now)?)
}

/// Identity proven by a valid bearer token.
///
/// The token alone is trusted; the user may have been deleted since issuance.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AuthUser(pub UserId);

impl FromRequestParts<AppState> for AuthUser {
    type Rejection = GateError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        match authorize(&parts.headers, &state.tokens, Utc::now()) {
            Ok(user_id) => Ok(AuthUser(user_id)),
            Err(error) => {
                tracing::debug!(
                    "Rejected {} {}: {:?}",
                    parts.method,
                    parts.uri.path(),
                    error
                );
                Err(error)
            }
        }
    }
}

/// [`AuthUser`] whose identity still exists in the account directory.
#[derive(Debug, Clone)]
pub struct CurrentUser(pub User);

impl FromRequestParts<AppState> for CurrentUser {
    type Rejection = ServiceError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let AuthUser(user_id) = AuthUser::from_request_parts(parts, state).await?;

        UserRepository::new(&state.pool)
            .get_user_by_id(user_id)
            .await?
            .map(CurrentUser)
            .ok_or_else(|| {
                tracing::info!("Token presented for removed user {}", user_id);
                ServiceError::authentication("User no longer exists")
            })
    }
}
