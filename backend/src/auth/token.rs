//! Stateless bearer token issuance and verification.
//!
//! Tokens are HS256 JWTs carrying `{user_id, iat, exp}`. The algorithm is fixed
//! for the process lifetime and the signing secret is loaded once at startup.
//! Nothing is stored server side, so a token stays valid until `exp`.

use chrono::{DateTime, Duration, Utc};
use jsonwebtoken::{Algorithm, DecodingKey, EncodingKey, Header, Validation, decode, encode};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::auth::models::UserId;

/// JWT claims carried by every issued token.
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Eq)]
pub struct Claims {
    pub user_id: UserId,
    /// Issued-at, epoch seconds.
    pub iat: i64,
    /// Expires-at, epoch seconds. The token is valid while `now < exp`.
    pub exp: i64,
}

impl Claims {
    pub fn user_id(&self) -> UserId {
        self.user_id
    }

    pub fn is_expired_at(&self, now: DateTime<Utc>) -> bool {
        now.timestamp() >= self.exp
    }
}

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum TokenError {
    #[error("Token is invalid")]
    InvalidSignature,
    #[error("Token has expired")]
    Expired,
    #[error("Token format invalid")]
    Malformed,
    #[error("Signing secret must not be empty")]
    EmptySecret,
    #[error("Token lifetime must be a positive number of seconds")]
    InvalidTtl,
    #[error("Token generation failed: {0}")]
    Encoding(String),
}

/// Issues and verifies tokens under one shared secret and one TTL.
pub struct TokenService {
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
    validation: Validation,
    ttl: Duration,
}

impl TokenService {
    pub fn new(secret: &[u8], ttl_seconds: u64) -> Result<Self, TokenError> {
        if secret.is_empty() {
            return Err(TokenError::EmptySecret);
        }

        let ttl = i64::try_from(ttl_seconds)
            .ok()
            .filter(|seconds| *seconds > 0)
            .and_then(Duration::try_seconds)
            .ok_or(TokenError::InvalidTtl)?;

        // Expiry is checked against the caller's clock in `verify`, after the
        // signature, so the library only enforces presence of `exp`.
        let mut validation = Validation::new(Algorithm::HS256);
        validation.validate_exp = false;
        validation.leeway = 0;
        validation.set_required_spec_claims(&["exp"]);

        Ok(TokenService {
            encoding_key: EncodingKey::from_secret(secret),
            decoding_key: DecodingKey::from_secret(secret),
            validation,
            ttl,
        })
    }

    pub fn ttl(&self) -> Duration {
        self.ttl
    }

    /// Issues a token for `user_id` valid from `now` until `now + ttl`.
    pub fn issue(&self, user_id: UserId, now: DateTime<Utc>) -> Result<String, TokenError> {
        let exp = now
            .checked_add_signed(self.ttl)
            .ok_or(TokenError::InvalidTtl)?;

        let claims = Claims {
            user_id,
            iat: now.timestamp(),
            exp: exp.timestamp(),
        };

        encode(&Header::new(Algorithm::HS256), &claims, &self.encoding_key)
            .map_err(|e| TokenError::Encoding(e.to_string()))
    }

    /// Verifies `token` at instant `now` and returns the embedded identity.
    ///
    /// Does not check that the identity still exists.
    pub fn verify(&self, token: &str, now: DateTime<Utc>) -> Result<UserId, TokenError> {
        let claims = self.decode_claims(token)?;
        if claims.is_expired_at(now) {
            return Err(TokenError::Expired);
        }
        Ok(claims.user_id())
    }

    /// Checks structure and signature only; expiry is left to the caller.
    pub fn decode_claims(&self, token: &str) -> Result<Claims, TokenError> {
        decode::<Claims>(token, &self.decoding_key, &self.validation)
            .map(|token_data| token_data.claims)
            .map_err(map_jwt_error)
    }
}

fn map_jwt_error(error: jsonwebtoken::errors::Error) -> TokenError {
    use jsonwebtoken::errors::ErrorKind;

    match error.kind() {
        ErrorKind::InvalidSignature => TokenError::InvalidSignature,
        ErrorKind::ExpiredSignature => TokenError::Expired,
        _ => TokenError::Malformed,
    }
}
