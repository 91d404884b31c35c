//! Shared application state handed to every handler.

use crate::auth::credentials::CredentialStore;
use crate::auth::token::TokenService;
use crate::config::Config;
use anyhow::{Context, Result};
use sqlx::SqlitePool;
use std::sync::Arc;

/// Read-only after startup; cloned per request.
#[derive(Clone)]
pub struct AppState {
    pub pool: SqlitePool,
    pub tokens: Arc<TokenService>,
    pub credentials: CredentialStore,
}

impl AppState {
    pub fn new(pool: SqlitePool, tokens: TokenService, credentials: CredentialStore) -> Self {
        Self {
            pool,
            tokens: Arc::new(tokens),
            credentials,
        }
    }

    /// Builds the token service and credential store from configuration.
    pub fn from_config(config: &Config, pool: SqlitePool) -> Result<Self> {
        let tokens = TokenService::new(config.jwt_secret.as_bytes(), config.jwt_expires_in_seconds)
            .context("invalid token configuration")?;
        let credentials =
            CredentialStore::new(config.bcrypt_cost).context("invalid password hashing cost")?;

        Ok(Self::new(pool, tokens, credentials))
    }
}
