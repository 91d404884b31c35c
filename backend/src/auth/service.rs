//! Core business logic for the authentication system.

use crate::auth::credentials::CredentialStore;
use crate::auth::models::*;
use crate::auth::token::TokenService;
use crate::database::models::{CreateNewUser, User};
use crate::errors::{ServiceError, ServiceResult};
use crate::repositories::user_repository::UserRepository;
use crate::services::user_service::UserService;
use crate::state::AppState;
use chrono::Utc;
use sqlx::SqlitePool;
use validator::Validate;

/// Authentication service for handling login, registration and token checks
pub struct AuthService<'a> {
    pool: &'a SqlitePool,
    tokens: &'a TokenService,
    credentials: &'a CredentialStore,
    user_service: UserService<'a>,
}

impl<'a> AuthService<'a> {
    /// Create a new AuthService over the shared application state
    pub fn new(state: &'a AppState) -> Self {
        AuthService {
            pool: &state.pool,
            tokens: &state.tokens,
            credentials: &state.credentials,
            user_service: UserService::new(&state.pool, &state.credentials),
        }
    }

    /// Authenticate a user by email and password and issue a token.
    ///
    /// Unknown email and wrong password produce the same error after the same
    /// amount of hashing work.
    pub async fn login(&self, login_request: LoginRequest) -> ServiceResult<AuthResponse> {
        if login_request.validate().is_err() {
            return Err(ServiceError::bad_request("Email and password are required"));
        }
        let (Some(email), Some(password)) = (login_request.email, login_request.password) else {
            return Err(ServiceError::bad_request("Email and password are required"));
        };

        let repo = UserRepository::new(self.pool);
        let user = repo.get_user_by_email(&email).await?;

        let digest = user.as_ref().map(|user| user.password_hash.clone());
        let verified = self.credentials.verify_blocking(password, digest).await;

        match user {
            Some(user) if verified => {
                tracing::info!("User {} logged in", user.id);
                self.issue_for(user)
            }
            _ => {
                tracing::info!("Failed login attempt for {}", email);
                Err(ServiceError::authentication("Invalid credentials"))
            }
        }
    }

    /// Create an account and sign the new user in.
    pub async fn register(&self, register_request: CreateNewUser) -> ServiceResult<AuthResponse> {
        let user = self.user_service.create_user(register_request).await?;
        tracing::info!("Registered user {} ({})", user.id, user.username);
        self.issue_for(user)
    }

    /// Resolve the identity carried by a verified token to its user record.
    pub async fn verify(&self, user_id: UserId) -> ServiceResult<VerifyResponse> {
        let user = UserRepository::new(self.pool)
            .get_user_by_id(user_id)
            .await?
            .ok_or_else(|| ServiceError::not_found("User"))?;

        Ok(VerifyResponse { user })
    }

    fn issue_for(&self, user: User) -> ServiceResult<AuthResponse> {
        let token = self.tokens.issue(user.user_id(), Utc::now())?;

        Ok(AuthResponse {
            token,
            user,
            expires_in: self.tokens.ttl().num_seconds(),
        })
    }
}
