//! User business logic service.
//!
//! Handles registration-style user creation, profile reads and the
//! owner-only update/delete rules on top of the account directory.

use crate::api::common::{PaginatedData, PaginationFilter};
use crate::auth::credentials::CredentialStore;
use crate::auth::models::UserId;
use crate::database::models::{CreateNewUser, CreateUser, UpdateUser, UpdateUserRequest, User};
use crate::errors::{ServiceError, ServiceResult};
use crate::repositories::user_repository::UserRepository;
use crate::utils::validators::{validate_user_data, validate_user_update};
use sqlx::SqlitePool;

pub struct UserService<'a> {
    /// Shared database connection pool
    pool: &'a SqlitePool,
    credentials: &'a CredentialStore,
}

impl<'a> UserService<'a> {
    /// Creates a new UserService instance.
    ///
    /// # Arguments
    /// * `pool` - Reference to SQLite connection pool
    /// * `credentials` - Password hasher shared by the process
    pub fn new(pool: &'a SqlitePool, credentials: &'a CredentialStore) -> Self {
        Self { pool, credentials }
    }

    /// Creates a new user with full validation.
    ///
    /// # Errors
    /// Returns `ServiceError` for:
    /// - Validation failures (every message is reported)
    /// - Duplicate email or username
    pub async fn create_user(&self, create_user: CreateNewUser) -> ServiceResult<User> {
        let errors = validate_user_data(
            create_user.username.as_deref(),
            create_user.email.as_deref(),
            create_user.password.as_deref(),
        );
        if !errors.is_empty() {
            return Err(ServiceError::validation(errors));
        }

        let (Some(username), Some(email), Some(password)) =
            (create_user.username, create_user.email, create_user.password)
        else {
            return Err(ServiceError::internal_error("validated user is incomplete"));
        };

        let repo = UserRepository::new(self.pool);

        if repo.email_exists(&email).await? {
            return Err(ServiceError::already_exists("Email"));
        }
        if repo.username_exists(&username).await? {
            return Err(ServiceError::already_exists("Username"));
        }

        let password_hash = self.credentials.hash_blocking(password).await?;

        let user = repo
            .create_user(CreateUser {
                username,
                email,
                password_hash,
            })
            .await
            .map_err(map_unique_violation)?;

        tracing::info!("Created user {} ({})", user.id, user.username);
        Ok(user)
    }

    /// Retrieves a user by ID with existence verification.
    ///
    /// # Errors
    /// Returns `ServiceError::NotFound` if user doesn't exist
    pub async fn get_user_required(&self, id: UserId) -> ServiceResult<User> {
        let repo = UserRepository::new(self.pool);
        let user = repo
            .get_user_by_id(id)
            .await?
            .ok_or_else(|| ServiceError::not_found("User"))?;
        Ok(user)
    }

    /// Lists one page of users.
    pub async fn list_users(&self, filter: &PaginationFilter) -> ServiceResult<PaginatedData<User>> {
        let repo = UserRepository::new(self.pool);
        let total = repo.count_users().await?;
        let items = repo.list_users(filter.limit(), filter.offset()).await?;
        Ok(PaginatedData::new(items, total, filter))
    }

    /// Updates the profile of `target`, which must be the `actor` themself.
    ///
    /// # Errors
    /// - `NotFound` when `target` does not exist
    /// - `PermissionDenied` when `actor != target`
    /// - `Validation` when a provided field is invalid
    /// - `AlreadyExists` when the new username or email belongs to someone else
    pub async fn update_user(
        &self,
        actor: UserId,
        target: UserId,
        update: UpdateUserRequest,
    ) -> ServiceResult<User> {
        self.get_user_required(target).await?;
        ensure_owner(actor, target)?;

        let errors = validate_user_update(
            update.username.as_deref(),
            update.email.as_deref(),
            update.password.as_deref(),
        );
        if !errors.is_empty() {
            return Err(ServiceError::validation(errors));
        }

        let repo = UserRepository::new(self.pool);

        if let Some(username) = update.username.as_deref() {
            if repo.username_exists_excluding(username, target).await? {
                return Err(ServiceError::already_exists("Username"));
            }
        }
        if let Some(email) = update.email.as_deref() {
            if repo.email_exists_excluding(email, target).await? {
                return Err(ServiceError::already_exists("Email"));
            }
        }

        let password_hash = match update.password {
            Some(password) => Some(self.credentials.hash_blocking(password).await?),
            None => None,
        };

        let user = repo
            .update_user(
                target,
                UpdateUser {
                    username: update.username,
                    email: update.email,
                    password_hash,
                },
            )
            .await
            .map_err(map_unique_violation)?
            .ok_or_else(|| ServiceError::not_found("User"))?;

        tracing::info!("Updated user {}", user.id);
        Ok(user)
    }

    /// Deletes `target`, which must be the `actor` themself.
    pub async fn delete_user(&self, actor: UserId, target: UserId) -> ServiceResult<()> {
        self.get_user_required(target).await?;
        ensure_owner(actor, target)?;

        let repo = UserRepository::new(self.pool);
        if !repo.delete_user(target).await? {
            return Err(ServiceError::not_found("User"));
        }

        tracing::info!("Deleted user {}", target);
        Ok(())
    }
}

fn ensure_owner(actor: UserId, target: UserId) -> ServiceResult<()> {
    if actor != target {
        tracing::warn!("User {} attempted to modify user {}", actor, target);
        return Err(ServiceError::permission_denied("Permission denied"));
    }
    Ok(())
}

/// Turns a UNIQUE constraint failure from a racing writer into a conflict.
fn map_unique_violation(error: anyhow::Error) -> ServiceError {
    if let Some(sqlx::Error::Database(db_error)) = error.downcast_ref::<sqlx::Error>() {
        if db_error.is_unique_violation() {
            let field = if db_error.message().contains("users.email") {
                "Email"
            } else {
                "Username"
            };
            return ServiceError::already_exists(field);
        }
    }
    ServiceError::from(error)
}
