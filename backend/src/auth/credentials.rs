//! Password hashing and verification.
//!
//! Digests are bcrypt strings: the random per-call salt and the cost are
//! embedded in the output, so verification needs nothing but the digest.
//! Plaintext passwords are never stored or logged.

use bcrypt::{hash, verify};
use std::sync::Arc;
use thiserror::Error;

/// Plaintext hashed once at construction to give unknown accounts a digest to
/// verify against.
const ABSENT_ACCOUNT_PLACEHOLDER: &str = "absent-account-placeholder";

/// bcrypt only reads this many bytes of input; anything past it would be
/// silently ignored.
pub const MAX_PASSWORD_BYTES: usize = 72;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum CredentialError {
    /// The plaintext cannot be hashed as given.
    #[error("{0}")]
    Encoding(String),
    /// bcrypt itself failed (bad cost, worker panic).
    #[error("Password hashing failed: {0}")]
    Hashing(String),
}

/// Hashes and verifies passwords with a fixed bcrypt cost.
///
/// Cheap to clone; clones share the absent-account digest.
#[derive(Debug, Clone)]
pub struct CredentialStore {
    cost: u32,
    absent_digest: Arc<str>,
}

impl CredentialStore {
    /// Creates a store hashing at `cost`. Fails when bcrypt rejects the cost.
    pub fn new(cost: u32) -> Result<Self, CredentialError> {
        let absent_digest = hash(ABSENT_ACCOUNT_PLACEHOLDER, cost)
            .map_err(|e| CredentialError::Hashing(e.to_string()))?;

        Ok(Self {
            cost,
            absent_digest: absent_digest.into(),
        })
    }

    /// Hashes `plaintext` with a fresh random salt.
    ///
    /// Rejects NUL characters and anything longer than [`MAX_PASSWORD_BYTES`],
    /// so two distinct accepted passwords never share a digest.
    pub fn hash(&self, plaintext: &str) -> Result<String, CredentialError> {
        if plaintext.contains('\0') {
            return Err(CredentialError::Encoding(
                "Password must not contain NUL characters".to_string(),
            ));
        }
        if plaintext.len() > MAX_PASSWORD_BYTES {
            return Err(CredentialError::Encoding(format!(
                "Password must be at most {MAX_PASSWORD_BYTES} bytes"
            )));
        }

        hash(plaintext, self.cost).map_err(|e| CredentialError::Hashing(e.to_string()))
    }

    /// Checks `plaintext` against `digest` in constant time.
    ///
    /// A malformed digest, a wrong password and a plaintext that could never
    /// have been hashed all yield `false`.
    pub fn verify(&self, plaintext: &str, digest: &str) -> bool {
        if plaintext.contains('\0') || plaintext.len() > MAX_PASSWORD_BYTES {
            return self.verify_absent(plaintext);
        }
        verify(plaintext, digest).unwrap_or(false)
    }

    /// Spends the same work as [`verify`](Self::verify) for an account that
    /// does not exist, then reports a mismatch.
    pub fn verify_absent(&self, plaintext: &str) -> bool {
        let _ = verify(plaintext, &self.absent_digest);
        false
    }

    /// [`hash`](Self::hash) on the blocking pool.
    pub async fn hash_blocking(&self, plaintext: String) -> Result<String, CredentialError> {
        let store = self.clone();
        tokio::task::spawn_blocking(move || store.hash(&plaintext))
            .await
            .map_err(|e| CredentialError::Hashing(e.to_string()))?
    }

    /// [`verify`](Self::verify) on the blocking pool. `None` means the account
    /// was not found and goes through [`verify_absent`](Self::verify_absent).
    pub async fn verify_blocking(&self, plaintext: String, digest: Option<String>) -> bool {
        let store = self.clone();
        tokio::task::spawn_blocking(move || match digest {
            Some(digest) => store.verify(&plaintext, &digest),
            None => store.verify_absent(&plaintext),
        })
        .await
        .unwrap_or(false)
    }
}
