//! Input validation for user payloads.
//!
//! Every function here is pure and reports problems as human-readable
//! messages, in a stable order, so they can be returned to clients as-is.

use crate::auth::credentials::MAX_PASSWORD_BYTES;
use validator::ValidateEmail;

const MIN_USERNAME_LENGTH: usize = 3;
const MAX_USERNAME_LENGTH: usize = 80;
const MIN_PASSWORD_LENGTH: usize = 8;

/// `local@domain.tld` with an alphabetic top-level domain of two or more letters.
pub fn validate_email(email: &str) -> bool {
    if !email.validate_email() {
        return false;
    }

    let Some((_, domain)) = email.rsplit_once('@') else {
        return false;
    };

    match domain.rsplit_once('.') {
        Some((host, tld)) => {
            !host.is_empty() && tld.len() >= 2 && tld.chars().all(|c| c.is_ascii_alphabetic())
        }
        None => false,
    }
}

pub fn validate_password(password: &str) -> Result<(), String> {
    if password.chars().count() < MIN_PASSWORD_LENGTH {
        return Err(format!(
            "Password must be at least {MIN_PASSWORD_LENGTH} characters long"
        ));
    }
    if password.len() > MAX_PASSWORD_BYTES {
        return Err(format!(
            "Password must be at most {MAX_PASSWORD_BYTES} bytes"
        ));
    }
    if !password.chars().any(|c| c.is_ascii_alphabetic()) {
        return Err("Password must contain at least one letter".to_string());
    }
    if !password.chars().any(|c| c.is_ascii_digit()) {
        return Err("Password must contain at least one digit".to_string());
    }
    Ok(())
}

pub fn validate_username(username: &str) -> Result<(), String> {
    let length = username.chars().count();
    if length < MIN_USERNAME_LENGTH {
        return Err(format!(
            "Username must be at least {MIN_USERNAME_LENGTH} characters long"
        ));
    }
    if length > MAX_USERNAME_LENGTH {
        return Err(format!(
            "Username must be less than {MAX_USERNAME_LENGTH} characters"
        ));
    }
    if !username
        .chars()
        .all(|c| c.is_ascii_alphanumeric() || c == '_')
    {
        return Err(
            "Username can only contain letters, numbers, and underscores".to_string(),
        );
    }
    Ok(())
}

/// Validates a complete new-user payload.
///
/// Missing or empty fields are reported first and short-circuit the
/// format checks.
pub fn validate_user_data(
    username: Option<&str>,
    email: Option<&str>,
    password: Option<&str>,
) -> Vec<String> {
    let mut errors: Vec<String> = [
        ("username", username),
        ("email", email),
        ("password", password),
    ]
    .into_iter()
    .filter(|(_, value)| value.is_none_or(str::is_empty))
    .map(|(field, _)| format!("{field} is required"))
    .collect();

    if !errors.is_empty() {
        return errors;
    }

    errors.extend(validate_user_update(username, email, password));
    errors
}

/// Validates only the fields that are present.
pub fn validate_user_update(
    username: Option<&str>,
    email: Option<&str>,
    password: Option<&str>,
) -> Vec<String> {
    let mut errors = Vec::new();

    if let Some(email) = email {
        if !validate_email(email) {
            errors.push("Invalid email format".to_string());
        }
    }
    if let Some(Err(message)) = username.map(validate_username) {
        errors.push(message);
    }
    if let Some(Err(message)) = password.map(validate_password) {
        errors.push(message);
    }

    errors
}
