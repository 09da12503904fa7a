//! Login and registration input validation.
//!
//! SYSTEM CONTEXT
//! ==============
//! Views call these before handing input to the session controller so that
//! obviously bad input never costs a round trip and never touches session
//! state. Messages are user-facing.

#[cfg(test)]
#[path = "forms_test.rs"]
mod forms_test;

use crate::error::ApiError;
use crate::net::types::{LoginRequest, RegisterRequest};

/// Counted in UTF-16 code units, as browser form fields count length.
pub const MIN_PASSWORD_LEN: usize = 6;
pub const LOGIN_FAILED_MESSAGE: &str = "Login failed. Please check your credentials.";
pub const REGISTER_FAILED_MESSAGE: &str = "Registration failed. Please try again.";

#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum ValidationError {
    #[error("Please fill in all fields.")]
    MissingFields,
    #[error("Please enter a valid email address.")]
    InvalidEmail,
    #[error("Password must be at least 6 characters.")]
    PasswordTooShort,
    #[error("Passwords do not match.")]
    PasswordMismatch,
}

/// Validate the login form.
///
/// # Errors
///
/// Returns [`ValidationError::MissingFields`] if either field is empty.
pub fn validate_login(username: &str, password: &str) -> Result<LoginRequest, ValidationError> {
    if username.is_empty() || password.is_empty() {
        return Err(ValidationError::MissingFields);
    }
    Ok(LoginRequest { username: username.to_owned(), password: password.to_owned() })
}

/// Validate the registration form. Checks run in a fixed order and the first
/// failure wins.
///
/// # Errors
///
/// Returns the first [`ValidationError`] that applies.
pub fn validate_registration(
    email: &str,
    username: &str,
    password: &str,
    confirm_password: &str,
) -> Result<RegisterRequest, ValidationError> {
    if email.is_empty() || username.is_empty() || password.is_empty() || confirm_password.is_empty() {
        return Err(ValidationError::MissingFields);
    }
    if !is_valid_email(email) {
        return Err(ValidationError::InvalidEmail);
    }
    if password.encode_utf16().count() < MIN_PASSWORD_LEN {
        return Err(ValidationError::PasswordTooShort);
    }
    if password != confirm_password {
        return Err(ValidationError::PasswordMismatch);
    }
    Ok(RegisterRequest { email: email.to_owned(), username: username.to_owned(), password: password.to_owned() })
}

/// `local@domain.tld` shape: no whitespace anywhere, exactly one `@`, and a
/// dot inside the domain with text on both sides of it.
#[must_use]
pub fn is_valid_email(email: &str) -> bool {
    if email.chars().any(char::is_whitespace) {
        return false;
    }
    let Some((local, domain)) = email.split_once('@') else {
        return false;
    };
    if local.is_empty() || domain.contains('@') {
        return false;
    }
    // Any interior dot will do, so `b.com.` passes while `b.` does not.
    domain.char_indices().any(|(i, c)| c == '.' && i > 0 && i + 1 < domain.len())
}

/// Text a view should show for a failed login or registration: the server's
/// `detail` when it sent one, else `fallback`. Validation faults show their
/// own message.
#[must_use]
pub fn failure_message(err: &ApiError, fallback: &str) -> String {
    match err {
        ApiError::Validation(v) => v.to_string(),
        other => other.detail().unwrap_or(fallback).to_owned(),
    }
}
