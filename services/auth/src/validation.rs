//! Input validation utilities

use crate::models::LoginCredentials;

/// Validate email
pub fn validate_email(email: &str) -> Result<(), String> {
    if email.trim().is_empty() {
        return Err("Email is required".to_string());
    }

    Ok(())
}

/// Validate password
pub fn validate_password(password: &str) -> Result<(), String> {
    if password.is_empty() {
        return Err("Password is required".to_string());
    }

    Ok(())
}

/// Validate login credentials before any request is made
///
/// The backend owns every other rule; the client only refuses empty input.
pub fn validate_credentials(credentials: &LoginCredentials) -> Result<(), String> {
    validate_email(&credentials.email)?;
    validate_password(&credentials.password)
}
