//! Password hashing and verification utilities
//!
//! Uses Argon2id for secure password hashing (OWASP recommended).

use argon2::{
    password_hash::{rand_core::OsRng, PasswordHash, PasswordHasher, PasswordVerifier, SaltString},
    Argon2,
};

use crate::error::AppError;

/// Special characters a password must draw from
const SPECIAL_CHARS: &str = "@$!%*?&";

/// Hash a password using Argon2id
///
/// # Errors
/// Returns an error if hashing fails
pub fn hash_password(password: &str) -> Result<String, AppError> {
    let salt = SaltString::generate(&mut OsRng);
    let argon2 = Argon2::default();

    argon2
        .hash_password(password.as_bytes(), &salt)
        .map(|hash| hash.to_string())
        .map_err(|e| AppError::Internal(anyhow::anyhow!("Password hashing failed: {e}")))
}

/// Verify a password against a hash
///
/// # Errors
/// Returns an error if verification fails or the hash is invalid
pub fn verify_password(password: &str, hash: &str) -> Result<bool, AppError> {
    let parsed_hash = PasswordHash::new(hash)
        .map_err(|e| AppError::Internal(anyhow::anyhow!("Invalid password hash format: {e}")))?;

    Ok(Argon2::default()
        .verify_password(password.as_bytes(), &parsed_hash)
        .is_ok())
}

/// Password service for dependency injection
#[derive(Debug, Clone, Default)]
pub struct PasswordService;

impl PasswordService {
    /// Create a new password service
    #[must_use]
    pub fn new() -> Self {
        Self
    }

    /// Hash a password
    ///
    /// # Errors
    /// Returns an error if hashing fails
    pub fn hash(&self, password: &str) -> Result<String, AppError> {
        hash_password(password)
    }

    /// Verify a password against a hash
    ///
    /// # Errors
    /// Returns an error if verification fails
    pub fn verify(&self, password: &str, hash: &str) -> Result<bool, AppError> {
        verify_password(password, hash)
    }

    /// Verify a password and return an error if invalid
    ///
    /// # Errors
    /// Returns `AppError::InvalidCredentials` if the password doesn't match
    pub fn verify_or_error(&self, password: &str, hash: &str) -> Result<(), AppError> {
        if self.verify(password, hash)? {
            Ok(())
        } else {
            Err(AppError::InvalidCredentials)
        }
    }
}

/// Validate password strength
///
/// Returns `Ok(())` if the password meets requirements:
/// - Between 8 and 60 characters
/// - Contains at least one uppercase letter
/// - Contains at least one lowercase letter
/// - Contains at least one digit
/// - Contains at least one special character from `@$!%*?&`
///
/// # Errors
/// Returns a validation error if the password doesn't meet requirements
pub fn validate_password_strength(password: &str) -> Result<(), AppError> {
    if password.len() < 8 {
        return Err(AppError::Validation(
            "Password must be at least 8 characters long".to_string(),
        ));
    }

    if password.len() > 60 {
        return Err(AppError::Validation(
            "Password must be at most 60 characters long".to_string(),
        ));
    }

    if !password.chars().any(char::is_uppercase) {
        return Err(AppError::Validation(
            "Password must contain at least one uppercase letter".to_string(),
        ));
    }

    if !password.chars().any(char::is_lowercase) {
        return Err(AppError::Validation(
            "Password must contain at least one lowercase letter".to_string(),
        ));
    }

    if !password.chars().any(|c| c.is_ascii_digit()) {
        return Err(AppError::Validation(
            "Password must contain at least one digit".to_string(),
        ));
    }

    if !password.chars().any(|c| SPECIAL_CHARS.contains(c)) {
        return Err(AppError::Validation(
            "Password must contain at least one special character (@$!%*?&)".to_string(),
        ));
    }

    Ok(())
}
