//! Error handling utilities for repositories

use promo_core::error::DomainError;
use sqlx::Error as SqlxError;
use uuid::Uuid;

/// Convert SQLx error to DomainError
pub fn map_db_error(e: SqlxError) -> DomainError {
    DomainError::DatabaseError(e.to_string())
}

/// Check for unique violation and return appropriate error or fallback
pub fn map_unique_violation<F>(e: SqlxError, on_unique: F) -> DomainError
where
    F: FnOnce() -> DomainError,
{
    if let Some(db_err) = e.as_database_error() {
        if db_err.is_unique_violation() {
            return on_unique();
        }
    }
    DomainError::DatabaseError(e.to_string())
}

/// Create a "user not found" error
pub fn user_not_found(id: Uuid) -> DomainError {
    DomainError::UserNotFound(id)
}

/// Create a "company not found" error
pub fn company_not_found(id: Uuid) -> DomainError {
    DomainError::CompanyNotFound(id)
}

/// Create a "promo not found" error
pub fn promo_not_found(id: Uuid) -> DomainError {
    DomainError::PromoNotFound(id)
}

/// Create a "comment not found" error
pub fn comment_not_found(id: Uuid) -> DomainError {
    DomainError::CommentNotFound(id)
}
