//! Domain errors - error types for the domain layer

use thiserror::Error;
use uuid::Uuid;

/// Domain layer errors
#[derive(Debug, Error)]
pub enum DomainError {
    // =========================================================================
    // Not Found Errors
    // =========================================================================
    #[error("User not found: {0}")]
    UserNotFound(Uuid),

    #[error("Company not found: {0}")]
    CompanyNotFound(Uuid),

    #[error("Promo not found: {0}")]
    PromoNotFound(Uuid),

    #[error("Comment not found: {0}")]
    CommentNotFound(Uuid),

    // =========================================================================
    // Validation Errors
    // =========================================================================
    #[error("Validation error: {0}")]
    ValidationError(String),

    #[error("Invalid email format")]
    InvalidEmail,

    #[error("Password too weak: {0}")]
    WeakPassword(String),

    #[error("Content too long: max {max} characters")]
    ContentTooLong { max: usize },

    #[error("active_until must be later than active_from")]
    InvalidPeriod,

    // =========================================================================
    // Authorization Errors
    // =========================================================================
    #[error("Promo is not active")]
    PromoInactive,

    #[error("User does not match the promo targeting")]
    NotEligible,

    #[error("Not the promo owner")]
    NotPromoOwner,

    #[error("Not the comment author")]
    NotCommentAuthor,

    // =========================================================================
    // Allocation Errors
    // =========================================================================
    #[error("No redemption codes remain")]
    Depleted,

    #[error("Invalid promo configuration: {0}")]
    InvalidPromoConfig(String),

    // =========================================================================
    // Conflict Errors
    // =========================================================================
    #[error("Email already in use")]
    EmailAlreadyExists,

    #[error("Promo already activated by this user")]
    AlreadyActivated,

    // =========================================================================
    // Infrastructure Errors (wrapped)
    // =========================================================================
    #[error("Database error: {0}")]
    DatabaseError(String),

    #[error("Cache error: {0}")]
    CacheError(String),

    #[error("Internal error: {0}")]
    InternalError(String),
}

impl DomainError {
    /// Get an error code string for API responses
    pub fn code(&self) -> &'static str {
        match self {
            // Not Found
            Self::UserNotFound(_) => "UNKNOWN_USER",
            Self::CompanyNotFound(_) => "UNKNOWN_COMPANY",
            Self::PromoNotFound(_) => "UNKNOWN_PROMO",
            Self::CommentNotFound(_) => "UNKNOWN_COMMENT",

            // Validation
            Self::ValidationError(_) => "VALIDATION_ERROR",
            Self::InvalidEmail => "INVALID_EMAIL",
            Self::WeakPassword(_) => "WEAK_PASSWORD",
            Self::ContentTooLong { .. } => "CONTENT_TOO_LONG",
            Self::InvalidPeriod => "INVALID_PERIOD",

            // Authorization
            Self::PromoInactive => "PROMO_INACTIVE",
            Self::NotEligible => "NOT_ELIGIBLE",
            Self::NotPromoOwner => "NOT_PROMO_OWNER",
            Self::NotCommentAuthor => "NOT_COMMENT_AUTHOR",

            // Allocation
            Self::Depleted => "DEPLETED",
            Self::InvalidPromoConfig(_) => "INVALID_CONFIGURATION",

            // Conflict
            Self::EmailAlreadyExists => "EMAIL_ALREADY_EXISTS",
            Self::AlreadyActivated => "ALREADY_ACTIVATED",

            // Infrastructure
            Self::DatabaseError(_) => "DATABASE_ERROR",
            Self::CacheError(_) => "CACHE_ERROR",
            Self::InternalError(_) => "INTERNAL_ERROR",
        }
    }

    /// Check if this is a "not found" error
    pub fn is_not_found(&self) -> bool {
        matches!(
            self,
            Self::UserNotFound(_)
                | Self::CompanyNotFound(_)
                | Self::PromoNotFound(_)
                | Self::CommentNotFound(_)
        )
    }

    /// Check if this is a validation error
    pub fn is_validation(&self) -> bool {
        matches!(
            self,
            Self::ValidationError(_)
                | Self::InvalidEmail
                | Self::WeakPassword(_)
                | Self::ContentTooLong { .. }
                | Self::InvalidPeriod
        )
    }

    /// Check if this is an authorization error
    pub fn is_authorization(&self) -> bool {
        matches!(
            self,
            Self::PromoInactive | Self::NotEligible | Self::NotPromoOwner | Self::NotCommentAuthor
        )
    }

    /// Check if this is a conflict error
    pub fn is_conflict(&self) -> bool {
        matches!(self, Self::EmailAlreadyExists | Self::AlreadyActivated)
    }

    /// Check if this is an allocation failure (depletion or corrupt config)
    pub fn is_allocation(&self) -> bool {
        matches!(self, Self::Depleted | Self::InvalidPromoConfig(_))
    }
}
