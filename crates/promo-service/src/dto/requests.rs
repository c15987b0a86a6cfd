//! Request DTOs for API endpoints
//!
//! All request DTOs implement `Deserialize` and `Validate` for input
//! validation. Cross-field rules (promo period, mode/code consistency,
//! password strength) are checked in the services, not here.

use chrono::NaiveDate;
use serde::Deserialize;
use validator::Validate;

use promo_core::value_objects::{Targeting, UserAttributes};

// ============================================================================
// Auth Requests
// ============================================================================

/// Company registration request
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct CompanySignUpRequest {
    #[validate(length(min = 1, max = 255, message = "Name must be 1-255 characters"))]
    pub name: String,

    #[validate(
        email(message = "Invalid email format"),
        length(min = 8, max = 120, message = "Email must be 8-120 characters")
    )]
    pub email: String,

    #[validate(length(min = 8, max = 60, message = "Password must be 8-60 characters"))]
    pub password: String,
}

/// User registration request
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct UserSignUpRequest {
    #[validate(length(min = 1, max = 255, message = "Name must be 1-255 characters"))]
    pub name: String,

    #[validate(length(min = 1, max = 255, message = "Surname must be 1-255 characters"))]
    pub surname: String,

    #[validate(
        email(message = "Invalid email format"),
        length(min = 8, max = 120, message = "Email must be 8-120 characters")
    )]
    pub email: String,

    #[validate(length(min = 8, max = 60, message = "Password must be 8-60 characters"))]
    pub password: String,

    #[validate(url(message = "avatar_url must be a valid URL"))]
    pub avatar_url: Option<String>,

    /// Free-form profile attributes; `age` and `country` feed targeting
    pub other: Option<UserAttributes>,
}

/// Sign-in request, shared by both principal kinds
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct SignInRequest {
    #[validate(email(message = "Invalid email format"))]
    pub email: String,

    pub password: String,
}

// ============================================================================
// Profile Requests
// ============================================================================

/// Partial profile update; absent fields stay unchanged
#[derive(Debug, Clone, Default, Deserialize, Validate)]
pub struct UpdateProfileRequest {
    #[validate(length(min = 1, max = 255, message = "Name must be 1-255 characters"))]
    pub name: Option<String>,

    #[validate(length(min = 1, max = 255, message = "Surname must be 1-255 characters"))]
    pub surname: Option<String>,

    #[validate(length(min = 8, max = 60, message = "Password must be 8-60 characters"))]
    pub password: Option<String>,

    #[validate(url(message = "avatar_url must be a valid URL"))]
    pub avatar_url: Option<String>,

    pub other: Option<UserAttributes>,
}

// ============================================================================
// Promo Requests
// ============================================================================

/// Create promo request
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct CreatePromoRequest {
    #[validate(length(min = 1, message = "Description must not be empty"))]
    pub description: String,

    #[validate(
        url(message = "image_url must be a valid URL"),
        length(max = 200, message = "image_url must be at most 200 characters")
    )]
    pub image_url: Option<String>,

    /// Targeting rules; omitted means no restriction
    #[serde(default)]
    pub target: Targeting,

    /// Redemption budget for `COMMON` mode
    #[validate(range(min = 0, message = "max_count must not be negative"))]
    #[serde(default)]
    pub max_count: i32,

    pub active_from: Option<NaiveDate>,
    pub active_until: Option<NaiveDate>,

    /// `COMMON` or `UNIQUE`
    pub mode: String,

    #[validate(length(max = 100, message = "promo_common must be at most 100 characters"))]
    pub promo_common: Option<String>,

    #[serde(default)]
    pub promo_unique: Vec<String>,

    /// Defaults to active
    pub active: Option<bool>,
}

/// Partial promo update; absent fields stay unchanged
#[derive(Debug, Clone, Default, Deserialize, Validate)]
pub struct UpdatePromoRequest {
    #[validate(length(min = 1, message = "Description must not be empty"))]
    pub description: Option<String>,

    #[validate(
        url(message = "image_url must be a valid URL"),
        length(max = 200, message = "image_url must be at most 200 characters")
    )]
    pub image_url: Option<String>,

    pub target: Option<Targeting>,

    #[validate(range(min = 0, message = "max_count must not be negative"))]
    pub max_count: Option<i32>,

    pub active_from: Option<NaiveDate>,
    pub active_until: Option<NaiveDate>,

    pub mode: Option<String>,

    #[validate(length(max = 100, message = "promo_common must be at most 100 characters"))]
    pub promo_common: Option<String>,

    pub promo_unique: Option<Vec<String>>,

    pub active: Option<bool>,
}

// ============================================================================
// Comment Requests
// ============================================================================

/// Create comment request
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct CreateCommentRequest {
    #[validate(length(min = 1, max = 1000, message = "Comment text must be 1-1000 characters"))]
    pub text: String,
}

/// Replace comment text request
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct UpdateCommentRequest {
    #[validate(length(min = 1, max = 1000, message = "Comment text must be 1-1000 characters"))]
    pub text: String,
}
