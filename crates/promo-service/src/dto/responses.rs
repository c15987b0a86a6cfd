//! Response DTOs for API endpoints
//!
//! All response DTOs implement `Serialize` for JSON output. Optional
//! fields are skipped when absent so clients never see explicit nulls.

use chrono::{DateTime, NaiveDate, Utc};
use serde::Serialize;
use uuid::Uuid;

use promo_core::value_objects::{Targeting, UserAttributes};

// ============================================================================
// Common Response Types
// ============================================================================

/// Bare status acknowledgement, used by `/ping`, likes and comment deletes
#[derive(Debug, Clone, Serialize)]
pub struct StatusResponse {
    pub status: &'static str,
}

impl StatusResponse {
    pub fn ok() -> Self {
        Self { status: "ok" }
    }
}

/// Readiness response with dependency checks
#[derive(Debug, Serialize)]
pub struct ReadinessResponse {
    pub status: String,
    pub timestamp: DateTime<Utc>,
    pub checks: HealthChecks,
}

#[derive(Debug, Serialize)]
pub struct HealthChecks {
    pub database: bool,
    pub redis: bool,
}

impl ReadinessResponse {
    pub fn ready(database: bool, redis: bool) -> Self {
        let all_healthy = database && redis;
        Self {
            status: if all_healthy { "ready" } else { "not_ready" }.to_string(),
            timestamp: Utc::now(),
            checks: HealthChecks { database, redis },
        }
    }
}

// ============================================================================
// Auth Responses
// ============================================================================

/// Token issued on sign-up or sign-in
#[derive(Debug, Serialize)]
pub struct TokenResponse {
    pub token: String,
}

/// Company registration response
#[derive(Debug, Serialize)]
pub struct CompanySignUpResponse {
    pub company_id: Uuid,
    pub token: String,
}

// ============================================================================
// Profile Responses
// ============================================================================

/// User profile as seen by its owner
#[derive(Debug, Serialize)]
pub struct ProfileResponse {
    pub name: String,
    pub surname: String,
    pub email: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub avatar_url: Option<String>,
    pub other: UserAttributes,
}

// ============================================================================
// Promo Responses
// ============================================================================

/// Newly created promo
#[derive(Debug, Serialize)]
pub struct CreatedPromoResponse {
    pub id: Uuid,
}

/// Full promo view for the owning company, codes included
#[derive(Debug, Serialize)]
pub struct PromoForCompanyResponse {
    pub promo_id: Uuid,
    pub company_id: Uuid,
    pub company_name: String,
    pub description: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub image_url: Option<String>,
    pub target: Targeting,
    pub max_count: i32,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub active_from: Option<NaiveDate>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub active_until: Option<NaiveDate>,
    pub mode: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub promo_common: Option<String>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub promo_unique: Vec<String>,
    pub like_count: i32,
    pub used_count: i32,
    pub active: bool,
}

/// Redacted promo view for feed readers; codes and targeting are hidden
#[derive(Debug, Serialize)]
pub struct PromoForUserResponse {
    pub promo_id: Uuid,
    pub company_id: Uuid,
    pub company_name: String,
    pub description: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub image_url: Option<String>,
    pub active: bool,
    pub is_activated_by_user: bool,
    pub like_count: i32,
    pub is_liked_by_user: bool,
    pub comment_count: i32,
}

/// Feed page envelope
#[derive(Debug, Serialize)]
pub struct FeedResponse {
    pub status: &'static str,
    pub count: usize,
    pub data: Vec<PromoForUserResponse>,
}

impl FeedResponse {
    pub fn success(data: Vec<PromoForUserResponse>) -> Self {
        Self {
            status: "success",
            count: data.len(),
            data,
        }
    }
}

/// Activation statistics for a promo
#[derive(Debug, Serialize)]
pub struct PromoStatResponse {
    pub activations_count: i64,
    pub countries: Vec<CountryStatResponse>,
}

/// Per-country activation count, countries in ascending order
#[derive(Debug, Serialize)]
pub struct CountryStatResponse {
    pub country: String,
    pub activations_count: i64,
}

/// Redeemed promo code
#[derive(Debug, Serialize)]
pub struct ActivationResponse {
    pub code: String,
}

// ============================================================================
// Comment Responses
// ============================================================================

/// Comment with its author card
#[derive(Debug, Serialize)]
pub struct CommentResponse {
    pub id: Uuid,
    pub text: String,
    pub date: DateTime<Utc>,
    pub author: CommentAuthorResponse,
}

#[derive(Debug, Serialize)]
pub struct CommentAuthorResponse {
    pub name: String,
    pub surname: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub avatar_url: Option<String>,
}
