//! Promo database models

use chrono::{DateTime, NaiveDate, Utc};
use promo_core::Targeting;
use sqlx::types::Json;
use sqlx::FromRow;
use uuid::Uuid;

/// Database model for the promos table
///
/// `mode` stays free text here; it is parsed into [`promo_core::PromoMode`]
/// during entity mapping so an unknown value surfaces as an
/// `InvalidPromoConfig` error instead of decoding garbage.
#[derive(Debug, Clone, FromRow)]
pub struct PromoModel {
    pub id: Uuid,
    pub company_id: Uuid,
    pub description: String,
    pub image_url: Option<String>,
    pub target: Json<Targeting>,
    pub max_count: i32,
    pub active_from: Option<NaiveDate>,
    pub active_until: Option<NaiveDate>,
    pub mode: String,
    pub promo_common: Option<String>,
    pub promo_unique: Vec<String>,
    pub active: bool,
    pub like_count: i32,
    pub comment_count: i32,
    pub used_count: i32,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl PromoModel {
    /// Remaining redemption units without consuming anything
    #[inline]
    #[must_use]
    pub fn remaining_units(&self) -> i64 {
        match self.mode.as_str() {
            "UNIQUE" => self.promo_unique.len() as i64,
            _ => i64::from(self.max_count.max(0)),
        }
    }
}

/// Promo row joined with the owning company's name
#[derive(Debug, Clone, FromRow)]
pub struct PromoWithCompanyModel {
    pub id: Uuid,
    pub company_id: Uuid,
    pub description: String,
    pub image_url: Option<String>,
    pub target: Json<Targeting>,
    pub max_count: i32,
    pub active_from: Option<NaiveDate>,
    pub active_until: Option<NaiveDate>,
    pub mode: String,
    pub promo_common: Option<String>,
    pub promo_unique: Vec<String>,
    pub active: bool,
    pub like_count: i32,
    pub comment_count: i32,
    pub used_count: i32,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    pub company_name: String,
}

/// Feed row: a promo joined with the company name and the requesting
/// user's like/activation membership
#[derive(Debug, Clone, FromRow)]
pub struct FeedItemModel {
    pub id: Uuid,
    pub company_id: Uuid,
    pub description: String,
    pub image_url: Option<String>,
    pub target: Json<Targeting>,
    pub max_count: i32,
    pub active_from: Option<NaiveDate>,
    pub active_until: Option<NaiveDate>,
    pub mode: String,
    pub promo_common: Option<String>,
    pub promo_unique: Vec<String>,
    pub active: bool,
    pub like_count: i32,
    pub comment_count: i32,
    pub used_count: i32,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    pub company_name: String,
    pub is_activated_by_user: bool,
    pub is_liked_by_user: bool,
}

/// Per-country activation count row for the stat aggregation
#[derive(Debug, Clone, FromRow)]
pub struct ActivationCountModel {
    /// Lowercased country of the activating user; NULL when the user has
    /// no country on file
    pub country: Option<String>,
    pub activations_count: i64,
}
