//! Entity to DTO mappers
//!
//! Implements `From` conversions from domain entities and read models to
//! response DTOs.

use promo_core::entities::User;
use promo_core::traits::{
    CommentWithAuthor, CountryActivations, FeedItem, PromoStats, PromoWithCompany,
};

use super::responses::{
    CommentAuthorResponse, CommentResponse, CountryStatResponse, ProfileResponse,
    PromoForCompanyResponse, PromoForUserResponse, PromoStatResponse,
};

// ============================================================================
// Profile Mappers
// ============================================================================

impl From<&User> for ProfileResponse {
    fn from(user: &User) -> Self {
        Self {
            name: user.name.clone(),
            surname: user.surname.clone(),
            email: user.email.clone(),
            avatar_url: user.avatar_url.clone(),
            other: user.other.clone(),
        }
    }
}

impl From<User> for ProfileResponse {
    fn from(user: User) -> Self {
        Self::from(&user)
    }
}

// ============================================================================
// Promo Mappers
// ============================================================================

impl From<&PromoWithCompany> for PromoForCompanyResponse {
    fn from(item: &PromoWithCompany) -> Self {
        let promo = &item.promo;
        Self {
            promo_id: promo.id,
            company_id: promo.company_id,
            company_name: item.company_name.clone(),
            description: promo.description.clone(),
            image_url: promo.image_url.clone(),
            target: promo.target.clone(),
            max_count: promo.max_count,
            active_from: promo.active_from,
            active_until: promo.active_until,
            mode: promo.mode.as_str().to_string(),
            promo_common: promo.promo_common.clone(),
            promo_unique: promo.promo_unique.clone(),
            like_count: promo.like_count,
            used_count: promo.used_count,
            active: promo.active,
        }
    }
}

impl From<PromoWithCompany> for PromoForCompanyResponse {
    fn from(item: PromoWithCompany) -> Self {
        Self::from(&item)
    }
}

impl From<&FeedItem> for PromoForUserResponse {
    fn from(item: &FeedItem) -> Self {
        let promo = &item.promo;
        Self {
            promo_id: promo.id,
            company_id: promo.company_id,
            company_name: item.company_name.clone(),
            description: promo.description.clone(),
            image_url: promo.image_url.clone(),
            active: promo.active,
            is_activated_by_user: item.is_activated_by_user,
            like_count: promo.like_count,
            is_liked_by_user: item.is_liked_by_user,
            comment_count: promo.comment_count,
        }
    }
}

impl From<FeedItem> for PromoForUserResponse {
    fn from(item: FeedItem) -> Self {
        Self::from(&item)
    }
}

// ============================================================================
// Stat Mappers
// ============================================================================

impl From<&CountryActivations> for CountryStatResponse {
    fn from(entry: &CountryActivations) -> Self {
        Self {
            country: entry.country.clone(),
            activations_count: entry.activations_count,
        }
    }
}

impl From<&PromoStats> for PromoStatResponse {
    fn from(stats: &PromoStats) -> Self {
        Self {
            activations_count: stats.activations_count,
            countries: stats.countries.iter().map(CountryStatResponse::from).collect(),
        }
    }
}

impl From<PromoStats> for PromoStatResponse {
    fn from(stats: PromoStats) -> Self {
        Self::from(&stats)
    }
}

// ============================================================================
// Comment Mappers
// ============================================================================

impl From<&CommentWithAuthor> for CommentResponse {
    fn from(item: &CommentWithAuthor) -> Self {
        Self {
            id: item.comment.id,
            text: item.comment.text.clone(),
            date: item.comment.date,
            author: CommentAuthorResponse {
                name: item.author_name.clone(),
                surname: item.author_surname.clone(),
                avatar_url: item.author_avatar_url.clone(),
            },
        }
    }
}

impl From<CommentWithAuthor> for CommentResponse {
    fn from(item: CommentWithAuthor) -> Self {
        Self::from(&item)
    }
}
