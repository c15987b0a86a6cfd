//! Promo entity <-> model mapper

use promo_core::entities::{Promo, PromoMode};
use promo_core::error::DomainError;
use promo_core::traits::{FeedItem, PromoWithCompany};

use crate::models::{FeedItemModel, PromoModel, PromoWithCompanyModel};

/// Convert PromoModel to Promo entity.
///
/// Fallible: the stored mode is free text, and anything other than the two
/// known modes is a configuration fault surfaced as `InvalidPromoConfig`
/// rather than a silently defaulted value.
impl TryFrom<PromoModel> for Promo {
    type Error = DomainError;

    fn try_from(model: PromoModel) -> Result<Self, Self::Error> {
        let mode = PromoMode::parse(&model.mode)?;

        Ok(Promo {
            id: model.id,
            company_id: model.company_id,
            description: model.description,
            image_url: model.image_url,
            target: model.target.0,
            max_count: model.max_count,
            active_from: model.active_from,
            active_until: model.active_until,
            mode,
            promo_common: model.promo_common,
            promo_unique: model.promo_unique,
            active: model.active,
            like_count: model.like_count,
            comment_count: model.comment_count,
            used_count: model.used_count,
            created_at: model.created_at,
            updated_at: model.updated_at,
        })
    }
}

/// Convert a joined company-listing row into the read model
impl TryFrom<PromoWithCompanyModel> for PromoWithCompany {
    type Error = DomainError;

    fn try_from(model: PromoWithCompanyModel) -> Result<Self, Self::Error> {
        let promo = Promo::try_from(PromoModel {
            id: model.id,
            company_id: model.company_id,
            description: model.description,
            image_url: model.image_url,
            target: model.target,
            max_count: model.max_count,
            active_from: model.active_from,
            active_until: model.active_until,
            mode: model.mode,
            promo_common: model.promo_common,
            promo_unique: model.promo_unique,
            active: model.active,
            like_count: model.like_count,
            comment_count: model.comment_count,
            used_count: model.used_count,
            created_at: model.created_at,
            updated_at: model.updated_at,
        })?;

        Ok(PromoWithCompany {
            promo,
            company_name: model.company_name,
        })
    }
}

/// Convert a joined feed row into the read model
impl TryFrom<FeedItemModel> for FeedItem {
    type Error = DomainError;

    fn try_from(model: FeedItemModel) -> Result<Self, Self::Error> {
        let promo = Promo::try_from(PromoModel {
            id: model.id,
            company_id: model.company_id,
            description: model.description,
            image_url: model.image_url,
            target: model.target,
            max_count: model.max_count,
            active_from: model.active_from,
            active_until: model.active_until,
            mode: model.mode,
            promo_common: model.promo_common,
            promo_unique: model.promo_unique,
            active: model.active,
            like_count: model.like_count,
            comment_count: model.comment_count,
            used_count: model.used_count,
            created_at: model.created_at,
            updated_at: model.updated_at,
        })?;

        Ok(FeedItem {
            promo,
            company_name: model.company_name,
            is_activated_by_user: model.is_activated_by_user,
            is_liked_by_user: model.is_liked_by_user,
        })
    }
}
