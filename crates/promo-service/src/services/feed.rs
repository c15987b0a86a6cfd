//! Feed service
//!
//! The user-facing promo feed: paged browsing with category and activity
//! filters, plus the single-promo view in its feed representation.

use tracing::instrument;
use uuid::Uuid;

use promo_core::traits::FeedQuery;

use crate::dto::PromoForUserResponse;

use super::context::ServiceContext;
use super::error::{ServiceError, ServiceResult};
use super::promo::check_page_bounds;

/// Feed service
pub struct FeedService<'a> {
    ctx: &'a ServiceContext,
}

impl<'a> FeedService<'a> {
    /// Create a new FeedService
    pub fn new(ctx: &'a ServiceContext) -> Self {
        Self { ctx }
    }

    /// Page through the promos visible to the user
    ///
    /// The category filter is matched against the promo's stored
    /// categories, which are lowercase, so the input is folded the same
    /// way. Returns the page plus the total match count.
    #[instrument(skip(self, query))]
    pub async fn feed(
        &self,
        user_id: Uuid,
        mut query: FeedQuery,
    ) -> ServiceResult<(Vec<PromoForUserResponse>, i64)> {
        query.category = query
            .category
            .map(|category| category.trim().to_lowercase())
            .filter(|category| !category.is_empty());

        let offset = query.offset;
        let (items, total) = self.ctx.promo_repo().feed(user_id, &query).await?;

        check_page_bounds(offset, total)?;

        let responses = items.iter().map(PromoForUserResponse::from).collect();
        Ok((responses, total))
    }

    /// A single promo as the user sees it in the feed
    #[instrument(skip(self))]
    pub async fn get_promo(
        &self,
        user_id: Uuid,
        promo_id: Uuid,
    ) -> ServiceResult<PromoForUserResponse> {
        let item = self
            .ctx
            .promo_repo()
            .find_feed_item(user_id, promo_id)
            .await?
            .ok_or_else(|| ServiceError::not_found("Promo", promo_id.to_string()))?;

        Ok(PromoForUserResponse::from(&item))
    }
}
