//! Like service
//!
//! Idempotent like membership on promos. Repeating an operation that is
//! already in the desired state succeeds without moving the counter.

use tracing::{debug, instrument};
use uuid::Uuid;

use super::context::ServiceContext;
use super::error::{ServiceError, ServiceResult};

/// Like service
pub struct LikeService<'a> {
    ctx: &'a ServiceContext,
}

impl<'a> LikeService<'a> {
    /// Create a new LikeService
    pub fn new(ctx: &'a ServiceContext) -> Self {
        Self { ctx }
    }

    /// Add the user's like to a promo
    #[instrument(skip(self))]
    pub async fn like(&self, user_id: Uuid, promo_id: Uuid) -> ServiceResult<()> {
        self.ensure_promo_exists(promo_id).await?;

        let changed = self.ctx.promo_repo().like(promo_id, user_id).await?;
        debug!(promo_id = %promo_id, user_id = %user_id, changed, "Like recorded");
        Ok(())
    }

    /// Remove the user's like from a promo
    #[instrument(skip(self))]
    pub async fn unlike(&self, user_id: Uuid, promo_id: Uuid) -> ServiceResult<()> {
        self.ensure_promo_exists(promo_id).await?;

        let changed = self.ctx.promo_repo().unlike(promo_id, user_id).await?;
        debug!(promo_id = %promo_id, user_id = %user_id, changed, "Like removed");
        Ok(())
    }

    async fn ensure_promo_exists(&self, promo_id: Uuid) -> ServiceResult<()> {
        self.ctx
            .promo_repo()
            .find_by_id(promo_id)
            .await?
            .ok_or_else(|| ServiceError::not_found("Promo", promo_id.to_string()))?;
        Ok(())
    }
}
