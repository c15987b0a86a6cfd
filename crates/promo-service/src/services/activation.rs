//! Activation service
//!
//! The redemption pipeline: load the promo, check the user against its
//! targeting, apply the repeat policy, then hand allocation to the
//! repository, which performs the code pop and activation record as one
//! serialized transaction.

use tracing::{info, instrument, warn};
use uuid::Uuid;

use promo_core::DomainError;

use crate::dto::ActivationResponse;

use super::context::ServiceContext;
use super::error::{ServiceError, ServiceResult};

/// Activation service
pub struct ActivationService<'a> {
    ctx: &'a ServiceContext,
}

impl<'a> ActivationService<'a> {
    /// Create a new ActivationService
    pub fn new(ctx: &'a ServiceContext) -> Self {
        Self { ctx }
    }

    /// Redeem a promo for the user and return the allocated code
    #[instrument(skip(self))]
    pub async fn activate(&self, user_id: Uuid, promo_id: Uuid) -> ServiceResult<ActivationResponse> {
        let promo = self
            .ctx
            .promo_repo()
            .find_by_id(promo_id)
            .await?
            .ok_or_else(|| ServiceError::not_found("Promo", promo_id.to_string()))?;

        let user = self
            .ctx
            .user_repo()
            .find_by_id(user_id)
            .await?
            .ok_or_else(|| ServiceError::not_found("User", user_id.to_string()))?;

        // Inactive and ineligible are both refusals, reported distinctly
        if let Err(e) = promo.check_eligibility(&user.other) {
            warn!(promo_id = %promo_id, user_id = %user_id, error = %e, "Activation refused");
            return Err(ServiceError::from(e));
        }

        if !self.ctx.activation().allow_repeat
            && self.ctx.user_repo().has_activated(user_id, promo_id).await?
        {
            return Err(ServiceError::from(DomainError::AlreadyActivated));
        }

        // Eligibility passed on a snapshot; allocation re-reads under the
        // row lock so the code pool itself is race-free.
        let code = self.ctx.promo_repo().allocate_code(promo_id, user_id).await?;

        info!(promo_id = %promo_id, user_id = %user_id, "Promo activated");

        Ok(ActivationResponse { code })
    }
}
