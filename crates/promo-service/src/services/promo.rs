//! Promo service
//!
//! Company-facing promo management: creation, listing, updates and
//! activation statistics. Ownership failures surface as not-found so a
//! company cannot probe for other companies' promo ids.

use tracing::{info, instrument};
use uuid::Uuid;

use promo_core::entities::{Promo, PromoMode};
use promo_core::traits::{PromoListQuery, PromoWithCompany};
use promo_core::DomainError;

use crate::dto::{
    CreatedPromoResponse, CreatePromoRequest, PromoForCompanyResponse, PromoStatResponse,
    UpdatePromoRequest,
};

use super::context::ServiceContext;
use super::error::{ServiceError, ServiceResult};

/// Error message for a page request past the end of a non-empty result
pub(crate) const PAGE_PAST_END: &str = "No data available for the requested page.";

/// Longest stored code, shared or unique
const MAX_CODE_LENGTH: usize = 200;

/// Promo service
pub struct PromoService<'a> {
    ctx: &'a ServiceContext,
}

impl<'a> PromoService<'a> {
    /// Create a new PromoService
    pub fn new(ctx: &'a ServiceContext) -> Self {
        Self { ctx }
    }

    /// Create a promo owned by the company
    #[instrument(skip(self, request))]
    pub async fn create_promo(
        &self,
        company_id: Uuid,
        request: CreatePromoRequest,
    ) -> ServiceResult<CreatedPromoResponse> {
        let mode = PromoMode::parse(&request.mode)
            .map_err(|_| ServiceError::validation(format!("Unknown promo mode: {}", request.mode)))?;

        let mut promo = Promo::new(company_id, request.description, mode);
        promo.image_url = request.image_url;
        promo.target = request.target;
        promo.max_count = request.max_count;
        promo.active_from = request.active_from;
        promo.active_until = request.active_until;
        promo.promo_common = request.promo_common;
        promo.promo_unique = request.promo_unique;
        if let Some(active) = request.active {
            promo.active = active;
        }

        validate_promo(&mut promo)?;

        self.ctx.promo_repo().create(&promo).await?;

        info!(promo_id = %promo.id, company_id = %company_id, "Promo created");

        Ok(CreatedPromoResponse { id: promo.id })
    }

    /// Get one of the company's promos
    #[instrument(skip(self))]
    pub async fn get_promo(
        &self,
        company_id: Uuid,
        promo_id: Uuid,
    ) -> ServiceResult<PromoForCompanyResponse> {
        let item = self.find_owned(company_id, promo_id).await?;
        Ok(PromoForCompanyResponse::from(&item))
    }

    /// List the company's promos with filtering and sorting
    ///
    /// Returns the page plus the total match count for the `X-Total-Count`
    /// header. An offset at or past the end of a non-empty result is a
    /// client error rather than an empty page.
    #[instrument(skip(self, query))]
    pub async fn list_promos(
        &self,
        company_id: Uuid,
        mut query: PromoListQuery,
    ) -> ServiceResult<(Vec<PromoForCompanyResponse>, i64)> {
        for country in &mut query.countries {
            *country = country.to_lowercase();
        }

        let offset = query.offset;
        let (items, total) = self
            .ctx
            .promo_repo()
            .list_for_company(company_id, &query)
            .await?;

        check_page_bounds(offset, total)?;

        let responses = items.iter().map(PromoForCompanyResponse::from).collect();
        Ok((responses, total))
    }

    /// Update one of the company's promos
    ///
    /// Absent fields stay unchanged. Counters never move through this
    /// path.
    #[instrument(skip(self, request))]
    pub async fn update_promo(
        &self,
        company_id: Uuid,
        promo_id: Uuid,
        request: UpdatePromoRequest,
    ) -> ServiceResult<PromoForCompanyResponse> {
        let mut item = self.find_owned(company_id, promo_id).await?;
        let promo = &mut item.promo;

        if let Some(description) = request.description {
            promo.description = description;
        }
        if let Some(image_url) = request.image_url {
            promo.image_url = Some(image_url);
        }
        if let Some(target) = request.target {
            promo.target = target;
        }
        if let Some(max_count) = request.max_count {
            promo.max_count = max_count;
        }
        if let Some(active_from) = request.active_from {
            promo.active_from = Some(active_from);
        }
        if let Some(active_until) = request.active_until {
            promo.active_until = Some(active_until);
        }
        if let Some(mode) = request.mode {
            promo.mode = PromoMode::parse(&mode)
                .map_err(|_| ServiceError::validation(format!("Unknown promo mode: {mode}")))?;
        }
        if let Some(promo_common) = request.promo_common {
            promo.promo_common = Some(promo_common);
        }
        if let Some(promo_unique) = request.promo_unique {
            promo.promo_unique = promo_unique;
        }
        if let Some(active) = request.active {
            promo.active = active;
        }

        validate_promo(promo)?;

        self.ctx.promo_repo().update(promo).await?;

        info!(promo_id = %promo_id, company_id = %company_id, "Promo updated");

        Ok(PromoForCompanyResponse::from(&item))
    }

    /// Activation statistics for one of the company's promos
    #[instrument(skip(self))]
    pub async fn promo_stats(
        &self,
        company_id: Uuid,
        promo_id: Uuid,
    ) -> ServiceResult<PromoStatResponse> {
        // Ownership gate; the aggregate itself carries no company scoping
        self.find_owned(company_id, promo_id).await?;

        let stats = self.ctx.promo_repo().activation_stats(promo_id).await?;
        Ok(PromoStatResponse::from(&stats))
    }

    async fn find_owned(
        &self,
        company_id: Uuid,
        promo_id: Uuid,
    ) -> ServiceResult<PromoWithCompany> {
        self.ctx
            .promo_repo()
            .find_for_company(company_id, promo_id)
            .await?
            .ok_or_else(|| ServiceError::not_found("Promo", promo_id.to_string()))
    }
}

/// Reject an offset at or past the end of a non-empty result set
pub(crate) fn check_page_bounds(offset: i64, total: i64) -> ServiceResult<()> {
    if total > 0 && offset >= total {
        return Err(ServiceError::validation(PAGE_PAST_END));
    }
    Ok(())
}

/// Cross-field promo rules shared by create and update
///
/// Normalizes targeting in place so stored countries and categories are
/// always lowercase.
fn validate_promo(promo: &mut Promo) -> ServiceResult<()> {
    promo.target.normalize();

    if let (Some(age_from), Some(age_until)) = (promo.target.age_from, promo.target.age_until) {
        if age_from > age_until {
            return Err(ServiceError::validation(
                "age_from must not exceed age_until",
            ));
        }
    }
    if promo.target.age_from.is_some_and(|age| age < 0)
        || promo.target.age_until.is_some_and(|age| age < 0)
    {
        return Err(ServiceError::validation("Age bounds must not be negative"));
    }

    if !promo.has_valid_period() {
        return Err(ServiceError::from(DomainError::InvalidPeriod));
    }

    match promo.mode {
        PromoMode::Common => {
            if promo.promo_common.as_deref().is_none_or(str::is_empty) {
                return Err(ServiceError::validation(
                    "COMMON mode requires promo_common",
                ));
            }
        }
        PromoMode::Unique => {
            if promo.promo_unique.iter().any(|code| code.is_empty()) {
                return Err(ServiceError::validation("Unique codes must not be empty"));
            }
        }
    }

    if promo
        .promo_common
        .as_deref()
        .is_some_and(|code| code.len() > 100)
    {
        return Err(ServiceError::validation(
            "promo_common must be at most 100 characters",
        ));
    }
    if promo
        .promo_unique
        .iter()
        .any(|code| code.len() > MAX_CODE_LENGTH)
    {
        return Err(ServiceError::validation(
            "Unique codes must be at most 200 characters",
        ));
    }

    Ok(())
}
