//! Company promo handlers
//!
//! Endpoints for creating, listing, and editing a company's promos,
//! plus the activation statistics view.

use axum::{extract::State, Json};
use axum_extra::extract::Query;
use promo_core::{PromoListQuery, PromoSort};
use promo_service::{
    CreatePromoRequest, CreatedPromoResponse, PromoForCompanyResponse, PromoService,
    PromoStatResponse, UpdatePromoRequest,
};

use crate::extractors::{
    ApiPath, AuthCompany, OptionalValidatedJson, Pagination, PromoIdPath, ValidatedJson,
};
use crate::response::{ApiResult, Created, WithTotalCount};
use crate::state::AppState;

/// Query parameters for the promo listing
///
/// `country` is repeatable (`?country=fr&country=de`); `sort_by` accepts
/// `active_from` or `active_until`, anything else is ignored.
#[derive(Debug, Default, serde::Deserialize)]
pub struct PromoListParams {
    #[serde(default)]
    pub country: Vec<String>,
    pub sort_by: Option<String>,
}

impl PromoListParams {
    fn sort(&self) -> Option<PromoSort> {
        match self.sort_by.as_deref() {
            Some("active_from") => Some(PromoSort::ActiveFrom),
            Some("active_until") => Some(PromoSort::ActiveUntil),
            _ => None,
        }
    }
}

/// Create a promo
///
/// POST /business/promo
pub async fn create_promo(
    State(state): State<AppState>,
    auth: AuthCompany,
    ValidatedJson(request): ValidatedJson<CreatePromoRequest>,
) -> ApiResult<Created<Json<CreatedPromoResponse>>> {
    let service = PromoService::new(state.service_context());
    let response = service.create_promo(auth.company_id, request).await?;
    Ok(Created(Json(response)))
}

/// List the company's promos
///
/// GET /business/promo
pub async fn list_promos(
    State(state): State<AppState>,
    auth: AuthCompany,
    pagination: Pagination,
    Query(params): Query<PromoListParams>,
) -> ApiResult<WithTotalCount<Vec<PromoForCompanyResponse>>> {
    let query = PromoListQuery {
        sort_by: params.sort(),
        countries: params.country,
        limit: pagination.limit,
        offset: pagination.offset,
    };

    let service = PromoService::new(state.service_context());
    let (promos, total) = service.list_promos(auth.company_id, query).await?;
    Ok(WithTotalCount(promos, total))
}

/// Get one of the company's promos by ID
///
/// GET /business/promo/{promo_id}
pub async fn get_promo(
    State(state): State<AppState>,
    auth: AuthCompany,
    ApiPath(path): ApiPath<PromoIdPath>,
) -> ApiResult<Json<PromoForCompanyResponse>> {
    let promo_id = path.promo_id()?;

    let service = PromoService::new(state.service_context());
    let response = service.get_promo(auth.company_id, promo_id).await?;
    Ok(Json(response))
}

/// Edit one of the company's promos
///
/// PATCH /business/promo/{promo_id}
pub async fn update_promo(
    State(state): State<AppState>,
    auth: AuthCompany,
    ApiPath(path): ApiPath<PromoIdPath>,
    OptionalValidatedJson(request): OptionalValidatedJson<UpdatePromoRequest>,
) -> ApiResult<Json<PromoForCompanyResponse>> {
    let promo_id = path.promo_id()?;

    let service = PromoService::new(state.service_context());
    let response = service
        .update_promo(auth.company_id, promo_id, request.unwrap_or_default())
        .await?;
    Ok(Json(response))
}

/// Activation statistics for one of the company's promos
///
/// GET /business/promo/{promo_id}/stat
pub async fn promo_stats(
    State(state): State<AppState>,
    auth: AuthCompany,
    ApiPath(path): ApiPath<PromoIdPath>,
) -> ApiResult<Json<PromoStatResponse>> {
    let promo_id = path.promo_id()?;

    let service = PromoService::new(state.service_context());
    let response = service.promo_stats(auth.company_id, promo_id).await?;
    Ok(Json(response))
}
