//! User feed handlers
//!
//! The feed lists promos targeted at the authenticated user; single-promo
//! lookups reuse the same per-user view.

use axum::{
    extract::{Query, State},
    Json,
};
use promo_core::FeedQuery;
use promo_service::{FeedResponse, FeedService, PromoForUserResponse};

use crate::extractors::{ApiPath, AuthUser, Pagination, PromoIdPath};
use crate::response::{ApiResult, WithTotalCount};
use crate::state::AppState;

/// Query parameters for the feed
#[derive(Debug, Default, serde::Deserialize)]
pub struct FeedParams {
    pub category: Option<String>,
    pub active: Option<bool>,
}

/// List promos visible to the user
///
/// GET /user/feed
pub async fn feed(
    State(state): State<AppState>,
    auth: AuthUser,
    pagination: Pagination,
    Query(params): Query<FeedParams>,
) -> ApiResult<WithTotalCount<FeedResponse>> {
    let query = FeedQuery {
        category: params.category,
        active: params.active.unwrap_or(true),
        limit: pagination.limit,
        offset: pagination.offset,
    };

    let service = FeedService::new(state.service_context());
    let (promos, total) = service.feed(auth.user_id, query).await?;
    Ok(WithTotalCount(FeedResponse::success(promos), total))
}

/// Get a single promo in the user's view
///
/// GET /user/promo/{promo_id}
pub async fn get_promo(
    State(state): State<AppState>,
    auth: AuthUser,
    ApiPath(path): ApiPath<PromoIdPath>,
) -> ApiResult<Json<PromoForUserResponse>> {
    let promo_id = path.promo_id()?;

    let service = FeedService::new(state.service_context());
    let response = service.get_promo(auth.user_id, promo_id).await?;
    Ok(Json(response))
}
