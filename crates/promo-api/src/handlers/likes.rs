//! Promo like handlers
//!
//! Both operations are idempotent; repeating one never moves the counter.

use axum::{extract::State, Json};
use promo_service::{LikeService, StatusResponse};

use crate::extractors::{ApiPath, AuthUser, PromoIdPath};
use crate::response::ApiResult;
use crate::state::AppState;

/// Like a promo
///
/// POST /user/promo/{promo_id}/like
pub async fn like_promo(
    State(state): State<AppState>,
    auth: AuthUser,
    ApiPath(path): ApiPath<PromoIdPath>,
) -> ApiResult<Json<StatusResponse>> {
    let promo_id = path.promo_id()?;

    let service = LikeService::new(state.service_context());
    service.like(auth.user_id, promo_id).await?;
    Ok(Json(StatusResponse::ok()))
}

/// Remove a like from a promo
///
/// DELETE /user/promo/{promo_id}/like
pub async fn unlike_promo(
    State(state): State<AppState>,
    auth: AuthUser,
    ApiPath(path): ApiPath<PromoIdPath>,
) -> ApiResult<Json<StatusResponse>> {
    let promo_id = path.promo_id()?;

    let service = LikeService::new(state.service_context());
    service.unlike(auth.user_id, promo_id).await?;
    Ok(Json(StatusResponse::ok()))
}
