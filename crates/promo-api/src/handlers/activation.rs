//! Promo activation handler

use axum::{extract::State, Json};
use promo_service::{ActivationResponse, ActivationService};

use crate::extractors::{ApiPath, AuthUser, PromoIdPath};
use crate::response::ApiResult;
use crate::state::AppState;

/// Activate a promo and receive a redemption code
///
/// POST /user/promo/{promo_id}/activate
pub async fn activate_promo(
    State(state): State<AppState>,
    auth: AuthUser,
    ApiPath(path): ApiPath<PromoIdPath>,
) -> ApiResult<Json<ActivationResponse>> {
    let promo_id = path.promo_id()?;

    let service = ActivationService::new(state.service_context());
    let response = service.activate(auth.user_id, promo_id).await?;
    Ok(Json(response))
}
