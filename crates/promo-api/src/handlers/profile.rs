//! User profile handlers
//!
//! Endpoints for reading and editing the authenticated user's profile.

use axum::{extract::State, Json};
use promo_service::{ProfileResponse, UpdateProfileRequest, UserService};

use crate::extractors::{AuthUser, OptionalValidatedJson};
use crate::response::ApiResult;
use crate::state::AppState;

/// Get the authenticated user's profile
///
/// GET /user/profile
pub async fn get_profile(
    State(state): State<AppState>,
    auth: AuthUser,
) -> ApiResult<Json<ProfileResponse>> {
    let service = UserService::new(state.service_context());
    let response = service.get_profile(auth.user_id).await?;
    Ok(Json(response))
}

/// Update the authenticated user's profile
///
/// PATCH /user/profile
pub async fn update_profile(
    State(state): State<AppState>,
    auth: AuthUser,
    OptionalValidatedJson(request): OptionalValidatedJson<UpdateProfileRequest>,
) -> ApiResult<Json<ProfileResponse>> {
    let service = UserService::new(state.service_context());
    let response = service
        .update_profile(auth.user_id, request.unwrap_or_default())
        .await?;
    Ok(Json(response))
}
