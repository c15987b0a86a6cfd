//! Authentication handlers
//!
//! Sign-up and sign-in endpoints for both principal kinds. Every issued
//! token supersedes the principal's previous session.

use axum::{extract::State, Json};
use promo_service::{
    AuthService, CompanySignUpRequest, CompanySignUpResponse, SignInRequest, TokenResponse,
    UserSignUpRequest,
};

use crate::extractors::ValidatedJson;
use crate::response::{ApiResult, Created};
use crate::state::AppState;

/// Register a new company
///
/// POST /business/auth/sign-up
pub async fn company_sign_up(
    State(state): State<AppState>,
    ValidatedJson(request): ValidatedJson<CompanySignUpRequest>,
) -> ApiResult<Json<CompanySignUpResponse>> {
    let service = AuthService::new(state.service_context());
    let response = service.company_sign_up(request).await?;
    Ok(Json(response))
}

/// Company login with email and password
///
/// POST /business/auth/sign-in
pub async fn company_sign_in(
    State(state): State<AppState>,
    ValidatedJson(request): ValidatedJson<SignInRequest>,
) -> ApiResult<Json<TokenResponse>> {
    let service = AuthService::new(state.service_context());
    let response = service.company_sign_in(request).await?;
    Ok(Json(response))
}

/// Register a new user
///
/// POST /user/auth/sign-up
pub async fn user_sign_up(
    State(state): State<AppState>,
    ValidatedJson(request): ValidatedJson<UserSignUpRequest>,
) -> ApiResult<Created<Json<TokenResponse>>> {
    let service = AuthService::new(state.service_context());
    let response = service.user_sign_up(request).await?;
    Ok(Created(Json(response)))
}

/// User login with email and password
///
/// POST /user/auth/sign-in
pub async fn user_sign_in(
    State(state): State<AppState>,
    ValidatedJson(request): ValidatedJson<SignInRequest>,
) -> ApiResult<Json<TokenResponse>> {
    let service = AuthService::new(state.service_context());
    let response = service.user_sign_in(request).await?;
    Ok(Json(response))
}
