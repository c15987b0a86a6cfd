//! Authentication extractors
//!
//! Extract and validate JWT tokens from the Authorization header. A token
//! must carry the principal's current session id; tokens from before the
//! latest sign-in are rejected. Kind-specific extractors additionally
//! refuse tokens of the other principal kind.

use axum::{
    async_trait,
    extract::{FromRef, FromRequestParts},
    http::request::Parts,
};
use axum_extra::{
    headers::{authorization::Bearer, Authorization},
    typed_header::TypedHeaderRejectionReason,
    TypedHeader,
};
use promo_common::AppError;
use promo_core::value_objects::Principal;
use uuid::Uuid;

use crate::response::ApiError;
use crate::state::AppState;

/// Authenticated principal of either kind
#[derive(Debug, Clone, Copy)]
pub struct AuthPrincipal {
    pub principal: Principal,
}

#[async_trait]
impl<S> FromRequestParts<S> for AuthPrincipal
where
    S: Send + Sync,
    AppState: FromRef<S>,
{
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        // Extract the Authorization header
        let TypedHeader(Authorization(bearer)) =
            TypedHeader::<Authorization<Bearer>>::from_request_parts(parts, state)
                .await
                .map_err(|rejection| {
                    if matches!(rejection.reason(), TypedHeaderRejectionReason::Missing) {
                        ApiError::MissingAuth
                    } else {
                        ApiError::InvalidAuthFormat
                    }
                })?;

        let app_state = AppState::from_ref(state);

        // Validate signature and expiry
        let claims = app_state
            .jwt_service()
            .decode_token(bearer.token())
            .map_err(|e| {
                tracing::warn!(error = %e, "Invalid access token");
                ApiError::App(e)
            })?;

        let principal = claims.principal().map_err(ApiError::App)?;

        // A newer sign-in replaces the session; older tokens stop working
        let current = app_state
            .service_context()
            .session_store()
            .is_current(principal, &claims.session_id)
            .await
            .map_err(ApiError::internal)?;

        if !current {
            tracing::warn!(principal = %principal, "Token session is no longer current");
            return Err(ApiError::App(AppError::InvalidToken));
        }

        Ok(AuthPrincipal { principal })
    }
}

/// Authenticated end user
#[derive(Debug, Clone, Copy)]
pub struct AuthUser {
    pub user_id: Uuid,
}

#[async_trait]
impl<S> FromRequestParts<S> for AuthUser
where
    S: Send + Sync,
    AppState: FromRef<S>,
{
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let AuthPrincipal { principal } =
            AuthPrincipal::from_request_parts(parts, state).await?;

        match principal {
            Principal::User(user_id) => Ok(AuthUser { user_id }),
            Principal::Company(_) => Err(ApiError::App(AppError::InsufficientPermissions)),
        }
    }
}

/// Authenticated company
#[derive(Debug, Clone, Copy)]
pub struct AuthCompany {
    pub company_id: Uuid,
}

#[async_trait]
impl<S> FromRequestParts<S> for AuthCompany
where
    S: Send + Sync,
    AppState: FromRef<S>,
{
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let AuthPrincipal { principal } =
            AuthPrincipal::from_request_parts(parts, state).await?;

        match principal {
            Principal::Company(company_id) => Ok(AuthCompany { company_id }),
            Principal::User(_) => Err(ApiError::App(AppError::InsufficientPermissions)),
        }
    }
}
