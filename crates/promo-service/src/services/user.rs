//! User service
//!
//! Handles user profile operations.

use tracing::{info, instrument};
use uuid::Uuid;

use promo_common::auth::validate_password_strength;

use crate::dto::{ProfileResponse, UpdateProfileRequest};

use super::context::ServiceContext;
use super::error::{ServiceError, ServiceResult};

/// User service
pub struct UserService<'a> {
    ctx: &'a ServiceContext,
}

impl<'a> UserService<'a> {
    /// Create a new UserService
    pub fn new(ctx: &'a ServiceContext) -> Self {
        Self { ctx }
    }

    /// Get the authenticated user's profile
    #[instrument(skip(self))]
    pub async fn get_profile(&self, user_id: Uuid) -> ServiceResult<ProfileResponse> {
        let user = self
            .ctx
            .user_repo()
            .find_by_id(user_id)
            .await?
            .ok_or_else(|| ServiceError::not_found("User", user_id.to_string()))?;

        Ok(ProfileResponse::from(&user))
    }

    /// Update the authenticated user's profile
    ///
    /// Absent fields stay unchanged. A new password is strength-checked
    /// and rehashed; the email is not updatable.
    #[instrument(skip(self, request))]
    pub async fn update_profile(
        &self,
        user_id: Uuid,
        request: UpdateProfileRequest,
    ) -> ServiceResult<ProfileResponse> {
        let mut user = self
            .ctx
            .user_repo()
            .find_by_id(user_id)
            .await?
            .ok_or_else(|| ServiceError::not_found("User", user_id.to_string()))?;

        let mut changed = false;

        if let Some(name) = request.name {
            if name != user.name {
                user.name = name;
                changed = true;
            }
        }

        if let Some(surname) = request.surname {
            if surname != user.surname {
                user.surname = surname;
                changed = true;
            }
        }

        if let Some(avatar_url) = request.avatar_url {
            if user.avatar_url.as_deref() != Some(avatar_url.as_str()) {
                user.avatar_url = Some(avatar_url);
                changed = true;
            }
        }

        if let Some(other) = request.other {
            user.set_attributes(other);
            changed = true;
        }

        if changed {
            self.ctx.user_repo().update(&user).await?;
        }

        if let Some(password) = request.password {
            validate_password_strength(&password).map_err(ServiceError::from)?;
            let password_hash = self
                .ctx
                .password_service()
                .hash(&password)
                .map_err(|e| ServiceError::internal(e.to_string()))?;
            self.ctx
                .user_repo()
                .update_password(user_id, &password_hash)
                .await?;
        }

        info!(user_id = %user_id, "Profile updated");

        Ok(ProfileResponse::from(&user))
    }
}
