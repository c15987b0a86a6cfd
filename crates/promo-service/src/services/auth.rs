//! Authentication service
//!
//! Handles company and user registration and sign-in. Issuing a token
//! records its session id in Redis, which invalidates every token issued
//! earlier for the same principal.

use tracing::{info, instrument, warn};

use promo_common::auth::validate_password_strength;
use promo_common::IssuedToken;
use promo_core::entities::{Company, User};
use promo_core::value_objects::Principal;

use crate::dto::{
    CompanySignUpRequest, CompanySignUpResponse, SignInRequest, TokenResponse, UserSignUpRequest,
};

use super::context::ServiceContext;
use super::error::{ServiceError, ServiceResult};

/// Authentication service
pub struct AuthService<'a> {
    ctx: &'a ServiceContext,
}

impl<'a> AuthService<'a> {
    /// Create a new AuthService
    pub fn new(ctx: &'a ServiceContext) -> Self {
        Self { ctx }
    }

    /// Register a new company account
    #[instrument(skip(self, request), fields(email = %request.email))]
    pub async fn company_sign_up(
        &self,
        request: CompanySignUpRequest,
    ) -> ServiceResult<CompanySignUpResponse> {
        // Validate password strength before proceeding
        validate_password_strength(&request.password).map_err(ServiceError::from)?;

        // Check if email already exists
        if self.ctx.company_repo().email_exists(&request.email).await? {
            return Err(ServiceError::conflict("Email already registered"));
        }

        // Hash password
        let password_hash = self
            .ctx
            .password_service()
            .hash(&request.password)
            .map_err(|e| ServiceError::internal(e.to_string()))?;

        // Create company
        let company = Company::new(request.name, request.email);
        self.ctx
            .company_repo()
            .create(&company, &password_hash)
            .await?;

        info!(company_id = %company.id, "Company registered successfully");

        let issued = self.issue_session(Principal::Company(company.id)).await?;

        Ok(CompanySignUpResponse {
            company_id: company.id,
            token: issued.token,
        })
    }

    /// Sign in a company with email and password
    #[instrument(skip(self, request), fields(email = %request.email))]
    pub async fn company_sign_in(&self, request: SignInRequest) -> ServiceResult<TokenResponse> {
        // Find company by email
        let company = self
            .ctx
            .company_repo()
            .find_by_email(&request.email)
            .await?
            .ok_or_else(|| {
                warn!(email = %request.email, "Sign-in failed: company not found");
                ServiceError::App(promo_common::AppError::InvalidCredentials)
            })?;

        // Get password hash
        let password_hash = self
            .ctx
            .company_repo()
            .get_password_hash(company.id)
            .await?
            .ok_or_else(|| {
                warn!(company_id = %company.id, "Sign-in failed: no password hash");
                ServiceError::App(promo_common::AppError::InvalidCredentials)
            })?;

        // Verify password
        self.verify_password(&request.password, &password_hash)?;

        info!(company_id = %company.id, "Company signed in successfully");

        let issued = self.issue_session(Principal::Company(company.id)).await?;
        Ok(TokenResponse {
            token: issued.token,
        })
    }

    /// Register a new user account
    #[instrument(skip(self, request), fields(email = %request.email))]
    pub async fn user_sign_up(&self, request: UserSignUpRequest) -> ServiceResult<TokenResponse> {
        validate_password_strength(&request.password).map_err(ServiceError::from)?;

        if self.ctx.user_repo().email_exists(&request.email).await? {
            return Err(ServiceError::conflict("Email already registered"));
        }

        let password_hash = self
            .ctx
            .password_service()
            .hash(&request.password)
            .map_err(|e| ServiceError::internal(e.to_string()))?;

        let mut user = User::new(request.name, request.surname, request.email);
        user.avatar_url = request.avatar_url;
        if let Some(other) = request.other {
            user.set_attributes(other);
        }

        self.ctx.user_repo().create(&user, &password_hash).await?;

        info!(user_id = %user.id, "User registered successfully");

        let issued = self.issue_session(Principal::User(user.id)).await?;
        Ok(TokenResponse {
            token: issued.token,
        })
    }

    /// Sign in a user with email and password
    #[instrument(skip(self, request), fields(email = %request.email))]
    pub async fn user_sign_in(&self, request: SignInRequest) -> ServiceResult<TokenResponse> {
        let user = self
            .ctx
            .user_repo()
            .find_by_email(&request.email)
            .await?
            .ok_or_else(|| {
                warn!(email = %request.email, "Sign-in failed: user not found");
                ServiceError::App(promo_common::AppError::InvalidCredentials)
            })?;

        let password_hash = self
            .ctx
            .user_repo()
            .get_password_hash(user.id)
            .await?
            .ok_or_else(|| {
                warn!(user_id = %user.id, "Sign-in failed: no password hash");
                ServiceError::App(promo_common::AppError::InvalidCredentials)
            })?;

        self.verify_password(&request.password, &password_hash)?;

        info!(user_id = %user.id, "User signed in successfully");

        let issued = self.issue_session(Principal::User(user.id)).await?;
        Ok(TokenResponse {
            token: issued.token,
        })
    }

    /// Issue a token and record its session as the principal's current one
    async fn issue_session(&self, principal: Principal) -> ServiceResult<IssuedToken> {
        let issued = self
            .ctx
            .jwt_service()
            .issue(principal)
            .map_err(ServiceError::from)?;

        self.ctx
            .session_store()
            .record(principal, &issued.session_id)
            .await
            .map_err(|e| ServiceError::internal(e.to_string()))?;

        Ok(issued)
    }

    fn verify_password(&self, password: &str, hash: &str) -> ServiceResult<()> {
        let is_valid = self
            .ctx
            .password_service()
            .verify(password, hash)
            .map_err(|e| ServiceError::internal(e.to_string()))?;

        if !is_valid {
            warn!("Sign-in failed: invalid password");
            return Err(ServiceError::App(promo_common::AppError::InvalidCredentials));
        }
        Ok(())
    }
}
