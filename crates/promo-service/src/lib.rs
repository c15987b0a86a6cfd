//! # promo-service
//!
//! Application layer containing business logic, services, and DTOs.

pub mod dto;
pub mod services;

pub use dto::{
    ActivationResponse, CommentAuthorResponse, CommentResponse, CompanySignUpRequest,
    CompanySignUpResponse, CountryStatResponse, CreateCommentRequest, CreatePromoRequest,
    CreatedPromoResponse, FeedResponse, HealthChecks, ProfileResponse, PromoForCompanyResponse,
    PromoForUserResponse, PromoStatResponse, ReadinessResponse, SignInRequest, StatusResponse,
    TokenResponse, UpdateCommentRequest, UpdateProfileRequest, UpdatePromoRequest,
    UserSignUpRequest,
};
pub use services::{
    ActivationService, AuthService, CommentService, FeedService, LikeService, PromoService,
    ServiceContext, ServiceContextBuilder, ServiceError, ServiceResult, UserService,
};
