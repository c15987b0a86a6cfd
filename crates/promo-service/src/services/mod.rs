//! Business logic services
//!
//! This module contains all service layer implementations that handle
//! business logic, validation, and orchestration of domain operations.

pub mod activation;
pub mod auth;
pub mod comment;
pub mod context;
pub mod error;
pub mod feed;
pub mod like;
pub mod promo;
pub mod user;

// Re-export all services for convenience
pub use activation::ActivationService;
pub use auth::AuthService;
pub use comment::CommentService;
pub use context::{ServiceContext, ServiceContextBuilder};
pub use error::{ServiceError, ServiceResult};
pub use feed::FeedService;
pub use like::LikeService;
pub use promo::PromoService;
pub use user::UserService;
