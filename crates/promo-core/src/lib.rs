//! # promo-core
//!
//! Domain layer containing entities, value objects, repository traits, and domain errors.
//! This crate has zero dependencies on infrastructure (database, web framework, etc.).

pub mod entities;
pub mod error;
pub mod traits;
pub mod value_objects;

// Re-export commonly used types at crate root
pub use entities::{Company, Promo, PromoComment, PromoMode, User};
pub use error::DomainError;
pub use traits::{
    CommentRepository, CommentWithAuthor, CompanyRepository, CountryActivations, FeedItem,
    FeedQuery, PromoListQuery, PromoRepository, PromoSort, PromoStats, PromoWithCompany,
    RepoResult, UserRepository,
};
pub use value_objects::{Principal, PrincipalKind, Targeting, UserAttributes};
