//! Axum extractors for request handling
//!
//! Custom extractors for authentication, validation, and pagination.

mod auth;
mod pagination;
mod path;
mod validated;

pub use auth::{AuthCompany, AuthPrincipal, AuthUser};
pub use pagination::{Pagination, PaginationParams};
pub use path::{ApiPath, CommentIdPath, PromoIdPath};
pub use validated::{OptionalValidatedJson, ValidatedJson};
