//! Repository implementations
//!
//! PostgreSQL implementations of the repository traits defined in promo-core.
//! Each repository handles database operations for a specific domain entity.

mod comment;
mod company;
mod error;
mod promo;
mod user;

pub use comment::PgCommentRepository;
pub use company::PgCompanyRepository;
pub use promo::PgPromoRepository;
pub use user::PgUserRepository;
