//! Database models - SQLx-compatible structs for PostgreSQL tables

mod comment;
mod company;
mod promo;
mod user;

pub use comment::{CommentModel, CommentWithAuthorModel};
pub use company::CompanyModel;
pub use promo::{ActivationCountModel, FeedItemModel, PromoModel, PromoWithCompanyModel};
pub use user::UserModel;
