//! Domain entities - core business objects

mod comment;
mod company;
mod promo;
mod user;

pub use comment::PromoComment;
pub use company::Company;
pub use promo::{Promo, PromoMode};
pub use user::User;
