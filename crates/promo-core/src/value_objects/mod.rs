//! Value objects - immutable types that represent domain concepts

mod principal;
mod targeting;
mod user_attributes;

pub use principal::{Principal, PrincipalKind, PrincipalKindParseError};
pub use targeting::Targeting;
pub use user_attributes::UserAttributes;
