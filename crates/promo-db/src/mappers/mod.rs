//! Entity to model mappers
//!
//! This module provides conversions between domain entities (promo-core) and
//! database models. `From<Model>` converts rows to domain objects; the promo
//! conversion is `TryFrom` because the stored mode text must parse.

mod comment;
mod company;
mod promo;
mod user;
