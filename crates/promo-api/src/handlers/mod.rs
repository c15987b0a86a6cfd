//! Route handlers
//!
//! All HTTP request handlers organized by domain.

pub mod activation;
pub mod auth;
pub mod comments;
pub mod feed;
pub mod health;
pub mod likes;
pub mod profile;
pub mod promos;
