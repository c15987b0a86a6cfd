//! Repository traits and query types

mod repositories;

pub use repositories::{
    CommentRepository, CommentWithAuthor, CompanyRepository, CountryActivations, FeedItem,
    FeedQuery, PromoListQuery, PromoRepository, PromoSort, PromoStats, PromoWithCompany,
    RepoResult, UserRepository,
};
