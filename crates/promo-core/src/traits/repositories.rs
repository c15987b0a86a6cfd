//! Repository traits (ports) - define the interface for data access
//!
//! The domain layer defines what it needs, and the infrastructure layer
//! provides the implementation. Operations whose atomicity matters
//! (code allocation, like toggling, comment counters) are whole methods
//! here rather than read-then-write call pairs, so implementations can
//! make them single transactions.

use async_trait::async_trait;
use uuid::Uuid;

use crate::entities::{Company, Promo, PromoComment, User};
use crate::error::DomainError;

/// Result type for repository operations
pub type RepoResult<T> = Result<T, DomainError>;

// ============================================================================
// Company Repository
// ============================================================================

#[async_trait]
pub trait CompanyRepository: Send + Sync {
    /// Find company by ID
    async fn find_by_id(&self, id: Uuid) -> RepoResult<Option<Company>>;

    /// Find company by email
    async fn find_by_email(&self, email: &str) -> RepoResult<Option<Company>>;

    /// Check if email is already taken
    async fn email_exists(&self, email: &str) -> RepoResult<bool>;

    /// Create a new company
    async fn create(&self, company: &Company, password_hash: &str) -> RepoResult<()>;

    /// Get password hash for authentication
    async fn get_password_hash(&self, id: Uuid) -> RepoResult<Option<String>>;
}

// ============================================================================
// User Repository
// ============================================================================

#[async_trait]
pub trait UserRepository: Send + Sync {
    /// Find user by ID
    async fn find_by_id(&self, id: Uuid) -> RepoResult<Option<User>>;

    /// Find user by email
    async fn find_by_email(&self, email: &str) -> RepoResult<Option<User>>;

    /// Check if email is already taken
    async fn email_exists(&self, email: &str) -> RepoResult<bool>;

    /// Create a new user
    async fn create(&self, user: &User, password_hash: &str) -> RepoResult<()>;

    /// Update profile fields of an existing user
    async fn update(&self, user: &User) -> RepoResult<()>;

    /// Get password hash for authentication
    async fn get_password_hash(&self, id: Uuid) -> RepoResult<Option<String>>;

    /// Update password hash
    async fn update_password(&self, id: Uuid, password_hash: &str) -> RepoResult<()>;

    /// Check whether the user has already activated the given promo
    async fn has_activated(&self, user_id: Uuid, promo_id: Uuid) -> RepoResult<bool>;
}

// ============================================================================
// Promo Repository
// ============================================================================

/// Sort key for a company's promo listing
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PromoSort {
    ActiveFrom,
    ActiveUntil,
}

/// Filter/paging options for a company's promo listing
#[derive(Debug, Clone, Default)]
pub struct PromoListQuery {
    /// Target countries to match (lowercase); empty means no country filter
    pub countries: Vec<String>,
    pub sort_by: Option<PromoSort>,
    pub limit: i64,
    pub offset: i64,
}

/// Filter/paging options for the user feed
#[derive(Debug, Clone)]
pub struct FeedQuery {
    /// Category the promo must be filed under (lowercase)
    pub category: Option<String>,
    /// Filter on the promo's active flag
    pub active: bool,
    pub limit: i64,
    pub offset: i64,
}

impl Default for FeedQuery {
    fn default() -> Self {
        Self {
            category: None,
            active: true,
            limit: 10,
            offset: 0,
        }
    }
}

/// Promo joined with its owning company's display name
#[derive(Debug, Clone)]
pub struct PromoWithCompany {
    pub promo: Promo,
    pub company_name: String,
}

/// Feed read model: a promo plus the requesting user's relationship to it
#[derive(Debug, Clone)]
pub struct FeedItem {
    pub promo: Promo,
    pub company_name: String,
    pub is_activated_by_user: bool,
    pub is_liked_by_user: bool,
}

/// Per-country activation count for the stat endpoint
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CountryActivations {
    pub country: String,
    pub activations_count: i64,
}

/// Activation statistics for one promo
#[derive(Debug, Clone, Default)]
pub struct PromoStats {
    pub activations_count: i64,
    /// Sorted by country ascending; users without a country are counted in
    /// the total but omitted here
    pub countries: Vec<CountryActivations>,
}

#[async_trait]
pub trait PromoRepository: Send + Sync {
    /// Find promo by ID
    async fn find_by_id(&self, id: Uuid) -> RepoResult<Option<Promo>>;

    /// Find a promo owned by the given company, with the company name
    async fn find_for_company(
        &self,
        company_id: Uuid,
        promo_id: Uuid,
    ) -> RepoResult<Option<PromoWithCompany>>;

    /// Create a new promo
    async fn create(&self, promo: &Promo) -> RepoResult<()>;

    /// Update content, targeting and code fields of an existing promo.
    ///
    /// Counters (`like_count`, `comment_count`, `used_count`) are never
    /// written by this method; they change only through their dedicated
    /// atomic operations.
    async fn update(&self, promo: &Promo) -> RepoResult<()>;

    /// List a company's promos with filters, newest first by default.
    /// Returns the page and the total count before paging.
    async fn list_for_company(
        &self,
        company_id: Uuid,
        query: &PromoListQuery,
    ) -> RepoResult<(Vec<PromoWithCompany>, i64)>;

    /// The user-facing feed. Returns the page and the total count.
    async fn feed(&self, user_id: Uuid, query: &FeedQuery) -> RepoResult<(Vec<FeedItem>, i64)>;

    /// A single promo in its feed representation for the given user
    async fn find_feed_item(
        &self,
        user_id: Uuid,
        promo_id: Uuid,
    ) -> RepoResult<Option<FeedItem>>;

    /// Atomically consume one redemption unit and record the activation.
    ///
    /// The promo-state mutation (code pop or budget decrement), the
    /// `used_count` increment, and the activation record are one
    /// transaction, serialized per promo; concurrent callers can never both
    /// receive the last unit. Fails with `Depleted` when nothing remains
    /// and `InvalidPromoConfig` on a corrupt mode/code setup.
    async fn allocate_code(&self, promo_id: Uuid, user_id: Uuid) -> RepoResult<String>;

    /// Idempotently add the user's like; the like counter moves only when
    /// membership actually changed. Returns whether it changed.
    async fn like(&self, promo_id: Uuid, user_id: Uuid) -> RepoResult<bool>;

    /// Idempotently remove the user's like; same counter discipline.
    /// Returns whether it changed.
    async fn unlike(&self, promo_id: Uuid, user_id: Uuid) -> RepoResult<bool>;

    /// Aggregate activation statistics for one promo
    async fn activation_stats(&self, promo_id: Uuid) -> RepoResult<PromoStats>;
}

// ============================================================================
// Comment Repository
// ============================================================================

/// Comment joined with its author's display fields
#[derive(Debug, Clone)]
pub struct CommentWithAuthor {
    pub comment: PromoComment,
    pub author_name: String,
    pub author_surname: String,
    pub author_avatar_url: Option<String>,
}

#[async_trait]
pub trait CommentRepository: Send + Sync {
    /// Find a comment under the given promo
    async fn find(&self, promo_id: Uuid, comment_id: Uuid) -> RepoResult<Option<PromoComment>>;

    /// Find a comment with its author's display fields
    async fn find_with_author(
        &self,
        promo_id: Uuid,
        comment_id: Uuid,
    ) -> RepoResult<Option<CommentWithAuthor>>;

    /// List comments for a promo, newest first.
    /// Returns the page and the total count.
    async fn list_for_promo(
        &self,
        promo_id: Uuid,
        limit: i64,
        offset: i64,
    ) -> RepoResult<(Vec<CommentWithAuthor>, i64)>;

    /// Create a comment and bump the promo's comment counter in the same
    /// transaction
    async fn create(&self, comment: &PromoComment) -> RepoResult<()>;

    /// Replace the text of an existing comment
    async fn update_text(&self, comment: &PromoComment) -> RepoResult<()>;

    /// Delete a comment and decrement the promo's comment counter in the
    /// same transaction
    async fn delete(&self, promo_id: Uuid, comment_id: Uuid) -> RepoResult<()>;
}
