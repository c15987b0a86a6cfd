//! Service context - dependency container for services
//!
//! Holds all repositories, cache stores, and other dependencies needed by services.

use std::sync::Arc;

use promo_cache::{SessionStore, SharedRedisPool};
use promo_common::auth::{JwtService, PasswordService};
use promo_common::config::ActivationConfig;
use promo_core::traits::{CommentRepository, CompanyRepository, PromoRepository, UserRepository};
use promo_db::PgPool;

/// Service context containing all dependencies
///
/// This is the main dependency container that gets passed to all services.
/// It provides access to:
/// - Database repositories
/// - Redis-backed session store
/// - JWT and password services for authentication
/// - Activation policy knobs
#[derive(Clone)]
pub struct ServiceContext {
    // Database pool
    pool: PgPool,

    // Redis pool
    redis_pool: SharedRedisPool,

    // Repositories
    company_repo: Arc<dyn CompanyRepository>,
    user_repo: Arc<dyn UserRepository>,
    promo_repo: Arc<dyn PromoRepository>,
    comment_repo: Arc<dyn CommentRepository>,

    // Cache stores
    session_store: SessionStore,

    // Services
    jwt_service: Arc<JwtService>,
    password_service: PasswordService,

    // Policy
    activation: ActivationConfig,
}

impl ServiceContext {
    /// Create a new service context with all dependencies
    ///
    /// The session store TTL follows the JWT expiry so a session record
    /// never outlives the token it vouches for.
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        pool: PgPool,
        redis_pool: SharedRedisPool,
        company_repo: Arc<dyn CompanyRepository>,
        user_repo: Arc<dyn UserRepository>,
        promo_repo: Arc<dyn PromoRepository>,
        comment_repo: Arc<dyn CommentRepository>,
        jwt_service: Arc<JwtService>,
        activation: ActivationConfig,
    ) -> Self {
        // Clone the inner RedisPool from the Arc
        let inner_pool = (*redis_pool).clone();
        let session_store = match u64::try_from(jwt_service.token_expiry()) {
            Ok(ttl) if ttl > 0 => SessionStore::with_ttl(inner_pool, ttl),
            _ => SessionStore::new(inner_pool),
        };

        Self {
            pool,
            redis_pool,
            company_repo,
            user_repo,
            promo_repo,
            comment_repo,
            session_store,
            jwt_service,
            password_service: PasswordService::new(),
            activation,
        }
    }

    // === Database Pool ===

    /// Get the PostgreSQL connection pool
    pub fn pool(&self) -> &PgPool {
        &self.pool
    }

    /// Get the Redis connection pool
    pub fn redis_pool(&self) -> &SharedRedisPool {
        &self.redis_pool
    }

    // === Repositories ===

    /// Get the company repository
    pub fn company_repo(&self) -> &dyn CompanyRepository {
        self.company_repo.as_ref()
    }

    /// Get the user repository
    pub fn user_repo(&self) -> &dyn UserRepository {
        self.user_repo.as_ref()
    }

    /// Get the promo repository
    pub fn promo_repo(&self) -> &dyn PromoRepository {
        self.promo_repo.as_ref()
    }

    /// Get the comment repository
    pub fn comment_repo(&self) -> &dyn CommentRepository {
        self.comment_repo.as_ref()
    }

    // === Cache Stores ===

    /// Get the session store
    pub fn session_store(&self) -> &SessionStore {
        &self.session_store
    }

    // === Services ===

    /// Get the JWT service
    pub fn jwt_service(&self) -> &JwtService {
        self.jwt_service.as_ref()
    }

    /// Get the password service
    pub fn password_service(&self) -> &PasswordService {
        &self.password_service
    }

    // === Policy ===

    /// Get the activation policy
    pub fn activation(&self) -> &ActivationConfig {
        &self.activation
    }
}

impl std::fmt::Debug for ServiceContext {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ServiceContext")
            .field("pool", &"PgPool")
            .field("redis_pool", &"SharedRedisPool")
            .field("repositories", &"...")
            .field("activation", &self.activation)
            .finish()
    }
}

/// Builder for creating ServiceContext with custom configuration
pub struct ServiceContextBuilder {
    pool: Option<PgPool>,
    redis_pool: Option<SharedRedisPool>,
    company_repo: Option<Arc<dyn CompanyRepository>>,
    user_repo: Option<Arc<dyn UserRepository>>,
    promo_repo: Option<Arc<dyn PromoRepository>>,
    comment_repo: Option<Arc<dyn CommentRepository>>,
    jwt_service: Option<Arc<JwtService>>,
    activation: Option<ActivationConfig>,
}

impl ServiceContextBuilder {
    pub fn new() -> Self {
        Self {
            pool: None,
            redis_pool: None,
            company_repo: None,
            user_repo: None,
            promo_repo: None,
            comment_repo: None,
            jwt_service: None,
            activation: None,
        }
    }

    pub fn pool(mut self, pool: PgPool) -> Self {
        self.pool = Some(pool);
        self
    }

    pub fn redis_pool(mut self, redis_pool: SharedRedisPool) -> Self {
        self.redis_pool = Some(redis_pool);
        self
    }

    pub fn company_repo(mut self, repo: Arc<dyn CompanyRepository>) -> Self {
        self.company_repo = Some(repo);
        self
    }

    pub fn user_repo(mut self, repo: Arc<dyn UserRepository>) -> Self {
        self.user_repo = Some(repo);
        self
    }

    pub fn promo_repo(mut self, repo: Arc<dyn PromoRepository>) -> Self {
        self.promo_repo = Some(repo);
        self
    }

    pub fn comment_repo(mut self, repo: Arc<dyn CommentRepository>) -> Self {
        self.comment_repo = Some(repo);
        self
    }

    pub fn jwt_service(mut self, service: Arc<JwtService>) -> Self {
        self.jwt_service = Some(service);
        self
    }

    pub fn activation(mut self, activation: ActivationConfig) -> Self {
        self.activation = Some(activation);
        self
    }

    /// Build the ServiceContext
    ///
    /// # Errors
    /// Returns `ServiceError::Validation` if any required dependency is missing
    pub fn build(self) -> super::error::ServiceResult<ServiceContext> {
        Ok(ServiceContext::new(
            self.pool.ok_or_else(|| super::error::ServiceError::validation("pool is required"))?,
            self.redis_pool.ok_or_else(|| super::error::ServiceError::validation("redis_pool is required"))?,
            self.company_repo.ok_or_else(|| super::error::ServiceError::validation("company_repo is required"))?,
            self.user_repo.ok_or_else(|| super::error::ServiceError::validation("user_repo is required"))?,
            self.promo_repo.ok_or_else(|| super::error::ServiceError::validation("promo_repo is required"))?,
            self.comment_repo.ok_or_else(|| super::error::ServiceError::validation("comment_repo is required"))?,
            self.jwt_service.ok_or_else(|| super::error::ServiceError::validation("jwt_service is required"))?,
            self.activation.unwrap_or_default(),
        ))
    }
}

impl Default for ServiceContextBuilder {
    fn default() -> Self {
        Self::new()
    }
}
