//! # promo-cache
//!
//! Redis caching layer for authentication sessions.
//!
//! ## Features
//!
//! - **Connection Pool**: Managed Redis connection pool with deadpool
//! - **Session Storage**: Current session per principal, TTL-bound to the
//!   token lifetime
//!
//! ## Example
//!
//! ```ignore
//! use promo_cache::{RedisPool, RedisPoolConfig, SessionStore};
//!
//! // Create Redis pool
//! let config = RedisPoolConfig::default();
//! let pool = RedisPool::new(config)?;
//!
//! // Record a session on sign-in
//! let sessions = SessionStore::new(pool.clone());
//! sessions.record(principal, &session_id).await?;
//!
//! // Later, check a presented token's session
//! let live = sessions.is_current(principal, &claims.session_id).await?;
//! ```

pub mod pool;
pub mod session;

// Re-export pool types
pub use pool::{
    create_shared_pool, RedisPool, RedisPoolConfig, RedisPoolError, RedisResult, SharedRedisPool,
};

// Re-export session types
pub use session::{SessionData, SessionStore};
