//! Principal session storage in Redis.
//!
//! Each principal (user or company) has at most one live session. Signing in
//! overwrites the stored session id, so tokens minted under an earlier
//! session stop validating. Entries expire together with the token lifetime.

use crate::pool::{RedisPool, RedisResult};
use promo_core::Principal;
use serde::{Deserialize, Serialize};

/// Key prefix for principal sessions
const SESSION_PREFIX: &str = "session:";

/// Default TTL for sessions (24 hours, matching the default token lifetime)
const DEFAULT_SESSION_TTL: u64 = 24 * 60 * 60;

/// Stored session data
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SessionData {
    /// The currently valid session id for this principal
    pub session_id: String,
    /// Session creation timestamp (Unix epoch seconds)
    pub created_at: i64,
}

impl SessionData {
    /// Create new session data
    #[must_use]
    pub fn new(session_id: String) -> Self {
        Self {
            session_id,
            created_at: chrono::Utc::now().timestamp(),
        }
    }
}

/// Session store tracking the current session per principal
#[derive(Clone)]
pub struct SessionStore {
    pool: RedisPool,
    ttl_seconds: u64,
}

impl SessionStore {
    /// Create a new session store
    #[must_use]
    pub fn new(pool: RedisPool) -> Self {
        Self {
            pool,
            ttl_seconds: DEFAULT_SESSION_TTL,
        }
    }

    /// Create with custom TTL (kept equal to the JWT lifetime)
    #[must_use]
    pub fn with_ttl(pool: RedisPool, ttl_seconds: u64) -> Self {
        Self { pool, ttl_seconds }
    }

    /// Generate Redis key for a principal
    fn key(principal: Principal) -> String {
        format!("{SESSION_PREFIX}{}:{}", principal.kind(), principal.id())
    }

    /// Record a fresh session for a principal, replacing any previous one
    pub async fn record(&self, principal: Principal, session_id: &str) -> RedisResult<()> {
        let key = Self::key(principal);
        let data = SessionData::new(session_id.to_string());
        self.pool.set(&key, &data, Some(self.ttl_seconds)).await?;

        tracing::debug!(
            principal = %principal,
            session_id = %session_id,
            "Recorded session"
        );

        Ok(())
    }

    /// Check whether the given session id is the principal's current one
    pub async fn is_current(&self, principal: Principal, session_id: &str) -> RedisResult<bool> {
        let key = Self::key(principal);
        let data: Option<SessionData> = self.pool.get_value(&key).await?;

        Ok(data.is_some_and(|d| d.session_id == session_id))
    }

    /// Get the stored session for a principal
    pub async fn get(&self, principal: Principal) -> RedisResult<Option<SessionData>> {
        let key = Self::key(principal);
        self.pool.get_value(&key).await
    }

    /// Revoke a principal's session
    pub async fn revoke(&self, principal: Principal) -> RedisResult<bool> {
        let key = Self::key(principal);
        let deleted = self.pool.delete(&key).await?;

        if deleted {
            tracing::debug!(principal = %principal, "Revoked session");
        }

        Ok(deleted)
    }

    /// Get remaining TTL for a principal's session
    pub async fn get_ttl(&self, principal: Principal) -> RedisResult<Option<i64>> {
        let key = Self::key(principal);
        self.pool.ttl(&key).await
    }
}
