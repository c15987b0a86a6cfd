//! JWT utilities for authentication
//!
//! Provides token encoding, decoding, and validation using the `jsonwebtoken`
//! crate. One token format serves both principal kinds; the kind travels in
//! the claims, and every token carries the session id it was issued under so
//! older tokens can be cut off when a principal signs in again.

use chrono::{Duration, Utc};
use jsonwebtoken::{decode, encode, DecodingKey, EncodingKey, Header, Validation};
use promo_core::{Principal, PrincipalKind};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::error::AppError;

/// JWT claims structure
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Claims {
    /// Subject (account id)
    pub sub: String,
    /// Principal kind (user or company)
    pub kind: PrincipalKind,
    /// Session this token was issued under
    pub session_id: String,
    /// Issued at (Unix timestamp)
    pub iat: i64,
    /// Expiration time (Unix timestamp)
    pub exp: i64,
}

impl Claims {
    /// Resolve the claims into a typed principal
    ///
    /// # Errors
    /// Returns an error if the subject is not a valid UUID
    pub fn principal(&self) -> Result<Principal, AppError> {
        let id = self
            .sub
            .parse::<Uuid>()
            .map_err(|_| AppError::InvalidToken)?;
        Ok(Principal::new(self.kind, id))
    }

    /// Check if the token is expired
    #[must_use]
    pub fn is_expired(&self) -> bool {
        Utc::now().timestamp() > self.exp
    }
}

/// A freshly issued token together with its session id
#[derive(Debug, Clone)]
pub struct IssuedToken {
    pub token: String,
    /// Session id embedded in the claims; the caller records it as the
    /// principal's current session
    pub session_id: String,
    /// Lifetime in seconds
    pub expires_in: i64,
}

/// JWT service for encoding and decoding tokens
#[derive(Clone)]
pub struct JwtService {
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
    token_expiry: i64,
}

impl JwtService {
    /// Create a new JWT service with the given secret and token lifetime in
    /// seconds
    #[must_use]
    pub fn new(secret: &str, token_expiry: i64) -> Self {
        Self {
            encoding_key: EncodingKey::from_secret(secret.as_bytes()),
            decoding_key: DecodingKey::from_secret(secret.as_bytes()),
            token_expiry,
        }
    }

    /// Token lifetime in seconds
    #[must_use]
    pub fn token_expiry(&self) -> i64 {
        self.token_expiry
    }

    /// Issue a token for a principal under a fresh session id
    ///
    /// # Errors
    /// Returns an error if token encoding fails
    pub fn issue(&self, principal: Principal) -> Result<IssuedToken, AppError> {
        let session_id = Uuid::new_v4().to_string();
        let now = Utc::now();

        let claims = Claims {
            sub: principal.id().to_string(),
            kind: principal.kind(),
            session_id: session_id.clone(),
            iat: now.timestamp(),
            exp: (now + Duration::seconds(self.token_expiry)).timestamp(),
        };

        let token = encode(&Header::default(), &claims, &self.encoding_key)
            .map_err(|_| AppError::Internal(anyhow::anyhow!("Failed to encode JWT")))?;

        Ok(IssuedToken {
            token,
            session_id,
            expires_in: self.token_expiry,
        })
    }

    /// Decode and validate a token's signature and expiry
    ///
    /// # Errors
    /// Returns an error if the token is invalid or expired
    pub fn decode_token(&self, token: &str) -> Result<Claims, AppError> {
        let validation = Validation::default();

        let token_data = decode::<Claims>(token, &self.decoding_key, &validation).map_err(|e| {
            match e.kind() {
                jsonwebtoken::errors::ErrorKind::ExpiredSignature => AppError::TokenExpired,
                _ => AppError::InvalidToken,
            }
        })?;

        Ok(token_data.claims)
    }
}

impl std::fmt::Debug for JwtService {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("JwtService")
            .field("token_expiry", &self.token_expiry)
            .finish_non_exhaustive()
    }
}
