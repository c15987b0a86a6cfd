//! Path parameter extractors
//!
//! Type-safe extraction of UUID ids from path parameters. Parsing is
//! explicit so a malformed id produces the JSON error body instead of
//! the framework's plain-text rejection.

use axum::{
    async_trait,
    extract::{FromRequestParts, Path},
    http::request::Parts,
};
use serde::de::DeserializeOwned;
use uuid::Uuid;

use crate::response::ApiError;

/// Extract typed path parameters with a JSON error rejection
#[derive(Debug, Clone)]
pub struct ApiPath<T>(pub T);

#[async_trait]
impl<S, T> FromRequestParts<S> for ApiPath<T>
where
    S: Send + Sync,
    T: DeserializeOwned + Send,
{
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let Path(inner) = Path::<T>::from_request_parts(parts, state)
            .await
            .map_err(|e| ApiError::invalid_path(e.to_string()))?;

        Ok(ApiPath(inner))
    }
}

/// Path parameters with promo_id
#[derive(Debug, serde::Deserialize)]
pub struct PromoIdPath {
    pub promo_id: String,
}

impl PromoIdPath {
    /// Parse promo_id as UUID
    pub fn promo_id(&self) -> Result<Uuid, ApiError> {
        self.promo_id
            .parse()
            .map_err(|_| ApiError::invalid_path("Invalid promo_id format"))
    }
}

/// Path parameters with promo_id and comment_id
#[derive(Debug, serde::Deserialize)]
pub struct CommentIdPath {
    pub promo_id: String,
    pub comment_id: String,
}

impl CommentIdPath {
    /// Parse promo_id as UUID
    pub fn promo_id(&self) -> Result<Uuid, ApiError> {
        self.promo_id
            .parse()
            .map_err(|_| ApiError::invalid_path("Invalid promo_id format"))
    }

    /// Parse comment_id as UUID
    pub fn comment_id(&self) -> Result<Uuid, ApiError> {
        self.comment_id
            .parse()
            .map_err(|_| ApiError::invalid_path("Invalid comment_id format"))
    }
}
