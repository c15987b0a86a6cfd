//! Pagination extractor
//!
//! Extracts limit/offset pagination parameters from query strings.

use axum::{
    async_trait,
    extract::{FromRequestParts, Query},
    http::request::Parts,
};
use serde::Deserialize;

use crate::response::ApiError;

/// Default page size
const DEFAULT_LIMIT: i64 = 10;
/// Maximum page size
const MAX_LIMIT: i64 = 100;

/// Raw pagination query parameters
#[derive(Debug, Deserialize)]
pub struct PaginationParams {
    /// Maximum number of items to return
    #[serde(default)]
    pub limit: Option<i64>,
    /// Number of items to skip
    #[serde(default)]
    pub offset: Option<i64>,
}

/// Validated pagination parameters
#[derive(Debug, Clone, Copy)]
pub struct Pagination {
    /// Maximum number of items to return (validated to 1-100)
    pub limit: i64,
    /// Number of items to skip (non-negative)
    pub offset: i64,
}

impl Default for Pagination {
    fn default() -> Self {
        Self {
            limit: DEFAULT_LIMIT,
            offset: 0,
        }
    }
}

impl Pagination {
    /// Create pagination with only a limit
    pub fn with_limit(limit: i64) -> Self {
        Self {
            limit: limit.clamp(1, MAX_LIMIT),
            offset: 0,
        }
    }
}

impl TryFrom<PaginationParams> for Pagination {
    type Error = ApiError;

    fn try_from(params: PaginationParams) -> Result<Self, Self::Error> {
        let limit = params.limit.unwrap_or(DEFAULT_LIMIT);
        if limit < 0 {
            return Err(ApiError::invalid_query("'limit' must not be negative"));
        }
        let limit = limit.clamp(1, MAX_LIMIT);

        let offset = params.offset.unwrap_or(0);
        if offset < 0 {
            return Err(ApiError::invalid_query("'offset' must not be negative"));
        }

        Ok(Pagination { limit, offset })
    }
}

#[async_trait]
impl<S> FromRequestParts<S> for Pagination
where
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let Query(params) = Query::<PaginationParams>::from_request_parts(parts, state)
            .await
            .map_err(|e| ApiError::invalid_query(e.to_string()))?;

        Pagination::try_from(params)
    }
}
