//! Comment database models

use chrono::{DateTime, Utc};
use sqlx::FromRow;
use uuid::Uuid;

/// Database model for the promo_comments table
#[derive(Debug, Clone, FromRow)]
pub struct CommentModel {
    pub id: Uuid,
    pub promo_id: Uuid,
    pub author_id: Uuid,
    pub text: String,
    pub date: DateTime<Utc>,
}

/// Comment row joined with the author's display fields
#[derive(Debug, Clone, FromRow)]
pub struct CommentWithAuthorModel {
    pub id: Uuid,
    pub promo_id: Uuid,
    pub author_id: Uuid,
    pub text: String,
    pub date: DateTime<Utc>,
    pub author_name: String,
    pub author_surname: String,
    pub author_avatar_url: Option<String>,
}
