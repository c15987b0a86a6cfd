//! User database model

use chrono::{DateTime, Utc};
use promo_core::UserAttributes;
use sqlx::types::Json;
use sqlx::FromRow;
use uuid::Uuid;

/// Database model for the users table
#[derive(Debug, Clone, FromRow)]
pub struct UserModel {
    pub id: Uuid,
    pub name: String,
    pub surname: String,
    pub email: String,
    pub password_hash: String,
    pub avatar_url: Option<String>,
    /// JSONB attribute bag; targeting reads `age` and `country` from it
    pub other: Json<UserAttributes>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}
