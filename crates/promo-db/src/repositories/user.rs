//! PostgreSQL implementation of UserRepository

use async_trait::async_trait;
use sqlx::types::Json;
use sqlx::PgPool;
use tracing::instrument;
use uuid::Uuid;

use promo_core::entities::User;
use promo_core::error::DomainError;
use promo_core::traits::{RepoResult, UserRepository};

use crate::models::UserModel;

use super::error::{map_db_error, map_unique_violation, user_not_found};

/// PostgreSQL implementation of UserRepository
#[derive(Clone)]
pub struct PgUserRepository {
    pool: PgPool,
}

impl PgUserRepository {
    /// Create a new PgUserRepository
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl UserRepository for PgUserRepository {
    #[instrument(skip(self))]
    async fn find_by_id(&self, id: Uuid) -> RepoResult<Option<User>> {
        let result = sqlx::query_as::<_, UserModel>(
            r"
            SELECT id, name, surname, email, password_hash, avatar_url, other,
                   created_at, updated_at
            FROM users
            WHERE id = $1
            ",
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await
        .map_err(map_db_error)?;

        Ok(result.map(User::from))
    }

    #[instrument(skip(self))]
    async fn find_by_email(&self, email: &str) -> RepoResult<Option<User>> {
        let result = sqlx::query_as::<_, UserModel>(
            r"
            SELECT id, name, surname, email, password_hash, avatar_url, other,
                   created_at, updated_at
            FROM users
            WHERE email = $1
            ",
        )
        .bind(email)
        .fetch_optional(&self.pool)
        .await
        .map_err(map_db_error)?;

        Ok(result.map(User::from))
    }

    #[instrument(skip(self))]
    async fn email_exists(&self, email: &str) -> RepoResult<bool> {
        let result = sqlx::query_scalar::<_, bool>(
            r"
            SELECT EXISTS(SELECT 1 FROM users WHERE email = $1)
            ",
        )
        .bind(email)
        .fetch_one(&self.pool)
        .await
        .map_err(map_db_error)?;

        Ok(result)
    }

    #[instrument(skip(self, password_hash))]
    async fn create(&self, user: &User, password_hash: &str) -> RepoResult<()> {
        sqlx::query(
            r"
            INSERT INTO users (id, name, surname, email, password_hash, avatar_url, other, created_at, updated_at)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9)
            ",
        )
        .bind(user.id)
        .bind(&user.name)
        .bind(&user.surname)
        .bind(&user.email)
        .bind(password_hash)
        .bind(&user.avatar_url)
        .bind(Json(&user.other))
        .bind(user.created_at)
        .bind(user.updated_at)
        .execute(&self.pool)
        .await
        .map_err(|e| map_unique_violation(e, || DomainError::EmailAlreadyExists))?;

        Ok(())
    }

    #[instrument(skip(self))]
    async fn update(&self, user: &User) -> RepoResult<()> {
        let result = sqlx::query(
            r"
            UPDATE users
            SET name = $2, surname = $3, avatar_url = $4, other = $5, updated_at = NOW()
            WHERE id = $1
            ",
        )
        .bind(user.id)
        .bind(&user.name)
        .bind(&user.surname)
        .bind(&user.avatar_url)
        .bind(Json(&user.other))
        .execute(&self.pool)
        .await
        .map_err(map_db_error)?;

        if result.rows_affected() == 0 {
            return Err(user_not_found(user.id));
        }

        Ok(())
    }

    #[instrument(skip(self))]
    async fn get_password_hash(&self, id: Uuid) -> RepoResult<Option<String>> {
        let result = sqlx::query_scalar::<_, String>(
            r"
            SELECT password_hash FROM users WHERE id = $1
            ",
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await
        .map_err(map_db_error)?;

        Ok(result)
    }

    #[instrument(skip(self, password_hash))]
    async fn update_password(&self, id: Uuid, password_hash: &str) -> RepoResult<()> {
        let result = sqlx::query(
            r"
            UPDATE users
            SET password_hash = $2, updated_at = NOW()
            WHERE id = $1
            ",
        )
        .bind(id)
        .bind(password_hash)
        .execute(&self.pool)
        .await
        .map_err(map_db_error)?;

        if result.rows_affected() == 0 {
            return Err(user_not_found(id));
        }

        Ok(())
    }

    #[instrument(skip(self))]
    async fn has_activated(&self, user_id: Uuid, promo_id: Uuid) -> RepoResult<bool> {
        let result = sqlx::query_scalar::<_, bool>(
            r"
            SELECT EXISTS(
                SELECT 1 FROM promo_activations
                WHERE user_id = $1 AND promo_id = $2
            )
            ",
        )
        .bind(user_id)
        .bind(promo_id)
        .fetch_one(&self.pool)
        .await
        .map_err(map_db_error)?;

        Ok(result)
    }
}
