//! PostgreSQL implementation of CommentRepository

use async_trait::async_trait;
use sqlx::PgPool;
use tracing::instrument;
use uuid::Uuid;

use promo_core::entities::PromoComment;
use promo_core::traits::{CommentRepository, CommentWithAuthor, RepoResult};

use crate::models::{CommentModel, CommentWithAuthorModel};

use super::error::{comment_not_found, map_db_error};

/// PostgreSQL implementation of CommentRepository
#[derive(Clone)]
pub struct PgCommentRepository {
    pool: PgPool,
}

impl PgCommentRepository {
    /// Create a new PgCommentRepository
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl CommentRepository for PgCommentRepository {
    #[instrument(skip(self))]
    async fn find(&self, promo_id: Uuid, comment_id: Uuid) -> RepoResult<Option<PromoComment>> {
        let result = sqlx::query_as::<_, CommentModel>(
            r"
            SELECT id, promo_id, author_id, text, date
            FROM promo_comments
            WHERE id = $1 AND promo_id = $2
            ",
        )
        .bind(comment_id)
        .bind(promo_id)
        .fetch_optional(&self.pool)
        .await
        .map_err(map_db_error)?;

        Ok(result.map(PromoComment::from))
    }

    #[instrument(skip(self))]
    async fn find_with_author(
        &self,
        promo_id: Uuid,
        comment_id: Uuid,
    ) -> RepoResult<Option<CommentWithAuthor>> {
        let result = sqlx::query_as::<_, CommentWithAuthorModel>(
            r"
            SELECT cm.id, cm.promo_id, cm.author_id, cm.text, cm.date,
                   u.name AS author_name, u.surname AS author_surname,
                   u.avatar_url AS author_avatar_url
            FROM promo_comments cm
            JOIN users u ON u.id = cm.author_id
            WHERE cm.id = $1 AND cm.promo_id = $2
            ",
        )
        .bind(comment_id)
        .bind(promo_id)
        .fetch_optional(&self.pool)
        .await
        .map_err(map_db_error)?;

        Ok(result.map(CommentWithAuthor::from))
    }

    #[instrument(skip(self))]
    async fn list_for_promo(
        &self,
        promo_id: Uuid,
        limit: i64,
        offset: i64,
    ) -> RepoResult<(Vec<CommentWithAuthor>, i64)> {
        let total = sqlx::query_scalar::<_, i64>(
            r"
            SELECT COUNT(*) FROM promo_comments WHERE promo_id = $1
            ",
        )
        .bind(promo_id)
        .fetch_one(&self.pool)
        .await
        .map_err(map_db_error)?;

        let results = sqlx::query_as::<_, CommentWithAuthorModel>(
            r"
            SELECT cm.id, cm.promo_id, cm.author_id, cm.text, cm.date,
                   u.name AS author_name, u.surname AS author_surname,
                   u.avatar_url AS author_avatar_url
            FROM promo_comments cm
            JOIN users u ON u.id = cm.author_id
            WHERE cm.promo_id = $1
            ORDER BY cm.date DESC, cm.id DESC
            LIMIT $2 OFFSET $3
            ",
        )
        .bind(promo_id)
        .bind(limit)
        .bind(offset)
        .fetch_all(&self.pool)
        .await
        .map_err(map_db_error)?;

        let comments = results.into_iter().map(CommentWithAuthor::from).collect();

        Ok((comments, total))
    }

    #[instrument(skip(self, comment))]
    async fn create(&self, comment: &PromoComment) -> RepoResult<()> {
        let mut tx = self.pool.begin().await.map_err(map_db_error)?;

        sqlx::query(
            r"
            INSERT INTO promo_comments (id, promo_id, author_id, text, date)
            VALUES ($1, $2, $3, $4, $5)
            ",
        )
        .bind(comment.id)
        .bind(comment.promo_id)
        .bind(comment.author_id)
        .bind(&comment.text)
        .bind(comment.date)
        .execute(&mut *tx)
        .await
        .map_err(map_db_error)?;

        sqlx::query(
            r"
            UPDATE promos SET comment_count = comment_count + 1 WHERE id = $1
            ",
        )
        .bind(comment.promo_id)
        .execute(&mut *tx)
        .await
        .map_err(map_db_error)?;

        tx.commit().await.map_err(map_db_error)?;

        Ok(())
    }

    #[instrument(skip(self, comment))]
    async fn update_text(&self, comment: &PromoComment) -> RepoResult<()> {
        let result = sqlx::query(
            r"
            UPDATE promo_comments
            SET text = $3
            WHERE id = $1 AND promo_id = $2
            ",
        )
        .bind(comment.id)
        .bind(comment.promo_id)
        .bind(&comment.text)
        .execute(&self.pool)
        .await
        .map_err(map_db_error)?;

        if result.rows_affected() == 0 {
            return Err(comment_not_found(comment.id));
        }

        Ok(())
    }

    #[instrument(skip(self))]
    async fn delete(&self, promo_id: Uuid, comment_id: Uuid) -> RepoResult<()> {
        let mut tx = self.pool.begin().await.map_err(map_db_error)?;

        let removed = sqlx::query(
            r"
            DELETE FROM promo_comments
            WHERE id = $1 AND promo_id = $2
            ",
        )
        .bind(comment_id)
        .bind(promo_id)
        .execute(&mut *tx)
        .await
        .map_err(map_db_error)?
        .rows_affected();

        if removed == 0 {
            return Err(comment_not_found(comment_id));
        }

        sqlx::query(
            r"
            UPDATE promos SET comment_count = comment_count - 1 WHERE id = $1
            ",
        )
        .bind(promo_id)
        .execute(&mut *tx)
        .await
        .map_err(map_db_error)?;

        tx.commit().await.map_err(map_db_error)?;

        Ok(())
    }
}
