//! PostgreSQL implementation of PromoRepository
//!
//! Allocation, likes and the comment counter all follow the same rule:
//! the membership/state change and the counter move happen inside one
//! transaction, never as separate statements on the pool.

use async_trait::async_trait;
use sqlx::types::Json;
use sqlx::PgPool;
use tracing::instrument;
use uuid::Uuid;

use promo_core::entities::Promo;
use promo_core::traits::{
    CountryActivations, FeedItem, FeedQuery, PromoListQuery, PromoRepository, PromoSort,
    PromoStats, PromoWithCompany, RepoResult,
};

use crate::models::{ActivationCountModel, FeedItemModel, PromoModel, PromoWithCompanyModel};

use super::error::{map_db_error, promo_not_found};

/// PostgreSQL implementation of PromoRepository
#[derive(Clone)]
pub struct PgPromoRepository {
    pool: PgPool,
}

impl PgPromoRepository {
    /// Create a new PgPromoRepository
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl PromoRepository for PgPromoRepository {
    #[instrument(skip(self))]
    async fn find_by_id(&self, id: Uuid) -> RepoResult<Option<Promo>> {
        let result = sqlx::query_as::<_, PromoModel>(
            r"
            SELECT id, company_id, description, image_url, target, max_count,
                   active_from, active_until, mode, promo_common, promo_unique,
                   active, like_count, comment_count, used_count, created_at, updated_at
            FROM promos
            WHERE id = $1
            ",
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await
        .map_err(map_db_error)?;

        result.map(Promo::try_from).transpose()
    }

    #[instrument(skip(self))]
    async fn find_for_company(
        &self,
        company_id: Uuid,
        promo_id: Uuid,
    ) -> RepoResult<Option<PromoWithCompany>> {
        let result = sqlx::query_as::<_, PromoWithCompanyModel>(
            r"
            SELECT p.id, p.company_id, p.description, p.image_url, p.target, p.max_count,
                   p.active_from, p.active_until, p.mode, p.promo_common, p.promo_unique,
                   p.active, p.like_count, p.comment_count, p.used_count,
                   p.created_at, p.updated_at, c.name AS company_name
            FROM promos p
            JOIN companies c ON c.id = p.company_id
            WHERE p.id = $1 AND p.company_id = $2
            ",
        )
        .bind(promo_id)
        .bind(company_id)
        .fetch_optional(&self.pool)
        .await
        .map_err(map_db_error)?;

        result.map(PromoWithCompany::try_from).transpose()
    }

    #[instrument(skip(self, promo))]
    async fn create(&self, promo: &Promo) -> RepoResult<()> {
        sqlx::query(
            r"
            INSERT INTO promos (id, company_id, description, image_url, target, max_count,
                                active_from, active_until, mode, promo_common, promo_unique,
                                active, like_count, comment_count, used_count, created_at, updated_at)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12, $13, $14, $15, $16, $17)
            ",
        )
        .bind(promo.id)
        .bind(promo.company_id)
        .bind(&promo.description)
        .bind(&promo.image_url)
        .bind(Json(&promo.target))
        .bind(promo.max_count)
        .bind(promo.active_from)
        .bind(promo.active_until)
        .bind(promo.mode.as_str())
        .bind(&promo.promo_common)
        .bind(&promo.promo_unique)
        .bind(promo.active)
        .bind(promo.like_count)
        .bind(promo.comment_count)
        .bind(promo.used_count)
        .bind(promo.created_at)
        .bind(promo.updated_at)
        .execute(&self.pool)
        .await
        .map_err(map_db_error)?;

        Ok(())
    }

    #[instrument(skip(self, promo))]
    async fn update(&self, promo: &Promo) -> RepoResult<()> {
        // Counters are deliberately absent from the SET list; they move only
        // through their own atomic operations.
        let result = sqlx::query(
            r"
            UPDATE promos
            SET description = $2, image_url = $3, target = $4, max_count = $5,
                active_from = $6, active_until = $7, mode = $8, promo_common = $9,
                promo_unique = $10, active = $11, updated_at = NOW()
            WHERE id = $1
            ",
        )
        .bind(promo.id)
        .bind(&promo.description)
        .bind(&promo.image_url)
        .bind(Json(&promo.target))
        .bind(promo.max_count)
        .bind(promo.active_from)
        .bind(promo.active_until)
        .bind(promo.mode.as_str())
        .bind(&promo.promo_common)
        .bind(&promo.promo_unique)
        .bind(promo.active)
        .execute(&self.pool)
        .await
        .map_err(map_db_error)?;

        if result.rows_affected() == 0 {
            return Err(promo_not_found(promo.id));
        }

        Ok(())
    }

    #[instrument(skip(self, query))]
    async fn list_for_company(
        &self,
        company_id: Uuid,
        query: &PromoListQuery,
    ) -> RepoResult<(Vec<PromoWithCompany>, i64)> {
        let total = sqlx::query_scalar::<_, i64>(
            r"
            SELECT COUNT(*)
            FROM promos p
            WHERE p.company_id = $1
              AND (cardinality($2::text[]) = 0 OR LOWER(p.target->>'country') = ANY($2))
            ",
        )
        .bind(company_id)
        .bind(&query.countries)
        .fetch_one(&self.pool)
        .await
        .map_err(map_db_error)?;

        let results = match query.sort_by {
            Some(PromoSort::ActiveFrom) => {
                sqlx::query_as::<_, PromoWithCompanyModel>(
                    r"
                    SELECT p.id, p.company_id, p.description, p.image_url, p.target, p.max_count,
                           p.active_from, p.active_until, p.mode, p.promo_common, p.promo_unique,
                           p.active, p.like_count, p.comment_count, p.used_count,
                           p.created_at, p.updated_at, c.name AS company_name
                    FROM promos p
                    JOIN companies c ON c.id = p.company_id
                    WHERE p.company_id = $1
                      AND (cardinality($2::text[]) = 0 OR LOWER(p.target->>'country') = ANY($2))
                    ORDER BY p.active_from ASC
                    LIMIT $3 OFFSET $4
                    ",
                )
                .bind(company_id)
                .bind(&query.countries)
                .bind(query.limit)
                .bind(query.offset)
                .fetch_all(&self.pool)
                .await
            }
            Some(PromoSort::ActiveUntil) => {
                sqlx::query_as::<_, PromoWithCompanyModel>(
                    r"
                    SELECT p.id, p.company_id, p.description, p.image_url, p.target, p.max_count,
                           p.active_from, p.active_until, p.mode, p.promo_common, p.promo_unique,
                           p.active, p.like_count, p.comment_count, p.used_count,
                           p.created_at, p.updated_at, c.name AS company_name
                    FROM promos p
                    JOIN companies c ON c.id = p.company_id
                    WHERE p.company_id = $1
                      AND (cardinality($2::text[]) = 0 OR LOWER(p.target->>'country') = ANY($2))
                    ORDER BY p.active_until ASC
                    LIMIT $3 OFFSET $4
                    ",
                )
                .bind(company_id)
                .bind(&query.countries)
                .bind(query.limit)
                .bind(query.offset)
                .fetch_all(&self.pool)
                .await
            }
            None => {
                sqlx::query_as::<_, PromoWithCompanyModel>(
                    r"
                    SELECT p.id, p.company_id, p.description, p.image_url, p.target, p.max_count,
                           p.active_from, p.active_until, p.mode, p.promo_common, p.promo_unique,
                           p.active, p.like_count, p.comment_count, p.used_count,
                           p.created_at, p.updated_at, c.name AS company_name
                    FROM promos p
                    JOIN companies c ON c.id = p.company_id
                    WHERE p.company_id = $1
                      AND (cardinality($2::text[]) = 0 OR LOWER(p.target->>'country') = ANY($2))
                    ORDER BY p.created_at DESC
                    LIMIT $3 OFFSET $4
                    ",
                )
                .bind(company_id)
                .bind(&query.countries)
                .bind(query.limit)
                .bind(query.offset)
                .fetch_all(&self.pool)
                .await
            }
        }
        .map_err(map_db_error)?;

        let promos = results
            .into_iter()
            .map(PromoWithCompany::try_from)
            .collect::<Result<Vec<_>, _>>()?;

        Ok((promos, total))
    }

    #[instrument(skip(self, query))]
    async fn feed(&self, user_id: Uuid, query: &FeedQuery) -> RepoResult<(Vec<FeedItem>, i64)> {
        let total = sqlx::query_scalar::<_, i64>(
            r"
            SELECT COUNT(*)
            FROM promos p
            WHERE ($1::text IS NULL OR p.target->'categories' ? $1)
              AND (NOT $2 OR p.active = TRUE)
            ",
        )
        .bind(&query.category)
        .bind(query.active)
        .fetch_one(&self.pool)
        .await
        .map_err(map_db_error)?;

        let results = sqlx::query_as::<_, FeedItemModel>(
            r"
            SELECT p.id, p.company_id, p.description, p.image_url, p.target, p.max_count,
                   p.active_from, p.active_until, p.mode, p.promo_common, p.promo_unique,
                   p.active, p.like_count, p.comment_count, p.used_count,
                   p.created_at, p.updated_at, c.name AS company_name,
                   EXISTS(
                       SELECT 1 FROM promo_activations pa
                       WHERE pa.promo_id = p.id AND pa.user_id = $3
                   ) AS is_activated_by_user,
                   EXISTS(
                       SELECT 1 FROM promo_likes pl
                       WHERE pl.promo_id = p.id AND pl.user_id = $3
                   ) AS is_liked_by_user
            FROM promos p
            JOIN companies c ON c.id = p.company_id
            WHERE ($1::text IS NULL OR p.target->'categories' ? $1)
              AND (NOT $2 OR p.active = TRUE)
            ORDER BY p.created_at DESC
            LIMIT $4 OFFSET $5
            ",
        )
        .bind(&query.category)
        .bind(query.active)
        .bind(user_id)
        .bind(query.limit)
        .bind(query.offset)
        .fetch_all(&self.pool)
        .await
        .map_err(map_db_error)?;

        let items = results
            .into_iter()
            .map(FeedItem::try_from)
            .collect::<Result<Vec<_>, _>>()?;

        Ok((items, total))
    }

    #[instrument(skip(self))]
    async fn find_feed_item(
        &self,
        user_id: Uuid,
        promo_id: Uuid,
    ) -> RepoResult<Option<FeedItem>> {
        let result = sqlx::query_as::<_, FeedItemModel>(
            r"
            SELECT p.id, p.company_id, p.description, p.image_url, p.target, p.max_count,
                   p.active_from, p.active_until, p.mode, p.promo_common, p.promo_unique,
                   p.active, p.like_count, p.comment_count, p.used_count,
                   p.created_at, p.updated_at, c.name AS company_name,
                   EXISTS(
                       SELECT 1 FROM promo_activations pa
                       WHERE pa.promo_id = p.id AND pa.user_id = $2
                   ) AS is_activated_by_user,
                   EXISTS(
                       SELECT 1 FROM promo_likes pl
                       WHERE pl.promo_id = p.id AND pl.user_id = $2
                   ) AS is_liked_by_user
            FROM promos p
            JOIN companies c ON c.id = p.company_id
            WHERE p.id = $1
            ",
        )
        .bind(promo_id)
        .bind(user_id)
        .fetch_optional(&self.pool)
        .await
        .map_err(map_db_error)?;

        result.map(FeedItem::try_from).transpose()
    }

    #[instrument(skip(self))]
    async fn allocate_code(&self, promo_id: Uuid, user_id: Uuid) -> RepoResult<String> {
        let mut tx = self.pool.begin().await.map_err(map_db_error)?;

        // Row lock serializes concurrent allocations per promo. Everything
        // below happens under it; any error drops the transaction and rolls
        // back, so a code is never spent without its activation record.
        let model = sqlx::query_as::<_, PromoModel>(
            r"
            SELECT id, company_id, description, image_url, target, max_count,
                   active_from, active_until, mode, promo_common, promo_unique,
                   active, like_count, comment_count, used_count, created_at, updated_at
            FROM promos
            WHERE id = $1
            FOR UPDATE
            ",
        )
        .bind(promo_id)
        .fetch_optional(&mut *tx)
        .await
        .map_err(map_db_error)?
        .ok_or_else(|| promo_not_found(promo_id))?;

        let mut promo = Promo::try_from(model)?;
        let code = promo.take_code()?;

        sqlx::query(
            r"
            UPDATE promos
            SET max_count = $2, promo_unique = $3, used_count = $4, updated_at = NOW()
            WHERE id = $1
            ",
        )
        .bind(promo_id)
        .bind(promo.max_count)
        .bind(&promo.promo_unique)
        .bind(promo.used_count)
        .execute(&mut *tx)
        .await
        .map_err(map_db_error)?;

        sqlx::query(
            r"
            INSERT INTO promo_activations (promo_id, user_id, activated_at)
            VALUES ($1, $2, NOW())
            ",
        )
        .bind(promo_id)
        .bind(user_id)
        .execute(&mut *tx)
        .await
        .map_err(map_db_error)?;

        tx.commit().await.map_err(map_db_error)?;

        Ok(code)
    }

    #[instrument(skip(self))]
    async fn like(&self, promo_id: Uuid, user_id: Uuid) -> RepoResult<bool> {
        let mut tx = self.pool.begin().await.map_err(map_db_error)?;

        let inserted = sqlx::query(
            r"
            INSERT INTO promo_likes (promo_id, user_id, created_at)
            VALUES ($1, $2, NOW())
            ON CONFLICT (promo_id, user_id) DO NOTHING
            ",
        )
        .bind(promo_id)
        .bind(user_id)
        .execute(&mut *tx)
        .await
        .map_err(map_db_error)?
        .rows_affected();

        if inserted > 0 {
            sqlx::query(
                r"
                UPDATE promos SET like_count = like_count + 1 WHERE id = $1
                ",
            )
            .bind(promo_id)
            .execute(&mut *tx)
            .await
            .map_err(map_db_error)?;
        }

        tx.commit().await.map_err(map_db_error)?;

        Ok(inserted > 0)
    }

    #[instrument(skip(self))]
    async fn unlike(&self, promo_id: Uuid, user_id: Uuid) -> RepoResult<bool> {
        let mut tx = self.pool.begin().await.map_err(map_db_error)?;

        let removed = sqlx::query(
            r"
            DELETE FROM promo_likes
            WHERE promo_id = $1 AND user_id = $2
            ",
        )
        .bind(promo_id)
        .bind(user_id)
        .execute(&mut *tx)
        .await
        .map_err(map_db_error)?
        .rows_affected();

        if removed > 0 {
            sqlx::query(
                r"
                UPDATE promos SET like_count = like_count - 1 WHERE id = $1
                ",
            )
            .bind(promo_id)
            .execute(&mut *tx)
            .await
            .map_err(map_db_error)?;
        }

        tx.commit().await.map_err(map_db_error)?;

        Ok(removed > 0)
    }

    #[instrument(skip(self))]
    async fn activation_stats(&self, promo_id: Uuid) -> RepoResult<PromoStats> {
        let activations_count = sqlx::query_scalar::<_, i64>(
            r"
            SELECT COUNT(*) FROM promo_activations WHERE promo_id = $1
            ",
        )
        .bind(promo_id)
        .fetch_one(&self.pool)
        .await
        .map_err(map_db_error)?;

        // Users without a country on file stay in the total above but have
        // no per-country row.
        let rows = sqlx::query_as::<_, ActivationCountModel>(
            r"
            SELECT LOWER(u.other->>'country') AS country, COUNT(*) AS activations_count
            FROM promo_activations pa
            JOIN users u ON u.id = pa.user_id
            WHERE pa.promo_id = $1 AND u.other->>'country' IS NOT NULL
            GROUP BY LOWER(u.other->>'country')
            ORDER BY country ASC
            ",
        )
        .bind(promo_id)
        .fetch_all(&self.pool)
        .await
        .map_err(map_db_error)?;

        let countries = rows
            .into_iter()
            .filter_map(|row| {
                row.country.map(|country| CountryActivations {
                    country,
                    activations_count: row.activations_count,
                })
            })
            .collect();

        Ok(PromoStats {
            activations_count,
            countries,
        })
    }
}
