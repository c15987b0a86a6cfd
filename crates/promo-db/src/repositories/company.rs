//! PostgreSQL implementation of CompanyRepository

use async_trait::async_trait;
use sqlx::PgPool;
use tracing::instrument;
use uuid::Uuid;

use promo_core::entities::Company;
use promo_core::error::DomainError;
use promo_core::traits::{CompanyRepository, RepoResult};

use crate::models::CompanyModel;

use super::error::{map_db_error, map_unique_violation};

/// PostgreSQL implementation of CompanyRepository
#[derive(Clone)]
pub struct PgCompanyRepository {
    pool: PgPool,
}

impl PgCompanyRepository {
    /// Create a new PgCompanyRepository
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl CompanyRepository for PgCompanyRepository {
    #[instrument(skip(self))]
    async fn find_by_id(&self, id: Uuid) -> RepoResult<Option<Company>> {
        let result = sqlx::query_as::<_, CompanyModel>(
            r"
            SELECT id, name, email, password_hash, created_at, updated_at
            FROM companies
            WHERE id = $1
            ",
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await
        .map_err(map_db_error)?;

        Ok(result.map(Company::from))
    }

    #[instrument(skip(self))]
    async fn find_by_email(&self, email: &str) -> RepoResult<Option<Company>> {
        let result = sqlx::query_as::<_, CompanyModel>(
            r"
            SELECT id, name, email, password_hash, created_at, updated_at
            FROM companies
            WHERE email = $1
            ",
        )
        .bind(email)
        .fetch_optional(&self.pool)
        .await
        .map_err(map_db_error)?;

        Ok(result.map(Company::from))
    }

    #[instrument(skip(self))]
    async fn email_exists(&self, email: &str) -> RepoResult<bool> {
        let result = sqlx::query_scalar::<_, bool>(
            r"
            SELECT EXISTS(SELECT 1 FROM companies WHERE email = $1)
            ",
        )
        .bind(email)
        .fetch_one(&self.pool)
        .await
        .map_err(map_db_error)?;

        Ok(result)
    }

    #[instrument(skip(self, password_hash))]
    async fn create(&self, company: &Company, password_hash: &str) -> RepoResult<()> {
        sqlx::query(
            r"
            INSERT INTO companies (id, name, email, password_hash, created_at, updated_at)
            VALUES ($1, $2, $3, $4, $5, $6)
            ",
        )
        .bind(company.id)
        .bind(&company.name)
        .bind(&company.email)
        .bind(password_hash)
        .bind(company.created_at)
        .bind(company.updated_at)
        .execute(&self.pool)
        .await
        .map_err(|e| map_unique_violation(e, || DomainError::EmailAlreadyExists))?;

        Ok(())
    }

    #[instrument(skip(self))]
    async fn get_password_hash(&self, id: Uuid) -> RepoResult<Option<String>> {
        let result = sqlx::query_scalar::<_, String>(
            r"
            SELECT password_hash FROM companies WHERE id = $1
            ",
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await
        .map_err(map_db_error)?;

        Ok(result)
    }
}
