//! Comment service
//!
//! Comments under promos: creation, listing newest first, and
//! author-only editing and deletion.

use tracing::{info, instrument};
use uuid::Uuid;

use promo_core::entities::PromoComment;
use promo_core::DomainError;

use crate::dto::{CommentResponse, CreateCommentRequest, UpdateCommentRequest};

use super::context::ServiceContext;
use super::error::{ServiceError, ServiceResult};
use super::promo::check_page_bounds;

/// Comment service
pub struct CommentService<'a> {
    ctx: &'a ServiceContext,
}

impl<'a> CommentService<'a> {
    /// Create a new CommentService
    pub fn new(ctx: &'a ServiceContext) -> Self {
        Self { ctx }
    }

    /// Add a comment under a promo
    #[instrument(skip(self, request))]
    pub async fn add_comment(
        &self,
        user_id: Uuid,
        promo_id: Uuid,
        request: CreateCommentRequest,
    ) -> ServiceResult<CommentResponse> {
        self.ensure_promo_exists(promo_id).await?;

        let comment = PromoComment::new(promo_id, user_id, request.text);
        self.ctx.comment_repo().create(&comment).await?;

        info!(comment_id = %comment.id, promo_id = %promo_id, "Comment added");

        self.fetch_response(promo_id, comment.id).await
    }

    /// List a promo's comments, newest first
    ///
    /// Returns the page plus the total count for the `X-Total-Count`
    /// header.
    #[instrument(skip(self))]
    pub async fn list_comments(
        &self,
        promo_id: Uuid,
        limit: i64,
        offset: i64,
    ) -> ServiceResult<(Vec<CommentResponse>, i64)> {
        self.ensure_promo_exists(promo_id).await?;

        let (items, total) = self
            .ctx
            .comment_repo()
            .list_for_promo(promo_id, limit, offset)
            .await?;

        check_page_bounds(offset, total)?;

        let responses = items.iter().map(CommentResponse::from).collect();
        Ok((responses, total))
    }

    /// Get a single comment under a promo
    #[instrument(skip(self))]
    pub async fn get_comment(
        &self,
        promo_id: Uuid,
        comment_id: Uuid,
    ) -> ServiceResult<CommentResponse> {
        self.ensure_promo_exists(promo_id).await?;
        self.fetch_response(promo_id, comment_id).await
    }

    /// Replace a comment's text; only its author may do so
    #[instrument(skip(self, request))]
    pub async fn update_comment(
        &self,
        user_id: Uuid,
        promo_id: Uuid,
        comment_id: Uuid,
        request: UpdateCommentRequest,
    ) -> ServiceResult<CommentResponse> {
        self.ensure_promo_exists(promo_id).await?;

        let mut comment = self
            .ctx
            .comment_repo()
            .find(promo_id, comment_id)
            .await?
            .ok_or_else(|| ServiceError::not_found("Comment", comment_id.to_string()))?;

        if !comment.is_author(user_id) {
            return Err(ServiceError::from(DomainError::NotCommentAuthor));
        }

        comment.set_text(request.text);
        self.ctx.comment_repo().update_text(&comment).await?;

        info!(comment_id = %comment_id, promo_id = %promo_id, "Comment updated");

        self.fetch_response(promo_id, comment_id).await
    }

    /// Delete a comment; only its author may do so
    #[instrument(skip(self))]
    pub async fn delete_comment(
        &self,
        user_id: Uuid,
        promo_id: Uuid,
        comment_id: Uuid,
    ) -> ServiceResult<()> {
        self.ensure_promo_exists(promo_id).await?;

        let comment = self
            .ctx
            .comment_repo()
            .find(promo_id, comment_id)
            .await?
            .ok_or_else(|| ServiceError::not_found("Comment", comment_id.to_string()))?;

        if !comment.is_author(user_id) {
            return Err(ServiceError::from(DomainError::NotCommentAuthor));
        }

        self.ctx.comment_repo().delete(promo_id, comment_id).await?;

        info!(comment_id = %comment_id, promo_id = %promo_id, "Comment deleted");
        Ok(())
    }

    async fn ensure_promo_exists(&self, promo_id: Uuid) -> ServiceResult<()> {
        self.ctx
            .promo_repo()
            .find_by_id(promo_id)
            .await?
            .ok_or_else(|| ServiceError::not_found("Promo", promo_id.to_string()))?;
        Ok(())
    }

    async fn fetch_response(
        &self,
        promo_id: Uuid,
        comment_id: Uuid,
    ) -> ServiceResult<CommentResponse> {
        let item = self
            .ctx
            .comment_repo()
            .find_with_author(promo_id, comment_id)
            .await?
            .ok_or_else(|| ServiceError::not_found("Comment", comment_id.to_string()))?;

        Ok(CommentResponse::from(&item))
    }
}
