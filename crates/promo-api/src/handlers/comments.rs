//! Promo comment handlers
//!
//! Comments hang off a promo; edits and deletes are author-only.

use axum::{extract::State, Json};
use promo_service::{
    CommentResponse, CommentService, CreateCommentRequest, StatusResponse, UpdateCommentRequest,
};

use crate::extractors::{ApiPath, AuthUser, CommentIdPath, Pagination, PromoIdPath, ValidatedJson};
use crate::response::{ApiResult, Created, WithTotalCount};
use crate::state::AppState;

/// Add a comment to a promo
///
/// POST /user/promo/{promo_id}/comments
pub async fn create_comment(
    State(state): State<AppState>,
    auth: AuthUser,
    ApiPath(path): ApiPath<PromoIdPath>,
    ValidatedJson(request): ValidatedJson<CreateCommentRequest>,
) -> ApiResult<Created<Json<CommentResponse>>> {
    let promo_id = path.promo_id()?;

    let service = CommentService::new(state.service_context());
    let response = service.add_comment(auth.user_id, promo_id, request).await?;
    Ok(Created(Json(response)))
}

/// List a promo's comments, newest first
///
/// GET /user/promo/{promo_id}/comments
pub async fn list_comments(
    State(state): State<AppState>,
    _auth: AuthUser,
    ApiPath(path): ApiPath<PromoIdPath>,
    pagination: Pagination,
) -> ApiResult<WithTotalCount<Vec<CommentResponse>>> {
    let promo_id = path.promo_id()?;

    let service = CommentService::new(state.service_context());
    let (comments, total) = service
        .list_comments(promo_id, pagination.limit, pagination.offset)
        .await?;
    Ok(WithTotalCount(comments, total))
}

/// Get a single comment
///
/// GET /user/promo/{promo_id}/comments/{comment_id}
pub async fn get_comment(
    State(state): State<AppState>,
    _auth: AuthUser,
    ApiPath(path): ApiPath<CommentIdPath>,
) -> ApiResult<Json<CommentResponse>> {
    let promo_id = path.promo_id()?;
    let comment_id = path.comment_id()?;

    let service = CommentService::new(state.service_context());
    let response = service.get_comment(promo_id, comment_id).await?;
    Ok(Json(response))
}

/// Replace a comment's text
///
/// PUT /user/promo/{promo_id}/comments/{comment_id}
pub async fn update_comment(
    State(state): State<AppState>,
    auth: AuthUser,
    ApiPath(path): ApiPath<CommentIdPath>,
    ValidatedJson(request): ValidatedJson<UpdateCommentRequest>,
) -> ApiResult<Json<CommentResponse>> {
    let promo_id = path.promo_id()?;
    let comment_id = path.comment_id()?;

    let service = CommentService::new(state.service_context());
    let response = service
        .update_comment(auth.user_id, promo_id, comment_id, request)
        .await?;
    Ok(Json(response))
}

/// Delete a comment
///
/// DELETE /user/promo/{promo_id}/comments/{comment_id}
pub async fn delete_comment(
    State(state): State<AppState>,
    auth: AuthUser,
    ApiPath(path): ApiPath<CommentIdPath>,
) -> ApiResult<Json<StatusResponse>> {
    let promo_id = path.promo_id()?;
    let comment_id = path.comment_id()?;

    let service = CommentService::new(state.service_context());
    service
        .delete_comment(auth.user_id, promo_id, comment_id)
        .await?;
    Ok(Json(StatusResponse::ok()))
}
