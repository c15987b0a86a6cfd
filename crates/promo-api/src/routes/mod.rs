//! Route definitions
//!
//! All API routes organized by surface and mounted at the root.

use axum::{routing::{delete, get, patch, post, put}, Router};

use crate::handlers::{activation, auth, comments, feed, health, likes, profile, promos};
use crate::state::AppState;

/// Create the main API router with all routes (excluding health for separate middleware handling)
pub fn create_router() -> Router<AppState> {
    Router::new()
        .merge(business_routes())
        .merge(user_routes())
}

/// Health check routes (exported separately to bypass rate limiting)
pub fn health_routes() -> Router<AppState> {
    Router::new()
        .route("/ping", get(health::ping))
        .route("/ping/ready", get(health::readiness_check))
}

/// Company-facing routes
fn business_routes() -> Router<AppState> {
    Router::new()
        // Auth
        .route("/business/auth/sign-up", post(auth::company_sign_up))
        .route("/business/auth/sign-in", post(auth::company_sign_in))
        // Promo CRUD
        .route("/business/promo", post(promos::create_promo))
        .route("/business/promo", get(promos::list_promos))
        .route("/business/promo/:promo_id", get(promos::get_promo))
        .route("/business/promo/:promo_id", patch(promos::update_promo))
        // Activation statistics
        .route("/business/promo/:promo_id/stat", get(promos::promo_stats))
}

/// User-facing routes
fn user_routes() -> Router<AppState> {
    Router::new()
        // Auth
        .route("/user/auth/sign-up", post(auth::user_sign_up))
        .route("/user/auth/sign-in", post(auth::user_sign_in))
        // Profile
        .route("/user/profile", get(profile::get_profile))
        .route("/user/profile", patch(profile::update_profile))
        // Feed
        .route("/user/feed", get(feed::feed))
        .route("/user/promo/:promo_id", get(feed::get_promo))
        // Likes
        .route("/user/promo/:promo_id/like", post(likes::like_promo))
        .route("/user/promo/:promo_id/like", delete(likes::unlike_promo))
        // Comments
        .route("/user/promo/:promo_id/comments", post(comments::create_comment))
        .route("/user/promo/:promo_id/comments", get(comments::list_comments))
        .route(
            "/user/promo/:promo_id/comments/:comment_id",
            get(comments::get_comment),
        )
        .route(
            "/user/promo/:promo_id/comments/:comment_id",
            put(comments::update_comment),
        )
        .route(
            "/user/promo/:promo_id/comments/:comment_id",
            delete(comments::delete_comment),
        )
        // Activation
        .route("/user/promo/:promo_id/activate", post(activation::activate_promo))
}
