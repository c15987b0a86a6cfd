//! API Integration Tests
//!
//! These tests require:
//! - Running PostgreSQL instance (schema provisioned)
//! - Running Redis instance
//! - Environment variables: DATABASE_URL, REDIS_URL
//!
//! Run with: cargo test -p integration-tests --test api_tests

use integration_tests::{
    assert_error, assert_json, assert_status, check_test_env, fixtures::*, test_config, TestServer,
};
use reqwest::StatusCode;
use serde_json::json;
use uuid::Uuid;

/// Sign up a fresh company and return the request plus its token
async fn company_with_token(server: &TestServer) -> (CompanySignUp, String) {
    let request = CompanySignUp::unique();
    let response = server
        .post("/business/auth/sign-up", &request)
        .await
        .unwrap();
    let body: CompanySignUpBody = assert_json(response, StatusCode::OK).await.unwrap();
    (request, body.token)
}

/// Sign up a fresh user and return the request plus its token
async fn user_with_token(server: &TestServer, user: UserSignUp) -> (UserSignUp, String) {
    let response = server.post("/user/auth/sign-up", &user).await.unwrap();
    let body: TokenBody = assert_json(response, StatusCode::CREATED).await.unwrap();
    (user, body.token)
}

/// Create a promo and return its id
async fn create_promo(server: &TestServer, token: &str, promo: &CreatePromo) -> String {
    let response = server.post_auth("/business/promo", token, promo).await.unwrap();
    let body: CreatedBody = assert_json(response, StatusCode::CREATED).await.unwrap();
    body.id
}

/// Activate a promo, returning the raw status and body
async fn activate(server: &TestServer, token: &str, promo_id: &str) -> (StatusCode, String) {
    let response = server
        .post_auth_empty(&format!("/user/promo/{promo_id}/activate"), token)
        .await
        .unwrap();
    let status = response.status();
    let body = response.text().await.unwrap();
    (status, body)
}

/// Fetch the user view of a promo
async fn user_promo_view(server: &TestServer, token: &str, promo_id: &str) -> PromoForUser {
    let response = server
        .get_auth(&format!("/user/promo/{promo_id}"), token)
        .await
        .unwrap();
    assert_json(response, StatusCode::OK).await.unwrap()
}

// ============================================================================
// Health Check Tests
// ============================================================================

#[tokio::test]
async fn test_ping() {
    if !check_test_env().await {
        return;
    }

    let server = TestServer::start().await.expect("Failed to start server");
    let response = server.get("/ping").await.expect("Request failed");
    let body: StatusBody = assert_json(response, StatusCode::OK).await.unwrap();
    assert_eq!(body.status, "ok");
}

#[tokio::test]
async fn test_ping_ready() {
    if !check_test_env().await {
        return;
    }

    let server = TestServer::start().await.expect("Failed to start server");
    let response = server.get("/ping/ready").await.expect("Request failed");
    assert_status(response, StatusCode::OK).await.unwrap();
}

// ============================================================================
// Company Auth Tests
// ============================================================================

#[tokio::test]
async fn test_company_sign_up() {
    if !check_test_env().await {
        return;
    }

    let server = TestServer::start().await.expect("Failed to start server");
    let request = CompanySignUp::unique();

    let response = server.post("/business/auth/sign-up", &request).await.unwrap();
    let body: CompanySignUpBody = assert_json(response, StatusCode::OK).await.unwrap();

    assert!(body.company_id.parse::<Uuid>().is_ok());
    assert!(!body.token.is_empty());
}

#[tokio::test]
async fn test_company_sign_up_duplicate_email() {
    if !check_test_env().await {
        return;
    }

    let server = TestServer::start().await.expect("Failed to start server");
    let request = CompanySignUp::unique();

    server.post("/business/auth/sign-up", &request).await.unwrap();

    let response = server.post("/business/auth/sign-up", &request).await.unwrap();
    assert_status(response, StatusCode::CONFLICT).await.unwrap();
}

#[tokio::test]
async fn test_company_sign_in() {
    if !check_test_env().await {
        return;
    }

    let server = TestServer::start().await.expect("Failed to start server");
    let (company, _) = company_with_token(&server).await;

    let sign_in = SignIn::new(&company.email, &company.password);
    let response = server.post("/business/auth/sign-in", &sign_in).await.unwrap();
    let body: TokenBody = assert_json(response, StatusCode::OK).await.unwrap();
    assert!(!body.token.is_empty());

    let wrong = SignIn::new(&company.email, "WrongPass123!");
    let response = server.post("/business/auth/sign-in", &wrong).await.unwrap();
    assert_error(response, StatusCode::UNAUTHORIZED, "INVALID_CREDENTIALS")
        .await
        .unwrap();
}

#[tokio::test]
async fn test_sign_up_rejects_weak_password() {
    if !check_test_env().await {
        return;
    }

    let server = TestServer::start().await.expect("Failed to start server");

    // No uppercase, digit, or special character
    let mut company = CompanySignUp::unique();
    company.password = "weakpassword".to_string();
    let response = server.post("/business/auth/sign-up", &company).await.unwrap();
    assert_status(response, StatusCode::BAD_REQUEST).await.unwrap();

    let mut user = UserSignUp::unique();
    user.password = "weakpassword".to_string();
    let response = server.post("/user/auth/sign-up", &user).await.unwrap();
    assert_status(response, StatusCode::BAD_REQUEST).await.unwrap();
}

#[tokio::test]
async fn test_malformed_body_is_validation_error() {
    if !check_test_env().await {
        return;
    }

    let server = TestServer::start().await.expect("Failed to start server");

    // Required fields missing entirely
    let response = server
        .post("/business/auth/sign-up", &json!({"name": "No Email Inc"}))
        .await
        .unwrap();
    assert_error(response, StatusCode::BAD_REQUEST, "VALIDATION_ERROR")
        .await
        .unwrap();
}

// ============================================================================
// User Auth and Session Tests
// ============================================================================

#[tokio::test]
async fn test_user_sign_up_and_profile() {
    if !check_test_env().await {
        return;
    }

    let server = TestServer::start().await.expect("Failed to start server");
    let (user, token) = user_with_token(&server, UserSignUp::with_attributes(25, "fr")).await;

    let response = server.get_auth("/user/profile", &token).await.unwrap();
    let profile: ProfileBody = assert_json(response, StatusCode::OK).await.unwrap();

    assert_eq!(profile.name, user.name);
    assert_eq!(profile.surname, user.surname);
    assert_eq!(profile.email, user.email);
    assert_eq!(profile.other["age"], 25);
    assert_eq!(profile.other["country"], "fr");
}

#[tokio::test]
async fn test_user_sign_up_duplicate_email() {
    if !check_test_env().await {
        return;
    }

    let server = TestServer::start().await.expect("Failed to start server");
    let user = UserSignUp::unique();

    server.post("/user/auth/sign-up", &user).await.unwrap();

    let response = server.post("/user/auth/sign-up", &user).await.unwrap();
    assert_status(response, StatusCode::CONFLICT).await.unwrap();
}

#[tokio::test]
async fn test_user_sign_in_invalid_credentials() {
    if !check_test_env().await {
        return;
    }

    let server = TestServer::start().await.expect("Failed to start server");
    let sign_in = SignIn::new("nobody@example.com", "TestPass123!");

    let response = server.post("/user/auth/sign-in", &sign_in).await.unwrap();
    assert_error(response, StatusCode::UNAUTHORIZED, "INVALID_CREDENTIALS")
        .await
        .unwrap();
}

#[tokio::test]
async fn test_missing_token_is_unauthorized() {
    if !check_test_env().await {
        return;
    }

    let server = TestServer::start().await.expect("Failed to start server");
    let response = server.get("/user/profile").await.unwrap();
    assert_error(response, StatusCode::UNAUTHORIZED, "MISSING_AUTHORIZATION")
        .await
        .unwrap();

    // A non-Bearer scheme is rejected with a distinct code
    let response = server
        .client
        .get(format!("{}/user/profile", server.base_url()))
        .header("Authorization", "Basic dXNlcjpwYXNz")
        .send()
        .await
        .unwrap();
    assert_error(
        response,
        StatusCode::UNAUTHORIZED,
        "INVALID_AUTHORIZATION_FORMAT",
    )
    .await
    .unwrap();

    // Garbage bearer tokens fail signature validation
    let response = server.get_auth("/user/profile", "not.a.jwt").await.unwrap();
    assert_error(response, StatusCode::UNAUTHORIZED, "INVALID_TOKEN")
        .await
        .unwrap();
}

#[tokio::test]
async fn test_wrong_principal_kind_is_forbidden() {
    if !check_test_env().await {
        return;
    }

    let server = TestServer::start().await.expect("Failed to start server");
    let (_, user_token) = user_with_token(&server, UserSignUp::unique()).await;
    let (_, company_token) = company_with_token(&server).await;

    // A user token cannot drive the company surface
    let response = server
        .post_auth("/business/promo", &user_token, &CreatePromo::common("X1", 1))
        .await
        .unwrap();
    assert_error(response, StatusCode::FORBIDDEN, "INSUFFICIENT_PERMISSIONS")
        .await
        .unwrap();

    // And a company token cannot drive the user surface
    let response = server.get_auth("/user/profile", &company_token).await.unwrap();
    assert_error(response, StatusCode::FORBIDDEN, "INSUFFICIENT_PERMISSIONS")
        .await
        .unwrap();
}

#[tokio::test]
async fn test_sign_in_invalidates_previous_token() {
    if !check_test_env().await {
        return;
    }

    let server = TestServer::start().await.expect("Failed to start server");
    let (user, old_token) = user_with_token(&server, UserSignUp::unique()).await;

    // Old token works until a new one is issued
    let response = server.get_auth("/user/profile", &old_token).await.unwrap();
    assert_status(response, StatusCode::OK).await.unwrap();

    let sign_in = SignIn::new(&user.email, &user.password);
    let response = server.post("/user/auth/sign-in", &sign_in).await.unwrap();
    let new_token: TokenBody = assert_json(response, StatusCode::OK).await.unwrap();

    let response = server.get_auth("/user/profile", &old_token).await.unwrap();
    assert_error(response, StatusCode::UNAUTHORIZED, "INVALID_TOKEN")
        .await
        .unwrap();

    let response = server.get_auth("/user/profile", &new_token.token).await.unwrap();
    assert_status(response, StatusCode::OK).await.unwrap();
}

#[tokio::test]
async fn test_update_profile() {
    if !check_test_env().await {
        return;
    }

    let server = TestServer::start().await.expect("Failed to start server");
    let (user, token) = user_with_token(&server, UserSignUp::unique()).await;

    let patch = json!({
        "name": "Renamed",
        "other": {"age": 33, "country": "de"},
        "password": "Changed456!"
    });
    let response = server.patch_auth("/user/profile", &token, &patch).await.unwrap();
    let profile: ProfileBody = assert_json(response, StatusCode::OK).await.unwrap();

    assert_eq!(profile.name, "Renamed");
    assert_eq!(profile.surname, user.surname);
    assert_eq!(profile.email, user.email);
    assert_eq!(profile.other["age"], 33);

    // The old password no longer signs in; the new one does
    let response = server
        .post("/user/auth/sign-in", &SignIn::new(&user.email, &user.password))
        .await
        .unwrap();
    assert_status(response, StatusCode::UNAUTHORIZED).await.unwrap();

    let response = server
        .post("/user/auth/sign-in", &SignIn::new(&user.email, "Changed456!"))
        .await
        .unwrap();
    assert_status(response, StatusCode::OK).await.unwrap();
}

// ============================================================================
// Company Promo Tests
// ============================================================================

#[tokio::test]
async fn test_create_promo_normalizes_targeting() {
    if !check_test_env().await {
        return;
    }

    let server = TestServer::start().await.expect("Failed to start server");
    let (_, token) = company_with_token(&server).await;

    let promo = CreatePromo::common("WELCOME10", 50)
        .with_target(json!({"country": "FR", "categories": ["Coffee", "TEA"]}));
    let promo_id = create_promo(&server, &token, &promo).await;

    let response = server
        .get_auth(&format!("/business/promo/{promo_id}"), &token)
        .await
        .unwrap();
    let body: PromoForCompany = assert_json(response, StatusCode::OK).await.unwrap();

    assert_eq!(body.promo_id, promo_id);
    assert_eq!(body.target.country.as_deref(), Some("fr"));
    assert_eq!(body.target.categories, vec!["coffee", "tea"]);
    assert_eq!(body.mode, "COMMON");
    assert_eq!(body.promo_common.as_deref(), Some("WELCOME10"));
    assert_eq!(body.max_count, 50);
    assert!(body.active);
    assert_eq!(body.used_count, 0);
}

#[tokio::test]
async fn test_create_promo_rejects_bad_configuration() {
    if !check_test_env().await {
        return;
    }

    let server = TestServer::start().await.expect("Failed to start server");
    let (_, token) = company_with_token(&server).await;

    // Unknown mode
    let mut promo = CreatePromo::common("CODE1", 10);
    promo.mode = "LOTTERY".to_string();
    let response = server.post_auth("/business/promo", &token, &promo).await.unwrap();
    assert_status(response, StatusCode::BAD_REQUEST).await.unwrap();

    // COMMON without a shared code
    let mut promo = CreatePromo::common("CODE1", 10);
    promo.promo_common = None;
    let response = server.post_auth("/business/promo", &token, &promo).await.unwrap();
    assert_status(response, StatusCode::BAD_REQUEST).await.unwrap();

    // Inverted activity period
    let mut promo = CreatePromo::common("CODE1", 10);
    promo.active_from = Some("2026-02-01".to_string());
    promo.active_until = Some("2026-01-01".to_string());
    let response = server.post_auth("/business/promo", &token, &promo).await.unwrap();
    assert_status(response, StatusCode::BAD_REQUEST).await.unwrap();

    // Inverted age bounds
    let promo = CreatePromo::common("CODE1", 10)
        .with_target(json!({"age_from": 40, "age_until": 18}));
    let response = server.post_auth("/business/promo", &token, &promo).await.unwrap();
    assert_status(response, StatusCode::BAD_REQUEST).await.unwrap();
}

#[tokio::test]
async fn test_promo_of_another_company_is_not_found() {
    if !check_test_env().await {
        return;
    }

    let server = TestServer::start().await.expect("Failed to start server");
    let (_, owner_token) = company_with_token(&server).await;
    let (_, other_token) = company_with_token(&server).await;

    let promo_id = create_promo(&server, &owner_token, &CreatePromo::common("MINE", 5)).await;

    let response = server
        .get_auth(&format!("/business/promo/{promo_id}"), &other_token)
        .await
        .unwrap();
    assert_status(response, StatusCode::NOT_FOUND).await.unwrap();

    let response = server
        .patch_auth(
            &format!("/business/promo/{promo_id}"),
            &other_token,
            &json!({"description": "hijack"}),
        )
        .await
        .unwrap();
    assert_status(response, StatusCode::NOT_FOUND).await.unwrap();

    let response = server
        .get_auth(&format!("/business/promo/{promo_id}/stat"), &other_token)
        .await
        .unwrap();
    assert_status(response, StatusCode::NOT_FOUND).await.unwrap();
}

#[tokio::test]
async fn test_list_promos_filters_and_sorts() {
    if !check_test_env().await {
        return;
    }

    let server = TestServer::start().await.expect("Failed to start server");
    let (_, token) = company_with_token(&server).await;

    let mut early = CreatePromo::common("EARLY", 1).with_target(json!({"country": "fr"}));
    early.active_from = Some("2026-01-01".to_string());
    let mut late = CreatePromo::common("LATE", 1).with_target(json!({"country": "fr"}));
    late.active_from = Some("2026-03-01".to_string());
    let elsewhere = CreatePromo::common("DE", 1).with_target(json!({"country": "de"}));

    // Insert out of order so sorting actually has to work
    let late_id = create_promo(&server, &token, &late).await;
    create_promo(&server, &token, &elsewhere).await;
    let early_id = create_promo(&server, &token, &early).await;

    // Country filter is case-insensitive and repeatable
    let response = server
        .get_auth("/business/promo?country=FR&sort_by=active_from", &token)
        .await
        .unwrap();
    let total = response
        .headers()
        .get("x-total-count")
        .and_then(|v| v.to_str().ok())
        .map(str::to_string);
    let listed: Vec<PromoForCompany> = assert_json(response, StatusCode::OK).await.unwrap();

    assert_eq!(total.as_deref(), Some("2"));
    assert_eq!(listed.len(), 2);
    assert_eq!(listed[0].promo_id, early_id);
    assert_eq!(listed[1].promo_id, late_id);

    // Unknown sort keys are ignored, everything still lists
    let response = server
        .get_auth("/business/promo?sort_by=likes", &token)
        .await
        .unwrap();
    let listed: Vec<PromoForCompany> = assert_json(response, StatusCode::OK).await.unwrap();
    assert_eq!(listed.len(), 3);
}

#[tokio::test]
async fn test_list_promos_rejects_bad_pagination() {
    if !check_test_env().await {
        return;
    }

    let server = TestServer::start().await.expect("Failed to start server");
    let (_, token) = company_with_token(&server).await;
    create_promo(&server, &token, &CreatePromo::common("ONLY", 1)).await;

    // Offset at or past the end of a non-empty result
    let response = server.get_auth("/business/promo?offset=5", &token).await.unwrap();
    assert_error(response, StatusCode::BAD_REQUEST, "VALIDATION_ERROR")
        .await
        .unwrap();

    // Negative limit
    let response = server.get_auth("/business/promo?limit=-1", &token).await.unwrap();
    assert_status(response, StatusCode::BAD_REQUEST).await.unwrap();
}

#[tokio::test]
async fn test_update_promo() {
    if !check_test_env().await {
        return;
    }

    let server = TestServer::start().await.expect("Failed to start server");
    let (_, token) = company_with_token(&server).await;
    let promo_id = create_promo(&server, &token, &CreatePromo::common("V1", 10)).await;

    let patch = json!({
        "description": "Second edition",
        "target": {"country": "IT"},
        "active": false
    });
    let response = server
        .patch_auth(&format!("/business/promo/{promo_id}"), &token, &patch)
        .await
        .unwrap();
    let body: PromoForCompany = assert_json(response, StatusCode::OK).await.unwrap();

    assert_eq!(body.description, "Second edition");
    assert_eq!(body.target.country.as_deref(), Some("it"));
    assert!(!body.active);

    // Updates obey the same cross-field rules as create
    let response = server
        .patch_auth(
            &format!("/business/promo/{promo_id}"),
            &token,
            &json!({"target": {"age_from": 50, "age_until": 20}}),
        )
        .await
        .unwrap();
    assert_status(response, StatusCode::BAD_REQUEST).await.unwrap();
}

// ============================================================================
// Feed Tests
// ============================================================================

#[tokio::test]
async fn test_feed_envelope_and_filters() {
    if !check_test_env().await {
        return;
    }

    let server = TestServer::start().await.expect("Failed to start server");
    let (_, company_token) = company_with_token(&server).await;
    let (_, user_token) = user_with_token(&server, UserSignUp::unique()).await;

    // A category no other test run shares keeps the feed assertions exact
    let category = format!("cat{}", unique_suffix());

    let visible = CreatePromo::common("FEED1", 5)
        .with_target(json!({"categories": [category.clone()]}));
    let hidden = CreatePromo::common("FEED2", 5)
        .with_target(json!({"categories": [category.clone()]}))
        .inactive();
    let unrelated = CreatePromo::common("FEED3", 5);

    let visible_id = create_promo(&server, &company_token, &visible).await;
    let hidden_id = create_promo(&server, &company_token, &hidden).await;
    create_promo(&server, &company_token, &unrelated).await;

    // The category filter folds case and trims
    let response = server
        .get_auth(
            &format!("/user/feed?category={}", category.to_uppercase()),
            &user_token,
        )
        .await
        .unwrap();
    let total = response
        .headers()
        .get("x-total-count")
        .and_then(|v| v.to_str().ok())
        .map(str::to_string);
    let feed: FeedBody = assert_json(response, StatusCode::OK).await.unwrap();

    assert_eq!(feed.status, "success");
    assert_eq!(feed.count, feed.data.len());
    assert_eq!(total.as_deref(), Some("1"));
    assert!(feed.data.iter().any(|p| p.promo_id == visible_id));
    assert!(!feed.data.iter().any(|p| p.promo_id == hidden_id));

    // active=false lifts the active-only restriction
    let response = server
        .get_auth(
            &format!("/user/feed?category={category}&active=false"),
            &user_token,
        )
        .await
        .unwrap();
    let feed: FeedBody = assert_json(response, StatusCode::OK).await.unwrap();
    assert_eq!(feed.count, 2);
    assert!(feed.data.iter().any(|p| p.promo_id == hidden_id));
}

#[tokio::test]
async fn test_user_promo_view() {
    if !check_test_env().await {
        return;
    }

    let server = TestServer::start().await.expect("Failed to start server");
    let (_, company_token) = company_with_token(&server).await;
    let (_, user_token) = user_with_token(&server, UserSignUp::unique()).await;

    let promo_id = create_promo(&server, &company_token, &CreatePromo::common("VIEW", 5)).await;

    let view = user_promo_view(&server, &user_token, &promo_id).await;
    assert!(view.active);
    assert!(!view.is_liked_by_user);
    assert!(!view.is_activated_by_user);
    assert_eq!(view.like_count, 0);
    assert_eq!(view.comment_count, 0);

    // The user view never leaks codes or targeting
    let response = server
        .get_auth(&format!("/user/promo/{promo_id}"), &user_token)
        .await
        .unwrap();
    let raw: serde_json::Value = assert_json(response, StatusCode::OK).await.unwrap();
    assert!(raw.get("promo_common").is_none());
    assert!(raw.get("promo_unique").is_none());
    assert!(raw.get("target").is_none());

    let response = server
        .get_auth(&format!("/user/promo/{}", Uuid::new_v4()), &user_token)
        .await
        .unwrap();
    assert_status(response, StatusCode::NOT_FOUND).await.unwrap();

    let response = server
        .get_auth("/user/promo/not-a-uuid", &user_token)
        .await
        .unwrap();
    assert_status(response, StatusCode::BAD_REQUEST).await.unwrap();
}

// ============================================================================
// Like Tests
// ============================================================================

#[tokio::test]
async fn test_likes_are_idempotent() {
    if !check_test_env().await {
        return;
    }

    let server = TestServer::start().await.expect("Failed to start server");
    let (_, company_token) = company_with_token(&server).await;
    let (_, user_token) = user_with_token(&server, UserSignUp::unique()).await;

    let promo_id = create_promo(&server, &company_token, &CreatePromo::common("LIKE", 5)).await;
    let like_path = format!("/user/promo/{promo_id}/like");

    for _ in 0..2 {
        let response = server.post_auth_empty(&like_path, &user_token).await.unwrap();
        let body: StatusBody = assert_json(response, StatusCode::OK).await.unwrap();
        assert_eq!(body.status, "ok");
    }

    let view = user_promo_view(&server, &user_token, &promo_id).await;
    assert_eq!(view.like_count, 1);
    assert!(view.is_liked_by_user);

    for _ in 0..2 {
        let response = server.delete_auth(&like_path, &user_token).await.unwrap();
        assert_status(response, StatusCode::OK).await.unwrap();
    }

    let view = user_promo_view(&server, &user_token, &promo_id).await;
    assert_eq!(view.like_count, 0);
    assert!(!view.is_liked_by_user);

    // Liking a missing promo is a 404, not a silent no-op
    let response = server
        .post_auth_empty(&format!("/user/promo/{}/like", Uuid::new_v4()), &user_token)
        .await
        .unwrap();
    assert_status(response, StatusCode::NOT_FOUND).await.unwrap();
}

// ============================================================================
// Comment Tests
// ============================================================================

#[tokio::test]
async fn test_comment_crud_flow() {
    if !check_test_env().await {
        return;
    }

    let server = TestServer::start().await.expect("Failed to start server");
    let (_, company_token) = company_with_token(&server).await;
    let (user, user_token) = user_with_token(&server, UserSignUp::unique()).await;

    let promo_id = create_promo(&server, &company_token, &CreatePromo::common("CMT", 5)).await;
    let comments_path = format!("/user/promo/{promo_id}/comments");

    let response = server
        .post_auth(&comments_path, &user_token, &json!({"text": "first"}))
        .await
        .unwrap();
    let first: CommentBody = assert_json(response, StatusCode::CREATED).await.unwrap();
    assert_eq!(first.text, "first");
    assert_eq!(first.author.name, user.name);
    assert_eq!(first.author.surname, user.surname);

    let response = server
        .post_auth(&comments_path, &user_token, &json!({"text": "second"}))
        .await
        .unwrap();
    let second: CommentBody = assert_json(response, StatusCode::CREATED).await.unwrap();

    // Newest first
    let response = server.get_auth(&comments_path, &user_token).await.unwrap();
    let total = response
        .headers()
        .get("x-total-count")
        .and_then(|v| v.to_str().ok())
        .map(str::to_string);
    let listed: Vec<CommentBody> = assert_json(response, StatusCode::OK).await.unwrap();
    assert_eq!(total.as_deref(), Some("2"));
    assert_eq!(listed[0].id, second.id);
    assert_eq!(listed[1].id, first.id);

    let view = user_promo_view(&server, &user_token, &promo_id).await;
    assert_eq!(view.comment_count, 2);

    // Single fetch, edit, delete
    let comment_path = format!("{comments_path}/{}", first.id);
    let response = server.get_auth(&comment_path, &user_token).await.unwrap();
    let fetched: CommentBody = assert_json(response, StatusCode::OK).await.unwrap();
    assert_eq!(fetched.text, "first");

    let response = server
        .put_auth(&comment_path, &user_token, &json!({"text": "edited"}))
        .await
        .unwrap();
    let edited: CommentBody = assert_json(response, StatusCode::OK).await.unwrap();
    assert_eq!(edited.text, "edited");

    let response = server.delete_auth(&comment_path, &user_token).await.unwrap();
    let body: StatusBody = assert_json(response, StatusCode::OK).await.unwrap();
    assert_eq!(body.status, "ok");

    let view = user_promo_view(&server, &user_token, &promo_id).await;
    assert_eq!(view.comment_count, 1);

    let response = server.get_auth(&comment_path, &user_token).await.unwrap();
    assert_status(response, StatusCode::NOT_FOUND).await.unwrap();
}

#[tokio::test]
async fn test_comments_are_author_only_for_writes() {
    if !check_test_env().await {
        return;
    }

    let server = TestServer::start().await.expect("Failed to start server");
    let (_, company_token) = company_with_token(&server).await;
    let (_, author_token) = user_with_token(&server, UserSignUp::unique()).await;
    let (_, other_token) = user_with_token(&server, UserSignUp::unique()).await;

    let promo_id = create_promo(&server, &company_token, &CreatePromo::common("AUTH", 5)).await;
    let comments_path = format!("/user/promo/{promo_id}/comments");

    let response = server
        .post_auth(&comments_path, &author_token, &json!({"text": "mine"}))
        .await
        .unwrap();
    let comment: CommentBody = assert_json(response, StatusCode::CREATED).await.unwrap();
    let comment_path = format!("{comments_path}/{}", comment.id);

    // Everyone may read
    let response = server.get_auth(&comment_path, &other_token).await.unwrap();
    assert_status(response, StatusCode::OK).await.unwrap();

    // Only the author may write
    let response = server
        .put_auth(&comment_path, &other_token, &json!({"text": "hijack"}))
        .await
        .unwrap();
    assert_error(response, StatusCode::FORBIDDEN, "NOT_COMMENT_AUTHOR")
        .await
        .unwrap();

    let response = server.delete_auth(&comment_path, &other_token).await.unwrap();
    assert_error(response, StatusCode::FORBIDDEN, "NOT_COMMENT_AUTHOR")
        .await
        .unwrap();
}

#[tokio::test]
async fn test_comment_text_bounds() {
    if !check_test_env().await {
        return;
    }

    let server = TestServer::start().await.expect("Failed to start server");
    let (_, company_token) = company_with_token(&server).await;
    let (_, user_token) = user_with_token(&server, UserSignUp::unique()).await;

    let promo_id = create_promo(&server, &company_token, &CreatePromo::common("LEN", 5)).await;
    let comments_path = format!("/user/promo/{promo_id}/comments");

    let response = server
        .post_auth(&comments_path, &user_token, &json!({"text": ""}))
        .await
        .unwrap();
    assert_status(response, StatusCode::BAD_REQUEST).await.unwrap();

    let response = server
        .post_auth(&comments_path, &user_token, &json!({"text": "x".repeat(1001)}))
        .await
        .unwrap();
    assert_status(response, StatusCode::BAD_REQUEST).await.unwrap();

    // The boundary itself is fine
    let response = server
        .post_auth(&comments_path, &user_token, &json!({"text": "x".repeat(1000)}))
        .await
        .unwrap();
    assert_status(response, StatusCode::CREATED).await.unwrap();

    // Comments on a missing promo are a 404
    let response = server
        .post_auth(
            &format!("/user/promo/{}/comments", Uuid::new_v4()),
            &user_token,
            &json!({"text": "ghost"}),
        )
        .await
        .unwrap();
    assert_status(response, StatusCode::NOT_FOUND).await.unwrap();
}

// ============================================================================
// Activation Tests
// ============================================================================

#[tokio::test]
async fn test_activate_common_promo() {
    if !check_test_env().await {
        return;
    }

    let server = TestServer::start().await.expect("Failed to start server");
    let (_, company_token) = company_with_token(&server).await;
    let (_, user_token) = user_with_token(&server, UserSignUp::with_attributes(30, "fr")).await;

    let promo = CreatePromo::common("SALE25", 10)
        .with_target(json!({"age_from": 18, "country": "fr"}));
    let promo_id = create_promo(&server, &company_token, &promo).await;

    let response = server
        .post_auth_empty(&format!("/user/promo/{promo_id}/activate"), &user_token)
        .await
        .unwrap();
    let body: ActivationBody = assert_json(response, StatusCode::OK).await.unwrap();
    assert_eq!(body.code, "SALE25");

    let view = user_promo_view(&server, &user_token, &promo_id).await;
    assert!(view.is_activated_by_user);

    // The budget moved
    let response = server
        .get_auth(&format!("/business/promo/{promo_id}"), &company_token)
        .await
        .unwrap();
    let owned: PromoForCompany = assert_json(response, StatusCode::OK).await.unwrap();
    assert_eq!(owned.used_count, 1);
    assert_eq!(owned.max_count, 9);
}

#[tokio::test]
async fn test_activation_eligibility_gates() {
    if !check_test_env().await {
        return;
    }

    let server = TestServer::start().await.expect("Failed to start server");
    let (_, company_token) = company_with_token(&server).await;

    let promo = CreatePromo::common("GATED", 10)
        .with_target(json!({"age_from": 21, "country": "fr"}));
    let promo_id = create_promo(&server, &company_token, &promo).await;

    // Too young
    let (_, young) = user_with_token(&server, UserSignUp::with_attributes(18, "fr")).await;
    let (status, body) = activate(&server, &young, &promo_id).await;
    assert_eq!(status, StatusCode::FORBIDDEN, "{body}");
    assert!(body.contains("NOT_ELIGIBLE"), "{body}");

    // Wrong country
    let (_, abroad) = user_with_token(&server, UserSignUp::with_attributes(30, "de")).await;
    let (status, _) = activate(&server, &abroad, &promo_id).await;
    assert_eq!(status, StatusCode::FORBIDDEN);

    // No attributes on file at all
    let (_, blank) = user_with_token(&server, UserSignUp::unique()).await;
    let (status, _) = activate(&server, &blank, &promo_id).await;
    assert_eq!(status, StatusCode::FORBIDDEN);

    // Eligible
    let (_, eligible) = user_with_token(&server, UserSignUp::with_attributes(30, "FR")).await;
    let (status, body) = activate(&server, &eligible, &promo_id).await;
    assert_eq!(status, StatusCode::OK, "{body}");
}

#[tokio::test]
async fn test_activation_inactive_promo() {
    if !check_test_env().await {
        return;
    }

    let server = TestServer::start().await.expect("Failed to start server");
    let (_, company_token) = company_with_token(&server).await;
    let (_, user_token) = user_with_token(&server, UserSignUp::unique()).await;

    let promo_id =
        create_promo(&server, &company_token, &CreatePromo::common("OFF", 10).inactive()).await;

    let (status, body) = activate(&server, &user_token, &promo_id).await;
    assert_eq!(status, StatusCode::FORBIDDEN, "{body}");
    assert!(body.contains("PROMO_INACTIVE"), "{body}");

    let (status, _) = activate(&server, &user_token, &Uuid::new_v4().to_string()).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_unique_codes_deplete() {
    if !check_test_env().await {
        return;
    }

    let server = TestServer::start().await.expect("Failed to start server");
    let (_, company_token) = company_with_token(&server).await;
    let promo_id =
        create_promo(&server, &company_token, &CreatePromo::unique_codes(&["ONLY"])).await;

    let (_, first) = user_with_token(&server, UserSignUp::unique()).await;
    let (_, second) = user_with_token(&server, UserSignUp::unique()).await;

    let (status, body) = activate(&server, &first, &promo_id).await;
    assert_eq!(status, StatusCode::OK, "{body}");
    assert!(body.contains("ONLY"));

    let (status, body) = activate(&server, &second, &promo_id).await;
    assert_eq!(status, StatusCode::BAD_REQUEST, "{body}");
    assert!(body.contains("DEPLETED"), "{body}");
}

#[tokio::test]
async fn test_concurrent_unique_activations_never_share_codes() {
    if !check_test_env().await {
        return;
    }

    let server = TestServer::start().await.expect("Failed to start server");
    let (_, company_token) = company_with_token(&server).await;
    let promo_id =
        create_promo(&server, &company_token, &CreatePromo::unique_codes(&["A", "B"])).await;

    let (_, t1) = user_with_token(&server, UserSignUp::unique()).await;
    let (_, t2) = user_with_token(&server, UserSignUp::unique()).await;
    let (_, t3) = user_with_token(&server, UserSignUp::unique()).await;

    let (r1, r2, r3) = tokio::join!(
        activate(&server, &t1, &promo_id),
        activate(&server, &t2, &promo_id),
        activate(&server, &t3, &promo_id),
    );

    let mut codes = Vec::new();
    let mut depleted = 0;
    for (status, body) in [r1, r2, r3] {
        if status == StatusCode::OK {
            let parsed: ActivationBody = serde_json::from_str(&body).unwrap();
            codes.push(parsed.code);
        } else {
            assert_eq!(status, StatusCode::BAD_REQUEST, "{body}");
            depleted += 1;
        }
    }

    codes.sort();
    assert_eq!(codes, vec!["A", "B"]);
    assert_eq!(depleted, 1);
}

#[tokio::test]
async fn test_concurrent_common_activations_respect_budget() {
    if !check_test_env().await {
        return;
    }

    let server = TestServer::start().await.expect("Failed to start server");
    let (_, company_token) = company_with_token(&server).await;
    let promo_id =
        create_promo(&server, &company_token, &CreatePromo::common("LAST1", 1)).await;

    let (_, t1) = user_with_token(&server, UserSignUp::unique()).await;
    let (_, t2) = user_with_token(&server, UserSignUp::unique()).await;

    let (r1, r2) = tokio::join!(
        activate(&server, &t1, &promo_id),
        activate(&server, &t2, &promo_id),
    );

    let successes = [&r1, &r2]
        .iter()
        .filter(|(status, _)| *status == StatusCode::OK)
        .count();
    assert_eq!(successes, 1, "exactly one budget unit existed: {r1:?} {r2:?}");

    let response = server
        .get_auth(&format!("/business/promo/{promo_id}"), &company_token)
        .await
        .unwrap();
    let owned: PromoForCompany = assert_json(response, StatusCode::OK).await.unwrap();
    assert_eq!(owned.used_count, 1);
    assert_eq!(owned.max_count, 0);
}

#[tokio::test]
async fn test_repeat_activation_follows_configuration() {
    if !check_test_env().await {
        return;
    }

    // Default: repeats allowed
    let server = TestServer::start().await.expect("Failed to start server");
    let (_, company_token) = company_with_token(&server).await;
    let (_, user_token) = user_with_token(&server, UserSignUp::unique()).await;
    let promo_id = create_promo(&server, &company_token, &CreatePromo::common("AGAIN", 5)).await;

    let (status, _) = activate(&server, &user_token, &promo_id).await;
    assert_eq!(status, StatusCode::OK);
    let (status, _) = activate(&server, &user_token, &promo_id).await;
    assert_eq!(status, StatusCode::OK);

    // Opt into single-shot activations
    let mut config = test_config().unwrap();
    config.activation.allow_repeat = false;
    let strict = TestServer::start_with_config(config)
        .await
        .expect("Failed to start server");

    let (_, company_token) = company_with_token(&strict).await;
    let (_, user_token) = user_with_token(&strict, UserSignUp::unique()).await;
    let promo_id = create_promo(&strict, &company_token, &CreatePromo::common("ONCE", 5)).await;

    let (status, _) = activate(&strict, &user_token, &promo_id).await;
    assert_eq!(status, StatusCode::OK);
    let (status, body) = activate(&strict, &user_token, &promo_id).await;
    assert_eq!(status, StatusCode::CONFLICT, "{body}");
    assert!(body.contains("ALREADY_ACTIVATED"), "{body}");
}

// ============================================================================
// Statistics Tests
// ============================================================================

#[tokio::test]
async fn test_promo_stats_group_by_country() {
    if !check_test_env().await {
        return;
    }

    let server = TestServer::start().await.expect("Failed to start server");
    let (_, company_token) = company_with_token(&server).await;
    let promo_id = create_promo(&server, &company_token, &CreatePromo::common("STAT", 10)).await;

    // Two French users (one with uppercase country), one German, one
    // without a country on file
    for user in [
        UserSignUp::with_attributes(20, "fr"),
        UserSignUp::with_attributes(30, "FR"),
        UserSignUp::with_attributes(40, "de"),
        UserSignUp::unique(),
    ] {
        let (_, token) = user_with_token(&server, user).await;
        let (status, body) = activate(&server, &token, &promo_id).await;
        assert_eq!(status, StatusCode::OK, "{body}");
    }

    let response = server
        .get_auth(&format!("/business/promo/{promo_id}/stat"), &company_token)
        .await
        .unwrap();
    let stats: PromoStatBody = assert_json(response, StatusCode::OK).await.unwrap();

    // Countryless activations count toward the total but get no row
    assert_eq!(stats.activations_count, 4);
    assert_eq!(stats.countries.len(), 2);
    assert_eq!(stats.countries[0].country, "de");
    assert_eq!(stats.countries[0].activations_count, 1);
    assert_eq!(stats.countries[1].country, "fr");
    assert_eq!(stats.countries[1].activations_count, 2);
}
