//! Test fixtures and data generators
//!
//! Provides reusable test data for integration tests. Identity data is
//! unique per call so suites can run repeatedly against one database.

use serde::{Deserialize, Serialize};
use serde_json::{json, Value};
use uuid::Uuid;

/// Get a unique suffix for test data
pub fn unique_suffix() -> String {
    Uuid::new_v4().simple().to_string()
}

/// Company sign-up request
#[derive(Debug, Clone, Serialize)]
pub struct CompanySignUp {
    pub name: String,
    pub email: String,
    pub password: String,
}

impl CompanySignUp {
    pub fn unique() -> Self {
        let suffix = unique_suffix();
        Self {
            name: format!("Test Company {suffix}"),
            email: format!("company{suffix}@example.com"),
            password: "TestPass123!".to_string(),
        }
    }
}

/// User sign-up request
#[derive(Debug, Clone, Serialize)]
pub struct UserSignUp {
    pub name: String,
    pub surname: String,
    pub email: String,
    pub password: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub avatar_url: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub other: Option<Value>,
}

impl UserSignUp {
    pub fn unique() -> Self {
        let suffix = unique_suffix();
        Self {
            name: format!("Test{suffix}"),
            surname: "User".to_string(),
            email: format!("user{suffix}@example.com"),
            password: "TestPass123!".to_string(),
            avatar_url: None,
            other: None,
        }
    }

    /// A user with the given age and country on file
    pub fn with_attributes(age: i32, country: &str) -> Self {
        let mut user = Self::unique();
        user.other = Some(json!({"age": age, "country": country}));
        user
    }
}

/// Sign-in request for either principal kind
#[derive(Debug, Serialize)]
pub struct SignIn {
    pub email: String,
    pub password: String,
}

impl SignIn {
    pub fn new(email: &str, password: &str) -> Self {
        Self {
            email: email.to_string(),
            password: password.to_string(),
        }
    }
}

/// Create-promo request body
#[derive(Debug, Clone, Serialize)]
pub struct CreatePromo {
    pub description: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub image_url: Option<String>,
    pub target: Value,
    pub max_count: i32,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub active_from: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub active_until: Option<String>,
    pub mode: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub promo_common: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub promo_unique: Option<Vec<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub active: Option<bool>,
}

impl CreatePromo {
    /// A COMMON-mode promo handing out `code` at most `max_count` times
    pub fn common(code: &str, max_count: i32) -> Self {
        let suffix = unique_suffix();
        Self {
            description: format!("Test promo {suffix}"),
            image_url: None,
            target: json!({}),
            max_count,
            active_from: None,
            active_until: None,
            mode: "COMMON".to_string(),
            promo_common: Some(code.to_string()),
            promo_unique: None,
            active: None,
        }
    }

    /// A UNIQUE-mode promo with the given one-shot codes
    pub fn unique_codes(codes: &[&str]) -> Self {
        let suffix = unique_suffix();
        Self {
            description: format!("Test promo {suffix}"),
            image_url: None,
            target: json!({}),
            max_count: 0,
            active_from: None,
            active_until: None,
            mode: "UNIQUE".to_string(),
            promo_common: None,
            promo_unique: Some(codes.iter().map(|c| (*c).to_string()).collect()),
            active: None,
        }
    }

    pub fn with_target(mut self, target: Value) -> Self {
        self.target = target;
        self
    }

    pub fn inactive(mut self) -> Self {
        self.active = Some(false);
        self
    }
}

/// Token-only auth response
#[derive(Debug, Deserialize)]
pub struct TokenBody {
    pub token: String,
}

/// Company sign-up response
#[derive(Debug, Deserialize)]
pub struct CompanySignUpBody {
    pub company_id: String,
    pub token: String,
}

/// Id-only creation response
#[derive(Debug, Deserialize)]
pub struct CreatedBody {
    pub id: String,
}

/// `{"status": ...}` response
#[derive(Debug, Deserialize)]
pub struct StatusBody {
    pub status: String,
}

/// Targeting as returned by the API
#[derive(Debug, Deserialize)]
pub struct TargetBody {
    pub age_from: Option<i32>,
    pub age_until: Option<i32>,
    pub country: Option<String>,
    #[serde(default)]
    pub categories: Vec<String>,
}

/// Company view of a promo
#[derive(Debug, Deserialize)]
pub struct PromoForCompany {
    pub promo_id: String,
    pub company_id: String,
    pub company_name: String,
    pub description: String,
    pub image_url: Option<String>,
    pub target: TargetBody,
    pub max_count: i32,
    pub active_from: Option<String>,
    pub active_until: Option<String>,
    pub mode: String,
    pub promo_common: Option<String>,
    #[serde(default)]
    pub promo_unique: Vec<String>,
    pub like_count: i32,
    pub used_count: i32,
    pub active: bool,
}

/// User view of a promo
#[derive(Debug, Deserialize)]
pub struct PromoForUser {
    pub promo_id: String,
    pub company_id: String,
    pub company_name: String,
    pub description: String,
    pub image_url: Option<String>,
    pub active: bool,
    pub is_activated_by_user: bool,
    pub like_count: i32,
    pub is_liked_by_user: bool,
    pub comment_count: i32,
}

/// Feed envelope
#[derive(Debug, Deserialize)]
pub struct FeedBody {
    pub status: String,
    pub count: usize,
    pub data: Vec<PromoForUser>,
}

/// User profile response
#[derive(Debug, Deserialize)]
pub struct ProfileBody {
    pub name: String,
    pub surname: String,
    pub email: String,
    pub avatar_url: Option<String>,
    pub other: Value,
}

/// Comment response
#[derive(Debug, Deserialize)]
pub struct CommentBody {
    pub id: String,
    pub text: String,
    pub date: String,
    pub author: CommentAuthorBody,
}

/// Comment author block
#[derive(Debug, Deserialize)]
pub struct CommentAuthorBody {
    pub name: String,
    pub surname: String,
    pub avatar_url: Option<String>,
}

/// Activation response
#[derive(Debug, Deserialize)]
pub struct ActivationBody {
    pub code: String,
}

/// Activation statistics response
#[derive(Debug, Deserialize)]
pub struct PromoStatBody {
    pub activations_count: i64,
    pub countries: Vec<CountryStatBody>,
}

/// Per-country activation count
#[derive(Debug, Deserialize)]
pub struct CountryStatBody {
    pub country: String,
    pub activations_count: i64,
}

/// Error response
#[derive(Debug, Deserialize)]
pub struct ErrorResponse {
    pub error: ErrorBody,
}

#[derive(Debug, Deserialize)]
pub struct ErrorBody {
    pub code: String,
    pub message: String,
}
