//! PromoComment entity - a user comment on a promo

use chrono::{DateTime, Utc};
use uuid::Uuid;

/// Comment left by a user on a promo
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PromoComment {
    pub id: Uuid,
    pub promo_id: Uuid,
    pub author_id: Uuid,
    pub text: String,
    /// Server-assigned creation time
    pub date: DateTime<Utc>,
}

impl PromoComment {
    /// Create a new comment with a fresh id and the current time
    pub fn new(promo_id: Uuid, author_id: Uuid, text: String) -> Self {
        Self {
            id: Uuid::new_v4(),
            promo_id,
            author_id,
            text,
            date: Utc::now(),
        }
    }

    /// Check whether the given user wrote this comment
    #[inline]
    pub fn is_author(&self, user_id: Uuid) -> bool {
        self.author_id == user_id
    }

    /// Replace the comment text
    pub fn set_text(&mut self, text: String) {
        self.text = text;
    }
}
