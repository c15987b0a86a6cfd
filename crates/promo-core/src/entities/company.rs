//! Company entity - an issuer of promo campaigns

use chrono::{DateTime, Utc};
use uuid::Uuid;

/// Company account that creates and manages promos
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Company {
    pub id: Uuid,
    pub name: String,
    pub email: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Company {
    /// Create a new Company with a fresh id
    pub fn new(name: String, email: String) -> Self {
        let now = Utc::now();
        Self {
            id: Uuid::new_v4(),
            name,
            email,
            created_at: now,
            updated_at: now,
        }
    }

    /// Check whether this company owns the given promo
    #[inline]
    pub fn owns(&self, promo_company_id: Uuid) -> bool {
        self.id == promo_company_id
    }
}
