//! User entity - a consumer who browses and redeems promos

use chrono::{DateTime, Utc};
use uuid::Uuid;

use crate::value_objects::UserAttributes;

/// End-user account
#[derive(Debug, Clone, PartialEq)]
pub struct User {
    pub id: Uuid,
    pub name: String,
    pub surname: String,
    pub email: String,
    pub avatar_url: Option<String>,
    /// Free-form profile bag; targeting reads `age` and `country` from it
    pub other: UserAttributes,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl User {
    /// Create a new User with a fresh id
    pub fn new(name: String, surname: String, email: String) -> Self {
        let now = Utc::now();
        Self {
            id: Uuid::new_v4(),
            name,
            surname,
            email,
            avatar_url: None,
            other: UserAttributes::default(),
            created_at: now,
            updated_at: now,
        }
    }

    /// Attach an avatar URL
    #[must_use]
    pub fn with_avatar_url(mut self, avatar_url: Option<String>) -> Self {
        self.avatar_url = avatar_url;
        self
    }

    /// Attach profile attributes
    #[must_use]
    pub fn with_attributes(mut self, other: UserAttributes) -> Self {
        self.other = other;
        self
    }

    /// Full display name: "name surname"
    pub fn full_name(&self) -> String {
        format!("{} {}", self.name, self.surname)
    }

    /// Replace the profile attribute bag
    pub fn set_attributes(&mut self, other: UserAttributes) {
        self.other = other;
        self.updated_at = Utc::now();
    }
}
