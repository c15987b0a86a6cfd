//! User attribute bag - profile data consulted by targeting

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Free-form user profile attributes.
///
/// The fields targeting actually reads (`age`, `country`) are typed and
/// optional; anything else the client stores round-trips through the
/// flattened `extra` map untouched.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct UserAttributes {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub age: Option<i32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub country: Option<String>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl UserAttributes {
    /// Create an attribute bag with just the targeting-relevant fields
    pub fn new(age: Option<i32>, country: Option<String>) -> Self {
        Self {
            age,
            country,
            extra: Map::new(),
        }
    }

    /// The user's country folded to lowercase, if present
    pub fn country_normalized(&self) -> Option<String> {
        self.country.as_ref().map(|c| c.to_lowercase())
    }
}
