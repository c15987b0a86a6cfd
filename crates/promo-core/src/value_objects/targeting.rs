//! Targeting rules - restrict which users a promo is offered to

use serde::{Deserialize, Serialize};

use crate::value_objects::UserAttributes;

/// Targeting rule set attached to a promo.
///
/// Every field is optional; an absent field places no constraint. The
/// `country` and `categories` values are lowercased at write time (see
/// [`Targeting::normalize`]), and the country comparison additionally folds
/// case so data written before normalization cannot produce false negatives.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Targeting {
    /// Inclusive lower age bound
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub age_from: Option<i32>,
    /// Inclusive upper age bound
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub age_until: Option<i32>,
    /// Required user country (lowercase)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub country: Option<String>,
    /// Categories the promo belongs to (lowercase), used by feed filtering
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub categories: Vec<String>,
}

impl Targeting {
    /// Lowercase the country and category values in place.
    ///
    /// Idempotent; called on every create/update so stored targeting is
    /// always in canonical form.
    pub fn normalize(&mut self) {
        if let Some(country) = &self.country {
            self.country = Some(country.to_lowercase());
        }
        self.categories = self
            .categories
            .iter()
            .map(|category| category.to_lowercase())
            .collect();
    }

    /// Check whether a user's attributes satisfy the age and country rules.
    ///
    /// A bound that is absent on the targeting side is no constraint; an
    /// attribute that is absent on the user side while the targeting
    /// requires it makes the user ineligible (never an error).
    pub fn allows(&self, attrs: &UserAttributes) -> bool {
        if self.age_from.is_some() || self.age_until.is_some() {
            let Some(age) = attrs.age else {
                return false;
            };
            if let Some(age_from) = self.age_from {
                if age < age_from {
                    return false;
                }
            }
            if let Some(age_until) = self.age_until {
                if age > age_until {
                    return false;
                }
            }
        }

        if let Some(country) = &self.country {
            let Some(user_country) = &attrs.country else {
                return false;
            };
            if !country.eq_ignore_ascii_case(user_country) {
                return false;
            }
        }

        true
    }

    /// Check whether the promo is filed under the given category
    /// (case-insensitive).
    pub fn has_category(&self, category: &str) -> bool {
        self.categories
            .iter()
            .any(|c| c.eq_ignore_ascii_case(category))
    }
}
