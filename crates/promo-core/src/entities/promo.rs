//! Promo entity - a campaign offering redemption codes under targeting rules

use std::fmt;

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::error::DomainError;
use crate::value_objects::{Targeting, UserAttributes};

/// Redemption mode of a promo
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum PromoMode {
    /// Every redemption hands out the same shared code, bounded by `max_count`
    Common,
    /// Every redemption consumes one distinct code from `promo_unique`
    Unique,
}

impl PromoMode {
    /// The uppercase wire/storage form
    #[inline]
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Common => "COMMON",
            Self::Unique => "UNIQUE",
        }
    }

    /// Parse the storage form. Anything other than the two known modes is a
    /// configuration fault, never a silent fallback.
    pub fn parse(value: &str) -> Result<Self, DomainError> {
        match value {
            "COMMON" => Ok(Self::Common),
            "UNIQUE" => Ok(Self::Unique),
            other => Err(DomainError::InvalidPromoConfig(format!(
                "unknown promo mode: {other}"
            ))),
        }
    }
}

impl fmt::Display for PromoMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Promo entity
#[derive(Debug, Clone, PartialEq)]
pub struct Promo {
    pub id: Uuid,
    pub company_id: Uuid,
    pub description: String,
    pub image_url: Option<String>,
    pub target: Targeting,
    /// Remaining redemption budget; meaningful in `COMMON` mode
    pub max_count: i32,
    pub active_from: Option<NaiveDate>,
    pub active_until: Option<NaiveDate>,
    pub mode: PromoMode,
    /// The shared code for `COMMON` mode
    pub promo_common: Option<String>,
    /// Remaining unique codes, consumed front-to-back
    pub promo_unique: Vec<String>,
    pub active: bool,
    pub like_count: i32,
    pub comment_count: i32,
    pub used_count: i32,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Promo {
    /// Create a new promo with a fresh id and empty counters
    pub fn new(company_id: Uuid, description: String, mode: PromoMode) -> Self {
        let now = Utc::now();
        Self {
            id: Uuid::new_v4(),
            company_id,
            description,
            image_url: None,
            target: Targeting::default(),
            max_count: 0,
            active_from: None,
            active_until: None,
            mode,
            promo_common: None,
            promo_unique: Vec::new(),
            active: true,
            like_count: 0,
            comment_count: 0,
            used_count: 0,
            created_at: now,
            updated_at: now,
        }
    }

    /// Decide whether a user may redeem this promo.
    ///
    /// An inactive promo is signaled distinctly from a targeting mismatch so
    /// callers can word the refusal differently; both map to the same
    /// authorization failure class.
    pub fn check_eligibility(&self, attrs: &UserAttributes) -> Result<(), DomainError> {
        if !self.active {
            return Err(DomainError::PromoInactive);
        }
        if !self.target.allows(attrs) {
            return Err(DomainError::NotEligible);
        }
        Ok(())
    }

    /// Convenience form of [`Promo::check_eligibility`]
    pub fn is_eligible(&self, attrs: &UserAttributes) -> bool {
        self.check_eligibility(attrs).is_ok()
    }

    /// Consume one redemption unit and return its code.
    ///
    /// `UNIQUE` mode pops the first remaining code (FIFO, so assignment is
    /// deterministic and auditable); `COMMON` mode returns the shared code
    /// and decrements the budget. Depletion and corrupt configuration are
    /// errors; the caller persists the mutated state atomically with
    /// whatever bookkeeping accompanies the redemption.
    pub fn take_code(&mut self) -> Result<String, DomainError> {
        let code = match self.mode {
            PromoMode::Unique => {
                if self.promo_unique.is_empty() {
                    return Err(DomainError::Depleted);
                }
                self.promo_unique.remove(0)
            }
            PromoMode::Common => {
                if self.max_count <= 0 {
                    return Err(DomainError::Depleted);
                }
                let code = self.promo_common.clone().ok_or_else(|| {
                    DomainError::InvalidPromoConfig(
                        "COMMON promo has no shared code".to_string(),
                    )
                })?;
                self.max_count -= 1;
                code
            }
        };
        self.used_count += 1;
        Ok(code)
    }

    /// Remaining redemption units for this promo
    pub fn remaining(&self) -> i64 {
        match self.mode {
            PromoMode::Common => i64::from(self.max_count.max(0)),
            PromoMode::Unique => self.promo_unique.len() as i64,
        }
    }

    /// Check the `active_from < active_until` invariant (absent bounds pass)
    pub fn has_valid_period(&self) -> bool {
        match (self.active_from, self.active_until) {
            (Some(from), Some(until)) => from < until,
            _ => true,
        }
    }
}
