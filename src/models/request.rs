use serde::{Deserialize, Serialize};

use crate::error::Result;
use crate::models::guests::{BigEaters, GuestMix};
use crate::planner::config::ConstraintOverrides;
use crate::planner::constants::DEFAULT_BIG_EATERS_PERCENTAGE;

fn default_big_eaters_percentage() -> u32 {
    DEFAULT_BIG_EATERS_PERCENTAGE
}

/// Guest counts as they arrive over the wire; may be negative until validated.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize)]
pub struct GuestCounts {
    #[serde(default)]
    pub gents: i64,
    #[serde(default)]
    pub ladies: i64,
}

/// JSON body of a `calculate` request.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CalculateRequest {
    pub dish_ids: Vec<u32>,

    pub guests: GuestCounts,

    #[serde(default)]
    pub big_eaters: bool,

    #[serde(default = "default_big_eaters_percentage")]
    pub big_eaters_percentage: u32,

    #[serde(default)]
    pub constraint_overrides: ConstraintOverrides,
}

impl CalculateRequest {
    pub fn guest_mix(&self) -> Result<GuestMix> {
        GuestMix::new(self.guests.gents, self.guests.ladies)
    }

    pub fn big_eaters(&self) -> Result<BigEaters> {
        BigEaters::new(self.big_eaters, self.big_eaters_percentage)
    }
}

/// A caller-entered gent-baseline portion.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct UserPortion {
    pub dish_id: u32,
    pub grams_per_person: f64,
}

/// JSON body of a `check` request.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CheckRequest {
    #[serde(flatten)]
    pub calculation: CalculateRequest,

    pub user_portions: Vec<UserPortion>,
}
