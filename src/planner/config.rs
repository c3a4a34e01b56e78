use std::collections::HashSet;
use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::{PortionError, Result};
use crate::models::{GuestMix, Pool};
use crate::planner::constants::*;

/// Tunable engine parameters.
///
/// Every field falls back to its constant, so a config file only needs the
/// values it changes.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    pub growth_rate: f64,
    pub redistribution_rate: f64,
    pub popularity_blend: f64,
    pub lady_ratio: f64,
    pub protein_ceiling: f64,
    pub protein_ceiling_large: f64,
    pub accompaniment_ceiling: f64,
    pub dessert_ceiling: f64,
    pub large_event_guest_threshold: u64,
    pub full_spread_categories: Vec<String>,
    pub max_total_food_per_person: f64,
    pub max_dietary_protein_per_person: f64,
    pub min_portion_per_dish: f64,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            growth_rate: GROWTH_RATE,
            redistribution_rate: REDISTRIBUTION_RATE,
            popularity_blend: POPULARITY_BLEND,
            lady_ratio: LADY_RATIO,
            protein_ceiling: PROTEIN_CEILING,
            protein_ceiling_large: PROTEIN_CEILING_LARGE,
            accompaniment_ceiling: ACCOMPANIMENT_CEILING,
            dessert_ceiling: DESSERT_CEILING,
            large_event_guest_threshold: LARGE_EVENT_GUEST_THRESHOLD,
            full_spread_categories: FULL_SPREAD_CATEGORIES
                .iter()
                .map(|c| c.to_string())
                .collect(),
            max_total_food_per_person: MAX_TOTAL_FOOD_PER_PERSON,
            max_dietary_protein_per_person: MAX_DIETARY_PROTEIN_PER_PERSON,
            min_portion_per_dish: MIN_PORTION_PER_DISH,
        }
    }
}

impl EngineConfig {
    /// Load a (possibly partial) config from a JSON file.
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = fs::read_to_string(path)?;
        let config: EngineConfig = serde_json::from_str(&content)?;
        config.validate()?;
        Ok(config)
    }

    /// Reject rates outside [0, 1] and non-positive limits.
    pub fn validate(&self) -> Result<()> {
        let fractions = [
            ("growth_rate", self.growth_rate),
            ("redistribution_rate", self.redistribution_rate),
            ("popularity_blend", self.popularity_blend),
        ];
        for (name, value) in fractions {
            if !(0.0..=1.0).contains(&value) {
                return Err(PortionError::InvalidInput(format!(
                    "{} must be within 0..=1, got {}",
                    name, value
                )));
            }
        }

        let positives = [
            ("lady_ratio", self.lady_ratio),
            ("protein_ceiling", self.protein_ceiling),
            ("protein_ceiling_large", self.protein_ceiling_large),
            ("accompaniment_ceiling", self.accompaniment_ceiling),
            ("dessert_ceiling", self.dessert_ceiling),
            ("max_total_food_per_person", self.max_total_food_per_person),
            (
                "max_dietary_protein_per_person",
                self.max_dietary_protein_per_person,
            ),
        ];
        for (name, value) in positives {
            if !value.is_finite() || value <= 0.0 {
                return Err(PortionError::InvalidInput(format!(
                    "{} must be positive, got {}",
                    name, value
                )));
            }
        }

        if !self.min_portion_per_dish.is_finite() || self.min_portion_per_dish < 0.0 {
            return Err(PortionError::InvalidInput(format!(
                "min_portion_per_dish must be non-negative, got {}",
                self.min_portion_per_dish
            )));
        }
        Ok(())
    }
}

/// Per-request limit overrides. Unknown keys are rejected when deserializing.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ConstraintOverrides {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub protein_ceiling: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub protein_ceiling_large: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub accompaniment_ceiling: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub dessert_ceiling: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max_total_food_per_person_grams: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max_dietary_protein_per_person_grams: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub min_portion_per_dish_grams: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub large_event_guest_threshold: Option<u64>,
}

impl ConstraintOverrides {
    pub fn validate(&self) -> Result<()> {
        let positives = [
            ("protein_ceiling", self.protein_ceiling),
            ("protein_ceiling_large", self.protein_ceiling_large),
            ("accompaniment_ceiling", self.accompaniment_ceiling),
            ("dessert_ceiling", self.dessert_ceiling),
            (
                "max_total_food_per_person_grams",
                self.max_total_food_per_person_grams,
            ),
            (
                "max_dietary_protein_per_person_grams",
                self.max_dietary_protein_per_person_grams,
            ),
        ];
        for (name, value) in positives {
            if let Some(v) = value {
                if !v.is_finite() || v <= 0.0 {
                    return Err(PortionError::InvalidOverride { name, value: v });
                }
            }
        }

        if let Some(v) = self.min_portion_per_dish_grams {
            if !v.is_finite() || v < 0.0 {
                return Err(PortionError::InvalidOverride {
                    name: "min_portion_per_dish_grams",
                    value: v,
                });
            }
        }
        Ok(())
    }
}

/// Effective limits for one request, after overrides and the large-event rule.
#[derive(Debug, Clone, PartialEq)]
pub struct Limits {
    pub protein_ceiling: f64,
    pub accompaniment_ceiling: f64,
    pub dessert_ceiling: f64,
    pub max_total_food: f64,
    pub max_dietary_protein: f64,
    pub min_portion: f64,
    /// Whether the raised protein ceiling applies.
    pub large_menu: bool,
}

impl Limits {
    /// Resolve limits for a menu whose present categories are `present`.
    pub fn resolve(
        config: &EngineConfig,
        overrides: &ConstraintOverrides,
        present: &HashSet<&str>,
        guests: &GuestMix,
    ) -> Self {
        let threshold = overrides
            .large_event_guest_threshold
            .unwrap_or(config.large_event_guest_threshold);
        let full_spread = !config.full_spread_categories.is_empty()
            && config
                .full_spread_categories
                .iter()
                .all(|c| present.contains(c.as_str()));
        let large_menu = full_spread && guests.total() >= threshold;

        // A plain protein override still binds on a large menu unless a
        // large-menu override is given.
        let protein_ceiling = if large_menu {
            overrides
                .protein_ceiling_large
                .or(overrides.protein_ceiling)
                .unwrap_or(config.protein_ceiling_large)
        } else {
            overrides.protein_ceiling.unwrap_or(config.protein_ceiling)
        };

        Self {
            protein_ceiling,
            accompaniment_ceiling: overrides
                .accompaniment_ceiling
                .unwrap_or(config.accompaniment_ceiling),
            dessert_ceiling: overrides.dessert_ceiling.unwrap_or(config.dessert_ceiling),
            max_total_food: overrides
                .max_total_food_per_person_grams
                .unwrap_or(config.max_total_food_per_person),
            max_dietary_protein: overrides
                .max_dietary_protein_per_person_grams
                .unwrap_or(config.max_dietary_protein_per_person),
            min_portion: overrides
                .min_portion_per_dish_grams
                .unwrap_or(config.min_portion_per_dish),
            large_menu,
        }
    }

    /// Pool ceiling; the service pool has none.
    pub fn ceiling(&self, pool: Pool) -> Option<f64> {
        match pool {
            Pool::Protein => Some(self.protein_ceiling),
            Pool::Accompaniment => Some(self.accompaniment_ceiling),
            Pool::Dessert => Some(self.dessert_ceiling),
            Pool::Service => None,
        }
    }
}
