use serde::{Deserialize, Serialize};

use crate::models::category::{Pool, Unit};

/// Final allocation for one dish.
///
/// `grams_per_person` is the gent-baseline portion before the big-eaters
/// uplift; for count-unit dishes every quantity is in pieces.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PortionResult {
    pub dish_id: u32,
    pub dish_name: String,
    pub category: String,
    pub pool: Pool,
    pub unit: Unit,
    pub grams_per_person: f64,
    pub grams_per_gent: f64,
    pub grams_per_lady: f64,
    pub total_grams: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cost_per_person: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub total_cost: Option<f64>,
}

/// Aggregate figures over the weight-unit dishes of a menu.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Totals {
    pub food_per_gent: f64,
    pub food_per_lady: f64,
    pub food_per_person: f64,
    pub dietary_protein_per_person: f64,
    pub total_food_weight: f64,
    pub total_cost: f64,
}

/// Output of a portion calculation.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CalculationResult {
    pub portions: Vec<PortionResult>,
    pub totals: Totals,
    pub warnings: Vec<String>,
    pub adjustments_applied: Vec<String>,
}

impl CalculationResult {
    /// Find a dish's portion by id.
    pub fn portion(&self, dish_id: u32) -> Option<&PortionResult> {
        self.portions.iter().find(|p| p.dish_id == dish_id)
    }

    /// Sum of gent-baseline portions for one pool.
    pub fn pool_total(&self, pool: Pool) -> f64 {
        self.portions
            .iter()
            .filter(|p| p.pool == pool && p.unit == Unit::Weight)
            .map(|p| p.grams_per_person)
            .sum()
    }

    /// Sum of gent-baseline portions for one category.
    pub fn category_total(&self, category: &str) -> f64 {
        self.portions
            .iter()
            .filter(|p| p.category == category)
            .map(|p| p.grams_per_person)
            .sum()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ViolationKind {
    CeilingExceeded,
    CategoryCapExceeded,
    BelowMinimum,
    GlobalCapExceeded,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Severity {
    Error,
    Warning,
}

/// A rule broken by caller-entered portions.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Violation {
    #[serde(rename = "type")]
    pub kind: ViolationKind,
    pub severity: Severity,
    pub message: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub dish_id: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub category: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub pool: Option<Pool>,
    /// Amount over the limit (or under the minimum), in the rule's unit.
    pub excess: f64,
}

/// Caller value next to the engine's recommendation for one dish.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ComparisonRow {
    pub dish_id: u32,
    pub dish_name: String,
    pub category: String,
    pub unit: Unit,
    pub user_grams: f64,
    pub engine_grams: f64,
    pub delta_grams: f64,
    pub delta_percent: Option<f64>,
}

/// Output of a portion check.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CheckResult {
    pub violations: Vec<Violation>,
    pub user_portions: Vec<PortionResult>,
    pub engine_portions: Vec<PortionResult>,
    pub comparison: Vec<ComparisonRow>,
    pub user_totals: Totals,
    pub engine_totals: Totals,
}

impl CheckResult {
    pub fn has_errors(&self) -> bool {
        self.violations
            .iter()
            .any(|v| v.severity == Severity::Error)
    }
}
