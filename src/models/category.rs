use std::fmt;

use serde::{Deserialize, Serialize};

/// One of the four independent budget domains.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Pool {
    Protein,
    Accompaniment,
    Dessert,
    Service,
}

impl Pool {
    /// All pools in pipeline order.
    pub const ALL: [Pool; 4] = [
        Pool::Protein,
        Pool::Accompaniment,
        Pool::Dessert,
        Pool::Service,
    ];

    /// Pools whose budgets scale with the menu and count toward the global caps.
    pub const WEIGHT_POOLS: [Pool; 3] = [Pool::Protein, Pool::Accompaniment, Pool::Dessert];

    /// Only the protein pool borrows budget from its absent categories.
    pub fn redistributes(self) -> bool {
        matches!(self, Pool::Protein)
    }

    /// Service items are fixed per person instead of budgeted.
    pub fn is_fixed(self) -> bool {
        matches!(self, Pool::Service)
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Pool::Protein => "protein",
            Pool::Accompaniment => "accompaniment",
            Pool::Dessert => "dessert",
            Pool::Service => "service",
        }
    }
}

impl fmt::Display for Pool {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// How a category's quantities are measured.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Unit {
    /// Grams.
    Weight,
    /// Discrete pieces (bread, cups of tea).
    Count,
}

impl Unit {
    pub fn suffix(self) -> &'static str {
        match self {
            Unit::Weight => "g",
            Unit::Count => "pc",
        }
    }
}

/// A named grouping of dishes sharing one budget.
///
/// `baseline` is the total allocation when the category holds exactly one dish.
/// For service categories it is the fixed per-person amount of each dish.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Category {
    pub id: String,

    pub name: String,

    pub unit: Unit,

    pub pool: Pool,

    pub baseline: f64,

    pub min_per_dish: f64,

    /// Category-wide per-person cap. Service categories only.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cap: Option<f64>,

    /// Dietary protein grams per gram of food.
    #[serde(default)]
    pub protein_per_gram: f64,
}

impl Category {
    /// Basic validation of the numeric fields.
    pub fn is_valid(&self) -> bool {
        self.baseline.is_finite()
            && self.baseline >= 0.0
            && self.min_per_dish.is_finite()
            && self.min_per_dish >= 0.0
            && self.protein_per_gram >= 0.0
            && self.cap.is_none_or(|c| c.is_finite() && c > 0.0)
    }

    /// Whether portions in this category are measured in grams.
    #[inline]
    pub fn is_weight(&self) -> bool {
        self.unit == Unit::Weight
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn curry() -> Category {
        Category {
            id: "curry".to_string(),
            name: "Curry".to_string(),
            unit: Unit::Weight,
            pool: Pool::Protein,
            baseline: 200.0,
            min_per_dish: 90.0,
            cap: None,
            protein_per_gram: 0.12,
        }
    }

    #[test]
    fn test_only_protein_redistributes() {
        assert!(Pool::Protein.redistributes());
        assert!(!Pool::Accompaniment.redistributes());
        assert!(!Pool::Dessert.redistributes());
        assert!(!Pool::Service.redistributes());
    }

    #[test]
    fn test_pool_serde_names() {
        let json = serde_json::to_string(&Pool::Accompaniment).unwrap();
        assert_eq!(json, "\"accompaniment\"");
        let unit: Unit = serde_json::from_str("\"count\"").unwrap();
        assert_eq!(unit, Unit::Count);
    }

    #[test]
    fn test_is_valid() {
        assert!(curry().is_valid());

        let mut bad = curry();
        bad.baseline = -1.0;
        assert!(!bad.is_valid());

        let mut zero_cap = curry();
        zero_cap.cap = Some(0.0);
        assert!(!zero_cap.is_valid());
    }
}
