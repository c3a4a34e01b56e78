use serde::{Deserialize, Serialize};

fn default_popularity() -> f64 {
    1.0
}

/// A dish that can be put on a menu.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Dish {
    pub id: u32,

    pub name: String,

    /// Id of the owning category.
    pub category: String,

    /// Relative popularity used when splitting a category budget. Must be > 0.
    #[serde(default = "default_popularity")]
    pub popularity: f64,

    /// Fixed per-person amount. Service dishes only; bypasses budget math.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub fixed_per_person: Option<f64>,

    /// Overrides the category's protein content when set.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub protein_per_gram: Option<f64>,

    /// Price per kg (weight dishes) or per piece (count dishes).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub unit_cost: Option<f64>,
}

impl Dish {
    /// Basic validation: positive popularity and non-negative optional amounts.
    pub fn is_valid(&self) -> bool {
        self.popularity.is_finite()
            && self.popularity > 0.0
            && self.fixed_per_person.is_none_or(|v| v.is_finite() && v >= 0.0)
            && self.protein_per_gram.is_none_or(|v| v.is_finite() && v >= 0.0)
            && self.unit_cost.is_none_or(|v| v.is_finite() && v >= 0.0)
    }

    /// Canonical key for name lookups (lowercase name).
    pub fn key(&self) -> String {
        self.name.to_lowercase()
    }
}

/// A named, reusable dish selection.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MenuTemplate {
    pub name: String,

    pub dish_ids: Vec<u32>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_popularity_defaults_to_one() {
        let dish: Dish =
            serde_json::from_str(r#"{"id": 7, "name": "Dal Makhani", "category": "veg_curry"}"#)
                .unwrap();
        assert_eq!(dish.popularity, 1.0);
        assert!(dish.fixed_per_person.is_none());
        assert!(dish.is_valid());
    }

    #[test]
    fn test_zero_popularity_is_invalid() {
        let dish = Dish {
            id: 1,
            name: "Korma".to_string(),
            category: "curry".to_string(),
            popularity: 0.0,
            fixed_per_person: None,
            protein_per_gram: None,
            unit_cost: None,
        };
        assert!(!dish.is_valid());
    }
}
