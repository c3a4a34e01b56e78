use crate::error::Result;
use crate::models::{Category, Dish, MenuTemplate, Pool, Unit};

use super::reference::{ReferenceData, ReferenceSnapshot};

#[allow(clippy::too_many_arguments)]
fn category(
    id: &str,
    name: &str,
    unit: Unit,
    pool: Pool,
    baseline: f64,
    min_per_dish: f64,
    cap: Option<f64>,
    protein_per_gram: f64,
) -> Category {
    Category {
        id: id.to_string(),
        name: name.to_string(),
        unit,
        pool,
        baseline,
        min_per_dish,
        cap,
        protein_per_gram,
    }
}

fn dish(id: u32, name: &str, category: &str, popularity: f64, unit_cost: Option<f64>) -> Dish {
    Dish {
        id,
        name: name.to_string(),
        category: category.to_string(),
        popularity,
        fixed_per_person: None,
        protein_per_gram: None,
        unit_cost,
    }
}

/// Built-in catalog used when no reference file is given.
pub fn standard_snapshot() -> ReferenceSnapshot {
    use Pool::*;
    use Unit::*;

    let categories = vec![
        category("curry", "Curry", Weight, Protein, 200.0, 90.0, None, 0.12),
        category("bbq", "BBQ / Dry", Weight, Protein, 150.0, 70.0, None, 0.25),
        category("rice", "Rice", Weight, Protein, 180.0, 90.0, None, 0.06),
        category("veg_curry", "Veg Curry", Weight, Accompaniment, 100.0, 50.0, None, 0.03),
        category("sides", "Sides", Weight, Accompaniment, 50.0, 30.0, None, 0.02),
        category("dessert", "Dessert", Weight, Dessert, 80.0, 60.0, None, 0.04),
        category("salad", "Salad", Weight, Service, 50.0, 0.0, Some(100.0), 0.01),
        category("condiment", "Condiment", Weight, Service, 30.0, 0.0, Some(60.0), 0.03),
        category("bread", "Bread", Count, Service, 2.0, 0.0, None, 0.0),
        category("tea", "Tea", Count, Service, 1.0, 0.0, None, 0.0),
    ];

    let mut mint_chutney = dish(56, "Mint Chutney", "condiment", 1.0, Some(4.0));
    mint_chutney.fixed_per_person = Some(15.0);

    let dishes = vec![
        dish(1, "Chicken Karahi", "curry", 1.4, Some(18.0)),
        dish(2, "Mutton Qorma", "curry", 1.0, Some(26.0)),
        dish(3, "Chicken Handi", "curry", 0.8, Some(17.0)),
        dish(10, "Chicken Tikka", "bbq", 1.2, Some(20.0)),
        dish(11, "Seekh Kebab", "bbq", 1.0, Some(22.0)),
        dish(12, "Malai Boti", "bbq", 0.9, Some(21.0)),
        dish(20, "Chicken Biryani", "rice", 1.5, Some(9.0)),
        dish(21, "Mutton Pulao", "rice", 1.0, Some(12.0)),
        dish(30, "Dal Makhani", "veg_curry", 1.0, Some(6.0)),
        dish(31, "Mix Vegetable", "veg_curry", 0.8, Some(5.0)),
        dish(35, "Chana Chaat", "sides", 1.0, Some(5.0)),
        dish(36, "Dahi Baray", "sides", 1.1, Some(6.0)),
        dish(40, "Gulab Jamun", "dessert", 1.2, Some(8.0)),
        dish(41, "Kheer", "dessert", 1.0, Some(7.0)),
        dish(42, "Gajar Halwa", "dessert", 1.1, Some(9.0)),
        dish(50, "Green Salad", "salad", 1.0, Some(3.0)),
        dish(51, "Russian Salad", "salad", 1.0, Some(6.0)),
        dish(52, "Fruit Salad", "salad", 1.0, Some(7.0)),
        dish(55, "Raita", "condiment", 1.0, Some(3.0)),
        mint_chutney,
        dish(60, "Naan", "bread", 1.0, Some(0.3)),
        dish(61, "Roghni Naan", "bread", 1.0, Some(0.4)),
        dish(65, "Kashmiri Chai", "tea", 1.0, Some(0.5)),
    ];

    let menu_templates = vec![
        MenuTemplate {
            name: "Standard Wedding".to_string(),
            dish_ids: vec![1, 10, 20, 30, 40, 50, 55, 60, 65],
        },
        MenuTemplate {
            name: "Lunch Buffet".to_string(),
            dish_ids: vec![1, 20, 30, 50, 60],
        },
        MenuTemplate {
            name: "Grand Banquet".to_string(),
            dish_ids: vec![1, 2, 10, 11, 20, 30, 35, 40, 41, 50, 51, 55, 56, 60, 61, 65],
        },
    ];

    ReferenceSnapshot {
        categories,
        dishes,
        menu_templates,
    }
}

impl ReferenceData {
    /// The built-in catering catalog.
    pub fn standard() -> Result<Self> {
        ReferenceData::new(standard_snapshot())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_standard_catalog_is_valid() {
        let data = ReferenceData::standard().unwrap();
        assert_eq!(data.categories().len(), 10);
        assert_eq!(data.pool_categories(Pool::Protein).count(), 3);
        for template in data.templates() {
            assert!(data.resolve_menu(&template.dish_ids).is_ok());
        }
    }
}
