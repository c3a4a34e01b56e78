use std::collections::{HashMap, HashSet};

use serde::{Deserialize, Serialize};

use crate::error::{PortionError, Result};
use crate::models::{Category, Dish, MenuTemplate, Pool};

/// Raw reference data as it is stored on disk.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ReferenceSnapshot {
    pub categories: Vec<Category>,
    pub dishes: Vec<Dish>,
    #[serde(default)]
    pub menu_templates: Vec<MenuTemplate>,
}

/// Validated, indexed, read-only category and dish data for one request.
///
/// Dishes and categories live in flat arrays; lookups go through index maps.
#[derive(Debug, Clone)]
pub struct ReferenceData {
    categories: Vec<Category>,
    dishes: Vec<Dish>,
    templates: Vec<MenuTemplate>,
    category_index: HashMap<String, usize>,
    dish_index: HashMap<u32, usize>,
    /// Category index for each dish, parallel to `dishes`.
    dish_category: Vec<usize>,
}

impl ReferenceData {
    /// Validate a snapshot and build the lookup tables.
    pub fn new(snapshot: ReferenceSnapshot) -> Result<Self> {
        let ReferenceSnapshot {
            categories,
            dishes,
            menu_templates,
        } = snapshot;

        let mut category_index = HashMap::new();
        for (i, category) in categories.iter().enumerate() {
            if !category.is_valid() {
                return Err(PortionError::InvalidReference(format!(
                    "category '{}' has invalid amounts",
                    category.id
                )));
            }
            if category.cap.is_some() && !category.pool.is_fixed() {
                return Err(PortionError::InvalidReference(format!(
                    "category '{}' has a cap but is not a service category",
                    category.id
                )));
            }
            if category_index.insert(category.id.clone(), i).is_some() {
                return Err(PortionError::InvalidReference(format!(
                    "duplicate category id '{}'",
                    category.id
                )));
            }
        }

        let mut dish_index = HashMap::new();
        let mut dish_category = Vec::with_capacity(dishes.len());
        for (i, dish) in dishes.iter().enumerate() {
            if !dish.is_valid() {
                return Err(PortionError::InvalidReference(format!(
                    "dish {} ('{}') has invalid popularity or amounts",
                    dish.id, dish.name
                )));
            }
            let cat_idx = *category_index
                .get(&dish.category)
                .ok_or_else(|| PortionError::UnknownCategory(dish.category.clone()))?;
            if dish.fixed_per_person.is_some() && !categories[cat_idx].pool.is_fixed() {
                return Err(PortionError::InvalidReference(format!(
                    "dish {} ('{}') has a fixed amount but is not a service dish",
                    dish.id, dish.name
                )));
            }
            if dish_index.insert(dish.id, i).is_some() {
                return Err(PortionError::InvalidReference(format!(
                    "duplicate dish id {}",
                    dish.id
                )));
            }
            dish_category.push(cat_idx);
        }

        for template in &menu_templates {
            if let Some(missing) = template
                .dish_ids
                .iter()
                .find(|id| !dish_index.contains_key(id))
            {
                return Err(PortionError::InvalidReference(format!(
                    "template '{}' references unknown dish {}",
                    template.name, missing
                )));
            }
        }

        Ok(Self {
            categories,
            dishes,
            templates: menu_templates,
            category_index,
            dish_index,
            dish_category,
        })
    }

    pub fn category(&self, id: &str) -> Option<&Category> {
        self.category_index.get(id).map(|&i| &self.categories[i])
    }

    pub fn dish(&self, id: u32) -> Option<&Dish> {
        self.dish_index.get(&id).map(|&i| &self.dishes[i])
    }

    /// Category of a known dish.
    pub fn dish_category(&self, id: u32) -> Option<&Category> {
        self.dish_index
            .get(&id)
            .map(|&i| &self.categories[self.dish_category[i]])
    }

    /// Find a dish by name (case-insensitive).
    pub fn dish_by_name(&self, name: &str) -> Option<&Dish> {
        let key = name.to_lowercase();
        self.dishes.iter().find(|d| d.key() == key)
    }

    pub fn categories(&self) -> &[Category] {
        &self.categories
    }

    pub fn dishes(&self) -> &[Dish] {
        &self.dishes
    }

    pub fn templates(&self) -> &[MenuTemplate] {
        &self.templates
    }

    /// Categories belonging to a pool, in reference order.
    pub fn pool_categories(&self, pool: Pool) -> impl Iterator<Item = &Category> {
        self.categories.iter().filter(move |c| c.pool == pool)
    }

    /// Resolve a list of dish ids into dish references, rejecting unknown
    /// and repeated ids.
    pub fn resolve_menu(&self, dish_ids: &[u32]) -> Result<Vec<&Dish>> {
        let mut seen = HashSet::with_capacity(dish_ids.len());
        dish_ids
            .iter()
            .map(|&id| {
                if !seen.insert(id) {
                    return Err(PortionError::DuplicateDish(id));
                }
                self.dish(id).ok_or(PortionError::UnknownDish(id))
            })
            .collect()
    }

    /// Dish ids of a named template (case-insensitive).
    pub fn template_menu(&self, name: &str) -> Result<Vec<u32>> {
        let key = name.to_lowercase();
        self.templates
            .iter()
            .find(|t| t.name.to_lowercase() == key)
            .map(|t| t.dish_ids.clone())
            .ok_or_else(|| PortionError::UnknownTemplate(name.to_string()))
    }

    /// Convert back to a serializable snapshot.
    pub fn to_snapshot(&self) -> ReferenceSnapshot {
        ReferenceSnapshot {
            categories: self.categories.clone(),
            dishes: self.dishes.clone(),
            menu_templates: self.templates.clone(),
        }
    }

    pub fn len(&self) -> usize {
        self.dishes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.dishes.is_empty()
    }
}
