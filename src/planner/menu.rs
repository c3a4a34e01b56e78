use crate::catalog::ReferenceData;
use crate::error::{PortionError, Result};
use crate::models::{Category, Dish, GuestMix, Pool, PortionResult, Totals, Unit};
use crate::planner::scaling::ScaledPortion;

/// A menu dish paired with its category.
#[derive(Debug, Clone, Copy)]
pub struct MenuEntry<'a> {
    pub dish: &'a Dish,
    pub category: &'a Category,
}

impl<'a> MenuEntry<'a> {
    #[inline]
    pub fn pool(&self) -> Pool {
        self.category.pool
    }

    #[inline]
    pub fn unit(&self) -> Unit {
        self.category.unit
    }

    /// Weight-unit dish of a budgeted pool: subject to ceilings and global caps.
    #[inline]
    pub fn is_capped(&self) -> bool {
        !self.pool().is_fixed() && self.category.is_weight()
    }

    pub fn protein_per_gram(&self) -> f64 {
        self.dish
            .protein_per_gram
            .unwrap_or(self.category.protein_per_gram)
    }
}

/// Resolve dish ids into menu entries, in menu order.
pub fn resolve_entries<'a>(reference: &'a ReferenceData, dish_ids: &[u32]) -> Result<Vec<MenuEntry<'a>>> {
    reference
        .resolve_menu(dish_ids)?
        .into_iter()
        .map(|dish| {
            let category = reference
                .dish_category(dish.id)
                .ok_or_else(|| PortionError::UnknownCategory(dish.category.clone()))?;
            Ok(MenuEntry { dish, category })
        })
        .collect()
}

/// Sum of per-person grams of a pool's weight-unit dishes.
pub fn pool_total(entries: &[MenuEntry<'_>], portions: &[ScaledPortion], pool: Pool) -> f64 {
    entries
        .iter()
        .zip(portions)
        .filter(|(e, _)| e.pool() == pool && e.category.is_weight())
        .map(|(_, p)| p.per_person)
        .sum()
}

/// Per-person grams counted against the total-food cap.
pub fn capped_food_total(entries: &[MenuEntry<'_>], portions: &[ScaledPortion]) -> f64 {
    entries
        .iter()
        .zip(portions)
        .filter(|(e, _)| e.is_capped())
        .map(|(_, p)| p.per_person)
        .sum()
}

/// Per-person dietary protein counted against the protein cap.
pub fn capped_protein_total(entries: &[MenuEntry<'_>], portions: &[ScaledPortion]) -> f64 {
    entries
        .iter()
        .zip(portions)
        .filter(|(e, _)| e.is_capped())
        .map(|(e, p)| p.per_person * e.protein_per_gram())
        .sum()
}

/// Build the public result for one dish, with costs when the dish is priced.
pub fn portion_result(entry: &MenuEntry<'_>, portion: &ScaledPortion, guests: &GuestMix) -> PortionResult {
    let total = portion.total(guests);
    let total_cost = entry.dish.unit_cost.map(|price| match entry.unit() {
        Unit::Weight => total / 1000.0 * price,
        Unit::Count => total * price,
    });
    let cost_per_person = total_cost.map(|cost| {
        if guests.is_empty() {
            0.0
        } else {
            cost / guests.total() as f64
        }
    });

    PortionResult {
        dish_id: entry.dish.id,
        dish_name: entry.dish.name.clone(),
        category: entry.category.id.clone(),
        pool: entry.pool(),
        unit: entry.unit(),
        grams_per_person: portion.per_person,
        grams_per_gent: portion.per_gent,
        grams_per_lady: portion.per_lady,
        total_grams: total,
        cost_per_person,
        total_cost,
    }
}

/// Aggregate totals. Food weights include weight-unit service items;
/// count-unit items only contribute cost.
pub fn compute_totals(entries: &[MenuEntry<'_>], results: &[PortionResult]) -> Totals {
    let mut totals = Totals::default();
    for (entry, result) in entries.iter().zip(results) {
        if entry.category.is_weight() {
            totals.food_per_gent += result.grams_per_gent;
            totals.food_per_lady += result.grams_per_lady;
            totals.food_per_person += result.grams_per_person;
            totals.dietary_protein_per_person += result.grams_per_person * entry.protein_per_gram();
            totals.total_food_weight += result.total_grams;
        }
        totals.total_cost += result.total_cost.unwrap_or(0.0);
    }
    totals
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_portion_result_costs() {
        let reference = ReferenceData::standard().unwrap();
        let entries = resolve_entries(&reference, &[1, 60]).unwrap();
        let guests = GuestMix { gents: 10, ladies: 10 };

        let karahi = ScaledPortion {
            per_person: 200.0,
            per_gent: 200.0,
            per_lady: 200.0,
        };
        let result = portion_result(&entries[0], &karahi, &guests);
        assert_eq!(result.total_grams, 4000.0);
        // 4 kg at 18 per kg
        assert!((result.total_cost.unwrap() - 72.0).abs() < 1e-9);
        assert!((result.cost_per_person.unwrap() - 3.6).abs() < 1e-9);

        let naan = ScaledPortion {
            per_person: 2.0,
            per_gent: 2.0,
            per_lady: 2.0,
        };
        let bread = portion_result(&entries[1], &naan, &guests);
        assert!((bread.total_cost.unwrap() - 12.0).abs() < 1e-9);

        let totals = compute_totals(&entries, &[result, bread]);
        assert_eq!(totals.food_per_person, 200.0);
        assert_eq!(totals.total_food_weight, 4000.0);
        assert!((totals.total_cost - 84.0).abs() < 1e-9);
        assert!((totals.dietary_protein_per_person - 24.0).abs() < 1e-9);
    }

    #[test]
    fn test_zero_guests_zero_cost_per_person() {
        let reference = ReferenceData::standard().unwrap();
        let entries = resolve_entries(&reference, &[1]).unwrap();
        let portion = ScaledPortion {
            per_person: 200.0,
            per_gent: 200.0,
            per_lady: 200.0,
        };
        let result = portion_result(&entries[0], &portion, &GuestMix::default());
        assert_eq!(result.total_grams, 0.0);
        assert_eq!(result.cost_per_person, Some(0.0));
    }
}
