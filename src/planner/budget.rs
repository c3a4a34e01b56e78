use tracing::debug;

use crate::models::{Category, Pool};

/// Budget for one category present on the menu.
#[derive(Debug, Clone, PartialEq)]
pub struct CategoryBudget<'a> {
    pub category: &'a Category,
    pub dish_count: usize,
    /// Baseline grown for the dish count.
    pub grown: f64,
    /// Final budget after the minimum floor and redistribution.
    pub budget: f64,
    /// Whether the minimum floor raised the grown budget.
    pub floored: bool,
    /// Amount received from absent protein categories.
    pub redistributed: f64,
}

/// Budgets for every budgeted (non-service) category on a menu.
#[derive(Debug, Clone, Default)]
pub struct PoolBudgets<'a> {
    pub categories: Vec<CategoryBudget<'a>>,
    pub warnings: Vec<String>,
    pub adjustments: Vec<String>,
}

impl<'a> PoolBudgets<'a> {
    pub fn get(&self, category_id: &str) -> Option<&CategoryBudget<'a>> {
        self.categories.iter().find(|b| b.category.id == category_id)
    }

    /// Sum of category budgets in a pool.
    pub fn pool_total(&self, pool: Pool) -> f64 {
        self.categories
            .iter()
            .filter(|b| b.category.pool == pool)
            .map(|b| b.budget)
            .sum()
    }
}

/// Growth rule: `baseline * (1 + growth_rate * (n - 1))`.
pub fn grown_budget(baseline: f64, dish_count: usize, growth_rate: f64) -> f64 {
    if dish_count == 0 {
        return 0.0;
    }
    baseline * (1.0 + growth_rate * (dish_count - 1) as f64)
}

/// Raise a budget so every dish clears `min_per_dish`.
///
/// Returns the (possibly raised) budget and whether it was raised.
pub fn apply_floor(budget: f64, dish_count: usize, min_per_dish: f64) -> (f64, bool) {
    if dish_count == 0 {
        return (budget, false);
    }
    let required = min_per_dish * dish_count as f64;
    if budget / (dish_count as f64) < min_per_dish {
        (required, true)
    } else {
        (budget, false)
    }
}

/// Hand `rate * baseline` of every absent category to the present ones,
/// proportionally to their baselines.
///
/// Returns the amount that had no recipient.
pub fn redistribute(present: &mut [CategoryBudget<'_>], absent: &[&Category], rate: f64) -> f64 {
    let freed: f64 = absent.iter().map(|c| rate * c.baseline).sum();
    let baseline_sum: f64 = present.iter().map(|b| b.category.baseline).sum();

    if present.is_empty() || baseline_sum <= 0.0 {
        return freed;
    }

    for budget in present.iter_mut() {
        let share = freed * budget.category.baseline / baseline_sum;
        budget.redistributed += share;
        budget.budget += share;
    }
    0.0
}

/// Compute budgets for the categories of one budgeted pool.
///
/// `categories` lists every category of the pool in reference order, paired
/// with its dish count on the menu (zero when absent).
pub fn pool_budgets<'a>(
    pool: Pool,
    categories: &[(&'a Category, usize)],
    growth_rate: f64,
    redistribution_rate: f64,
) -> PoolBudgets<'a> {
    let mut out = PoolBudgets::default();
    let mut absent = Vec::new();

    for &(category, dish_count) in categories {
        if dish_count == 0 {
            absent.push(category);
            continue;
        }

        let grown = grown_budget(category.baseline, dish_count, growth_rate);
        let (budget, floored) = apply_floor(grown, dish_count, category.min_per_dish);
        if floored {
            out.adjustments.push(format!(
                "{} budget raised from {:.1}g to {:.1}g so each of {} dishes gets its {:.1}g minimum",
                category.name, grown, budget, dish_count, category.min_per_dish
            ));
        }

        out.categories.push(CategoryBudget {
            category,
            dish_count,
            grown,
            budget,
            floored,
            redistributed: 0.0,
        });
    }

    if pool.redistributes() && !absent.is_empty() {
        let dropped = redistribute(&mut out.categories, &absent, redistribution_rate);
        if dropped > 0.0 || out.categories.is_empty() {
            out.warnings
                .push(format!("no {} dishes selected", pool.as_str()));
        } else {
            let names: Vec<&str> = absent.iter().map(|c| c.name.as_str()).collect();
            let moved: f64 = absent.iter().map(|c| redistribution_rate * c.baseline).sum();
            out.adjustments.push(format!(
                "redistributed {:.1}g from absent {} to remaining {} categories",
                moved,
                names.join(", "),
                pool
            ));
        }
    }

    for b in &out.categories {
        debug!(
            pool = %pool,
            category = %b.category.id,
            dishes = b.dish_count,
            grown = b.grown,
            redistributed = b.redistributed,
            budget = b.budget,
            "category budget"
        );
    }

    out
}
