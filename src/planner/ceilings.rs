use tracing::debug;

use crate::models::Pool;
use crate::planner::config::Limits;
use crate::planner::constants::TOLERANCE;
use crate::planner::menu::{capped_food_total, capped_protein_total, pool_total, MenuEntry};
use crate::planner::scaling::ScaledPortion;

/// Notes produced while enforcing limits.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Enforcement {
    pub warnings: Vec<String>,
    pub adjustments: Vec<String>,
}

fn scale_where(
    entries: &[MenuEntry<'_>],
    portions: &mut [ScaledPortion],
    factor: f64,
    select: impl Fn(&MenuEntry<'_>) -> bool,
) {
    for (entry, portion) in entries.iter().zip(portions.iter_mut()) {
        if select(entry) {
            portion.scale(factor);
        }
    }
}

/// Scale each budgeted pool down to its ceiling (one shot, proportional).
pub fn enforce_pool_ceilings(
    entries: &[MenuEntry<'_>],
    portions: &mut [ScaledPortion],
    limits: &Limits,
    out: &mut Enforcement,
) {
    for pool in Pool::WEIGHT_POOLS {
        let Some(ceiling) = limits.ceiling(pool) else {
            continue;
        };
        let total = pool_total(entries, portions, pool);
        if total <= ceiling + TOLERANCE {
            continue;
        }

        let factor = ceiling / total;
        debug!(pool = %pool, total, ceiling, factor, "pool over ceiling");
        scale_where(entries, portions, factor, |e| {
            e.pool() == pool && e.category.is_weight()
        });
        out.adjustments.push(format!(
            "{} pool scaled by {:.4} ({:.1}g -> {:.1}g ceiling)",
            pool, factor, total, ceiling
        ));
    }
}

/// Scale the budgeted pools together to the total-food cap.
pub fn enforce_food_cap(
    entries: &[MenuEntry<'_>],
    portions: &mut [ScaledPortion],
    limits: &Limits,
    out: &mut Enforcement,
) {
    let total = capped_food_total(entries, portions);
    if total <= limits.max_total_food + TOLERANCE {
        return;
    }

    let factor = limits.max_total_food / total;
    debug!(total, cap = limits.max_total_food, factor, "total food over cap");
    scale_where(entries, portions, factor, |e| e.is_capped());
    out.adjustments.push(format!(
        "all main pools scaled by {:.4} to meet the {:.0}g total food cap ({:.1}g before)",
        factor, limits.max_total_food, total
    ));
}

/// Scale the budgeted pools together to the dietary protein cap.
pub fn enforce_protein_cap(
    entries: &[MenuEntry<'_>],
    portions: &mut [ScaledPortion],
    limits: &Limits,
    out: &mut Enforcement,
) {
    let protein = capped_protein_total(entries, portions);
    if protein <= limits.max_dietary_protein + TOLERANCE {
        return;
    }

    let factor = limits.max_dietary_protein / protein;
    debug!(protein, cap = limits.max_dietary_protein, factor, "dietary protein over cap");
    scale_where(entries, portions, factor, |e| e.is_capped());
    out.adjustments.push(format!(
        "all main pools scaled by {:.4} to meet the {:.0}g dietary protein cap ({:.1}g before)",
        factor, limits.max_dietary_protein, protein
    ));
}

/// Warn about dishes left too small to serve. Never removes anything.
pub fn warn_small_portions(
    entries: &[MenuEntry<'_>],
    portions: &[ScaledPortion],
    limits: &Limits,
    out: &mut Enforcement,
) {
    for (entry, portion) in entries.iter().zip(portions) {
        if entry.is_capped() && portion.per_person < limits.min_portion - TOLERANCE {
            out.warnings.push(format!(
                "consider removing {}: {:.1}g per person is below the {:.0}g minimum and too small to serve",
                entry.dish.name, portion.per_person, limits.min_portion
            ));
        }
    }
}

/// Run every limit in order: pool ceilings, food cap, protein cap, then
/// minimum-portion warnings. Each step sees the previous step's output.
pub fn enforce_limits(
    entries: &[MenuEntry<'_>],
    portions: &mut [ScaledPortion],
    limits: &Limits,
) -> Enforcement {
    let mut out = Enforcement::default();
    enforce_pool_ceilings(entries, portions, limits, &mut out);
    enforce_food_cap(entries, portions, limits, &mut out);
    enforce_protein_cap(entries, portions, limits, &mut out);
    warn_small_portions(entries, portions, limits, &mut out);
    out
}
