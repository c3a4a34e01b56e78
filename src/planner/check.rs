use std::collections::HashMap;

use tracing::{debug, instrument};

use crate::catalog::ReferenceData;
use crate::error::{PortionError, Result};
use crate::models::{
    BigEaters, CheckRequest, CheckResult, ComparisonRow, GuestMix, Pool, PortionResult, Severity,
    UserPortion, Violation, ViolationKind,
};
use crate::planner::calculate::plan;
use crate::planner::config::{ConstraintOverrides, EngineConfig, Limits};
use crate::planner::constants::TOLERANCE;
use crate::planner::menu::{
    capped_food_total, capped_protein_total, compute_totals, pool_total, portion_result, MenuEntry,
};
use crate::planner::scaling::ScaledPortion;

/// Caller grams per menu position. Dishes without an entry count as zero.
fn user_grams(entries: &[MenuEntry<'_>], user_portions: &[UserPortion]) -> Result<Vec<f64>> {
    let positions: HashMap<u32, usize> = entries
        .iter()
        .enumerate()
        .map(|(i, e)| (e.dish.id, i))
        .collect();

    let mut grams = vec![0.0; entries.len()];
    let mut seen = vec![false; entries.len()];
    for portion in user_portions {
        let &i = positions
            .get(&portion.dish_id)
            .ok_or(PortionError::PortionNotInMenu(portion.dish_id))?;
        if seen[i] {
            return Err(PortionError::InvalidInput(format!(
                "portion for dish {} given more than once",
                portion.dish_id
            )));
        }
        if !portion.grams_per_person.is_finite() || portion.grams_per_person < 0.0 {
            return Err(PortionError::InvalidInput(format!(
                "portion for dish {} must be a non-negative number, got {}",
                portion.dish_id, portion.grams_per_person
            )));
        }
        seen[i] = true;
        grams[i] = portion.grams_per_person;
    }
    Ok(grams)
}

fn pool_ceiling_violations(
    entries: &[MenuEntry<'_>],
    portions: &[ScaledPortion],
    limits: &Limits,
    out: &mut Vec<Violation>,
) {
    for pool in Pool::WEIGHT_POOLS {
        let Some(ceiling) = limits.ceiling(pool) else {
            continue;
        };
        let total = pool_total(entries, portions, pool);
        if total > ceiling + TOLERANCE {
            let note = if pool == Pool::Protein && limits.large_menu {
                " (large-menu ceiling)"
            } else {
                ""
            };
            out.push(Violation {
                kind: ViolationKind::CeilingExceeded,
                severity: Severity::Error,
                message: format!(
                    "{} pool totals {:.1}g per person, over the {:.0}g ceiling{}",
                    pool, total, ceiling, note
                ),
                dish_id: None,
                category: None,
                pool: Some(pool),
                excess: total - ceiling,
            });
        }
    }
}

fn category_cap_violations(
    entries: &[MenuEntry<'_>],
    portions: &[ScaledPortion],
    reference: &ReferenceData,
    out: &mut Vec<Violation>,
) {
    for category in reference.categories() {
        let Some(cap) = category.cap else {
            continue;
        };
        let total: f64 = entries
            .iter()
            .zip(portions)
            .filter(|(e, _)| e.category.id == category.id)
            .map(|(_, p)| p.per_person)
            .sum();
        if total > cap + TOLERANCE {
            out.push(Violation {
                kind: ViolationKind::CategoryCapExceeded,
                severity: Severity::Error,
                message: format!(
                    "{} totals {:.1}{} per person, over its {:.0}{} cap",
                    category.name,
                    total,
                    category.unit.suffix(),
                    cap,
                    category.unit.suffix()
                ),
                dish_id: None,
                category: Some(category.id.clone()),
                pool: Some(category.pool),
                excess: total - cap,
            });
        }
    }
}

/// Dishes under the serving minimum are errors; dishes that clear it but sit
/// under their category's per-dish minimum are warnings.
fn minimum_violations(
    entries: &[MenuEntry<'_>],
    portions: &[ScaledPortion],
    limits: &Limits,
    out: &mut Vec<Violation>,
) {
    for (entry, portion) in entries.iter().zip(portions) {
        if !entry.is_capped() {
            continue;
        }
        let grams = portion.per_person;
        let category_min = entry.category.min_per_dish;

        let (severity, minimum, message) = if grams < limits.min_portion - TOLERANCE {
            (
                Severity::Error,
                limits.min_portion,
                format!(
                    "{} at {:.1}g per person is below the {:.0}g minimum portion",
                    entry.dish.name, grams, limits.min_portion
                ),
            )
        } else if grams < category_min - TOLERANCE {
            (
                Severity::Warning,
                category_min,
                format!(
                    "{} at {:.1}g per person is below the {:.0}g {} minimum",
                    entry.dish.name, grams, category_min, entry.category.name
                ),
            )
        } else {
            continue;
        };

        out.push(Violation {
            kind: ViolationKind::BelowMinimum,
            severity,
            message,
            dish_id: Some(entry.dish.id),
            category: Some(entry.category.id.clone()),
            pool: Some(entry.pool()),
            excess: minimum - grams,
        });
    }
}

fn global_cap_violations(
    entries: &[MenuEntry<'_>],
    portions: &[ScaledPortion],
    limits: &Limits,
    out: &mut Vec<Violation>,
) {
    let food = capped_food_total(entries, portions);
    if food > limits.max_total_food + TOLERANCE {
        out.push(Violation {
            kind: ViolationKind::GlobalCapExceeded,
            severity: Severity::Warning,
            message: format!(
                "total food {:.1}g per person exceeds the {:.0}g cap",
                food, limits.max_total_food
            ),
            dish_id: None,
            category: None,
            pool: None,
            excess: food - limits.max_total_food,
        });
    }

    let protein = capped_protein_total(entries, portions);
    if protein > limits.max_dietary_protein + TOLERANCE {
        out.push(Violation {
            kind: ViolationKind::GlobalCapExceeded,
            severity: Severity::Warning,
            message: format!(
                "dietary protein {:.1}g per person exceeds the {:.0}g cap",
                protein, limits.max_dietary_protein
            ),
            dish_id: None,
            category: None,
            pool: None,
            excess: protein - limits.max_dietary_protein,
        });
    }
}

/// Rule-check caller portions against pool ceilings, category caps,
/// per-dish minimums and global caps, in that order.
pub fn find_violations(
    entries: &[MenuEntry<'_>],
    portions: &[ScaledPortion],
    limits: &Limits,
    reference: &ReferenceData,
) -> Vec<Violation> {
    let mut out = Vec::new();
    pool_ceiling_violations(entries, portions, limits, &mut out);
    category_cap_violations(entries, portions, reference, &mut out);
    minimum_violations(entries, portions, limits, &mut out);
    global_cap_violations(entries, portions, limits, &mut out);
    out
}

/// Side-by-side rows for every menu dish.
pub fn compare(user: &[PortionResult], engine: &[PortionResult]) -> Vec<ComparisonRow> {
    user.iter()
        .zip(engine)
        .map(|(u, e)| {
            let delta = u.grams_per_person - e.grams_per_person;
            let delta_percent = if e.grams_per_person != 0.0 {
                Some(delta / e.grams_per_person * 100.0)
            } else {
                None
            };
            ComparisonRow {
                dish_id: u.dish_id,
                dish_name: u.dish_name.clone(),
                category: u.category.clone(),
                unit: u.unit,
                user_grams: u.grams_per_person,
                engine_grams: e.grams_per_person,
                delta_grams: delta,
                delta_percent,
            }
        })
        .collect()
}

/// Validate caller-entered portions and compare them with the engine's own.
///
/// The engine recommendation is computed independently and only used for the
/// comparison; caller values are never adjusted.
#[instrument(level = "debug", skip_all, fields(dishes = dish_ids.len(), entered = user_portions.len()))]
pub fn check(
    dish_ids: &[u32],
    guests: GuestMix,
    big_eaters: BigEaters,
    user_portions: &[UserPortion],
    overrides: &ConstraintOverrides,
    reference: &ReferenceData,
    config: &EngineConfig,
) -> Result<CheckResult> {
    let engine = plan(dish_ids, guests, big_eaters, overrides, reference, config)?;
    let grams = user_grams(&engine.entries, user_portions)?;

    let user_scaled: Vec<ScaledPortion> = engine
        .entries
        .iter()
        .zip(grams)
        .map(|(entry, g)| engine.scaler.scale(g, entry.unit()))
        .collect();

    let violations = find_violations(&engine.entries, &user_scaled, &engine.limits, reference);
    debug!(violations = violations.len(), "checked caller portions");

    let engine_portions = engine.results(&guests);
    let user_portions: Vec<PortionResult> = engine
        .entries
        .iter()
        .zip(&user_scaled)
        .map(|(entry, portion)| portion_result(entry, portion, &guests))
        .collect();

    Ok(CheckResult {
        violations,
        comparison: compare(&user_portions, &engine_portions),
        user_totals: compute_totals(&engine.entries, &user_portions),
        engine_totals: compute_totals(&engine.entries, &engine_portions),
        user_portions,
        engine_portions,
    })
}

/// Check from a JSON request body.
pub fn check_request(
    request: &CheckRequest,
    reference: &ReferenceData,
    config: &EngineConfig,
) -> Result<CheckResult> {
    let calc = &request.calculation;
    check(
        &calc.dish_ids,
        calc.guest_mix()?,
        calc.big_eaters()?,
        &request.user_portions,
        &calc.constraint_overrides,
        reference,
        config,
    )
}
