use std::collections::{HashMap, HashSet};

use tracing::{debug, instrument, warn};

use crate::catalog::ReferenceData;
use crate::error::Result;
use crate::models::{
    BigEaters, CalculateRequest, CalculationResult, Category, GuestMix, Pool, PortionResult,
};
use crate::planner::budget::pool_budgets;
use crate::planner::ceilings::enforce_limits;
use crate::planner::config::{ConstraintOverrides, EngineConfig, Limits};
use crate::planner::menu::{compute_totals, portion_result, resolve_entries, MenuEntry};
use crate::planner::scaling::{GuestScaler, ScaledPortion};
use crate::planner::split::{split_category, split_service};

/// Intermediate state of a calculation, shared with the check pass.
#[derive(Debug, Clone)]
pub(crate) struct Plan<'a> {
    pub entries: Vec<MenuEntry<'a>>,
    pub portions: Vec<ScaledPortion>,
    pub limits: Limits,
    pub scaler: GuestScaler,
    pub warnings: Vec<String>,
    pub adjustments: Vec<String>,
}

impl Plan<'_> {
    pub fn results(&self, guests: &GuestMix) -> Vec<PortionResult> {
        self.entries
            .iter()
            .zip(&self.portions)
            .map(|(entry, portion)| portion_result(entry, portion, guests))
            .collect()
    }
}

/// Menu positions of the dishes in `category`.
fn members(entries: &[MenuEntry<'_>], category: &Category) -> Vec<usize> {
    entries
        .iter()
        .enumerate()
        .filter(|(_, e)| e.category.id == category.id)
        .map(|(i, _)| i)
        .collect()
}

/// Gent-baseline portions for every menu position, before limits.
fn allocate(
    entries: &[MenuEntry<'_>],
    reference: &ReferenceData,
    config: &EngineConfig,
    warnings: &mut Vec<String>,
    adjustments: &mut Vec<String>,
) -> Vec<f64> {
    let mut counts: HashMap<&str, usize> = HashMap::new();
    for entry in entries {
        *counts.entry(entry.category.id.as_str()).or_insert(0) += 1;
    }

    let mut per_person = vec![0.0; entries.len()];

    for pool in Pool::ALL {
        if pool.is_fixed() {
            for category in reference.pool_categories(pool) {
                let idx = members(entries, category);
                if idx.is_empty() {
                    continue;
                }
                let amounts: Vec<f64> = idx
                    .iter()
                    .map(|&i| entries[i].dish.fixed_per_person.unwrap_or(category.baseline))
                    .collect();
                let (amounts, capped) = split_service(&amounts, category.cap);
                if let (true, Some(cap)) = (capped, category.cap) {
                    adjustments.push(format!(
                        "{} dishes share the {:.0}{} category cap ({} dishes)",
                        category.name,
                        cap,
                        category.unit.suffix(),
                        idx.len()
                    ));
                }
                for (&i, amount) in idx.iter().zip(amounts) {
                    per_person[i] = amount;
                }
            }
            continue;
        }

        let pool_members: Vec<(&Category, usize)> = reference
            .pool_categories(pool)
            .map(|c| (c, counts.get(c.id.as_str()).copied().unwrap_or(0)))
            .collect();
        let budgets = pool_budgets(
            pool,
            &pool_members,
            config.growth_rate,
            config.redistribution_rate,
        );

        for budget in &budgets.categories {
            let idx = members(entries, budget.category);
            let popularity: Vec<f64> = idx.iter().map(|&i| entries[i].dish.popularity).collect();
            let split = split_category(
                budget.budget,
                &popularity,
                budget.category.min_per_dish,
                config.popularity_blend,
            );
            for (&i, portion) in idx.iter().zip(split.portions) {
                per_person[i] = portion;
            }
        }

        warnings.extend(budgets.warnings);
        adjustments.extend(budgets.adjustments);
    }

    per_person
}

/// Run the full pipeline: budgets, split, guest scaling, then limits.
pub(crate) fn plan<'a>(
    dish_ids: &[u32],
    guests: GuestMix,
    big_eaters: BigEaters,
    overrides: &ConstraintOverrides,
    reference: &'a ReferenceData,
    config: &EngineConfig,
) -> Result<Plan<'a>> {
    overrides.validate()?;
    let entries = resolve_entries(reference, dish_ids)?;

    let present: HashSet<&str> = entries.iter().map(|e| e.category.id.as_str()).collect();
    let limits = Limits::resolve(config, overrides, &present, &guests);
    debug!(?limits, "resolved limits");

    let mut warnings = Vec::new();
    let mut adjustments = Vec::new();
    let per_person = allocate(&entries, reference, config, &mut warnings, &mut adjustments);

    let scaler = GuestScaler::new(config.lady_ratio, big_eaters);
    let mut portions: Vec<ScaledPortion> = entries
        .iter()
        .zip(per_person)
        .map(|(entry, grams)| scaler.scale(grams, entry.unit()))
        .collect();

    let enforcement = enforce_limits(&entries, &mut portions, &limits);
    warnings.extend(enforcement.warnings);
    adjustments.extend(enforcement.adjustments);

    if guests.is_empty() {
        warnings.push("no guests: totals are zero".to_string());
    }
    for w in &warnings {
        warn!("{}", w);
    }

    Ok(Plan {
        entries,
        portions,
        limits,
        scaler,
        warnings,
        adjustments,
    })
}

/// Calculate per-dish portions for a menu and guest mix.
///
/// Breached limits never fail the call; they are resolved by scaling and
/// reported in `adjustments_applied`. Only unresolvable input is an error.
#[instrument(level = "debug", skip_all, fields(dishes = dish_ids.len(), guests = guests.total()))]
pub fn calculate(
    dish_ids: &[u32],
    guests: GuestMix,
    big_eaters: BigEaters,
    overrides: &ConstraintOverrides,
    reference: &ReferenceData,
    config: &EngineConfig,
) -> Result<CalculationResult> {
    let plan = plan(dish_ids, guests, big_eaters, overrides, reference, config)?;
    let portions = plan.results(&guests);
    let totals = compute_totals(&plan.entries, &portions);

    Ok(CalculationResult {
        portions,
        totals,
        warnings: plan.warnings,
        adjustments_applied: plan.adjustments,
    })
}

/// Calculate from a JSON request body.
pub fn calculate_request(
    request: &CalculateRequest,
    reference: &ReferenceData,
    config: &EngineConfig,
) -> Result<CalculationResult> {
    calculate(
        &request.dish_ids,
        request.guest_mix()?,
        request.big_eaters()?,
        &request.constraint_overrides,
        reference,
        config,
    )
}
