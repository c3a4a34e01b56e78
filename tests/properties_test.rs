use proptest::prelude::*;

use catering_portions_rs::catalog::ReferenceData;
use catering_portions_rs::models::{
    BigEaters, GuestMix, Pool, Severity, Unit, UserPortion, ViolationKind,
};
use catering_portions_rs::planner::{
    calculate, check, ConstraintOverrides, EngineConfig, ACCOMPANIMENT_CEILING, DESSERT_CEILING,
    MAX_DIETARY_PROTEIN_PER_PERSON, MAX_TOTAL_FOOD_PER_PERSON, PROTEIN_CEILING_LARGE,
};

const EPS: f64 = 1e-6;

fn all_dish_ids() -> Vec<u32> {
    ReferenceData::standard()
        .unwrap()
        .dishes()
        .iter()
        .map(|d| d.id)
        .collect()
}

fn menu_strategy() -> impl Strategy<Value = Vec<u32>> {
    let ids = all_dish_ids();
    let len = ids.len();
    proptest::sample::subsequence(ids, 0..=len)
}

proptest! {
    #[test]
    fn prop_portions_respect_limits(
        menu in menu_strategy(),
        gents in 0u32..300,
        ladies in 0u32..300,
        big in any::<bool>(),
        pct in 0u32..=100,
    ) {
        let reference = ReferenceData::standard().unwrap();
        let big_eaters = BigEaters::new(big, pct).unwrap();
        let guests = GuestMix { gents, ladies };
        let result = calculate(
            &menu,
            guests,
            big_eaters,
            &ConstraintOverrides::default(),
            &reference,
            &EngineConfig::default(),
        ).unwrap();

        prop_assert_eq!(result.portions.len(), menu.len());
        for p in &result.portions {
            prop_assert!(p.grams_per_person >= 0.0);
            prop_assert!(p.grams_per_gent >= p.grams_per_person - EPS);
        }

        prop_assert!(result.pool_total(Pool::Protein) <= PROTEIN_CEILING_LARGE + EPS);
        prop_assert!(result.pool_total(Pool::Accompaniment) <= ACCOMPANIMENT_CEILING + EPS);
        prop_assert!(result.pool_total(Pool::Dessert) <= DESSERT_CEILING + EPS);

        let capped = result.pool_total(Pool::Protein)
            + result.pool_total(Pool::Accompaniment)
            + result.pool_total(Pool::Dessert);
        prop_assert!(capped <= MAX_TOTAL_FOOD_PER_PERSON + EPS);
        prop_assert!(result.category_total("salad") <= 100.0 + EPS);

        let capped_protein: f64 = result
            .portions
            .iter()
            .filter(|p| p.pool != Pool::Service && p.unit == Unit::Weight)
            .map(|p| {
                let dish = reference.dish(p.dish_id).unwrap();
                let category = reference.category(&p.category).unwrap();
                let density = dish.protein_per_gram.unwrap_or(category.protein_per_gram);
                p.grams_per_person * density
            })
            .sum();
        prop_assert!(capped_protein <= MAX_DIETARY_PROTEIN_PER_PERSON + EPS);
    }

    #[test]
    fn prop_engine_output_passes_check(
        menu in menu_strategy(),
        gents in 0u32..300,
        ladies in 0u32..300,
    ) {
        let reference = ReferenceData::standard().unwrap();
        let guests = GuestMix { gents, ladies };
        let overrides = ConstraintOverrides::default();
        let config = EngineConfig::default();

        let result = calculate(&menu, guests, BigEaters::off(), &overrides, &reference, &config)
            .unwrap();
        let user: Vec<UserPortion> = result
            .portions
            .iter()
            .map(|p| UserPortion { dish_id: p.dish_id, grams_per_person: p.grams_per_person })
            .collect();

        let checked = check(&menu, guests, BigEaters::off(), &user, &overrides, &reference, &config)
            .unwrap();

        let small_warnings = result
            .warnings
            .iter()
            .filter(|w| w.starts_with("consider removing"))
            .count();
        let below = checked
            .violations
            .iter()
            .filter(|v| v.kind == ViolationKind::BelowMinimum && v.severity == Severity::Error)
            .count();

        // ceilings may push dishes under a category minimum; that is only a warning
        prop_assert_eq!(below, small_warnings);
        prop_assert!(checked
            .violations
            .iter()
            .all(|v| v.kind == ViolationKind::BelowMinimum));
        for row in &checked.comparison {
            prop_assert_eq!(row.delta_grams, 0.0);
        }
    }

    #[test]
    fn prop_calculate_is_pure(
        menu in menu_strategy(),
        gents in 0u32..300,
        ladies in 0u32..300,
    ) {
        let reference = ReferenceData::standard().unwrap();
        let guests = GuestMix { gents, ladies };
        let run = || calculate(
            &menu,
            guests,
            BigEaters::off(),
            &ConstraintOverrides::default(),
            &reference,
            &EngineConfig::default(),
        ).unwrap();
        prop_assert_eq!(run(), run());
    }
}
