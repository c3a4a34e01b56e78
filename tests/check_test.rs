#[macro_use]
extern crate assert_float_eq;

use catering_portions_rs::catalog::ReferenceData;
use catering_portions_rs::models::{
    BigEaters, CalculateRequest, CheckRequest, GuestCounts, GuestMix, Severity, UserPortion,
    ViolationKind,
};
use catering_portions_rs::planner::{
    calculate, check, check_request, ConstraintOverrides, EngineConfig,
};

fn engine_portions(reference: &ReferenceData, menu: &[u32], guests: GuestMix, big: BigEaters) -> Vec<UserPortion> {
    calculate(
        menu,
        guests,
        big,
        &ConstraintOverrides::default(),
        reference,
        &EngineConfig::default(),
    )
    .unwrap()
    .portions
    .iter()
    .map(|p| UserPortion {
        dish_id: p.dish_id,
        grams_per_person: p.grams_per_person,
    })
    .collect()
}

#[test]
fn test_engine_recommendation_passes_its_own_check() {
    let reference = ReferenceData::standard().unwrap();
    let banquet = reference.template_menu("Grand Banquet").unwrap();

    for guests in [GuestMix { gents: 40, ladies: 40 }, GuestMix { gents: 90, ladies: 60 }] {
        for big in [BigEaters::off(), BigEaters::new(true, 20).unwrap()] {
            let user = engine_portions(&reference, &banquet, guests, big);
            let result = check(
                &banquet,
                guests,
                big,
                &user,
                &ConstraintOverrides::default(),
                &reference,
                &EngineConfig::default(),
            )
            .unwrap();

            assert!(result.violations.is_empty(), "{:?}", result.violations);
            assert_eq!(result.comparison.len(), banquet.len());
            for row in &result.comparison {
                assert_eq!(row.delta_grams, 0.0);
                assert_eq!(row.delta_percent, Some(0.0));
            }
            assert_float_absolute_eq!(
                result.user_totals.total_food_weight,
                result.engine_totals.total_food_weight,
                1e-6
            );
        }
    }
}

#[test]
fn test_check_does_not_adjust_caller_values() {
    let reference = ReferenceData::standard().unwrap();
    let user = vec![
        UserPortion { dish_id: 40, grams_per_person: 100.0 },
        UserPortion { dish_id: 41, grams_per_person: 100.0 },
    ];
    let result = check(
        &[40, 41],
        GuestMix { gents: 10, ladies: 10 },
        BigEaters::off(),
        &user,
        &ConstraintOverrides::default(),
        &reference,
        &EngineConfig::default(),
    )
    .unwrap();

    // caller breaches the dessert ceiling; values are reported, not scaled
    assert_eq!(result.user_portions[0].grams_per_person, 100.0);
    let ceiling = &result.violations[0];
    assert_eq!(ceiling.kind, ViolationKind::CeilingExceeded);
    assert_eq!(ceiling.severity, Severity::Error);
    assert_float_absolute_eq!(ceiling.excess, 50.0, 1e-9);

    // engine floors two desserts to 2 x 60g and pins both at the minimum
    let row = &result.comparison[0];
    assert_float_absolute_eq!(row.engine_grams, 60.0, 1e-9);
    assert_float_absolute_eq!(row.delta_grams, 100.0 - row.engine_grams, 1e-9);
    let pct = row.delta_percent.unwrap();
    assert_float_absolute_eq!(pct, row.delta_grams / row.engine_grams * 100.0, 1e-9);
}

#[test]
fn test_large_menu_ceiling_applies_to_check() {
    let reference = ReferenceData::standard().unwrap();
    let menu = [1, 10, 20, 40];
    let user = vec![
        UserPortion { dish_id: 1, grams_per_person: 300.0 },
        UserPortion { dish_id: 10, grams_per_person: 200.0 },
        UserPortion { dish_id: 20, grams_per_person: 150.0 },
        UserPortion { dish_id: 40, grams_per_person: 80.0 },
    ];

    let run = |guests: GuestMix| {
        check(
            &menu,
            guests,
            BigEaters::off(),
            &user,
            &ConstraintOverrides::default(),
            &reference,
            &EngineConfig::default(),
        )
        .unwrap()
    };

    // 650g of protein: over 590g for a small event, fine for a large one
    let small = run(GuestMix { gents: 20, ladies: 20 });
    assert!(small.violations.iter().any(|v| v.kind == ViolationKind::CeilingExceeded));

    let large = run(GuestMix { gents: 100, ladies: 50 });
    assert!(!large.violations.iter().any(|v| v.kind == ViolationKind::CeilingExceeded));
}

#[test]
fn test_overrides_change_check_limits() {
    let reference = ReferenceData::standard().unwrap();
    let user = vec![UserPortion { dish_id: 30, grams_per_person: 40.0 }];
    let overrides = ConstraintOverrides {
        min_portion_per_dish_grams: Some(50.0),
        ..Default::default()
    };
    let result = check(
        &[30],
        GuestMix { gents: 5, ladies: 5 },
        BigEaters::off(),
        &user,
        &overrides,
        &reference,
        &EngineConfig::default(),
    )
    .unwrap();

    assert_eq!(result.violations.len(), 1);
    assert_eq!(result.violations[0].kind, ViolationKind::BelowMinimum);
    assert_float_absolute_eq!(result.violations[0].excess, 10.0, 1e-9);
}

#[test]
fn test_check_request_json_contract() {
    let reference = ReferenceData::standard().unwrap();
    let request = CheckRequest {
        calculation: CalculateRequest {
            dish_ids: vec![1, 20, 50],
            guests: GuestCounts { gents: 30, ladies: 20 },
            big_eaters: false,
            big_eaters_percentage: 20,
            constraint_overrides: ConstraintOverrides::default(),
        },
        user_portions: vec![
            UserPortion { dish_id: 1, grams_per_person: 250.0 },
            UserPortion { dish_id: 20, grams_per_person: 230.0 },
            UserPortion { dish_id: 50, grams_per_person: 50.0 },
        ],
    };

    let result = check_request(&request, &reference, &EngineConfig::default()).unwrap();
    let json = serde_json::to_value(&result).unwrap();

    assert!(json["violations"].as_array().unwrap().is_empty());
    let rows = json["comparison"].as_array().unwrap();
    assert_eq!(rows.len(), 3);
    assert_eq!(rows[2]["dish_name"], "Green Salad");
    assert_eq!(rows[2]["delta_grams"], 0.0);
    assert!(json["user_totals"]["food_per_person"].as_f64().unwrap() > 0.0);
    assert!(json["engine_totals"].is_object());
}

#[test]
fn test_negative_guests_rejected_before_check() {
    let reference = ReferenceData::standard().unwrap();
    let request = CheckRequest {
        calculation: CalculateRequest {
            dish_ids: vec![1],
            guests: GuestCounts { gents: -4, ladies: 20 },
            big_eaters: false,
            big_eaters_percentage: 20,
            constraint_overrides: ConstraintOverrides::default(),
        },
        user_portions: Vec::new(),
    };
    assert!(check_request(&request, &reference, &EngineConfig::default()).is_err());
}
