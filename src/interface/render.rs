use crate::catalog::ReferenceData;
use crate::models::{CalculationResult, CheckResult, PortionResult, Severity, Totals};

fn name_width(portions: &[PortionResult]) -> usize {
    portions
        .iter()
        .map(|p| p.dish_name.len())
        .max()
        .unwrap_or(10)
        .max(4)
}

fn display_totals(totals: &Totals, title: &str) {
    println!("--- {} ---", title);
    println!("Food per gent:      {:.1} g", totals.food_per_gent);
    println!("Food per lady:      {:.1} g", totals.food_per_lady);
    println!("Food per person:    {:.1} g", totals.food_per_person);
    println!("Dietary protein:    {:.1} g", totals.dietary_protein_per_person);
    println!("Total food weight:  {:.2} kg", totals.total_food_weight / 1000.0);
    if totals.total_cost > 0.0 {
        println!("Total cost:         {:.2}", totals.total_cost);
    }
}

/// Display a calculation in a formatted table.
pub fn display_calculation(result: &CalculationResult) {
    if result.portions.is_empty() {
        println!("No dishes on the menu.");
        return;
    }

    let width = name_width(&result.portions);

    println!();
    println!("=== Portion Plan ===");
    println!();
    println!(
        "{:<width$}  {:<14} {:>9} {:>9} {:>9} {:>11}",
        "Dish",
        "Pool",
        "Person",
        "Gent",
        "Lady",
        "Total",
        width = width
    );

    for p in &result.portions {
        let suffix = p.unit.suffix();
        let total = if suffix == "g" {
            format!("{:.2} kg", p.total_grams / 1000.0)
        } else {
            format!("{:.0} {}", p.total_grams, suffix)
        };
        println!(
            "{:<width$}  {:<14} {:>7.1}{:<2} {:>7.1}{:<2} {:>7.1}{:<2} {:>11}",
            p.dish_name,
            p.pool.as_str(),
            p.grams_per_person,
            suffix,
            p.grams_per_gent,
            suffix,
            p.grams_per_lady,
            suffix,
            total,
            width = width
        );
    }

    println!();
    display_totals(&result.totals, "Totals");

    if !result.adjustments_applied.is_empty() {
        println!();
        println!("Adjustments:");
        for note in &result.adjustments_applied {
            println!("  * {}", note);
        }
    }

    if !result.warnings.is_empty() {
        println!();
        println!("Warnings:");
        for warning in &result.warnings {
            println!("  ! {}", warning);
        }
    }
    println!();
}

/// Display a check: violations, then caller-versus-engine comparison.
pub fn display_check(result: &CheckResult) {
    println!();
    println!("=== Portion Check ===");
    println!();

    if result.violations.is_empty() {
        println!("No violations.");
    } else {
        for v in &result.violations {
            let tag = match v.severity {
                Severity::Error => "ERROR",
                Severity::Warning => "WARN ",
            };
            println!("[{}] {} (by {:.1})", tag, v.message, v.excess);
        }
    }

    println!();
    let width = result
        .comparison
        .iter()
        .map(|r| r.dish_name.len())
        .max()
        .unwrap_or(10)
        .max(4);
    println!(
        "{:<width$}  {:>9} {:>9} {:>9} {:>8}",
        "Dish",
        "Yours",
        "Engine",
        "Delta",
        "Delta%",
        width = width
    );
    for row in &result.comparison {
        let pct = row
            .delta_percent
            .map(|p| format!("{:+.1}%", p))
            .unwrap_or_else(|| "-".to_string());
        println!(
            "{:<width$}  {:>9.1} {:>9.1} {:>+9.1} {:>8}",
            row.dish_name,
            row.user_grams,
            row.engine_grams,
            row.delta_grams,
            pct,
            width = width
        );
    }

    println!();
    display_totals(&result.user_totals, "Your totals");
    println!();
    display_totals(&result.engine_totals, "Engine totals");
    println!();
}

/// List every category with its dishes.
pub fn display_catalog(reference: &ReferenceData) {
    println!();
    println!("=== Catalog ({} dishes) ===", reference.len());

    for category in reference.categories() {
        let cap = category
            .cap
            .map(|c| format!(", cap {:.0}{}", c, category.unit.suffix()))
            .unwrap_or_default();
        println!();
        println!(
            "{} [{}] - {} pool, baseline {:.0}{}, min {:.0}{}{}",
            category.name,
            category.id,
            category.pool,
            category.baseline,
            category.unit.suffix(),
            category.min_per_dish,
            category.unit.suffix(),
            cap
        );
        for dish in reference.dishes().iter().filter(|d| d.category == category.id) {
            println!("  {:>4}  {} (popularity {:.1})", dish.id, dish.name, dish.popularity);
        }
    }

    if !reference.templates().is_empty() {
        println!();
        println!("Templates:");
        for template in reference.templates() {
            println!("  {} -> {:?}", template.name, template.dish_ids);
        }
    }
    println!();
}
