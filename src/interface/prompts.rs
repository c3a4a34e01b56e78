use dialoguer::{Confirm, Input, Select};
use strsim::jaro_winkler;

use crate::catalog::ReferenceData;
use crate::error::{PortionError, Result};
use crate::models::{CalculateRequest, Dish, GuestCounts};
use crate::planner::{ConstraintOverrides, DEFAULT_BIG_EATERS_PERCENTAGE};

/// Minimum Jaro-Winkler similarity for a fuzzy dish match.
const MATCH_THRESHOLD: f64 = 0.7;

fn prompt_count(prompt: &str, default: &str) -> Result<i64> {
    let input: String = Input::new()
        .with_prompt(prompt)
        .default(default.to_string())
        .interact_text()?;

    let value: i64 = input
        .trim()
        .parse()
        .map_err(|_| PortionError::InvalidInput(format!("'{}' is not a whole number", input)))?;
    if value < 0 {
        return Err(PortionError::InvalidGuestMix(format!(
            "guest counts cannot be negative, got {}",
            value
        )));
    }
    Ok(value)
}

/// Prompt for the guest mix.
pub fn prompt_guests() -> Result<GuestCounts> {
    let gents = prompt_count("How many gents?", "50")?;
    let ladies = prompt_count("How many ladies?", "50")?;
    Ok(GuestCounts { gents, ladies })
}

/// Prompt for the big-eaters modifier. Returns (enabled, percentage).
pub fn prompt_big_eaters() -> Result<(bool, u32)> {
    let enabled = prompt_yes_no("Are these big eaters?", false)?;
    if !enabled {
        return Ok((false, DEFAULT_BIG_EATERS_PERCENTAGE));
    }

    let input: String = Input::new()
        .with_prompt("Increase portions by what percentage (0-100)?")
        .default(DEFAULT_BIG_EATERS_PERCENTAGE.to_string())
        .interact_text()?;
    let pct: u32 = input
        .trim()
        .parse()
        .map_err(|_| PortionError::InvalidInput("Invalid percentage".to_string()))?;
    if pct > 100 {
        return Err(PortionError::InvalidInput(format!(
            "percentage must be 0-100, got {}",
            pct
        )));
    }
    Ok((true, pct))
}

/// Pick dishes by name with fuzzy matching until an empty line is entered.
pub fn prompt_dishes(reference: &ReferenceData, menu: &mut Vec<u32>) -> Result<()> {
    loop {
        let input: String = Input::new()
            .with_prompt("Add a dish (or press Enter to finish)")
            .allow_empty(true)
            .interact_text()?;

        let input = input.trim();
        if input.is_empty() {
            break;
        }

        if let Some(dish) = reference.dish_by_name(input) {
            add_dish(menu, dish);
            continue;
        }

        let needle = input.to_lowercase();
        let mut candidates: Vec<(&Dish, f64)> = reference
            .dishes()
            .iter()
            .map(|d| (d, jaro_winkler(&d.key(), &needle)))
            .filter(|(_, score)| *score > MATCH_THRESHOLD)
            .collect();

        candidates.sort_by(|a, b| b.1.partial_cmp(&a.1).unwrap_or(std::cmp::Ordering::Equal));

        if candidates.is_empty() {
            println!("No matching dish found for '{}'", input);
            continue;
        }

        if candidates.len() == 1 {
            let dish = candidates[0].0;
            if prompt_yes_no(&format!("Did you mean '{}'?", dish.name), true)? {
                add_dish(menu, dish);
            }
        } else {
            let options: Vec<&Dish> = candidates.iter().take(5).map(|(d, _)| *d).collect();
            let mut labels: Vec<String> = options
                .iter()
                .map(|d| format!("{} ({})", d.name, d.category))
                .collect();
            labels.push("None of these".to_string());

            let selection = Select::new()
                .with_prompt("Which did you mean?")
                .items(&labels)
                .default(0)
                .interact()?;

            if let Some(dish) = options.get(selection) {
                add_dish(menu, dish);
            }
        }
    }

    Ok(())
}

fn add_dish(menu: &mut Vec<u32>, dish: &Dish) {
    if menu.contains(&dish.id) {
        println!("{} is already on the menu", dish.name);
    } else {
        menu.push(dish.id);
        println!("Added: {}", dish.name);
    }
}

/// Offer the reference templates as a starting point.
pub fn prompt_template(reference: &ReferenceData) -> Result<Vec<u32>> {
    let templates = reference.templates();
    if templates.is_empty() {
        return Ok(Vec::new());
    }

    let mut labels: Vec<String> = templates
        .iter()
        .map(|t| format!("{} ({} dishes)", t.name, t.dish_ids.len()))
        .collect();
    labels.push("Start from an empty menu".to_string());

    let selection = Select::new()
        .with_prompt("Start from a menu template?")
        .items(&labels)
        .default(labels.len() - 1)
        .interact()?;

    Ok(templates
        .get(selection)
        .map(|t| t.dish_ids.clone())
        .unwrap_or_default())
}

/// Prompt for yes/no confirmation.
pub fn prompt_yes_no(prompt: &str, default: bool) -> Result<bool> {
    Ok(Confirm::new()
        .with_prompt(prompt)
        .default(default)
        .interact()?)
}

/// Collect a complete calculation request interactively.
pub fn collect_request(reference: &ReferenceData) -> Result<CalculateRequest> {
    let guests = prompt_guests()?;
    let (big_eaters, big_eaters_percentage) = prompt_big_eaters()?;
    let mut dish_ids = prompt_template(reference)?;
    prompt_dishes(reference, &mut dish_ids)?;

    Ok(CalculateRequest {
        dish_ids,
        guests,
        big_eaters,
        big_eaters_percentage,
        constraint_overrides: ConstraintOverrides::default(),
    })
}
