/// Fractional budget increase per dish beyond the first in a category.
pub const GROWTH_RATE: f64 = 0.40;

/// Share of an absent protein category's baseline handed to present ones.
pub const REDISTRIBUTION_RATE: f64 = 0.70;

/// Weight of the popularity-weighted split in the blended dish split.
pub const POPULARITY_BLEND: f64 = 0.30;

/// Lady portion as a fraction of the gent portion.
pub const LADY_RATIO: f64 = 1.00;

/// Uplift applied when big eaters is switched on without a percentage.
pub const DEFAULT_BIG_EATERS_PERCENTAGE: u32 = 20;

// ─────────────────────────────────────────────────────────────────────────────
// Pool ceilings (gent-baseline grams per person)
// ─────────────────────────────────────────────────────────────────────────────

pub const PROTEIN_CEILING: f64 = 590.0;

/// Protein ceiling for a full spread served to a large event.
pub const PROTEIN_CEILING_LARGE: f64 = 700.0;

pub const ACCOMPANIMENT_CEILING: f64 = 150.0;

pub const DESSERT_CEILING: f64 = 150.0;

/// Guest count from which an event counts as large.
pub const LARGE_EVENT_GUEST_THRESHOLD: u64 = 100;

/// Categories that must all be present to unlock the large protein ceiling.
pub const FULL_SPREAD_CATEGORIES: [&str; 4] = ["curry", "bbq", "rice", "dessert"];

// ─────────────────────────────────────────────────────────────────────────────
// Global safety caps
// ─────────────────────────────────────────────────────────────────────────────

pub const MAX_TOTAL_FOOD_PER_PERSON: f64 = 1000.0;

pub const MAX_DIETARY_PROTEIN_PER_PERSON: f64 = 120.0;

pub const MIN_PORTION_PER_DISH: f64 = 30.0;

/// Slack for float comparisons against ceilings and caps.
pub const TOLERANCE: f64 = 1e-6;
