use crate::planner::constants::TOLERANCE;

/// Result of splitting one category budget across its dishes.
#[derive(Debug, Clone, PartialEq)]
pub struct CategorySplit {
    /// Portion per dish, parallel to the input popularity slice.
    pub portions: Vec<f64>,
    /// Set when the budget had to be raised so every dish meets its minimum.
    pub raised_budget: Option<f64>,
}

/// Blend an equal split with a popularity-weighted split.
///
/// `portion = blend * popularity_share + (1 - blend) * equal_share`
pub fn blend_split(budget: f64, popularity: &[f64], blend: f64) -> Vec<f64> {
    let n = popularity.len();
    if n == 0 {
        return Vec::new();
    }

    let equal_share = budget / n as f64;
    let popularity_sum: f64 = popularity.iter().sum();

    popularity
        .iter()
        .map(|&p| {
            let popularity_share = if popularity_sum > 0.0 {
                budget * p / popularity_sum
            } else {
                equal_share
            };
            blend * popularity_share + (1.0 - blend) * equal_share
        })
        .collect()
}

/// Lift every portion to `min_per_dish`, funding the shortfall by scaling
/// down the dishes still above it.
///
/// Dishes pinned at the minimum stay there; the loop pins at least one dish
/// per pass, so it runs at most `portions.len()` times. The sum of portions
/// is preserved when `budget >= min_per_dish * n`.
pub fn enforce_minimum(portions: &mut [f64], budget: f64, min_per_dish: f64) {
    let mut pinned = vec![false; portions.len()];

    loop {
        let mut newly_pinned = false;
        for (i, portion) in portions.iter_mut().enumerate() {
            if !pinned[i] && *portion < min_per_dish - TOLERANCE {
                *portion = min_per_dish;
                pinned[i] = true;
                newly_pinned = true;
            }
        }
        if !newly_pinned {
            break;
        }

        let pinned_count = pinned.iter().filter(|&&p| p).count();
        let free_budget = (budget - min_per_dish * pinned_count as f64).max(0.0);
        let free_sum: f64 = portions
            .iter()
            .zip(&pinned)
            .filter(|(_, p)| !**p)
            .map(|(v, _)| *v)
            .sum();

        if free_sum <= 0.0 {
            break;
        }
        let factor = free_budget / free_sum;
        for (portion, _) in portions.iter_mut().zip(&pinned).filter(|(_, p)| !**p) {
            *portion *= factor;
        }
    }
}

/// Split a category budget: blend, then enforce the per-dish minimum.
///
/// A budget too small to give every dish its minimum is raised to
/// `min_per_dish * n` first.
pub fn split_category(
    budget: f64,
    popularity: &[f64],
    min_per_dish: f64,
    blend: f64,
) -> CategorySplit {
    let required = min_per_dish * popularity.len() as f64;
    let (budget, raised_budget) = if budget < required - TOLERANCE {
        (required, Some(required))
    } else {
        (budget, None)
    };

    let mut portions = blend_split(budget, popularity, blend);
    enforce_minimum(&mut portions, budget, min_per_dish);

    CategorySplit {
        portions,
        raised_budget,
    }
}

/// Fixed per-person service amounts sharing a category cap.
///
/// When the amounts exceed the cap, the cap is divided equally and each dish
/// gets the smaller of its fixed amount and its equal share.
/// Returns the amounts and whether the cap bound.
pub fn split_service(amounts: &[f64], cap: Option<f64>) -> (Vec<f64>, bool) {
    let total: f64 = amounts.iter().sum();
    match cap {
        Some(cap) if total > cap + TOLERANCE => {
            let share = cap / amounts.len() as f64;
            (amounts.iter().map(|&a| a.min(share)).collect(), true)
        }
        _ => (amounts.to_vec(), false),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_single_dish_gets_whole_budget() {
        let portions = blend_split(200.0, &[2.5], 0.3);
        assert_eq!(portions.len(), 1);
        assert!((portions[0] - 200.0).abs() < 1e-9);
    }

    #[test]
    fn test_blend_weights() {
        // equal 100 each; popularity 150 / 50; blend 0.3 -> 115 / 85
        let portions = blend_split(200.0, &[3.0, 1.0], 0.3);
        assert!((portions[0] - 115.0).abs() < 1e-9);
        assert!((portions[1] - 85.0).abs() < 1e-9);
        assert!((portions.iter().sum::<f64>() - 200.0).abs() < 1e-9);
    }

    #[test]
    fn test_equal_popularity_is_equal_split() {
        let portions = blend_split(180.0, &[1.0, 1.0, 1.0], 0.3);
        for p in portions {
            assert!((p - 60.0).abs() < 1e-9);
        }
    }

    #[test]
    fn test_enforce_minimum_rebalances() {
        // blend gives ~96.67 / 51.67 / 51.67; the two small dishes are lifted to 60
        let mut portions = blend_split(200.0, &[10.0, 1.0, 1.0], 0.3);
        enforce_minimum(&mut portions, 200.0, 60.0);
        assert!((portions[0] - 80.0).abs() < 1e-9);
        assert!((portions[1] - 60.0).abs() < 1e-9);
        assert!((portions[2] - 60.0).abs() < 1e-9);
        assert!((portions.iter().sum::<f64>() - 200.0).abs() < 1e-9);
    }

    #[test]
    fn test_enforce_minimum_noop_when_satisfied() {
        let mut portions = vec![115.0, 85.0];
        enforce_minimum(&mut portions, 200.0, 60.0);
        assert_eq!(portions, vec![115.0, 85.0]);
    }

    #[test]
    fn test_split_category_raises_budget() {
        let split = split_category(100.0, &[1.0, 1.0], 60.0, 0.3);
        assert_eq!(split.raised_budget, Some(120.0));
        assert!((split.portions[0] - 60.0).abs() < 1e-9);
        assert!((split.portions[1] - 60.0).abs() < 1e-9);
    }

    #[test]
    fn test_split_service_cap() {
        let (amounts, capped) = split_service(&[50.0, 50.0, 50.0], Some(100.0));
        assert!(capped);
        for a in &amounts {
            assert!((a - 100.0 / 3.0).abs() < 1e-9);
        }

        let (amounts, capped) = split_service(&[70.0, 50.0], Some(100.0));
        assert!(capped);
        assert_eq!(amounts, vec![50.0, 50.0]);

        // a dish already under its equal share keeps its fixed amount
        let (amounts, capped) = split_service(&[90.0, 20.0], Some(100.0));
        assert!(capped);
        assert_eq!(amounts, vec![50.0, 20.0]);

        let (amounts, capped) = split_service(&[50.0, 40.0], Some(100.0));
        assert!(!capped);
        assert_eq!(amounts, vec![50.0, 40.0]);

        let (amounts, capped) = split_service(&[2.0, 2.0], None);
        assert!(!capped);
        assert_eq!(amounts, vec![2.0, 2.0]);
    }
}
