use serde::{Deserialize, Serialize};

use crate::error::{PortionError, Result};

/// Head count split into gents and ladies.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct GuestMix {
    pub gents: u32,
    pub ladies: u32,
}

impl GuestMix {
    /// Build a guest mix from signed counts, rejecting negatives.
    pub fn new(gents: i64, ladies: i64) -> Result<Self> {
        let convert = |label: &str, value: i64| {
            u32::try_from(value).map_err(|_| {
                PortionError::InvalidGuestMix(format!("{} must be between 0 and {}, got {}", label, u32::MAX, value))
            })
        };
        Ok(Self {
            gents: convert("gents", gents)?,
            ladies: convert("ladies", ladies)?,
        })
    }

    #[inline]
    pub fn total(&self) -> u64 {
        self.gents as u64 + self.ladies as u64
    }

    pub fn is_empty(&self) -> bool {
        self.total() == 0
    }
}

/// Uniform uplift applied to per-person portions for hungry crowds.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct BigEaters {
    pub enabled: bool,
    pub percentage: u32,
}

impl BigEaters {
    pub fn new(enabled: bool, percentage: u32) -> Result<Self> {
        if percentage > 100 {
            return Err(PortionError::InvalidInput(format!(
                "big_eaters_percentage must be 0-100, got {}",
                percentage
            )));
        }
        Ok(Self {
            enabled,
            percentage,
        })
    }

    pub fn off() -> Self {
        Self::default()
    }

    /// Multiplier applied to every scaled portion (1.0 when disabled).
    pub fn multiplier(&self) -> f64 {
        if self.enabled {
            1.0 + self.percentage as f64 / 100.0
        } else {
            1.0
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_negative_guests_rejected() {
        assert!(matches!(
            GuestMix::new(-1, 10),
            Err(PortionError::InvalidGuestMix(_))
        ));
        assert!(GuestMix::new(0, 0).unwrap().is_empty());
    }

    #[test]
    fn test_total() {
        let guests = GuestMix::new(50, 50).unwrap();
        assert_eq!(guests.total(), 100);
    }

    #[test]
    fn test_big_eaters_multiplier() {
        assert_eq!(BigEaters::off().multiplier(), 1.0);
        let on = BigEaters::new(true, 20).unwrap();
        assert!((on.multiplier() - 1.2).abs() < 1e-12);
        let disabled = BigEaters::new(false, 50).unwrap();
        assert_eq!(disabled.multiplier(), 1.0);
        assert!(BigEaters::new(true, 101).is_err());
    }
}
