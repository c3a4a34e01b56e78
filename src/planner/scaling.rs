use crate::models::{BigEaters, GuestMix, Unit};

/// Gent-baseline portion expanded for the guest mix.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct ScaledPortion {
    pub per_person: f64,
    pub per_gent: f64,
    pub per_lady: f64,
}

impl ScaledPortion {
    /// Multiply every figure by `factor`.
    pub fn scale(&mut self, factor: f64) {
        self.per_person *= factor;
        self.per_gent *= factor;
        self.per_lady *= factor;
    }

    /// Quantity to prepare for the whole guest list.
    pub fn total(&self, guests: &GuestMix) -> f64 {
        self.per_gent * guests.gents as f64 + self.per_lady * guests.ladies as f64
    }
}

/// Derives gent and lady portions from the gent baseline.
///
/// Big eaters uplifts weight-unit portions of every pool, service included.
/// Count-unit items (bread pieces, cups of tea) are served whole and keep
/// their baseline count.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GuestScaler {
    lady_ratio: f64,
    big_eaters_multiplier: f64,
}

impl GuestScaler {
    pub fn new(lady_ratio: f64, big_eaters: BigEaters) -> Self {
        Self {
            lady_ratio,
            big_eaters_multiplier: big_eaters.multiplier(),
        }
    }

    pub fn scale(&self, per_person: f64, unit: Unit) -> ScaledPortion {
        let uplift = match unit {
            Unit::Weight => self.big_eaters_multiplier,
            Unit::Count => 1.0,
        };
        ScaledPortion {
            per_person,
            per_gent: per_person * uplift,
            per_lady: per_person * self.lady_ratio * uplift,
        }
    }
}
