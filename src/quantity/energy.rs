use std::ops::{Div, Mul};

use crate::quantity::{percentage::Percentage, power::Watts, time::Hours};

quantity!(WattHours, via: f64, suffix: "Wh", precision: 0);

impl Mul<Percentage> for WattHours {
    type Output = Self;

    fn mul(self, percentage: Percentage) -> Self::Output {
        Self(self.0 * percentage.to_proportion())
    }
}

/// How long the energy lasts at the given power.
///
/// Zero power yields infinite hours, callers decide what to do with that.
impl Div<Watts> for WattHours {
    type Output = Hours;

    fn div(self, power: Watts) -> Self::Output {
        Hours(self.0 / power.0)
    }
}

#[cfg(test)]
mod tests {
    use approx::assert_abs_diff_eq;

    use super::*;

    #[test]
    fn stored_energy_ok() {
        assert_abs_diff_eq!((WattHours(12000.0) * Percentage(50.0)).0, 6000.0);
    }

    #[test]
    fn duration_at_power_ok() {
        assert_abs_diff_eq!((WattHours(6000.0) / Watts(1000.0)).0, 6.0);
        assert!((WattHours(6000.0) / Watts::ZERO).0.is_infinite());
    }
}
