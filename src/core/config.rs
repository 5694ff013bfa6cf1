use bon::bon;

use crate::{
    prelude::*,
    quantity::{energy::WattHours, power::Watts, time::Hours},
};

/// Sign convention of the raw grid flow reported by a telemetry source.
///
/// Sources disagree on this, and there is no way to tell from the data alone.
#[derive(Copy, Clone, Debug, Eq, PartialEq, clap::ValueEnum)]
pub enum GridSign {
    /// Positive grid flow means importing from the grid.
    ImportPositive,

    /// Positive grid flow means exporting to the grid.
    ExportPositive,
}

impl GridSign {
    pub const fn from_import_is_positive(import_is_positive: bool) -> Self {
        if import_is_positive { Self::ImportPositive } else { Self::ExportPositive }
    }

    /// Convert the raw reading so that positive is import and negative is export.
    pub fn normalize(self, raw: Watts) -> Watts {
        match self {
            Self::ImportPositive => raw,
            Self::ExportPositive => -raw,
        }
    }
}

/// Immutable derivation parameters, one instance per rendering surface.
#[must_use]
#[derive(Copy, Clone, Debug)]
pub struct DerivationConfig {
    pub grid_sign: GridSign,

    /// Grid flow magnitude below which the flow is treated as noise.
    pub grid_noise_threshold: Watts,

    /// Battery power magnitude below which the battery is idle.
    pub battery_noise_threshold: Watts,

    /// Solar surplus or deficit required to infer the battery direction
    /// when the battery power is not reported.
    pub inferred_battery_margin: Watts,

    /// Nominal full-charge energy.
    pub battery_capacity: WattHours,

    /// Home load at or below which the time-to-empty is not estimated.
    pub min_load_for_time_estimate: Watts,

    /// Time-to-empty estimates at or above this are dropped.
    pub time_to_empty_ceiling: Hours,
}

impl DerivationConfig {
    pub const DEFAULT_GRID_NOISE_THRESHOLD: Watts = Watts(20.0);
    pub const DEFAULT_BATTERY_NOISE_THRESHOLD: Watts = Watts(20.0);
    pub const DEFAULT_INFERRED_BATTERY_MARGIN: Watts = Watts(50.0);
    pub const DEFAULT_MIN_LOAD_FOR_TIME_ESTIMATE: Watts = Watts(20.0);
    pub const DEFAULT_TIME_TO_EMPTY_CEILING: Hours = Hours(48.0);
}

#[bon]
impl DerivationConfig {
    #[builder]
    pub fn new(
        grid_sign: GridSign,
        battery_capacity: WattHours,
        #[builder(default = DerivationConfig::DEFAULT_GRID_NOISE_THRESHOLD)]
        grid_noise_threshold: Watts,
        #[builder(default = DerivationConfig::DEFAULT_BATTERY_NOISE_THRESHOLD)]
        battery_noise_threshold: Watts,
        #[builder(default = DerivationConfig::DEFAULT_INFERRED_BATTERY_MARGIN)]
        inferred_battery_margin: Watts,
        #[builder(default = DerivationConfig::DEFAULT_MIN_LOAD_FOR_TIME_ESTIMATE)]
        min_load_for_time_estimate: Watts,
        #[builder(default = DerivationConfig::DEFAULT_TIME_TO_EMPTY_CEILING)]
        time_to_empty_ceiling: Hours,
    ) -> Result<Self> {
        for (name, value) in [
            ("grid noise threshold", grid_noise_threshold),
            ("battery noise threshold", battery_noise_threshold),
            ("inferred battery margin", inferred_battery_margin),
            ("minimal load for the time estimate", min_load_for_time_estimate),
        ] {
            ensure!(value.is_finite() && value >= Watts::ZERO, "invalid {name}: {value}");
        }
        ensure!(
            battery_capacity.is_finite() && battery_capacity >= WattHours::ZERO,
            "invalid battery capacity: {battery_capacity}",
        );
        ensure!(
            time_to_empty_ceiling.is_finite() && time_to_empty_ceiling > Hours::ZERO,
            "invalid time-to-empty ceiling: {time_to_empty_ceiling}",
        );
        Ok(Self {
            grid_sign,
            grid_noise_threshold,
            battery_noise_threshold,
            inferred_battery_margin,
            battery_capacity,
            min_load_for_time_estimate,
            time_to_empty_ceiling,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_ok() -> Result {
        let config = DerivationConfig::builder()
            .grid_sign(GridSign::ImportPositive)
            .battery_capacity(WattHours(12000.0))
            .build()?;
        assert_eq!(config.grid_noise_threshold, Watts(20.0));
        assert_eq!(config.battery_noise_threshold, Watts(20.0));
        assert_eq!(config.min_load_for_time_estimate, Watts(20.0));
        assert_eq!(config.time_to_empty_ceiling, Hours(48.0));
        Ok(())
    }

    #[test]
    fn negative_threshold_rejected() {
        let result = DerivationConfig::builder()
            .grid_sign(GridSign::ImportPositive)
            .battery_capacity(WattHours(12000.0))
            .grid_noise_threshold(Watts(-1.0))
            .build();
        assert!(result.is_err());
    }

    #[test]
    fn nan_capacity_rejected() {
        let result = DerivationConfig::builder()
            .grid_sign(GridSign::ExportPositive)
            .battery_capacity(WattHours(f64::NAN))
            .build();
        assert!(result.is_err());
    }

    #[test]
    fn zero_ceiling_rejected() {
        let result = DerivationConfig::builder()
            .grid_sign(GridSign::ExportPositive)
            .battery_capacity(WattHours(5000.0))
            .time_to_empty_ceiling(Hours::ZERO)
            .build();
        assert!(result.is_err());
    }

    #[test]
    fn from_import_is_positive_ok() {
        assert_eq!(GridSign::from_import_is_positive(true), GridSign::ImportPositive);
        assert_eq!(GridSign::from_import_is_positive(false), GridSign::ExportPositive);
    }

    #[test]
    fn normalize_ok() {
        assert_eq!(GridSign::ImportPositive.normalize(Watts(300.0)), Watts(300.0));
        assert_eq!(GridSign::ExportPositive.normalize(Watts(300.0)), Watts(-300.0));
    }
}
