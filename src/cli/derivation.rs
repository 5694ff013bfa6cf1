//! Derivation parameters, one set per rendering surface.

use clap::Parser;

use crate::{
    core::config::{DerivationConfig, GridSign},
    prelude::*,
    quantity::{energy::WattHours, power::Watts, time::Hours},
};

/// Sign convention of the raw grid flow, either as a named convention or as a flag.
///
/// There is no default: confirm it against the actual data source.
#[derive(Copy, Clone, Parser)]
#[group(required = true, multiple = false)]
pub struct GridSignArgs {
    #[clap(long = "grid-sign", env = "GRID_SIGN", value_enum)]
    pub grid_sign: Option<GridSign>,

    /// Whether the raw grid flow is already positive on import.
    #[clap(long = "grid-import-is-positive", env = "GRID_IMPORT_IS_POSITIVE")]
    pub grid_import_is_positive: Option<bool>,
}

impl GridSignArgs {
    pub fn grid_sign(self) -> Result<GridSign> {
        self.grid_sign
            .or_else(|| self.grid_import_is_positive.map(GridSign::from_import_is_positive))
            .context("the grid sign convention is not set")
    }
}

#[derive(Parser)]
pub struct DerivationArgs {
    #[clap(flatten)]
    pub grid_sign: GridSignArgs,

    /// Nominal full-charge battery energy.
    #[clap(long = "battery-capacity-watt-hours", env = "BATTERY_CAPACITY_WATT_HOURS")]
    pub battery_capacity: WattHours,

    /// Grid flow below this magnitude is reported as zero.
    #[clap(
        long = "grid-noise-threshold-watts",
        env = "GRID_NOISE_THRESHOLD_WATTS",
        default_value = "20"
    )]
    pub grid_noise_threshold: Watts,

    /// Battery power below this magnitude is reported as idle.
    #[clap(
        long = "battery-noise-threshold-watts",
        env = "BATTERY_NOISE_THRESHOLD_WATTS",
        default_value = "20"
    )]
    pub battery_noise_threshold: Watts,

    /// Solar surplus or deficit needed to guess the battery direction
    /// when the source does not report the battery power.
    #[clap(
        long = "inferred-battery-margin-watts",
        env = "INFERRED_BATTERY_MARGIN_WATTS",
        default_value = "50"
    )]
    pub inferred_battery_margin: Watts,

    #[clap(
        long = "min-load-for-time-estimate-watts",
        env = "MIN_LOAD_FOR_TIME_ESTIMATE_WATTS",
        default_value = "20"
    )]
    pub min_load_for_time_estimate: Watts,

    /// Longer time-to-empty estimates are not shown.
    #[clap(long = "time-to-empty-ceiling", env = "TIME_TO_EMPTY_CEILING", default_value = "48h")]
    pub time_to_empty_ceiling: humantime::Duration,
}

impl DerivationArgs {
    pub fn to_config(&self) -> Result<DerivationConfig> {
        DerivationConfig::builder()
            .grid_sign(self.grid_sign.grid_sign()?)
            .battery_capacity(self.battery_capacity)
            .grid_noise_threshold(self.grid_noise_threshold)
            .battery_noise_threshold(self.battery_noise_threshold)
            .inferred_battery_margin(self.inferred_battery_margin)
            .min_load_for_time_estimate(self.min_load_for_time_estimate)
            .time_to_empty_ceiling(Hours::from(*self.time_to_empty_ceiling))
            .build()
            .context("invalid derivation parameters")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Parser)]
    struct Args {
        #[clap(flatten)]
        derivation: DerivationArgs,
    }

    #[test]
    fn defaults_ok() -> Result {
        let args = Args::try_parse_from([
            "sunflow",
            "--grid-sign",
            "export-positive",
            "--battery-capacity-watt-hours",
            "12000",
        ])?;
        let config = args.derivation.to_config()?;
        assert_eq!(config.grid_sign, GridSign::ExportPositive);
        assert_eq!(config.battery_capacity, WattHours(12000.0));
        assert_eq!(config.grid_noise_threshold, DerivationConfig::DEFAULT_GRID_NOISE_THRESHOLD);
        assert_eq!(config.time_to_empty_ceiling, Hours(48.0));
        Ok(())
    }

    #[test]
    fn grid_sign_is_required() {
        assert!(Args::try_parse_from(["sunflow", "--battery-capacity-watt-hours", "12000"]).is_err());
    }

    #[test]
    fn grid_import_is_positive_ok() -> Result {
        for (flag, expected) in
            [("true", GridSign::ImportPositive), ("false", GridSign::ExportPositive)]
        {
            let args = Args::try_parse_from([
                "sunflow",
                "--grid-import-is-positive",
                flag,
                "--battery-capacity-watt-hours",
                "12000",
            ])?;
            assert_eq!(args.derivation.to_config()?.grid_sign, expected);
        }
        Ok(())
    }

    #[test]
    fn conflicting_grid_signs_are_rejected() {
        let result = Args::try_parse_from([
            "sunflow",
            "--grid-sign",
            "import-positive",
            "--grid-import-is-positive",
            "false",
            "--battery-capacity-watt-hours",
            "12000",
        ]);
        assert!(result.is_err());
    }

    #[test]
    fn invalid_threshold_is_rejected() -> Result {
        let args = Args::try_parse_from([
            "sunflow",
            "--grid-sign",
            "import-positive",
            "--battery-capacity-watt-hours",
            "12000",
            "--grid-noise-threshold-watts=-5",
        ])?;
        assert!(args.derivation.to_config().is_err());
        Ok(())
    }
}
