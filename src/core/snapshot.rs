use serde::{Deserialize, Serialize};

use crate::quantity::{percentage::Percentage, power::Watts};

/// Raw telemetry as obtained by a single poll.
///
/// The only normalization a snapshot must already have is the battery sign:
/// positive battery power is charging. The grid sign is left as reported.
#[must_use]
#[derive(Copy, Clone, Debug, PartialEq, Eq, Deserialize, Serialize)]
pub struct TelemetrySnapshot {
    #[serde(rename = "solar_power_w")]
    pub solar_power: Watts,

    pub battery_percent: Percentage,

    /// Positive is charging, negative is discharging.
    #[serde(rename = "battery_power_w", default, skip_serializing_if = "Option::is_none")]
    pub battery_power: Option<Watts>,

    /// Signed as the source reports it.
    #[serde(rename = "grid_flow_w")]
    pub grid_flow: Watts,

    #[serde(rename = "home_load_w", default, skip_serializing_if = "Option::is_none")]
    pub home_load: Option<Watts>,

    #[serde(rename = "inverter_power_w", default, skip_serializing_if = "Option::is_none")]
    pub inverter_power: Option<Watts>,
}
