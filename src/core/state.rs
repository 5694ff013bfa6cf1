use std::fmt::{Display, Formatter};

use chrono::TimeDelta;
use comfy_table::Color;
use serde::Serialize;
use serde_with::{DurationSeconds, serde_as};

use crate::quantity::{percentage::Percentage, power::Watts};

#[derive(Copy, Clone, Debug, Eq, PartialEq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum BatteryDirection {
    /// The battery is storing energy.
    Charging,

    /// The battery is supplying energy.
    Discharging,

    /// No flow above the noise threshold.
    Idle,
}

impl Display for BatteryDirection {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Charging => write!(f, "Charging"),
            Self::Discharging => write!(f, "Discharging"),
            Self::Idle => write!(f, "Idle"),
        }
    }
}

impl BatteryDirection {
    pub const fn color(self) -> Color {
        match self {
            Self::Charging => Color::Green,
            Self::Discharging => Color::DarkYellow,
            Self::Idle => Color::Reset,
        }
    }
}

#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub enum GridDirection {
    Import,
    Export,
}

impl Display for GridDirection {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Import => write!(f, "Import"),
            Self::Export => write!(f, "Export"),
        }
    }
}

impl GridDirection {
    pub const fn color(self) -> Color {
        match self {
            Self::Import => Color::Red,
            Self::Export => Color::Green,
        }
    }
}

/// Normalized energy flow, ready to be rendered as is.
#[must_use]
#[serde_as]
#[derive(Copy, Clone, Debug, Eq, PartialEq, Serialize)]
pub struct EnergyState {
    #[serde(rename = "solar_w")]
    pub solar: Watts,

    /// Never negative.
    #[serde(rename = "home_load_w")]
    pub home_load: Watts,

    pub battery_percent: Percentage,

    /// Positive is import, negative is export, exactly zero within the dead zone.
    #[serde(rename = "grid_flow_w")]
    pub grid_flow: Watts,

    pub grid_significant: bool,

    /// Positive is charging, negative is discharging, exactly zero when idle.
    #[serde(rename = "battery_flow_w")]
    pub battery_flow: Watts,

    pub battery_direction: BatteryDirection,

    /// Only present while discharging under a meaningful load.
    #[serde_as(as = "Option<DurationSeconds<i64>>")]
    #[serde(rename = "time_to_empty_secs")]
    pub time_to_empty: Option<TimeDelta>,
}

impl EnergyState {
    pub fn grid_direction(&self) -> Option<GridDirection> {
        if !self.grid_significant || self.grid_flow == Watts::ZERO {
            None
        } else if self.grid_flow > Watts::ZERO {
            Some(GridDirection::Import)
        } else {
            Some(GridDirection::Export)
        }
    }

    pub fn is_battery_significant(&self) -> bool {
        self.battery_direction != BatteryDirection::Idle
    }
}
