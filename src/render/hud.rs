//! Compact single-line heads-up display.

use std::time::Duration;

use crate::{
    core::state::{BatteryDirection, EnergyState, GridDirection},
    fmt::{CompactDuration, CompactPower},
    monitor::Reading,
    quantity::{percentage::Percentage, power::Watts},
};

const LOW_BATTERY: Percentage = Percentage(20.0);

#[must_use]
pub fn render(reading: &Reading) -> String {
    match reading {
        Reading::Live(state) => render_state(state),
        Reading::LastKnown { state, age } => {
            let age = Duration::from_secs(age.as_secs());
            format!("{} · {} ago", render_state(state), humantime::format_duration(age))
        }
        Reading::Offline { .. } => "⏳ Connecting…".to_string(),
    }
}

#[must_use]
pub fn render_state(state: &EnergyState) -> String {
    let grid_arrow = match state.grid_direction() {
        Some(GridDirection::Import) => '↓',
        Some(GridDirection::Export) => '↑',
        None => ' ',
    };
    let solar_icon = if state.solar > Watts::ZERO { "☀️" } else { "🌙" };
    let battery_icon = if state.battery_percent > LOW_BATTERY { "🔋" } else { "🪫" };
    let battery_arrow = match state.battery_direction {
        BatteryDirection::Charging => '↑',
        BatteryDirection::Discharging => '↓',
        BatteryDirection::Idle => ' ',
    };
    let time_to_empty = state
        .time_to_empty
        .map(|time_to_empty| format!(" ({})", CompactDuration(time_to_empty)))
        .unwrap_or_default();
    let line = format!(
        "{grid_arrow}🗼{} 🏠{} {solar_icon}{} {battery_icon}{:.0}%{time_to_empty} {battery_arrow}",
        CompactPower(state.grid_flow.abs()),
        CompactPower(state.home_load),
        CompactPower(state.solar),
        state.battery_percent.0,
    );
    line.trim().to_string()
}
