use chrono::TimeDelta;

use crate::{
    core::{
        config::DerivationConfig,
        snapshot::TelemetrySnapshot,
        state::{BatteryDirection, EnergyState},
    },
    quantity::{energy::WattHours, percentage::Percentage, power::Watts},
};

/// Derive the normalized energy flow from a single telemetry snapshot.
///
/// Pure and total: every input, including NaN and infinities, resolves to a state.
pub fn derive(snapshot: &TelemetrySnapshot, config: &DerivationConfig) -> EnergyState {
    let solar = snapshot.solar_power.finite_or(Watts::ZERO);
    let battery_percent = snapshot
        .battery_percent
        .finite_or(Percentage::EMPTY)
        .clamp(Percentage::EMPTY, Percentage::FULL);

    let raw_grid_flow = config.grid_sign.normalize(snapshot.grid_flow.finite_or(Watts::ZERO));
    let (grid_flow, grid_significant) =
        suppress_noise(raw_grid_flow, config.grid_noise_threshold);

    let home_load = home_load(snapshot, grid_flow);

    let (battery_direction, battery_flow) =
        match snapshot.battery_power.filter(|power| power.is_finite()) {
            Some(battery_power) => {
                measured_battery_flow(battery_power, config.battery_noise_threshold)
            }
            None => inferred_battery_flow(
                solar,
                home_load,
                battery_percent,
                config.inferred_battery_margin,
            ),
        };

    let time_to_empty = (battery_direction == BatteryDirection::Discharging)
        .then(|| time_to_empty(home_load, battery_percent, config))
        .flatten();

    EnergyState {
        solar,
        home_load,
        battery_percent,
        grid_flow,
        grid_significant,
        battery_flow,
        battery_direction,
        time_to_empty,
    }
}

/// Zero out readings within the dead zone, telling whether the reading is significant.
fn suppress_noise(power: Watts, threshold: Watts) -> (Watts, bool) {
    if power.abs() < threshold { (Watts::ZERO, false) } else { (power, true) }
}

/// Reported load when available, otherwise the inverter output plus the net grid import.
fn home_load(snapshot: &TelemetrySnapshot, grid_flow: Watts) -> Watts {
    snapshot
        .home_load
        .filter(|home_load| home_load.is_finite())
        .unwrap_or_else(|| {
            snapshot.inverter_power.filter(|power| power.is_finite()).unwrap_or(Watts::ZERO)
                + grid_flow
        })
        .max(Watts::ZERO)
}

fn measured_battery_flow(battery_power: Watts, threshold: Watts) -> (BatteryDirection, Watts) {
    if battery_power > threshold {
        (BatteryDirection::Charging, battery_power)
    } else if battery_power < -threshold {
        (BatteryDirection::Discharging, battery_power)
    } else {
        (BatteryDirection::Idle, Watts::ZERO)
    }
}

/// Guess the battery flow from the solar surplus when the battery power is not reported.
///
/// The surplus stands in for the battery power, so the resulting state is indistinguishable
/// from a measured one.
fn inferred_battery_flow(
    solar: Watts,
    home_load: Watts,
    battery_percent: Percentage,
    margin: Watts,
) -> (BatteryDirection, Watts) {
    let surplus = solar - home_load;
    if surplus > margin {
        (BatteryDirection::Charging, surplus)
    } else if surplus < -margin && battery_percent > Percentage::EMPTY {
        (BatteryDirection::Discharging, surplus)
    } else {
        (BatteryDirection::Idle, Watts::ZERO)
    }
}

/// Stored energy divided by the home load, when the load is large enough to be meaningful
/// and the result is below the ceiling.
fn time_to_empty(
    home_load: Watts,
    battery_percent: Percentage,
    config: &DerivationConfig,
) -> Option<TimeDelta> {
    if home_load <= config.min_load_for_time_estimate {
        return None;
    }
    let capacity = config.battery_capacity.finite_or(WattHours::ZERO).max(WattHours::ZERO);
    let stored_energy = capacity * battery_percent;
    let hours = stored_energy / home_load;
    if hours < config.time_to_empty_ceiling { hours.to_time_delta() } else { None }
}
