//! Card-style table, one row per channel.

use std::time::Duration;

use comfy_table::{Attribute, Cell, CellAlignment, Color, Table, modifiers, presets};

use crate::{
    core::state::{BatteryDirection, EnergyState},
    fmt::CompactDuration,
    monitor::Reading,
    quantity::power::Watts,
};

pub fn build_table(reading: &Reading) -> Table {
    let mut table = Table::new();
    table
        .load_preset(presets::UTF8_FULL_CONDENSED)
        .apply_modifier(modifiers::UTF8_ROUND_CORNERS)
        .enforce_styling();

    match reading {
        Reading::Live(state) => {
            add_state_rows(&mut table, state);
        }
        Reading::LastKnown { state, age } => {
            add_state_rows(&mut table, state);
            let age = humantime::format_duration(Duration::from_secs(age.as_secs()));
            table.add_row(vec![
                Cell::new(format!("Stale, updated {age} ago"))
                    .fg(Color::DarkYellow)
                    .add_attribute(Attribute::Italic),
            ]);
        }
        Reading::Offline { last_seen: None } => {
            table.add_row(vec![Cell::new("Offline / no data").fg(Color::Red)]);
        }
        Reading::Offline { last_seen: Some(age) } => {
            let age = humantime::format_duration(Duration::from_secs(age.as_secs()));
            table.add_row(vec![Cell::new(format!("Offline / no data since {age}")).fg(Color::Red)]);
        }
    }
    table
}

fn add_state_rows(table: &mut Table, state: &EnergyState) {
    table.set_header(vec!["Channel", "Power", "Flow"]);

    table.add_row(vec![
        Cell::new("Solar"),
        Cell::new(state.solar).set_alignment(CellAlignment::Right),
        if state.solar > Watts::ZERO {
            Cell::new("Producing").fg(Color::Yellow)
        } else {
            Cell::new("Idle").add_attribute(Attribute::Dim)
        },
    ]);

    table.add_row(vec![
        Cell::new("Home"),
        Cell::new(state.home_load).set_alignment(CellAlignment::Right),
        Cell::new("Consuming").fg(Color::Blue),
    ]);

    let battery_flow = match (state.battery_direction, state.time_to_empty) {
        (BatteryDirection::Discharging, Some(time_to_empty)) => {
            format!("Discharging, empty in {}", CompactDuration(time_to_empty))
        }
        (direction, _) => direction.to_string(),
    };
    table.add_row(vec![
        Cell::new("Battery"),
        Cell::new(state.battery_percent).set_alignment(CellAlignment::Right),
        Cell::new(battery_flow).fg(state.battery_direction.color()),
    ]);

    table.add_row(vec![
        Cell::new("Grid"),
        Cell::new(state.grid_flow.abs()).set_alignment(CellAlignment::Right),
        match state.grid_direction() {
            Some(direction) => Cell::new(direction).fg(direction.color()),
            None => Cell::new("Idle").add_attribute(Attribute::Dim),
        },
    ]);

    if state.is_battery_significant() {
        table.add_row(vec![
            Cell::new("Battery flow").add_attribute(Attribute::Dim),
            Cell::new(state.battery_flow.abs())
                .set_alignment(CellAlignment::Right)
                .add_attribute(Attribute::Dim),
            Cell::new(""),
        ]);
    }
}
