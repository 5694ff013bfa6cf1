use std::time::{Duration, Instant};

use clap::Parser;
use tokio::time::{MissedTickBehavior, interval};

use crate::{
    cli::{derivation::DerivationArgs, telemetry::TelemetryArgs},
    core::derivation::derive,
    fmt::CompactPower,
    monitor::Monitor,
    prelude::*,
    render::{hud, widget},
};

/// Rendering surface, each with its own polling cadence and freshness window.
#[derive(Copy, Clone, Debug, Eq, PartialEq, clap::ValueEnum)]
pub enum Surface {
    /// Live single-line HUD.
    Hud,

    /// Periodically refreshed widget table.
    Widget,
}

impl Surface {
    pub const fn default_polling_interval(self) -> Duration {
        match self {
            Self::Hud => Duration::from_secs(3),
            Self::Widget => Duration::from_secs(300),
        }
    }

    pub const fn default_freshness_window(self) -> Duration {
        match self {
            Self::Hud => Duration::from_secs(6),
            Self::Widget => Duration::from_secs(600),
        }
    }
}

#[derive(Parser)]
pub struct WatchArgs {
    #[clap(long, env = "SURFACE", value_enum, default_value = "hud")]
    surface: Surface,

    /// Defaults to the surface's own interval.
    #[clap(long, env = "POLLING_INTERVAL")]
    polling_interval: Option<humantime::Duration>,

    /// Show the last known state for this long after the last successful poll.
    ///
    /// Must be longer than the polling interval. Defaults to the surface's own window.
    #[clap(long, env = "FRESHNESS_WINDOW")]
    freshness_window: Option<humantime::Duration>,

    #[clap(flatten)]
    telemetry: TelemetryArgs,

    #[clap(flatten)]
    derivation: DerivationArgs,
}

impl WatchArgs {
    /// Polling interval and freshness window.
    ///
    /// The window must outlast the interval, otherwise a single failed poll
    /// would skip the last known state and go straight offline.
    fn timing(&self) -> Result<(Duration, Duration)> {
        let polling_interval = self
            .polling_interval
            .map_or_else(|| self.surface.default_polling_interval(), Into::into);
        let freshness_window = self
            .freshness_window
            .map_or_else(|| self.surface.default_freshness_window(), Into::into);
        ensure!(!polling_interval.is_zero(), "the polling interval must be positive");
        ensure!(
            freshness_window > polling_interval,
            "the freshness window ({}) must be longer than the polling interval ({})",
            humantime::format_duration(freshness_window),
            humantime::format_duration(polling_interval),
        );
        Ok((polling_interval, freshness_window))
    }

    pub async fn run(self) -> Result {
        let config = self.derivation.to_config()?;
        let client = self.telemetry.new_client()?;
        let (polling_interval, freshness_window) = self.timing()?;

        let mut monitor = Monitor::new(freshness_window);
        let mut interval = interval(polling_interval);
        interval.set_missed_tick_behavior(MissedTickBehavior::Delay);

        info!(surface = ?self.surface, ?polling_interval, ?freshness_window, "watching…");
        loop {
            interval.tick().await;

            match client.get_snapshot().await {
                Ok(snapshot) => {
                    let state = derive(&snapshot, &config);
                    debug!(
                        grid = %CompactPower(state.grid_flow),
                        home = %CompactPower(state.home_load),
                        battery = %state.battery_direction,
                        "derived",
                    );
                    monitor.record_success(Instant::now(), state);
                }
                Err(error) => {
                    warn!("failed to poll the telemetry: {error:#}");
                    monitor.record_failure();
                }
            }

            let reading = monitor.reading(Instant::now());
            match self.surface {
                Surface::Hud => println!("{}", hud::render(&reading)),
                Surface::Widget => println!("{}", widget::build_table(&reading)),
            }
        }
    }
}
