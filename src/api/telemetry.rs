use std::time::Duration;

use reqwest::Url;
use serde::Deserialize;

use crate::{
    core::snapshot::TelemetrySnapshot,
    prelude::*,
    quantity::{percentage::Percentage, power::Watts},
};

/// Sign convention of the battery power in a telemetry payload.
#[derive(Copy, Clone, Debug, Eq, PartialEq, clap::ValueEnum)]
pub enum BatterySign {
    /// Positive battery power means charging.
    ChargePositive,

    /// Positive battery power means discharging.
    ChargeNegative,
}

impl BatterySign {
    /// Convert the reported power so that positive is charging.
    pub fn normalize(self, power: Watts) -> Watts {
        match self {
            Self::ChargePositive => power,
            Self::ChargeNegative => -power,
        }
    }
}

pub struct Client {
    inner: reqwest::Client,
    url: Url,
    battery_sign: BatterySign,
}

impl Client {
    pub fn new(url: Url, timeout: Duration, battery_sign: BatterySign) -> Result<Self> {
        let inner = reqwest::Client::builder().user_agent("sunflow").timeout(timeout).build()?;
        Ok(Self { inner, url, battery_sign })
    }

    /// Fetch the current telemetry.
    #[instrument(skip_all, fields(url = %self.url))]
    pub async fn get_snapshot(&self) -> Result<TelemetrySnapshot> {
        let payload: Payload = self
            .inner
            .get(self.url.clone())
            .send()
            .await
            .with_context(|| format!("failed to request the telemetry from `{}`", self.url))?
            .error_for_status()
            .with_context(|| format!("`{}` responded with an error", self.url))?
            .json()
            .await
            .with_context(|| format!("failed to deserialize the response from `{}`", self.url))?;
        let snapshot = payload.into_snapshot(self.battery_sign);
        debug!(
            solar = ?snapshot.solar_power,
            battery_percent = ?snapshot.battery_percent,
            grid = ?snapshot.grid_flow,
            "fetched",
        );
        Ok(snapshot)
    }
}

/// Telemetry document as served by the known data sources.
#[derive(Deserialize)]
#[serde(
    untagged,
    expecting = "a telemetry document with at least the solar power, battery percentage and grid flow"
)]
pub enum Payload {
    /// Inverter bridge: flat readings under `derived`, with raw registers alongside.
    ///
    /// The inverter registers carry no solar reading, so the bridge must merge it in.
    Bridge { derived: TelemetrySnapshot },

    /// Canonical snapshot, as is.
    Flat(TelemetrySnapshot),

    /// Dashboard feed: one nested object per channel.
    Dashboard(DashboardReadings),
}

impl Payload {
    pub fn into_snapshot(self, battery_sign: BatterySign) -> TelemetrySnapshot {
        match self {
            Self::Bridge { derived: snapshot } | Self::Flat(snapshot) => TelemetrySnapshot {
                battery_power: snapshot.battery_power.map(|power| battery_sign.normalize(power)),
                ..snapshot
            },
            Self::Dashboard(readings) => TelemetrySnapshot {
                solar_power: readings.solar.power,
                battery_percent: readings.battery.percent,
                battery_power: readings.battery.power.map(|power| battery_sign.normalize(power)),
                grid_flow: readings.grid.flow,
                home_load: readings.home.map(|home| home.power),
                inverter_power: None,
            },
        }
    }
}

#[derive(Deserialize)]
pub struct DashboardReadings {
    solar: SolarReadings,
    battery: BatteryReadings,
    grid: GridReadings,
    home: Option<HomeReadings>,
}

#[derive(Deserialize)]
struct SolarReadings {
    #[serde(rename = "power_w")]
    power: Watts,
}

#[derive(Deserialize)]
struct BatteryReadings {
    percent: Percentage,

    #[serde(rename = "power_w", default)]
    power: Option<Watts>,
}

#[derive(Deserialize)]
struct GridReadings {
    #[serde(rename = "flow_w")]
    flow: Watts,
}

#[derive(Deserialize)]
struct HomeReadings {
    #[serde(rename = "power_w")]
    power: Watts,
}
