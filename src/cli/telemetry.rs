use clap::Parser;
use reqwest::Url;

use crate::{
    api::telemetry::{BatterySign, Client},
    prelude::*,
};

#[derive(Parser)]
pub struct TelemetryArgs {
    /// Telemetry JSON endpoint.
    #[clap(
        long = "telemetry-url",
        env = "TELEMETRY_URL",
        default_value = "http://127.0.0.1:8003/data"
    )]
    pub url: Url,

    #[clap(long = "request-timeout", env = "REQUEST_TIMEOUT", default_value = "3s")]
    pub timeout: humantime::Duration,

    #[clap(flatten)]
    pub battery_sign: BatterySignArgs,
}

impl TelemetryArgs {
    pub fn new_client(&self) -> Result<Client> {
        Client::new(self.url.clone(), self.timeout.into(), self.battery_sign.battery_sign)
    }
}

#[derive(Copy, Clone, Parser)]
pub struct BatterySignArgs {
    /// Sign convention of the battery power reported by the source.
    #[clap(
        long = "battery-sign",
        env = "BATTERY_SIGN",
        value_enum,
        default_value = "charge-positive"
    )]
    pub battery_sign: BatterySign,
}
