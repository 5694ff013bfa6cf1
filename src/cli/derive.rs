use std::{fs, io, path::PathBuf};

use clap::Parser;

use crate::{
    api::telemetry::Payload,
    cli::{derivation::DerivationArgs, telemetry::BatterySignArgs},
    core::derivation::derive,
    prelude::*,
};

#[derive(Parser)]
pub struct DeriveArgs {
    /// Telemetry document, standard input if omitted.
    input: Option<PathBuf>,

    #[clap(flatten)]
    battery_sign: BatterySignArgs,

    #[clap(flatten)]
    derivation: DerivationArgs,
}

impl DeriveArgs {
    pub fn run(self) -> Result {
        let config = self.derivation.to_config()?;
        let body = match &self.input {
            Some(path) => fs::read_to_string(path)
                .with_context(|| format!("failed to read `{}`", path.display()))?,
            None => io::read_to_string(io::stdin()).context("failed to read the standard input")?,
        };
        let snapshot = serde_json::from_str::<Payload>(&body)
            .context("failed to parse the telemetry")?
            .into_snapshot(self.battery_sign.battery_sign);
        let state = derive(&snapshot, &config);
        println!("{}", serde_json::to_string_pretty(&state)?);
        Ok(())
    }
}
