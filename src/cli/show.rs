use clap::Parser;

use crate::{
    cli::{derivation::DerivationArgs, telemetry::TelemetryArgs},
    core::derivation::derive,
    monitor::Reading,
    prelude::*,
    render::widget,
};

#[derive(Parser)]
pub struct ShowArgs {
    /// Print the derived state as JSON instead of a table.
    #[clap(long)]
    json: bool,

    #[clap(flatten)]
    telemetry: TelemetryArgs,

    #[clap(flatten)]
    derivation: DerivationArgs,
}

impl ShowArgs {
    pub async fn run(self) -> Result {
        let config = self.derivation.to_config()?;
        let result = self.telemetry.new_client()?.get_snapshot().await;

        if self.json {
            let state = derive(&result?, &config);
            println!("{}", serde_json::to_string_pretty(&state)?);
            return Ok(());
        }

        // A single poll has no history: it is either live or offline.
        match result {
            Ok(snapshot) => {
                let reading = Reading::Live(derive(&snapshot, &config));
                println!("{}", widget::build_table(&reading));
                Ok(())
            }
            Err(error) => {
                println!("{}", widget::build_table(&Reading::Offline { last_seen: None }));
                Err(error)
            }
        }
    }
}
