mod derivation;
mod derive;
mod show;
mod telemetry;
mod watch;

use clap::{Parser, Subcommand};

use crate::cli::{derive::DeriveArgs, show::ShowArgs, watch::WatchArgs};

#[derive(Parser)]
#[command(author, version, about, propagate_version = true)]
#[must_use]
pub struct Args {
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand)]
pub enum Command {
    /// Poll the telemetry endpoint and keep rendering the energy flow.
    #[clap(name = "watch")]
    Watch(Box<WatchArgs>),

    /// Fetch the telemetry once and render the energy flow.
    #[clap(name = "show")]
    Show(Box<ShowArgs>),

    /// Derive the energy flow from a telemetry document on a file or standard input.
    #[clap(name = "derive")]
    Derive(Box<DeriveArgs>),
}
