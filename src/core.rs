pub mod config;
pub mod derivation;
pub mod snapshot;
pub mod state;
