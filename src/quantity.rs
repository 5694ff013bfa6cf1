#[macro_use]
mod macros;

pub mod energy;
pub mod percentage;
pub mod power;
pub mod time;
