//! Independent consumers of the derived state.

pub mod hud;
pub mod widget;
