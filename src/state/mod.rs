//! Application state module

mod focus;
pub mod forms;
mod ui_area;

pub use focus::*;
pub use ui_area::*;
