//! Reusable UI components

mod button;
mod dialog;
mod field;

pub use button::{button_width, render_button};
pub use dialog::{dialog_area, hint_row, render_dialog, DialogConfig};
pub use field::{draw_checkbox, draw_field, FieldMark};
