//! Screen shown once the page navigated to its confirmation location

use super::components::{dialog_area, render_dialog, DialogConfig};
use crate::app::App;
use ratatui::{layout::Rect, style::Color, Frame};

const MESSAGE: &str = "Ďakujeme za vašu správu. Ozveme sa vám čo najskôr.";

pub fn draw(frame: &mut Frame, area: Rect, app: &App) {
    let location = app.browser.location().unwrap_or_default();
    let message = format!("{MESSAGE}\n\n→ {location}");
    let config = DialogConfig {
        title: "Správa odoslaná",
        title_color: Color::Green,
        border_color: Color::Green,
        message: &message,
        hint: None,
        max_width: 60,
    };
    let dialog = dialog_area(area, &config);
    render_dialog(frame, dialog, config);
}
